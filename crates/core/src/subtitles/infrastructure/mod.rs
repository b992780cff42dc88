pub mod subtitle_file_writer;
