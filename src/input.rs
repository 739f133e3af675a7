//! Reading Japanese text from files.
//!
//! - [`file_reader::FileReader`] - byte-level checks and strict UTF-8 decoding
//! - [`read_japanese_file`] - read a file with the default checks

pub mod file_reader;

pub use file_reader::{FileReader, read_japanese_file};
