//! Input handling module

pub mod table_reader;

pub use table_reader::{InputFormat, TableReader};
