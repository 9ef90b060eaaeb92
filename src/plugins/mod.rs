//! Mapper backends.

pub mod json_file;
