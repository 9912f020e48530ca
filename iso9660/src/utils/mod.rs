//! Decoding helpers shared by the volume, path table and directory layers

pub mod cursor;
pub mod datetime;
pub mod sector;
pub mod string;

pub use cursor::ReadCursor;
pub use datetime::{DateTime17, DateTime7};
