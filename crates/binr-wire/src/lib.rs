#![warn(clippy::pedantic)]

pub mod error;
pub mod fixed;
pub mod half;
pub mod text;
pub mod varint;

pub use error::WireError;
pub use fixed::Endian;
