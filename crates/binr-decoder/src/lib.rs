#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod error;
pub mod source;

pub use config::ReaderConfig;
pub use context::ReadingContext;
pub use error::DecodeError;
pub use source::{ByteSource, ChannelSource, MemorySource, ReaderSource};
