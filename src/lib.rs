pub mod converter;
pub mod error;
pub mod midi;

pub use converter::{Conversion, ConvertOptions, Converter};
pub use error::Error;
