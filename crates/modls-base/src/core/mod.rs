pub mod constants;
pub mod error;
pub mod error_codes;
pub mod file_io;
pub mod span;
pub mod text_utils;

pub use error::CoreError;
pub use span::{Point, Span};
