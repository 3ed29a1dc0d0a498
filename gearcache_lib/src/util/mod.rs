pub mod error;
pub mod markers;
pub mod unset;

pub type DecodeResult<T> = Result<T, error::DecodeError>;
