use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum DecodeError {
    // the bytes are not a valid document at all
    Syntax(serde_json::Error),
    // valid document, but not the shape the handler asked for
    Shape(serde_json::Error),
    // an existing cached value could not be turned back into a document for merging
    Encode(serde_json::Error),
    // raised by custom decoders
    Other(Box<dyn Error + Send + Sync>),
}

impl DecodeError {
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, DecodeError::Syntax(_))
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Syntax(e) => write!(f, "Malformed payload: {}", e),
            DecodeError::Shape(e) => write!(f, "Payload does not match the expected shape: {}", e),
            DecodeError::Encode(e) => write!(f, "Failed to encode cached value for merging: {}", e),
            DecodeError::Other(e) => write!(f, "Decoder error: {}", e),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Syntax(e) | DecodeError::Shape(e) | DecodeError::Encode(e) => Some(e),
            DecodeError::Other(e) => Some(e.as_ref()),
        }
    }
}

impl From<Box<dyn Error + Send + Sync>> for DecodeError {
    fn from(e: Box<dyn Error + Send + Sync>) -> Self {
        DecodeError::Other(e)
    }
}
