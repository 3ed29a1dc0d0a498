use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CacheError {
    Config(ConfigError),
    Metrics(prometheus::Error),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Config(e) => write!(f, "Invalid cache configuration: {}", e),
            CacheError::Metrics(e) => write!(f, "Failed to register cache metrics: {}", e),
        }
    }
}

impl Error for CacheError {}

impl From<ConfigError> for CacheError {
    fn from(e: ConfigError) -> Self {
        CacheError::Config(e)
    }
}

impl From<prometheus::Error> for CacheError {
    fn from(e: prometheus::Error) -> Self {
        CacheError::Metrics(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Invalid { key: String, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value: {:?}", key, value),
        }
    }
}

impl Error for ConfigError {}
