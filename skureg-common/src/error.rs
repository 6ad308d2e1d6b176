//! Error type shared by the registry crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while loading or resolving shared configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed, or a setting is out of range
    #[error("Configuration error: {0}")]
    Config(String),
}
