mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IsoListError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("No entry matching '{pattern}' found at {url}")]
    EntryNotFound { url: String, pattern: String },

    #[error("Directory walk exceeded {max_hops} hops at {url}")]
    WalkTooDeep { url: String, max_hops: usize },

    #[error("Distribution '{0}' is not configured")]
    DistributionNotFound(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Vendor metadata error: {0}")]
    VendorMetadata(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Thread panic: {0}")]
    ThreadPanic(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl From<config::ConfigError> for IsoListError {
    fn from(err: config::ConfigError) -> Self {
        IsoListError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IsoListError>;
