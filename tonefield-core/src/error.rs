use std::path::PathBuf;

use thiserror::Error;

use crate::target::Dimension;

/// Errors raised at the fallible edges of the crate: input validation,
/// configuration loading and hit point record construction.
///
/// The resolver and impact calculator themselves are total and never fail.
#[derive(Debug, Error)]
pub enum TonefieldError {
    #[error("{dimension} reading is not a finite number: {value}")]
    NonFiniteReading { dimension: Dimension, value: f64 },

    #[error("invalid physics configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown note name `{0}`")]
    UnknownNote(String),

    #[error("failed to read configuration from {}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid hit point record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, TonefieldError>;
