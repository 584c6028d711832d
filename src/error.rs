use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type DumpResult<T> = Result<T, DumpError>;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("cannot render value of type {type_name}")]
    Unsupported { type_name: String },

    #[error("nesting exceeded the configured depth limit of {limit}")]
    DepthLimit { limit: usize },

    #[error("sink write failed after {written} bytes: {source}")]
    Sink {
        written: usize,
        #[source]
        source: io::Error,
    },

    #[error("sink stopped accepting bytes after {written} bytes")]
    ShortWrite { written: usize },

    #[error("invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl DumpError {
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        DumpError::Unsupported {
            type_name: type_name.into(),
        }
    }
}
