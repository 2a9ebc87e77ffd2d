//! Error types for the collector library.

use thiserror::Error;

/// Result type alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting sensor metrics.
#[derive(Error, Debug)]
pub enum Error {
    /// The instrumentation provider could not be queried.
    #[error("failed querying {namespace}: {source}")]
    Query {
        /// Instrumentation namespace that was queried.
        namespace: String,
        /// Underlying cause reported by the provider.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Number of label values does not match the descriptor.
    #[error("inconsistent label cardinality for {name}: expected {expected} label values, got {actual}")]
    Cardinality {
        /// Fully-qualified metric name.
        name: String,
        /// Number of variable labels of the descriptor.
        expected: usize,
        /// Number of label values supplied.
        actual: usize,
    },

    /// The receiving end of a channel sink was dropped.
    #[error("metric sink closed")]
    SinkClosed,

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps a provider failure for the given namespace.
    pub fn query(
        namespace: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Query {
            namespace: namespace.into(),
            source: source.into(),
        }
    }
}
