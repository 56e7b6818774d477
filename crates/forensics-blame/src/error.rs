//! Error types for blamer factories and blamers

/// Errors a factory or blamer may report.
///
/// The resolver never propagates these to its caller; they are recorded in the
/// shared [`FilteredLog`](crate::FilteredLog) and handled according to the
/// configured [`FactoryErrorPolicy`](crate::FactoryErrorPolicy).
#[derive(Debug, thiserror::Error)]
pub enum BlameError {
    #[error("provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("unsupported source control: {message}")]
    Unsupported { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlameError {
    /// Provider error without an underlying cause
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }
}
