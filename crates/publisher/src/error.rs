use thiserror::Error;

pub type Result<T> = std::result::Result<T, PublishError>;

/// Reasons a publish call stops early.
///
/// Either way, batches delivered before the failure stay delivered.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The envelope could not be encoded as JSON.
    #[error("failed to serialize envelope: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport failed to deliver a batch. Carries the transport's own error.
    #[error(transparent)]
    Delivery(anyhow::Error),
}
