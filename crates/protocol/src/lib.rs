pub mod codec;
mod envelope;

pub use envelope::{ACTION_TOUCH, Envelope};

use serde::{Deserialize, Serialize};

/// Requests understood by the local broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrokerRequest {
    /// Deliver `body` as one message to `topic`.
    Publish { topic: String, body: String },
    Ping,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrokerResponse {
    /// Message accepted; `message_id` is the broker's receipt for it.
    Published { message_id: String },
    Pong,
    Status(String),
    Error(String),
}
