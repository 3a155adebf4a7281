//! Publishes "touch" notifications for changed subjects, one message per batch.
//!
//! A [`BatchPublisher`] splits the subjects it is given into batches of at most
//! [`DEFAULT_BATCH_SIZE`] entries, wraps each batch in an [`Envelope`], and hands the
//! JSON body to a [`Transport`] for delivery to a [`Destination`] topic.

mod error;
mod publisher;
mod socket;
mod transport;

pub use error::PublishError;
pub use publisher::{BatchPublisher, LOG_TARGET, MessageService, batch_count};
pub use rebuild_protocol::Envelope;
pub use rebuild_runtime::DEFAULT_BATCH_SIZE;
pub use socket::SocketTransport;
pub use transport::{DeliveryReceipt, Destination, Transport};
