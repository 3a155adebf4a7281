use log::info;
use rebuild_protocol::Envelope;
use rebuild_runtime::DEFAULT_BATCH_SIZE;

use crate::error::{PublishError, Result};
use crate::transport::{Destination, Transport};

/// Log target for delivery receipts.
pub const LOG_TARGET: &str = "rebuild_publisher";

/// Interface for telling the derivative pipeline which subjects to rebuild.
pub trait MessageService {
    fn publish(&self, subjects: &[String]) -> Result<()>;
}

/// Number of messages needed to publish `len` subjects in batches of `batch_size`.
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size.max(1))
}

/// Publishes `touch` envelopes to one topic, one message per batch of subjects.
///
/// Batches are sent one after another; the first failure aborts the call. Batches that
/// were already delivered are not retracted, so a failed publish may have delivered a
/// prefix of the subjects.
pub struct BatchPublisher<T> {
    transport: T,
    destination: Destination,
    batch_size: usize,
}

impl<T: Transport> BatchPublisher<T> {
    pub fn new(transport: T, destination: Destination) -> Self {
        Self {
            transport,
            destination,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the number of subjects per message. A size of zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Publish `subjects` in order. An empty slice sends nothing.
    pub fn publish<S: AsRef<str>>(&self, subjects: &[S]) -> Result<()> {
        for batch in subjects.chunks(self.batch_size) {
            self.publish_batch(batch)?;
        }
        Ok(())
    }

    fn publish_batch<S: AsRef<str>>(&self, batch: &[S]) -> Result<()> {
        let body = Envelope::touch(batch).to_json()?;

        let receipt = self
            .transport
            .deliver(&self.destination, &body)
            .map_err(PublishError::Delivery)?;

        info!(target: LOG_TARGET, "[MESSAGE ID] {receipt}");
        Ok(())
    }
}

impl<T: Transport> MessageService for BatchPublisher<T> {
    fn publish(&self, subjects: &[String]) -> Result<()> {
        BatchPublisher::publish(self, subjects)
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
