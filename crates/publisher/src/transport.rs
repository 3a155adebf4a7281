use std::fmt;
use std::sync::Arc;

use anyhow::Result;

/// Topic that notifications are published to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    pub fn new(topic: impl Into<String>) -> Self {
        Self(topic.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier handed back by a transport for a delivered message. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt(String);

impl DeliveryReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that can put one message on a topic.
pub trait Transport {
    /// Deliver `payload` as the body of a single message to `destination`.
    ///
    /// # Errors
    /// Any failure to hand the message over (connection, authorization, size limit,
    /// throttling, ...).
    fn deliver(&self, destination: &Destination, payload: &str) -> Result<DeliveryReceipt>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn deliver(&self, destination: &Destination, payload: &str) -> Result<DeliveryReceipt> {
        (**self).deliver(destination, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn deliver(&self, destination: &Destination, payload: &str) -> Result<DeliveryReceipt> {
        (**self).deliver(destination, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn deliver(&self, destination: &Destination, payload: &str) -> Result<DeliveryReceipt> {
        (**self).deliver(destination, payload)
    }
}
