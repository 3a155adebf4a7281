use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use rebuild_protocol::codec::{read_message, write_message};
use rebuild_protocol::{BrokerRequest, BrokerResponse};

use crate::transport::{DeliveryReceipt, Destination, Transport};

/// Transport that hands messages to the local `rebuild-broker` over its Unix socket.
///
/// Every request uses a fresh connection.
#[derive(Debug, Clone)]
pub struct SocketTransport {
    socket_path: PathBuf,
}

impl SocketTransport {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    fn request(&self, req: &BrokerRequest) -> Result<BrokerResponse> {
        let mut stream = UnixStream::connect(&self.socket_path).with_context(|| {
            format!(
                "failed to connect to rebuild broker at {}",
                self.socket_path.display()
            )
        })?;

        write_message(&mut stream, req).context("failed to send broker request")?;
        read_message(&mut stream).context("failed to read broker response")
    }

    /// Check that the broker is up and answering.
    pub fn ping(&self) -> Result<()> {
        match self.request(&BrokerRequest::Ping)? {
            BrokerResponse::Pong => Ok(()),
            BrokerResponse::Error(msg) => bail!("broker error: {msg}"),
            other => Err(anyhow!("unexpected broker response: {other:?}")),
        }
    }

    pub fn status(&self) -> Result<String> {
        match self.request(&BrokerRequest::Status)? {
            BrokerResponse::Status(status) => Ok(status),
            BrokerResponse::Error(msg) => bail!("broker error: {msg}"),
            other => Err(anyhow!("unexpected broker response: {other:?}")),
        }
    }
}

impl Transport for SocketTransport {
    fn deliver(&self, destination: &Destination, payload: &str) -> Result<DeliveryReceipt> {
        debug!(
            "delivering {} bytes to topic {} via {}",
            payload.len(),
            destination,
            self.socket_path.display()
        );

        let req = BrokerRequest::Publish {
            topic: destination.as_str().to_owned(),
            body: payload.to_owned(),
        };

        match self.request(&req)? {
            BrokerResponse::Published { message_id } => Ok(DeliveryReceipt::new(message_id)),
            BrokerResponse::Error(msg) => bail!("broker rejected message: {msg}"),
            other => Err(anyhow!("unexpected broker response: {other:?}")),
        }
    }
}

#[cfg(test)]
#[path = "socket_tests.rs"]
mod tests;
