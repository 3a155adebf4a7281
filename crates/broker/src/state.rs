use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, bail};

use crate::config::BrokerConfig;
use crate::spool::Spool;

pub struct BrokerState {
    pub config: BrokerConfig,
    spool: Spool,
    accepted: AtomicU64,
}

/// Topics become file names, so only a conservative character set is allowed.
pub fn validate_topic(topic: &str) -> Result<()> {
    if topic.is_empty() {
        bail!("topic must not be empty");
    }
    if topic.starts_with('.') {
        bail!("invalid topic {topic:?}: must not start with '.'");
    }
    if let Some(c) = topic
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        bail!("invalid topic {topic:?}: character {c:?} not allowed");
    }
    Ok(())
}

impl BrokerState {
    pub fn new(config: BrokerConfig) -> Result<Self> {
        let spool = Spool::start(config.spool_dir.clone())?;

        Ok(Self {
            config,
            spool,
            accepted: AtomicU64::new(0),
        })
    }

    /// Accept one message for `topic`, returning its message id.
    pub fn publish(&self, topic: &str, body: &str) -> Result<String> {
        validate_topic(topic)?;

        let limit = self.config.max_message_bytes;
        if body.len() > limit {
            bail!(
                "message of {} bytes exceeds limit of {limit} bytes",
                body.len()
            );
        }

        let message_id = self.spool.append(topic, body)?;
        self.accepted.fetch_add(1, Ordering::Relaxed);
        Ok(message_id)
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> String {
        format!(
            "socket={}, spool={}, accepted={}",
            self.config.socket_path.display(),
            self.spool.dir().display(),
            self.accepted()
        )
    }
}
