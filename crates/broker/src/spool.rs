use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use crossbeam::channel::{self, Sender};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// One accepted message, stored as a single JSON line in `<spool>/<topic>.jsonl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoolRecord {
    pub message_id: String,
    pub topic: String,
    pub received_at: DateTime<Utc>,
    pub body: String,
}

struct SpoolJob {
    topic: String,
    body: String,
    reply: Sender<Result<String>>,
}

pub fn spool_path(dir: &Path, topic: &str) -> PathBuf {
    dir.join(format!("{topic}.jsonl"))
}

/// Handle to the spool-writer thread.
///
/// Client threads submit messages through a channel; a single writer owns every topic
/// file, so lines from concurrent publishers never interleave.
pub struct Spool {
    dir: PathBuf,
    tx: Option<Sender<SpoolJob>>,
    writer: Option<JoinHandle<()>>,
}

impl Spool {
    pub fn start(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create spool directory {}", dir.display()))?;

        let (tx, rx) = channel::unbounded::<SpoolJob>();
        let mut writer = SpoolWriter::new(dir.clone());

        let handle = thread::Builder::new()
            .name("spool-writer".into())
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    let result = writer.write(&job.topic, &job.body);
                    if let Err(err) = &result {
                        error!("Failed to spool message for topic {}: {err:#}", job.topic);
                    }
                    // The client may have hung up; nothing left to tell it.
                    let _ = job.reply.send(result);
                }
                debug!("spool writer exiting");
            })
            .context("Failed to spawn spool writer thread")?;

        Ok(Self {
            dir,
            tx: Some(tx),
            writer: Some(handle),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append `body` to the topic's spool file and return the new message id.
    pub fn append(&self, topic: &str, body: &str) -> Result<String> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow!("spool is shut down"))?;

        let (reply_tx, reply_rx) = channel::bounded(1);
        tx.send(SpoolJob {
            topic: topic.to_owned(),
            body: body.to_owned(),
            reply: reply_tx,
        })
        .map_err(|_| anyhow!("spool writer is not running"))?;

        reply_rx
            .recv()
            .map_err(|_| anyhow!("spool writer stopped before replying"))?
    }
}

impl Drop for Spool {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain and exit.
        self.tx.take();
        if let Some(handle) = self.writer.take()
            && handle.join().is_err()
        {
            error!("spool writer thread panicked");
        }
    }
}

struct SpoolWriter {
    dir: PathBuf,
    files: HashMap<String, File>,
    seq: u64,
}

impl SpoolWriter {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            files: HashMap::new(),
            seq: 0,
        }
    }

    fn next_message_id(&mut self, now: DateTime<Utc>) -> String {
        self.seq += 1;
        format!("{:x}-{}", now.timestamp_millis(), self.seq)
    }

    fn write(&mut self, topic: &str, body: &str) -> Result<String> {
        let received_at = Utc::now();
        let record = SpoolRecord {
            message_id: self.next_message_id(received_at),
            topic: topic.to_owned(),
            received_at,
            body: body.to_owned(),
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let file = match self.files.entry(topic.to_owned()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let path = spool_path(&self.dir, topic);
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("Failed to open spool file {}", path.display()))?;
                e.insert(file)
            }
        };

        file.write_all(line.as_bytes())?;
        file.flush()?;

        debug!("spooled {} to topic {topic}", record.message_id);
        Ok(record.message_id)
    }
}

#[cfg(test)]
#[path = "spool_tests.rs"]
mod tests;
