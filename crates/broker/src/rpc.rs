use std::fs;
use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::Context;
use log::{debug, error, info, warn};
use rebuild_protocol::codec::{FRAME_HEADROOM, read_message_limited, write_message};
use rebuild_protocol::{BrokerRequest, BrokerResponse};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::state::BrokerState;

/// RAII guard that ensures the Unix socket file is removed on shutdown,
/// even if we return early or panic.
struct SocketGuard<'a> {
    path: &'a Path,
}

impl<'a> Drop for SocketGuard<'a> {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(self.path)
            && err.kind() != io::ErrorKind::NotFound
        {
            error!(
                "Failed to remove Unix socket at {} on shutdown: {err}",
                self.path.display()
            );
        }
    }
}

pub fn run_rpc_server(state: Arc<BrokerState>) -> anyhow::Result<()> {
    let socket_path = &state.config.socket_path;

    let shutdown = Arc::new(AtomicBool::new(false));

    // Signal handlers only set the flag; the accept loop observes it.
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&shutdown))
            .with_context(|| format!("Failed to register signal handler for {sig}"))?;
    }

    if let Some(parent) = socket_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create socket directory {}", parent.display())
        })?;
    }

    // Clean up stale socket if it exists.
    if socket_path.exists() {
        fs::remove_file(socket_path).with_context(|| {
            format!(
                "Failed to remove existing socket at {}",
                socket_path.display()
            )
        })?;
    }

    let listener = UnixListener::bind(socket_path)
        .with_context(|| format!("Failed to bind Unix socket at {}", socket_path.display()))?;

    let _socket_guard = SocketGuard {
        path: socket_path.as_path(),
    };

    info!("rebuild broker listening on {}", socket_path.display());

    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("Shutdown signal observed; stopping RPC server.");
            break;
        }

        match listener.accept() {
            Ok((stream, _addr)) => {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    if let Err(err) = handle_client(stream, &state) {
                        error!("Error while handling client: {err:#}");
                    }
                });
            }
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {
                if shutdown.load(Ordering::Relaxed) {
                    info!("Accept interrupted by shutdown signal; exiting accept loop.");
                    break;
                }
                continue;
            }
            Err(err) => {
                error!("Accept error: {err}");
                continue;
            }
        }
    }

    info!(
        "RPC server shutdown complete; {} messages accepted.",
        state.accepted()
    );
    Ok(())
}

/// Largest request frame accepted: the configured body limit plus room for the topic.
pub(crate) fn frame_limit(state: &BrokerState) -> usize {
    state.config.max_message_bytes.saturating_add(FRAME_HEADROOM)
}

fn handle_client(mut stream: UnixStream, state: &BrokerState) -> anyhow::Result<()> {
    let request: BrokerRequest = read_message_limited(&mut stream, frame_limit(state))
        .context("Failed to read BrokerRequest")?;

    let response = handle_request(state, request);

    write_message(&mut stream, &response).context("Failed to write BrokerResponse")
}

pub(crate) fn handle_request(state: &BrokerState, request: BrokerRequest) -> BrokerResponse {
    match request {
        BrokerRequest::Ping => BrokerResponse::Pong,
        BrokerRequest::Status => BrokerResponse::Status(state.status()),
        BrokerRequest::Publish { topic, body } => {
            debug!("Publish request: topic={topic}, {} bytes", body.len());
            match state.publish(&topic, &body) {
                Ok(message_id) => BrokerResponse::Published { message_id },
                Err(e) => {
                    warn!("Rejected message for topic {topic:?}: {e:#}");
                    BrokerResponse::Error(format!("{e:#}"))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
