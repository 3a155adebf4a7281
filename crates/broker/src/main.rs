use std::sync::Arc;

mod config;
mod rpc;
mod spool;
mod state;

use config::BrokerConfig;
use log::info;
use rebuild_runtime::logging;
use state::BrokerState;

fn main() -> anyhow::Result<()> {
    logging::init().ok();

    let config = BrokerConfig::from_env()?;

    info!(
        "Starting rebuild broker: socket={}, spool={}, max_message_bytes={}",
        config.socket_path.display(),
        config.spool_dir.display(),
        config.max_message_bytes,
    );

    let state = Arc::new(BrokerState::new(config)?);
    rpc::run_rpc_server(state)
}
