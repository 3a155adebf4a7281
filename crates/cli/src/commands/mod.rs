pub mod ping;
pub mod publish;

use std::path::PathBuf;

use clap::{Args, Subcommand};
pub use ping::PingArgs;
pub use publish::PublishArgs;
use rebuild_runtime::default_socket_path;

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

/// Exit code for a failed publish or an unreachable broker.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for bad arguments or unreadable input.
pub const EXIT_USAGE: u8 = 2;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish "touch" notifications for subjects read one per line.
    ///
    /// Example:
    ///   rebuild publish --topic derivatives subjects.txt
    ///   printf 's1\ns2\n' | REBUILD_TOPIC=derivatives rebuild publish
    Publish(PublishArgs),

    /// Check that the broker is reachable.
    Ping(PingArgs),
}

#[derive(Debug, Args)]
pub struct BrokerOptions {
    /// Broker socket (defaults to $REBUILD_SOCKET or the cache dir)
    #[arg(long)]
    pub socket_path: Option<PathBuf>,
}

impl BrokerOptions {
    pub fn socket_path(&self) -> PathBuf {
        self.socket_path.clone().unwrap_or_else(default_socket_path)
    }
}
