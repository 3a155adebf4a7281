use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use rebuild_runtime::{MAX_MESSAGE_BYTES, default_socket_path, default_spool_dir};

#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Unix domain socket the broker listens on.
    pub socket_path: PathBuf,
    /// Directory holding one `<topic>.jsonl` file per topic.
    pub spool_dir: PathBuf,
    /// Largest message body accepted, in bytes.
    pub max_message_bytes: usize,
}

#[derive(Debug, Parser)]
#[command(name = "rebuild-broker", version, about = "Local message broker for rebuild")]
pub struct Cli {
    /// Path to Unix domain socket (defaults to $REBUILD_SOCKET or the cache dir)
    #[arg(long)]
    pub socket_path: Option<PathBuf>,

    /// Directory where accepted messages are spooled
    #[arg(long)]
    pub spool_dir: Option<PathBuf>,

    /// Largest message body accepted, in bytes
    #[arg(long, default_value_t = MAX_MESSAGE_BYTES)]
    pub max_message_bytes: usize,
}

impl BrokerConfig {
    pub fn from_args(args: &Cli) -> Result<Self> {
        if args.max_message_bytes == 0 {
            bail!("--max-message-bytes must be greater than zero");
        }

        Ok(Self {
            socket_path: args.socket_path.clone().unwrap_or_else(default_socket_path),
            spool_dir: args.spool_dir.clone().unwrap_or_else(default_spool_dir),
            max_message_bytes: args.max_message_bytes,
        })
    }

    pub fn from_env() -> Result<Self> {
        let args = Cli::parse();
        Self::from_args(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "rebuild-broker",
            "--socket-path",
            "/tmp/b.sock",
            "--spool-dir",
            "/tmp/spool",
            "--max-message-bytes",
            "1024",
        ]);
        let cfg = BrokerConfig::from_args(&cli).unwrap();

        assert_eq!(cfg.socket_path, PathBuf::from("/tmp/b.sock"));
        assert_eq!(cfg.spool_dir, PathBuf::from("/tmp/spool"));
        assert_eq!(cfg.max_message_bytes, 1024);
    }

    #[test]
    fn message_limit_defaults_to_transport_ceiling() {
        let cli = Cli::parse_from(["rebuild-broker", "--socket-path", "/tmp/b.sock"]);
        assert_eq!(cli.max_message_bytes, MAX_MESSAGE_BYTES);
    }

    #[test]
    fn zero_message_limit_is_rejected() {
        let cli = Cli::parse_from(["rebuild-broker", "--max-message-bytes", "0"]);
        assert!(BrokerConfig::from_args(&cli).is_err());
    }
}
