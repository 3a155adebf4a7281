use std::process::ExitCode;

use clap::Args;
use rebuild_publisher::SocketTransport;

use crate::commands::{BrokerOptions, EXIT_FAILURE};

#[derive(Debug, Args)]
pub struct PingArgs {
    #[command(flatten)]
    pub broker: BrokerOptions,
}

pub fn run(args: PingArgs) -> ExitCode {
    let transport = SocketTransport::new(args.broker.socket_path());

    match transport.ping().and_then(|()| transport.status()) {
        Ok(status) => {
            println!("broker is up ({status})");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
