use std::process::ExitCode;

use clap::Parser;

mod commands;

use commands::Command;
use rebuild_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "rebuild",
    version,
    about = "Ask the derivative pipeline to rebuild changed subjects",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Publish(args) => commands::publish::run(args),
        Command::Ping(args) => commands::ping::run(args),
    }
}
