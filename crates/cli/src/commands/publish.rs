use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use log::debug;
use rebuild_publisher::{
    BatchPublisher, Destination, MessageService, SocketTransport, Transport, batch_count,
};
use rebuild_runtime::{TOPIC_ENV, topic_from_env};

use crate::commands::{BrokerOptions, CommandResult, EXIT_FAILURE, EXIT_USAGE};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// File with one subject per line; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Topic to publish to (defaults to $REBUILD_TOPIC)
    #[arg(long, short = 't')]
    pub topic: Option<String>,

    #[command(flatten)]
    pub broker: BrokerOptions,
}

pub fn run(args: PublishArgs) -> ExitCode {
    let Some(topic) = resolve_topic(args.topic.as_deref()) else {
        eprintln!("[error] no topic given: pass --topic or set {TOPIC_ENV}");
        return ExitCode::from(EXIT_USAGE);
    };

    let subjects = match read_input(args.file.as_deref()) {
        Ok(subjects) => subjects,
        Err(e) => {
            eprintln!("[error] {e:#}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let transport = SocketTransport::new(args.broker.socket_path());
    debug!(
        "publishing {} subjects to {topic} via {}",
        subjects.len(),
        transport.socket_path().display()
    );

    let publisher = BatchPublisher::new(transport, Destination::new(topic.clone()));
    match publish_all(&publisher, &subjects) {
        Ok(()) => {
            println!("{}", summary(&publisher, subjects.len(), &topic));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[error] publish to {topic} failed: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

pub(crate) fn summary<T: Transport>(
    publisher: &BatchPublisher<T>,
    published: usize,
    topic: &str,
) -> String {
    format!(
        "published {published} subjects in {} messages to {topic}",
        batch_count(published, publisher.batch_size())
    )
}

fn publish_all(service: &dyn MessageService, subjects: &[String]) -> CommandResult<()> {
    service
        .publish(subjects)
        .context("some messages may already have been delivered")
}

/// `--topic` wins over `$REBUILD_TOPIC`; blank values count as unset.
pub(crate) fn resolve_topic(flag: Option<&str>) -> Option<String> {
    flag.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .or_else(topic_from_env)
}

fn read_input(path: Option<&Path>) -> CommandResult<Vec<String>> {
    match path {
        None => parse_subjects(io::stdin().lock()).context("failed to read subjects from stdin"),
        Some(p) if p == Path::new("-") => {
            parse_subjects(io::stdin().lock()).context("failed to read subjects from stdin")
        }
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            parse_subjects(BufReader::new(file))
                .with_context(|| format!("failed to read subjects from {}", p.display()))
        }
    }
}

/// One subject per line, surrounding whitespace trimmed, blank lines skipped.
pub(crate) fn parse_subjects<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut subjects = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let subject = line.trim();
        if !subject.is_empty() {
            subjects.push(subject.to_owned());
        }
    }
    Ok(subjects)
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
