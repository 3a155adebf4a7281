use super::*;
use serial_test::serial;
use std::io::{Cursor, Write};

#[test]
fn parse_subjects_trims_and_skips_blank_lines() {
    let input = "s1\n  s2  \n\n\t\nhttp://example.com/s3\r\ns1\n";
    let subjects = parse_subjects(Cursor::new(input)).unwrap();
    assert_eq!(subjects, vec!["s1", "s2", "http://example.com/s3", "s1"]);
}

#[test]
fn parse_subjects_of_empty_input_is_empty() {
    assert!(parse_subjects(Cursor::new("")).unwrap().is_empty());
}

#[test]
fn parse_subjects_rejects_invalid_utf8() {
    let bytes: &[u8] = &[b's', 0xff, b'\n'];
    assert!(parse_subjects(Cursor::new(bytes)).is_err());
}

#[test]
fn read_input_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "a\nb\n\nc").unwrap();

    let subjects = read_input(Some(file.path())).unwrap();
    assert_eq!(subjects, vec!["a", "b", "c"]);
}

#[test]
fn read_input_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let err = read_input(Some(missing.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("nope.txt"));
}

#[test]
#[serial]
fn topic_flag_overrides_env() {
    unsafe { std::env::set_var(TOPIC_ENV, "from-env") };

    assert_eq!(resolve_topic(Some("from-flag")).as_deref(), Some("from-flag"));
    assert_eq!(resolve_topic(Some("  ")).as_deref(), Some("from-env"));
    assert_eq!(resolve_topic(None).as_deref(), Some("from-env"));

    unsafe { std::env::remove_var(TOPIC_ENV) };
    assert_eq!(resolve_topic(None), None);
}

#[test]
fn publish_failure_mentions_partial_delivery() {
    let dir = tempfile::tempdir().unwrap();
    let publisher = BatchPublisher::new(
        SocketTransport::new(dir.path().join("absent.sock")),
        Destination::new("derivatives"),
    );

    let err = publish_all(&publisher, &["s1".to_owned()]).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.starts_with("some messages may already have been delivered"));
    assert!(msg.contains("failed to connect to rebuild broker"));
}

#[test]
fn publish_of_nothing_never_contacts_broker() {
    let dir = tempfile::tempdir().unwrap();
    let publisher = BatchPublisher::new(
        SocketTransport::new(dir.path().join("absent.sock")),
        Destination::new("derivatives"),
    );

    assert!(publish_all(&publisher, &[]).is_ok());
}

#[test]
fn summary_counts_messages_with_the_publisher_batch_size() {
    let dir = tempfile::tempdir().unwrap();
    let publisher = BatchPublisher::new(
        SocketTransport::new(dir.path().join("absent.sock")),
        Destination::new("derivatives"),
    );

    assert_eq!(
        summary(&publisher, 120, "derivatives"),
        "published 120 subjects in 3 messages to derivatives"
    );
    assert_eq!(
        summary(&publisher.with_batch_size(7), 120, "derivatives"),
        "published 120 subjects in 18 messages to derivatives"
    );
}
