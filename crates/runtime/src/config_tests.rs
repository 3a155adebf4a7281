use super::*;
use serial_test::serial;

fn set(key: &str, value: Option<&str>) {
    match value {
        Some(v) => unsafe { std::env::set_var(key, v) },
        None => unsafe { std::env::remove_var(key) },
    }
}

#[test]
#[serial]
fn rebuild_dir_prefers_xdg_cache_home() {
    set("XDG_CACHE_HOME", Some("/tmp/xdg-cache"));
    assert_eq!(rebuild_dir(), PathBuf::from("/tmp/xdg-cache/rebuild"));

    let home = std::env::var("HOME").ok();
    set("XDG_CACHE_HOME", None);
    set("HOME", Some("/home/tester"));
    assert_eq!(rebuild_dir(), PathBuf::from("/home/tester/.cache/rebuild"));

    set("HOME", home.as_deref());
}

#[test]
#[serial]
fn socket_env_overrides_default_location() {
    set("XDG_CACHE_HOME", Some("/tmp/xdg-cache"));
    set(SOCKET_ENV, None);
    assert_eq!(
        default_socket_path(),
        PathBuf::from("/tmp/xdg-cache/rebuild/broker.sock")
    );

    set(SOCKET_ENV, Some("/run/custom.sock"));
    assert_eq!(default_socket_path(), PathBuf::from("/run/custom.sock"));

    set(SOCKET_ENV, Some(""));
    assert_eq!(
        default_socket_path(),
        PathBuf::from("/tmp/xdg-cache/rebuild/broker.sock")
    );

    set(SOCKET_ENV, None);
    set("XDG_CACHE_HOME", None);
}

#[test]
#[serial]
fn spool_dir_lives_under_xdg_state_home() {
    set("XDG_STATE_HOME", Some("/tmp/xdg-state"));
    assert_eq!(
        default_spool_dir(),
        PathBuf::from("/tmp/xdg-state/rebuild/spool")
    );
    set("XDG_STATE_HOME", None);
}

#[test]
#[serial]
fn topic_from_env_ignores_blank_values() {
    let cases: &[(Option<&str>, Option<&str>)] = &[
        (None, None),
        (Some(""), None),
        (Some("   "), None),
        (Some("derivatives"), Some("derivatives")),
        (Some("  derivatives \n"), Some("derivatives")),
    ];

    for (value, expected) in cases {
        set(TOPIC_ENV, *value);
        assert_eq!(
            topic_from_env().as_deref(),
            *expected,
            "env {:?} should yield {:?}",
            value,
            expected
        );
    }

    set(TOPIC_ENV, None);
}
