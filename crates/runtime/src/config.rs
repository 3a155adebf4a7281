use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "rebuild";
pub const PROGRAM_LOG_LEVEL: &str = "REBUILD_LOG_LEVEL";

/// Topic used by `rebuild publish` when `--topic` is not given.
pub const TOPIC_ENV: &str = "REBUILD_TOPIC";
/// Overrides the broker socket location for every binary.
pub const SOCKET_ENV: &str = "REBUILD_SOCKET";

pub const SOCKET_FILE_NAME: &str = "broker.sock";

/// Number of subjects carried by a single notification.
///
/// The transport caps the payload size and the derivative consumer has to finish a
/// message within its time limit; 50 keeps both comfortably in range.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest message body the broker accepts.
pub const MAX_MESSAGE_BYTES: usize = 256 * 1024;

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var)
        && !dir.is_empty()
    {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

pub fn rebuild_dir() -> PathBuf {
    xdg_or_home("XDG_CACHE_HOME", ".cache").join(PROGRAM_NAME)
}

/// Socket the broker listens on and publishers connect to.
pub fn default_socket_path() -> PathBuf {
    match std::env::var_os(SOCKET_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => rebuild_dir().join(SOCKET_FILE_NAME),
    }
}

pub fn state_dir() -> Option<PathBuf> {
    // Check XDG_STATE_HOME first (Linux)
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return Some(PathBuf::from(xdg_state).join(PROGRAM_NAME));
    }

    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
}

/// Directory holding one spool file per topic.
pub fn default_spool_dir() -> PathBuf {
    state_dir()
        .unwrap_or_else(|| rebuild_dir().join("state"))
        .join("spool")
}

/// Topic configured through the environment, if any.
pub fn topic_from_env() -> Option<String> {
    std::env::var(TOPIC_ENV)
        .ok()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
