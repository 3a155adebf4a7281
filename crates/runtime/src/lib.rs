mod config;
pub mod logging;

pub use config::{
    DEFAULT_BATCH_SIZE, MAX_MESSAGE_BYTES, PROGRAM_LOG_LEVEL, PROGRAM_NAME, SOCKET_ENV,
    TOPIC_ENV, default_socket_path, default_spool_dir, rebuild_dir, state_dir, topic_from_env,
};

pub use logging::init;
