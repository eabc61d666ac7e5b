use std::fs::{self, OpenOptions};

use env_logger::{Builder, Env, Target};

use crate::config::{LoggingSettings, default_log_path};

const ENV_LOG: &str = "BLOGCAST_LOG";

/// Send log records to a file; the terminal belongs to the UI.
///
/// Without a usable log file, logging stays off.
pub fn init(settings: &LoggingSettings) {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return;
    };

    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };

    // Setup logging from the env variables, with the configured default.
    let _ = Builder::from_env(Env::new().filter_or(ENV_LOG, settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}
