//! Logger setup
//!
//! The console owns the terminal, so it logs to a file under the cache
//! directory. One-shot subcommands log to stderr. `REPLYKIT_LOG` takes
//! the usual env_logger filter syntax.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

const LOG_ENV: &str = "REPLYKIT_LOG";

pub(crate) enum LogTarget {
    Stderr,
    File,
}

pub(crate) fn init_logging(target: LogTarget) {
    let mut builder = match target {
        LogTarget::Stderr => Builder::from_env(Env::default().filter_or(LOG_ENV, "warn")),
        LogTarget::File => {
            let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"));
            match open_log_file() {
                Some(file) => {
                    builder.target(Target::Pipe(Box::new(file)));
                }
                // Nowhere to write without corrupting the screen
                None => {
                    builder.filter_level(LevelFilter::Off);
                }
            }
            builder
        }
    };
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        eprintln!("replykit: logger already initialised");
    }
}

/// `~/.cache/replykit/replykit.log`
pub(crate) fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("replykit").join("replykit.log"))
}

fn open_log_file() -> Option<File> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
