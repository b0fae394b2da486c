//! Logging setup for the queue console.
//!
//! File output goes to `./queue.log`. When that file cannot be created the
//! console logs to the terminal instead of running silent.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./queue.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Write to ./queue.log in current directory.
    File,
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let _ = CombinedLogger::init(loggers(destination, level, Path::new(LOG_FILE)));
}

fn loggers(
    destination: LogDestination,
    level: LevelFilter,
    path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    let file = match destination {
        LogDestination::Terminal => None,
        LogDestination::File | LogDestination::Both => file_logger(level, config.clone(), path),
    };
    let terminal = destination != LogDestination::File || file.is_none();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    if terminal {
        // Stderr only: stdout carries the rendered queue.
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file) = file {
        loggers.push(file);
    }
    loggers
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn file_logger(level: LevelFilter, config: Config, path: &Path) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file at {path:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level_to_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn destinations_pick_their_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.log");

        assert_eq!(loggers(LogDestination::File, LevelFilter::Info, &path).len(), 1);
        assert_eq!(loggers(LogDestination::Terminal, LevelFilter::Info, &path).len(), 1);
        assert_eq!(loggers(LogDestination::Both, LevelFilter::Info, &path).len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_file_falls_back_to_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("queue.log");

        let loggers = loggers(LogDestination::File, LevelFilter::Info, &path);
        assert_eq!(loggers.len(), 1);
        assert!(!path.exists());
    }
}
