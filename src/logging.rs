//! This module provides functionality for setting up logging

use env_logger::Builder;
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Sets up the logger based on verbosity and optional log file path.
///
/// `-v` shows the workload summary, `-vv` every cache miss, `-vvv` every hit.
/// Memoizer events carry the memoizer's name in brackets after the module.
pub fn setup_logger(verbosity: u8, log_output: Option<PathBuf>) {
    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {} {}",
            buf.timestamp_millis(),
            record.level(),
            record.module_path().unwrap_or("memo-demo"),
            record.args()
        )
    });

    builder.filter_level(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });

    match log_output {
        Some(log_path) => match File::create(&log_path) {
            Ok(file) => {
                let writer = Box::new(file) as Box<dyn Write + Send>;
                builder.target(env_logger::Target::Pipe(writer));
            }
            Err(e) => {
                eprintln!(
                    "Could not create log file at {} ({}). Defaulting to stderr.",
                    log_path.display(),
                    e
                );
                builder.target(env_logger::Target::Stderr);
            }
        },
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.init();
}
