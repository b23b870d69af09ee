//! Minimal stderr logger for the `log` facade.

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("ascii_tint")
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let label = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };

        let _ = writeln!(io::stderr().lock(), "[{label}] [{}] {}", record.target(), record.args());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Map `-q`/`-v` counts onto a level filter. Warnings are shown by default.
pub fn level_from_flags(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn initialize(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
