//! Logger implementation for the log crate.

use core::fmt::{self, Display};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::MonResult;
use crate::error::MonitorError;

pub struct SimpleLogger;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let args = record.args();
        let color_reset = "\u{1B}[0m";

        let args_color = match level {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        };

        kprintln!("[{level:<5} {file}:{line}] {args_color}{args}{color_reset}");
    }

    fn flush(&self) {}
}

/// Initialize the logger with the level given by the `LOG` build variable.
pub fn init() -> MonResult<()> {
    kprintln!(
        "Initializing logger with level: {}",
        option_env!("LOG").unwrap_or("off")
    );
    init_with_level(match option_env!("LOG") {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    })
}

/// Initialize the logger with an explicit level.
pub fn init_with_level(level: LevelFilter) -> MonResult<()> {
    log::set_logger(&SimpleLogger).map_err(|_| MonitorError::LoggerInitFailed)?;
    log::set_max_level(level);
    Ok(())
}
