//! Unified error types for the kernel monitor.
//!
//! Commands return [`MonResult<T>`], an alias for `anyhow::Result<T>`, so a
//! handler can attach context to whatever went wrong. Conditions the monitor
//! itself detects are described by [`MonitorError`] and converted with `?`.
//!
//! ## Usage Examples
//!
//! ```ignore
//! anyhow::ensure!(!args.is_empty(), "missing argument");
//! let va = parse_vaddr(literal, mode)?;
//! ```

use alloc::string::String;
use core::fmt;

/// Result type alias using anyhow::Error.
pub type MonResult<T> = anyhow::Result<T>;

/// Conditions detected by the monitor and reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// An input line held more whitespace-separated tokens than allowed.
    TooManyArgs {
        /// Maximum token count, command name included.
        max: usize,
    },
    /// An input line did not fit into the line buffer.
    LineTooLong {
        /// Capacity of the line buffer in bytes.
        max: usize,
    },
    /// An address literal was rejected by the strict parser.
    InvalidAddress {
        /// The literal as typed.
        literal: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A stack word lies outside the readable range.
    MemoryFault {
        /// Address of the word.
        addr: usize,
    },
    /// A stack word address is not word aligned.
    Misaligned {
        /// Address of the word.
        addr: usize,
    },
    /// The frame-pointer chain was longer than the configured limit.
    UnwindLimit {
        /// Number of frames reported before giving up.
        depth: usize,
    },
    /// A symbol table was not sorted by function address.
    UnsortedSymbols {
        /// Index of the first out-of-order entry.
        index: usize,
    },
    /// The global logger was already installed.
    LoggerInitFailed,
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyArgs { max } => write!(f, "Too many arguments (max {max})"),
            Self::LineTooLong { max } => write!(f, "Line too long (max {max} characters)"),
            Self::InvalidAddress { literal, reason } => {
                write!(f, "invalid address literal '{literal}': {reason}")
            }
            Self::MemoryFault { addr } => write!(f, "cannot read memory at {addr:#x}"),
            Self::Misaligned { addr } => write!(f, "misaligned frame address {addr:#x}"),
            Self::UnwindLimit { depth } => write!(f, "frame limit of {depth} reached"),
            Self::UnsortedSymbols { index } => {
                write!(f, "symbol table not sorted at entry {index}")
            }
            Self::LoggerInitFailed => write!(f, "logger already initialized"),
        }
    }
}

impl core::error::Error for MonitorError {}
