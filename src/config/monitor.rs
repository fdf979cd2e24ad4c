//! Monitor constants and runtime configuration.

use const_env::env_item;

use crate::mm::HexMode;

/// Capacity of the input line buffer, one text console line.
pub const CMDBUF_SIZE: usize = 80;

/// Maximum number of tokens on a line, command name included.
pub const MAXARGS: usize = 16;

/// Prompt printed before every input line.
pub const PROMPT: &str = "K> ";

/// Default bound on the number of frames `backtrace` reports. Zero disables
/// the bound.
#[env_item]
pub const MONITOR_MAX_FRAMES: usize = 64;

/// Runtime configuration of a [`Monitor`](crate::Monitor).
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Prompt printed before every input line.
    pub prompt: &'static str,
    /// Stop unwinding after this many frames.
    pub max_frames: Option<usize>,
    /// How address literals are parsed.
    pub hex_mode: HexMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT,
            max_frames: match MONITOR_MAX_FRAMES {
                0 => None,
                n => Some(n),
            },
            hex_mode: HexMode::Strict,
        }
    }
}
