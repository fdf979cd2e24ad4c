//! Command trait and context definitions.

use core::fmt;

use crate::MonResult;
use crate::config::{MAXARGS, MonitorConfig};
use crate::error::MonitorError;
use crate::hal::TrapFrame;
use crate::user::monitor::KernelView;
use crate::user::registry::Registry;

/// Characters separating tokens on an input line.
const WHITESPACE: [char; 4] = ['\t', '\r', '\n', ' '];

/// Tokens of one input line; `argv[0]` is the command name.
pub struct Args<'a> {
    argv: [&'a str; MAXARGS],
    argc: usize,
}

impl<'a> Args<'a> {
    pub const fn new() -> Self {
        Self {
            argv: [""; MAXARGS],
            argc: 0,
        }
    }

    /// Appends a token, failing once [`MAXARGS`] tokens are held.
    pub fn push(&mut self, arg: &'a str) -> Result<(), MonitorError> {
        if self.argc == MAXARGS {
            return Err(MonitorError::TooManyArgs { max: MAXARGS });
        }
        self.argv[self.argc] = arg;
        self.argc += 1;
        Ok(())
    }

    /// Get token at index (0 is the command name).
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.as_slice().get(index).copied()
    }

    /// The command name, if the line was not blank.
    pub fn command(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// Number of tokens, command name included.
    pub fn len(&self) -> usize {
        self.argc
    }

    pub fn is_empty(&self) -> bool {
        self.argc == 0
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.argv[..self.argc]
    }
}

impl Default for Args<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `line` on spaces, tabs, CR and LF.
///
/// A blank line gives empty `Args`. More than [`MAXARGS`] tokens is
/// [`MonitorError::TooManyArgs`] and nothing of the line is kept.
pub fn tokenize(line: &str) -> Result<Args<'_>, MonitorError> {
    let mut args = Args::new();
    for token in line.split(&WHITESPACE[..]).filter(|t| !t.is_empty()) {
        args.push(token)?;
    }
    Ok(args)
}

/// What the monitor loop does after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Read the next line.
    Continue,
    /// Leave the monitor.
    Exit,
}

impl Status {
    /// Integer code of [`Status::Exit`].
    pub const EXIT_CODE: i32 = -1;

    pub const fn code(self) -> i32 {
        match self {
            Self::Continue => 0,
            Self::Exit => Self::EXIT_CODE,
        }
    }
}

/// Negative codes leave the monitor, zero and positive codes continue.
impl From<i32> for Status {
    fn from(code: i32) -> Self {
        if code < 0 { Self::Exit } else { Self::Continue }
    }
}

/// Command execution context.
pub struct CommandContext<'a> {
    /// Tokens of the line, command name included.
    pub args: &'a Args<'a>,
    /// Register state of the trap that entered the monitor, if any.
    pub trap_frame: Option<&'a TrapFrame>,
    /// Kernel state available for inspection.
    pub kernel: &'a KernelView<'a>,
    pub config: &'a MonitorConfig,
    /// Commands known to the running monitor.
    pub registry: &'a Registry,
    /// Operator output.
    pub out: &'a mut dyn fmt::Write,
}

/// Trait for implementing commands.
///
/// Commands are registered statically and looked up by exact name.
pub trait Command: Sync {
    /// Command name.
    fn name(&self) -> &'static str;

    /// Short description (shown in help list).
    fn description(&self) -> &'static str;

    /// Detailed usage information (shown in `help <command>`).
    fn usage(&self) -> &'static str {
        self.description()
    }

    /// Execute the command with the given context.
    fn execute(&self, ctx: &mut CommandContext) -> MonResult<Status>;
}
