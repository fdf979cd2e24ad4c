//! Frame-pointer stack unwinder.
//!
//! Every frame built with frame pointers starts with a two-word record: the
//! caller's frame pointer followed by the return address. The words after it
//! are printed as the frame's first five arguments; that is only a display
//! convention and says nothing about the callee's real arity, so an argument
//! word that cannot be read is shown as `?` and the frame is still reported.
//! Only an unreadable frame record ends the walk.
//!
//! ```text
//!   fp + 6w  arg 4
//!   ...
//!   fp + 2w  arg 0
//!   fp + 1w  return address
//!   fp       caller's fp  ---> next record, 0 ends the chain
//! ```

use core::fmt::{self, Write};

use super::memory::{MemoryReader, WORD_SIZE};
use super::symbols::{DebugInfo, SymbolResolver};
use crate::error::MonitorError;

/// Number of argument words shown per frame.
pub const SAVED_ARGS: usize = 5;

/// Hex digits in a word.
const WORD_DIGITS: usize = WORD_SIZE * 2;

/// Printed in place of an argument word that could not be read.
const UNREADABLE: &str = "????????????????";

/// One frame of the call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRecord {
    /// Frame pointer of this frame.
    pub fp: usize,
    /// Return address saved in the frame.
    pub ra: usize,
    /// Words following the frame record; `None` where the word was unreadable.
    pub args: [Option<usize>; SAVED_ARGS],
}

/// Iterator over the frame-pointer chain.
///
/// Yields one `Ok` per frame until a zero frame pointer is reached. A read
/// failure or hitting the depth limit yields a single `Err` and ends the
/// iteration.
pub struct FrameWalker<'a> {
    memory: &'a dyn MemoryReader,
    fp: usize,
    depth: usize,
    limit: Option<usize>,
    done: bool,
}

impl<'a> FrameWalker<'a> {
    pub fn new(memory: &'a dyn MemoryReader, fp: usize) -> Self {
        Self {
            memory,
            fp,
            depth: 0,
            limit: None,
            done: false,
        }
    }

    /// Stops the walk with [`MonitorError::UnwindLimit`] after `limit` frames.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    fn word(&self, index: usize) -> Result<usize, MonitorError> {
        let addr = index
            .checked_mul(WORD_SIZE)
            .and_then(|offset| self.fp.checked_add(offset))
            .ok_or(MonitorError::MemoryFault { addr: self.fp })?;
        self.memory.read_word(addr)
    }

    fn read_frame(&self) -> Result<(FrameRecord, usize), MonitorError> {
        let next = self.word(0)?;
        let ra = self.word(1)?;
        let mut args = [None; SAVED_ARGS];
        for (i, arg) in args.iter_mut().enumerate() {
            *arg = self.word(2 + i).ok();
        }
        Ok((FrameRecord { fp: self.fp, ra, args }, next))
    }
}

impl Iterator for FrameWalker<'_> {
    type Item = Result<FrameRecord, MonitorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.fp == 0 {
            return None;
        }
        if self.limit.is_some_and(|limit| self.depth >= limit) {
            self.done = true;
            return Some(Err(MonitorError::UnwindLimit { depth: self.depth }));
        }

        match self.read_frame() {
            Ok((frame, next)) => {
                trace!("frame {}: fp {:#x} -> {:#x}", self.depth, self.fp, next);
                self.fp = next;
                self.depth += 1;
                Some(Ok(frame))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn print_frame(out: &mut dyn Write, frame: &FrameRecord, info: &DebugInfo) -> fmt::Result {
    write!(
        out,
        "  fp {:0w$x} ra {:0w$x} args",
        frame.fp,
        frame.ra,
        w = WORD_DIGITS
    )?;
    for arg in frame.args {
        match arg {
            Some(arg) => write!(out, " {arg:0w$x}", w = WORD_DIGITS)?,
            None => write!(out, " {}", &UNREADABLE[..WORD_DIGITS])?,
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "       {}:{}: {}+{}",
        info.file,
        info.line,
        info.fn_name,
        frame.ra.wrapping_sub(info.fn_addr)
    )
}

/// Prints every frame `walker` yields. Returns the number of frames printed.
///
/// A walk that ends on an error is reported in the output; it is not an
/// error of the command.
pub fn print_backtrace(
    out: &mut dyn Write,
    walker: FrameWalker,
    symbols: &dyn SymbolResolver,
) -> Result<usize, fmt::Error> {
    writeln!(out, "Stack backtrace:")?;
    let mut frames = 0;
    for frame in walker {
        match frame {
            Ok(frame) => {
                let info = symbols
                    .resolve(frame.ra)
                    .unwrap_or(DebugInfo::unknown(frame.ra));
                print_frame(out, &frame, &info)?;
                frames += 1;
            }
            Err(err) => {
                warn!("backtrace stopped after {} frames: {}", frames, err);
                writeln!(out, "  <backtrace stopped: {err}>")?;
            }
        }
    }
    Ok(frames)
}
