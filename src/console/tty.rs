//! Line-oriented terminal on top of a serial port.
//!
//! The monitor reads one bounded line at a time. Input is echoed as it is
//! typed, backspace/delete erase the last character, and CR or LF ends the
//! line. Characters past the end of the buffer are dropped without echo and
//! the whole line is rejected once it is terminated.

use core::fmt;

use crate::config::CMDBUF_SIZE;
use crate::error::MonitorError;

/// Byte-level access to the device the operator types on.
pub trait SerialPort {
    /// Blocks until a byte arrives. `None` means the input is closed.
    fn read_byte(&mut self) -> Option<u8>;

    /// Writes one byte.
    fn write_byte(&mut self, byte: u8);
}

/// Operator console: reads lines and receives formatted output.
pub trait Console: fmt::Write {
    /// Prints `prompt` and reads one line into `buf`.
    ///
    /// Returns `Ok(None)` at end of input and
    /// [`MonitorError::LineTooLong`] when the line did not fit.
    fn read_line<'b>(
        &mut self,
        prompt: &str,
        buf: &'b mut LineBuffer,
    ) -> Result<Option<&'b str>, MonitorError>;
}

/// Fixed-capacity input line.
pub struct LineBuffer {
    bytes: [u8; CMDBUF_SIZE],
    len: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; CMDBUF_SIZE],
            len: 0,
        }
    }

    /// Appends an ASCII byte. Returns `false` when the buffer is full.
    pub fn push(&mut self, byte: u8) -> bool {
        debug_assert!(byte.is_ascii());
        if self.len == CMDBUF_SIZE {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    /// Removes the last byte, if any.
    pub fn pop(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Console`] over a [`SerialPort`], with echo and line editing.
pub struct SerialConsole<S: SerialPort> {
    port: S,
}

impl<S: SerialPort> SerialConsole<S> {
    pub fn new(port: S) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &S {
        &self.port
    }

    pub fn into_inner(self) -> S {
        self.port
    }

    fn putchar(&mut self, c: u8) {
        match c {
            b'\n' => {
                self.port.write_byte(b'\r');
                self.port.write_byte(b'\n');
            }
            c => self.port.write_byte(c),
        }
    }

    fn puts(&mut self, s: &str) {
        for &c in s.as_bytes() {
            self.putchar(c);
        }
    }
}

impl<S: SerialPort> fmt::Write for SerialConsole<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.puts(s);
        Ok(())
    }
}

impl<S: SerialPort> Console for SerialConsole<S> {
    fn read_line<'b>(
        &mut self,
        prompt: &str,
        buf: &'b mut LineBuffer,
    ) -> Result<Option<&'b str>, MonitorError> {
        buf.clear();
        self.puts(prompt);

        let mut overflow = false;
        loop {
            let Some(c) = self.port.read_byte() else {
                return Ok(None);
            };
            match c {
                b'\r' | b'\n' => {
                    self.puts("\n");
                    break;
                }
                8 | 127 => {
                    if buf.pop() {
                        // Move back, blank the character, move back again.
                        self.puts("\x08 \x08");
                    }
                }
                c if c.is_ascii_graphic() || c == b' ' || c == b'\t' => {
                    if buf.push(c) {
                        self.putchar(c);
                    } else {
                        overflow = true;
                    }
                }
                _ => {}
            }
        }

        if overflow {
            trace!("input line exceeded {} bytes", CMDBUF_SIZE);
            return Err(MonitorError::LineTooLong { max: CMDBUF_SIZE });
        }
        let line: &'b LineBuffer = buf;
        Ok(Some(line.as_str()))
    }
}
