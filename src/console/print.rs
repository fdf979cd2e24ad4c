//! Console print macros.
//!
//! Output is formatted into a fixed-size buffer and handed to the sink in as
//! few pieces as possible, so a log line from a nested context does not get
//! interleaved with another one.

use core::fmt::{self, Write};

use lazyinit::LazyInit;

use crate::sync::Mutex;

/// Keeps concurrent printers from interleaving within a line.
pub(crate) static PRINT_LOCK: Mutex<()> = Mutex::new(());

/// Function receiving formatted console output.
static OUTPUT: LazyInit<fn(&str)> = LazyInit::new();

/// Buffer size for formatting output before sending it to the sink.
const PRINT_BUFFER_SIZE: usize = 512;

/// Installs the function that receives `kprint!` output.
///
/// Returns `false` if a sink was installed before; the first one stays.
pub fn set_output(output: fn(&str)) -> bool {
    OUTPUT.call_once(|| output).is_some()
}

/// A printer that formats into a fixed-size buffer, then outputs atomically.
struct BufferedPrinter {
    output: fn(&str),
    buffer: [u8; PRINT_BUFFER_SIZE],
    pos: usize,
}

impl BufferedPrinter {
    const fn new(output: fn(&str)) -> Self {
        Self {
            output,
            buffer: [0; PRINT_BUFFER_SIZE],
            pos: 0,
        }
    }

    fn flush(&mut self) {
        if self.pos > 0 {
            // Only whole `&str` pieces are copied in, so the buffer is valid UTF-8.
            if let Ok(s) = core::str::from_utf8(&self.buffer[..self.pos]) {
                (self.output)(s);
            }
            self.pos = 0;
        }
    }
}

impl Write for BufferedPrinter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.pos + s.len() > PRINT_BUFFER_SIZE {
            self.flush();
        }
        if s.len() > PRINT_BUFFER_SIZE {
            (self.output)(s);
            return Ok(());
        }
        self.buffer[self.pos..self.pos + s.len()].copy_from_slice(s.as_bytes());
        self.pos += s.len();
        Ok(())
    }
}

impl Drop for BufferedPrinter {
    fn drop(&mut self) {
        self.flush();
    }
}

pub fn _print(args: fmt::Arguments) {
    let Some(&output) = OUTPUT.get() else {
        return;
    };
    // A printer interrupted while holding the lock must not deadlock a nested
    // print on the same CPU; that one goes out unserialized.
    let _guard = PRINT_LOCK.try_lock();

    let mut printer = BufferedPrinter::new(output);
    // Printing must never fail the caller.
    let _ = printer.write_fmt(args);
}

/// Print to the console log sink.
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => ({
        $crate::console::print::_print(format_args!($($arg)*))
    });
}

/// Print to the console log sink, with a newline.
#[macro_export]
macro_rules! kprintln {
    () => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ($crate::kprint!("{}\n", format_args!($($arg)*)));
}
