//! Console module - operator I/O and logging facilities.
//!
//! The monitor talks to the operator through a [`Console`]: a line reader
//! that is also a `core::fmt::Write` sink. [`SerialConsole`] builds one on top
//! of a byte-oriented [`SerialPort`]. Log records go through a separate sink
//! installed with [`set_output`] and are printed with `kprint!`/`kprintln!`.

#[macro_use]
pub mod print;

pub mod logger;
pub mod tty;

pub use logger::{init as init_logger, init_with_level as init_logger_with_level};
pub use print::set_output;
pub use tty::{Console, LineBuffer, SerialConsole, SerialPort};
