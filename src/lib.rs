//! kmonitor - interactive kernel debugging monitor.
//!
//! The monitor is entered from a fault handler or on operator request and
//! reads commands from a console until a command asks it to exit. Its two
//! introspection commands are `backtrace`, which walks the saved
//! frame-pointer chain, and `showmappings`, which reports the page-table
//! translation of an address or of a page-aligned range of addresses.
//!
//! The kernel state the monitor looks at is reached through traits so that
//! the embedding kernel decides how memory, symbols and page tables are
//! accessed:
//!
//! - [`debug::MemoryReader`] - checked reads of stack words
//! - [`debug::SymbolResolver`] - instruction address to file/line/function
//! - [`mm::PageTable`] - virtual address to mapped frame
//! - [`console::Console`] - line input and formatted output

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

extern crate alloc;

#[macro_use]
pub mod console;

pub mod config;
pub mod debug;
pub mod error;
pub mod hal;
pub mod mm;
pub mod sync;
pub mod user;

#[cfg(test)]
mod tests;

pub use error::{MonResult, MonitorError};
pub use user::{KernelView, Monitor, Status};
