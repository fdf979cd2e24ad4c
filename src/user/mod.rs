//! Monitor command system.
//!
//! # Architecture
//!
//! - `command.rs` - `Command` trait, argument vector, tokenizer and status
//! - `registry.rs` - static command table, lookup and dispatch
//! - `monitor.rs` - the read-eval loop and the kernel state it inspects
//! - `commands/` - individual command implementations
//!
//! # Adding a New Command
//!
//! 1. Create a new file in `commands/` (e.g., `commands/mycommand.rs`)
//! 2. Define a struct and implement the `Command` trait
//! 3. Export a static instance: `pub static MYCOMMAND: MyCommand = MyCommand;`
//! 4. Add to `commands/mod.rs`: `pub mod mycommand;` and `pub use mycommand::MYCOMMAND;`
//! 5. Register in `registry.rs` KERNEL_COMMANDS array: `&commands::MYCOMMAND,`

pub mod command;
pub mod commands;
pub mod monitor;
pub mod registry;

pub use command::{Args, Command, CommandContext, Status, tokenize};
pub use monitor::{KernelView, Monitor};
pub use registry::{Registry, dispatch};
