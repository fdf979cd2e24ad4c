//! Command registry - static command registration and lookup.

use crate::user::command::{Command, CommandContext, Status};
use crate::user::commands;

/// Commands of the kernel monitor, in `help` order.
///
/// To add a new command:
/// 1. Create a new file in `commands/` directory
/// 2. Implement the `Command` trait
/// 3. Export a static instance
/// 4. Add it to this array
static KERNEL_COMMANDS: &[&dyn Command] = &[
    &commands::HELP,
    &commands::KERNINFO,
    &commands::BACKTRACE,
    &commands::SHOWMAPPINGS,
];

/// An immutable table of commands. Names are matched exactly, in table
/// order; the first match wins.
#[derive(Clone, Copy)]
pub struct Registry {
    commands: &'static [&'static dyn Command],
}

impl Registry {
    pub const fn new(commands: &'static [&'static dyn Command]) -> Self {
        Self { commands }
    }

    /// The kernel monitor's built-in commands.
    pub fn kernel() -> Self {
        Self::new(KERNEL_COMMANDS)
    }

    /// Find a command by name.
    pub fn find(&self, name: &str) -> Option<&'static dyn Command> {
        self.commands.iter().find(|cmd| cmd.name() == name).copied()
    }

    /// Get all registered commands.
    pub fn commands(&self) -> &'static [&'static dyn Command] {
        self.commands
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::kernel()
    }
}

/// Runs the command named by `ctx.args`.
///
/// Blank lines, unknown commands and failing commands all continue the
/// monitor; only a command returning [`Status::Exit`] ends it.
pub fn dispatch(ctx: &mut CommandContext) -> Status {
    let Some(name) = ctx.args.command() else {
        return Status::Continue;
    };

    let Some(cmd) = ctx.registry.find(name) else {
        let _ = writeln!(ctx.out, "Unknown command '{name}'");
        return Status::Continue;
    };

    debug!("dispatching '{}' with {} token(s)", name, ctx.args.len());
    match cmd.execute(ctx) {
        Ok(status) => status,
        Err(err) => {
            debug!("'{}' failed: {:#}", name, err);
            let _ = writeln!(ctx.out, "{}: {:#}", cmd.name(), err);
            Status::Continue
        }
    }
}
