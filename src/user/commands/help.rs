//! Help command - displays available commands and their usage.

use crate::MonResult;
use crate::user::{Command, CommandContext, Status};

/// Help command instance.
pub static HELP: HelpCommand = HelpCommand;

/// Help command implementation.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Display this list of commands"
    }

    fn usage(&self) -> &'static str {
        "Usage: help [command]\n\
         \n\
         Without arguments: lists all available commands.\n\
         With a command name: shows detailed help for that command."
    }

    fn execute(&self, ctx: &mut CommandContext) -> MonResult<Status> {
        if let Some(name) = ctx.args.get(1) {
            let Some(cmd) = ctx.registry.find(name) else {
                anyhow::bail!("unknown command '{}'", name);
            };
            writeln!(ctx.out, "{}", cmd.usage())?;
        } else {
            for cmd in ctx.registry.commands() {
                writeln!(ctx.out, "{} - {}", cmd.name(), cmd.description())?;
            }
        }
        Ok(Status::Continue)
    }
}
