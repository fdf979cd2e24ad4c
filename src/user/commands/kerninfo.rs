//! Kerninfo command - kernel image layout.

use crate::MonResult;
use crate::user::{Command, CommandContext, Status};

/// Kerninfo command instance.
pub static KERNINFO: KerninfoCommand = KerninfoCommand;

/// Kerninfo command implementation.
pub struct KerninfoCommand;

impl Command for KerninfoCommand {
    fn name(&self) -> &'static str {
        "kerninfo"
    }

    fn description(&self) -> &'static str {
        "Display information about the kernel"
    }

    fn usage(&self) -> &'static str {
        "Usage: kerninfo\n\
         \n\
         Prints the addresses of the linker symbols bounding the kernel\n\
         image and the size of the image in memory."
    }

    fn execute(&self, ctx: &mut CommandContext) -> MonResult<Status> {
        write!(ctx.out, "{}", ctx.kernel.layout)?;
        Ok(Status::Continue)
    }
}
