//! Backtrace command - walks the kernel stack.

use crate::MonResult;
use crate::debug::{FrameWalker, print_backtrace};
use crate::user::{Command, CommandContext, Status};

/// Backtrace command instance.
pub static BACKTRACE: BacktraceCommand = BacktraceCommand;

/// Backtrace command implementation.
pub struct BacktraceCommand;

impl Command for BacktraceCommand {
    fn name(&self) -> &'static str {
        "backtrace"
    }

    fn description(&self) -> &'static str {
        "Display information of the kernel stack"
    }

    fn usage(&self) -> &'static str {
        "Usage: backtrace\n\
         \n\
         Follows the saved frame pointers from the current frame and prints,\n\
         per frame, the frame pointer, the return address, five argument\n\
         words and the source location of the return address."
    }

    fn execute(&self, ctx: &mut CommandContext) -> MonResult<Status> {
        let fp = (ctx.kernel.frame_pointer)();
        let walker = FrameWalker::new(ctx.kernel.stack, fp).with_limit(ctx.config.max_frames);
        let frames = print_backtrace(&mut *ctx.out, walker, ctx.kernel.symbols)?;
        debug!("backtrace from {:#x}: {} frame(s)", fp, frames);
        Ok(Status::Continue)
    }
}
