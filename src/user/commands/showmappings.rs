//! Showmappings command - virtual to physical translations.

use crate::MonResult;
use crate::mm::{PageRange, parse_vaddr, show_mapping, show_mappings};
use crate::user::{Command, CommandContext, Status};

/// Showmappings command instance.
pub static SHOWMAPPINGS: ShowMappingsCommand = ShowMappingsCommand;

/// Showmappings command implementation.
pub struct ShowMappingsCommand;

impl Command for ShowMappingsCommand {
    fn name(&self) -> &'static str {
        "showmappings"
    }

    fn description(&self) -> &'static str {
        "Show physical address mappings corresponding to specific virtual addresses"
    }

    fn usage(&self) -> &'static str {
        "Usage: showmappings <addr>\n\
         \x20      showmappings <low> <high>\n\
         \n\
         Addresses are hexadecimal with a 0x prefix. With two addresses,\n\
         every page from <low> up to and including <high> is reported."
    }

    fn execute(&self, ctx: &mut CommandContext) -> MonResult<Status> {
        let mode = ctx.config.hex_mode;
        let page_table = ctx.kernel.page_table;
        let args = ctx.args;
        match args.as_slice() {
            [_, addr] => {
                let vaddr = parse_vaddr(addr, mode)?;
                show_mapping(&mut *ctx.out, page_table, vaddr)?;
            }
            [_, low, high] => {
                let low = parse_vaddr(low, mode)?;
                let high = parse_vaddr(high, mode)?;
                let queried = show_mappings(&mut *ctx.out, page_table, PageRange::new(low, high))?;
                trace!("showmappings: {} page(s) queried", queried);
            }
            // Any other argument count is ignored.
            _ => {}
        }
        Ok(Status::Continue)
    }
}
