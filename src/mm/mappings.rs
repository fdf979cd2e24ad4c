//! Mapping reports for `showmappings`.

use core::fmt::{self, Write};

use memory_addr::VirtAddr;
use page_table_entry::MappingFlags;

use super::paging::PageTable;
use crate::config::PAGE_SIZE;

/// Inclusive range of addresses visited one page at a time.
///
/// The first address is `low` itself, aligned or not, and every step adds
/// exactly [`PAGE_SIZE`]. Iteration ends past `high` or when the next step
/// would wrap around the address space.
#[derive(Debug, Clone)]
pub struct PageRange {
    next: Option<usize>,
    high: usize,
}

impl PageRange {
    pub fn new(low: VirtAddr, high: VirtAddr) -> Self {
        Self {
            next: Some(low.as_usize()),
            high: high.as_usize(),
        }
    }
}

impl Iterator for PageRange {
    type Item = VirtAddr;

    fn next(&mut self) -> Option<VirtAddr> {
        let current = self.next.filter(|&va| va <= self.high)?;
        self.next = current.checked_add(PAGE_SIZE);
        Some(VirtAddr::from(current))
    }
}

struct Perm(MappingFlags);

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |flag, c| if self.0.contains(flag) { c } else { '-' };
        f.write_char(bit(MappingFlags::READ, 'r'))?;
        f.write_char(bit(MappingFlags::WRITE, 'w'))?;
        f.write_char(bit(MappingFlags::EXECUTE, 'x'))?;
        f.write_char(bit(MappingFlags::USER, 'u'))?;
        if self.0.contains(MappingFlags::DEVICE) {
            f.write_str(" device")?;
        } else if self.0.contains(MappingFlags::UNCACHED) {
            f.write_str(" uncached")?;
        }
        Ok(())
    }
}

/// Reports the translation of a single address.
pub fn show_mapping(out: &mut dyn Write, page_table: &dyn PageTable, vaddr: VirtAddr) -> fmt::Result {
    let va = vaddr.as_usize();
    match page_table.lookup(vaddr) {
        Some(mapping) => writeln!(
            out,
            "va: {:#010x}    pa: {:#010x}    {} [{}]",
            va,
            mapping.frame.as_usize(),
            mapping.size,
            Perm(mapping.flags),
        ),
        None => writeln!(out, "No physical page mapping at {va:#010x}"),
    }
}

/// Reports the translation of every page in `range`. Returns the number of
/// addresses queried.
pub fn show_mappings(
    out: &mut dyn Write,
    page_table: &dyn PageTable,
    range: PageRange,
) -> Result<usize, fmt::Error> {
    let mut queried = 0;
    for vaddr in range {
        show_mapping(out, page_table, vaddr)?;
        queried += 1;
    }
    Ok(queried)
}
