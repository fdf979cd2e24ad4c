//! Page-table lookup interface.

use core::fmt;

use memory_addr::{PhysAddr, VirtAddr};
use page_table_entry::MappingFlags;

/// Size of the page or block a leaf entry maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Size4K = 0x1000,
    Size2M = 0x20_0000,
    Size1G = 0x4000_0000,
}

impl PageSize {
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size4K => f.write_str("4K"),
            Self::Size2M => f.write_str("2M"),
            Self::Size1G => f.write_str("1G"),
        }
    }
}

/// A present leaf entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    /// Base of the mapped frame, attribute bits stripped.
    pub frame: PhysAddr,
    pub size: PageSize,
    pub flags: MappingFlags,
}

impl Mapping {
    /// Physical address `vaddr` translates to through this mapping.
    pub fn translate(&self, vaddr: VirtAddr) -> PhysAddr {
        self.frame + (vaddr.as_usize() & (self.size.bytes() - 1))
    }
}

/// Read-only view of an address space.
pub trait PageTable {
    /// Returns the leaf entry mapping `vaddr`, or `None` if it is unmapped.
    fn lookup(&self, vaddr: VirtAddr) -> Option<Mapping>;
}
