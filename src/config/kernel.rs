//! Kernel memory layout constants.

use memory_addr::PAGE_SIZE_4K;

/// Offset of the linear mapping of physical memory in the kernel half.
pub const PHYS_VIRT_OFFSET: usize = 0xffff_0000_0000_0000;

/// Granule used by the page tables and by range queries.
pub const PAGE_SIZE: usize = PAGE_SIZE_4K;
