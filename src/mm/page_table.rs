//! AArch64 stage-1 translation table walker.
//!
//! 4 KiB granule, 48-bit input addresses, four levels of 512 entries.
//! Level 1 and level 2 descriptors may be 1 GiB and 2 MiB blocks; level 3
//! descriptors map 4 KiB pages. The walker only reads descriptors, it never
//! sets the access flag or touches the TLB.

use memory_addr::{PhysAddr, VirtAddr, pa};
use page_table_entry::MappingFlags;

use super::addr::phys_to_virt;
use super::paging::{Mapping, PageSize, PageTable};

bitflags::bitflags! {
    /// Memory attribute fields in the VMSAv8-64 translation table format descriptors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DescriptorAttr: u64 {
        /// Whether the descriptor is valid.
        const VALID = 1 << 0;
        /// The descriptor gives the address of the next level of translation table or 4KB page.
        /// (not a 2M, 1G block)
        const NON_BLOCK = 1 << 1;
        /// Memory attributes index field.
        const ATTR_INDX = 0b111 << 2;
        /// Non-secure bit.
        const NS = 1 << 5;
        /// Unprivileged access permission.
        const AP_EL0 = 1 << 6;
        /// Read-only access permission.
        const AP_RO = 1 << 7;
        /// Inner shareable.
        const INNER = 1 << 8;
        /// Shareable.
        const SHAREABLE = 1 << 9;
        /// The Access flag.
        const AF = 1 << 10;
        /// The not global bit.
        const NG = 1 << 11;
        /// The Privileged execute-never field.
        const PXN = 1 << 53;
        /// The Execute-never or Unprivileged execute-never field.
        const UXN = 1 << 54;
    }
}

/// Output address bits [47:12] of a descriptor.
const DESC_ADDR_MASK: u64 = 0x0000_ffff_ffff_f000;

/// Entries per translation table.
pub const ENTRY_COUNT: usize = 512;

/// Memory attribute index of device memory in MAIR_EL1.
const ATTR_DEVICE: u64 = 0;
/// Memory attribute index of non-cacheable normal memory in MAIR_EL1.
const ATTR_NORMAL_NC: u64 = 2;

impl DescriptorAttr {
    const fn attr_index(self) -> u64 {
        (self.bits() & Self::ATTR_INDX.bits()) >> 2
    }

    /// Access rights of a leaf descriptor in architecture-neutral form.
    pub fn mapping_flags(self) -> MappingFlags {
        let mut flags = MappingFlags::READ;
        if !self.contains(Self::AP_RO) {
            flags |= MappingFlags::WRITE;
        }
        if self.contains(Self::AP_EL0) {
            flags |= MappingFlags::USER;
            if !self.contains(Self::UXN) {
                flags |= MappingFlags::EXECUTE;
            }
        } else if !self.contains(Self::PXN) {
            flags |= MappingFlags::EXECUTE;
        }
        match self.attr_index() {
            ATTR_DEVICE => flags |= MappingFlags::DEVICE,
            ATTR_NORMAL_NC => flags |= MappingFlags::UNCACHED,
            _ => {}
        }
        flags
    }
}

/// Access to the memory holding translation tables.
pub trait TableReader {
    /// Reads descriptor `index` of the table located at physical `table`.
    fn read_entry(&self, table: PhysAddr, index: usize) -> Option<u64>;
}

/// Reads translation tables through the kernel's linear map of physical memory.
pub struct LinearTables {
    _private: (),
}

impl LinearTables {
    /// # Safety
    ///
    /// Every table reachable from the walked root must be mapped at
    /// `phys_to_virt(paddr)` and must not change while the monitor runs.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl TableReader for LinearTables {
    fn read_entry(&self, table: PhysAddr, index: usize) -> Option<u64> {
        if index >= ENTRY_COUNT {
            return None;
        }
        let base = phys_to_virt(table).as_usize() as *const u64;
        // SAFETY: guaranteed by the contract of `LinearTables::new`.
        Some(unsafe { base.add(index).read_volatile() })
    }
}

/// Walks a four-level table tree starting at a root table.
pub struct PageTableWalker<T: TableReader> {
    root: PhysAddr,
    tables: T,
}

impl<T: TableReader> PageTableWalker<T> {
    pub fn new(root: PhysAddr, tables: T) -> Self {
        Self { root, tables }
    }

    /// Physical address of the level-0 table.
    pub fn root(&self) -> PhysAddr {
        self.root
    }
}

impl<T: TableReader> PageTable for PageTableWalker<T> {
    fn lookup(&self, vaddr: VirtAddr) -> Option<Mapping> {
        let va = vaddr.as_usize();
        let mut table = self.root;

        for level in 0..4 {
            let shift = 39 - 9 * level;
            let index = (va >> shift) & (ENTRY_COUNT - 1);
            let desc = self.tables.read_entry(table, index)?;
            let attr = DescriptorAttr::from_bits_truncate(desc);
            if !attr.contains(DescriptorAttr::VALID) {
                return None;
            }

            let addr = (desc & DESC_ADDR_MASK) as usize;
            let size = match (level, attr.contains(DescriptorAttr::NON_BLOCK)) {
                (3, true) => PageSize::Size4K,
                (2, false) => PageSize::Size2M,
                (1, false) => PageSize::Size1G,
                (0..=2, true) => {
                    table = pa!(addr);
                    continue;
                }
                // Level-0 blocks and the level-3 block encoding are reserved.
                _ => return None,
            };
            trace!("{:#x}: level {} leaf descriptor {:#x}", va, level, desc);
            return Some(Mapping {
                frame: pa!(addr & !(size.bytes() - 1)),
                size,
                flags: attr.mapping_flags(),
            });
        }
        None
    }
}
