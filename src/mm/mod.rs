//! Memory management introspection.
//!
//! This module provides the address side of the monitor:
//! - Address literal parsing and linear-map conversions
//! - The page-table lookup interface and an AArch64 table walker
//! - Mapping reports for single addresses and page ranges

pub mod addr;
pub mod mappings;
pub mod page_table;
pub mod paging;

pub use addr::{HexMode, parse_hex, parse_hex_lenient, parse_vaddr, phys_to_virt, virt_to_phys};
pub use mappings::{PageRange, show_mapping, show_mappings};
pub use page_table::{DescriptorAttr, LinearTables, PageTableWalker, TableReader};
pub use paging::{Mapping, PageSize, PageTable};
