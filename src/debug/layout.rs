//! Kernel image layout reported by `kerninfo`.

use core::fmt;

use memory_addr::{PhysAddr, VirtAddr, align_up};

use crate::mm::virt_to_phys;

/// Addresses of the linker symbols delimiting the kernel image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelLayout {
    /// `_start`, the physical load address.
    pub start: PhysAddr,
    /// `entry`, the kernel entry point.
    pub entry: VirtAddr,
    /// `etext`, end of code.
    pub etext: VirtAddr,
    /// `edata`, end of initialized data.
    pub edata: VirtAddr,
    /// `end`, end of the image including bss.
    pub end: VirtAddr,
}

impl KernelLayout {
    /// Size of the loaded image in KiB, rounded up.
    pub fn footprint_kib(&self) -> usize {
        let bytes = self.end.as_usize().saturating_sub(self.entry.as_usize());
        align_up(bytes, 1024) / 1024
    }
}

impl fmt::Display for KernelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Special kernel symbols:")?;
        writeln!(f, "  _start                  {:016x} (phys)", self.start.as_usize())?;
        for (name, va) in [
            ("entry", self.entry),
            ("etext", self.etext),
            ("edata", self.edata),
            ("end", self.end),
        ] {
            writeln!(
                f,
                "  {:<6} {:016x} (virt)  {:016x} (phys)",
                name,
                va.as_usize(),
                virt_to_phys(va).as_usize()
            )?;
        }
        writeln!(f, "Kernel executable memory footprint: {}KB", self.footprint_kib())
    }
}
