//! CPU-related operations.

/// Reads the frame pointer register of the caller.
///
/// X29 on AArch64 and RBP on x86_64. Returns 0, which ends any frame walk,
/// on architectures without a frame-pointer convention here.
#[inline(always)]
pub fn read_frame_pointer() -> usize {
    let fp: usize;
    #[cfg(target_arch = "aarch64")]
    unsafe {
        core::arch::asm!("mov {}, x29", out(reg) fp, options(nomem, nostack, preserves_flags));
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        core::arch::asm!("mov {}, rbp", out(reg) fp, options(nomem, nostack, preserves_flags));
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
    {
        fp = 0;
    }
    fp
}
