//! Trap context captured on exception entry.

use core::fmt;

/// Saved registers when a trap (exception) occurs.
#[repr(C)]
#[derive(Default, Clone, Copy)]
pub struct TrapFrame {
    /// General-purpose registers (X0..X30).
    pub r: [u64; 31],
    /// User Stack Pointer (SP_EL0).
    pub usp: u64,
    /// Exception Link Register (ELR_EL1).
    pub elr: u64,
    /// Saved Process Status Register (SPSR_EL1).
    pub spsr: u64,
}

impl fmt::Debug for TrapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TrapFrame: {{")?;
        for (i, &reg) in self.r.iter().enumerate() {
            writeln!(f, "    r{i}: {reg:#x},")?;
        }
        writeln!(f, "    usp: {:#x},", self.usp)?;
        writeln!(f, "    elr: {:#x},", self.elr)?;
        writeln!(f, "    spsr: {:#x},", self.spsr)?;
        write!(f, "}}")
    }
}

/// Register dump printed when the monitor is entered from a trap.
impl fmt::Display for TrapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trap frame:")?;
        for (row, pair) in self.r.chunks(2).enumerate() {
            for (col, reg) in pair.iter().enumerate() {
                let name = row * 2 + col;
                write!(f, "  x{name:<2} {reg:#018x}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  sp_el0 {:#018x}", self.usp)?;
        writeln!(f, "  elr    {:#018x}", self.elr)?;
        writeln!(f, "  spsr   {:#018x}", self.spsr)
    }
}
