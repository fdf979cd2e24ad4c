//! Address translation utilities and address literal parsing.
//!
//! Address literals are a two-character prefix followed by hexadecimal
//! digits, e.g. `0xffff000040080000`. Two parsers are provided:
//!
//! - [`parse_hex`] rejects anything that is not `0x`/`0X` followed by one or
//!   more hex digits fitting in a `usize`.
//! - [`parse_hex_lenient`] never fails: it skips whatever two characters
//!   come first and lets every non-hex character count as digit `0`, so
//!   `0x1g00` reads as `0x1000`. High digits that do not fit are dropped.

use alloc::string::ToString;

use memory_addr::{PhysAddr, VirtAddr, pa, va};

use crate::config::PHYS_VIRT_OFFSET;
use crate::error::MonitorError;

/// Convert physical address to virtual address.
pub const fn phys_to_virt(paddr: PhysAddr) -> VirtAddr {
    va!(paddr.as_usize().wrapping_add(PHYS_VIRT_OFFSET))
}

/// Convert virtual address to physical address.
pub const fn virt_to_phys(vaddr: VirtAddr) -> PhysAddr {
    pa!(vaddr.as_usize().wrapping_sub(PHYS_VIRT_OFFSET))
}

/// How address literals typed by the operator are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexMode {
    /// Reject malformed literals.
    #[default]
    Strict,
    /// Accept anything, reading invalid digits as zero.
    Lenient,
}

/// Value of a single hex digit.
pub const fn hex_digit(c: u8) -> Option<usize> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as usize),
        b'A'..=b'F' => Some((c - b'A' + 10) as usize),
        b'a'..=b'f' => Some((c - b'a' + 10) as usize),
        _ => None,
    }
}

/// Parses an address literal, reading invalid digits as zero.
pub fn parse_hex_lenient(literal: &str) -> usize {
    let digits = literal.as_bytes().get(2..).unwrap_or_default();
    digits
        .iter()
        .fold(0, |acc, &c| (acc << 4) | hex_digit(c).unwrap_or(0))
}

/// Parses an address literal of the form `0x<hex digits>`.
pub fn parse_hex(literal: &str) -> Result<usize, MonitorError> {
    let invalid = |reason| MonitorError::InvalidAddress {
        literal: literal.to_string(),
        reason,
    };

    let digits = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
        .ok_or_else(|| invalid("expected a 0x prefix"))?;
    if digits.is_empty() {
        return Err(invalid("no hex digits"));
    }

    digits.bytes().try_fold(0usize, |acc, c| {
        let digit = hex_digit(c).ok_or_else(|| invalid("not a hex digit"))?;
        acc.checked_mul(16)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| invalid("does not fit in an address"))
    })
}

/// Parses a virtual address literal according to `mode`.
pub fn parse_vaddr(literal: &str, mode: HexMode) -> Result<VirtAddr, MonitorError> {
    let value = match mode {
        HexMode::Strict => parse_hex(literal)?,
        HexMode::Lenient => parse_hex_lenient(literal),
    };
    Ok(VirtAddr::from(value))
}
