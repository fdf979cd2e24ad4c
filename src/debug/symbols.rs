//! Instruction address to source location resolution.

use crate::error::MonitorError;

/// Where an instruction address lies in the kernel sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo<'a> {
    /// Source file name.
    pub file: &'a str,
    /// Source line number.
    pub line: u32,
    /// Name of the enclosing function.
    pub fn_name: &'a str,
    /// Entry address of the enclosing function.
    pub fn_addr: usize,
}

impl DebugInfo<'static> {
    /// Placeholder for an address no symbol covers. The offset from it is 0.
    pub const fn unknown(addr: usize) -> Self {
        Self {
            file: "<unknown>",
            line: 0,
            fn_name: "<unknown>",
            fn_addr: addr,
        }
    }
}

/// Lookup service for debug information.
pub trait SymbolResolver {
    fn resolve(&self, addr: usize) -> Option<DebugInfo<'_>>;
}

/// One line-table row: code from `addr` on belongs to `line`.
#[derive(Debug, Clone, Copy)]
pub struct LineEntry {
    pub addr: usize,
    pub line: u32,
}

/// A function and its line table.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSymbol<'a> {
    /// Entry address.
    pub addr: usize,
    /// Length of the code in bytes, 0 if unknown.
    pub size: usize,
    /// Function name; a stabs type suffix such as `:F(0,1)` is ignored.
    pub name: &'a str,
    pub file: &'a str,
    /// Rows sorted by address.
    pub lines: &'a [LineEntry],
}

impl<'a> FunctionSymbol<'a> {
    fn contains(&self, addr: usize, next: Option<&FunctionSymbol>) -> bool {
        match self.size {
            0 => next.is_none_or(|next| addr < next.addr),
            size => addr - self.addr < size,
        }
    }

    fn line_of(&self, addr: usize) -> u32 {
        let idx = self.lines.partition_point(|row| row.addr <= addr);
        idx.checked_sub(1).map_or(0, |i| self.lines[i].line)
    }

    fn display_name(&self) -> &'a str {
        self.name.split(':').next().unwrap_or(self.name)
    }
}

/// Function table sorted by entry address.
pub struct SymbolTable<'a> {
    functions: &'a [FunctionSymbol<'a>],
}

impl<'a> SymbolTable<'a> {
    pub fn new(functions: &'a [FunctionSymbol<'a>]) -> Result<Self, MonitorError> {
        if let Some(index) = functions
            .windows(2)
            .position(|pair| pair[0].addr > pair[1].addr)
        {
            return Err(MonitorError::UnsortedSymbols { index: index + 1 });
        }
        Ok(Self { functions })
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl SymbolResolver for SymbolTable<'_> {
    fn resolve(&self, addr: usize) -> Option<DebugInfo<'_>> {
        let idx = self.functions.partition_point(|f| f.addr <= addr).checked_sub(1)?;
        let func = &self.functions[idx];
        if !func.contains(addr, self.functions.get(idx + 1)) {
            return None;
        }
        Some(DebugInfo {
            file: func.file,
            line: func.line_of(addr),
            fn_name: func.display_name(),
            fn_addr: func.addr,
        })
    }
}
