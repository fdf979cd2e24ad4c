//! Checked access to the words of a stack.
//!
//! The frame walker never dereferences a frame pointer directly. It asks a
//! [`MemoryReader`], which refuses misaligned addresses and addresses outside
//! the region it was built for.

use core::mem::size_of;
use core::ops::Range;

use crate::error::MonitorError;

/// Size in bytes of one stack word.
pub const WORD_SIZE: usize = size_of::<usize>();

/// Word-granular read access to memory.
pub trait MemoryReader {
    /// Reads the word at `addr`.
    fn read_word(&self, addr: usize) -> Result<usize, MonitorError>;
}

fn check_word(range: &Range<usize>, addr: usize) -> Result<(), MonitorError> {
    if addr % WORD_SIZE != 0 {
        return Err(MonitorError::Misaligned { addr });
    }
    match addr.checked_add(WORD_SIZE) {
        Some(end) if range.start <= addr && end <= range.end => Ok(()),
        _ => Err(MonitorError::MemoryFault { addr }),
    }
}

/// Live memory restricted to one address range, typically a kernel stack.
pub struct BoundedMemory {
    range: Range<usize>,
}

impl BoundedMemory {
    /// # Safety
    ///
    /// Every word inside `range` must be mapped and readable for as long as
    /// the reader is used.
    pub const unsafe fn new(range: Range<usize>) -> Self {
        Self { range }
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl MemoryReader for BoundedMemory {
    fn read_word(&self, addr: usize) -> Result<usize, MonitorError> {
        check_word(&self.range, addr)?;
        // SAFETY: `addr` is aligned and inside the range promised readable.
        Ok(unsafe { (addr as *const usize).read_volatile() })
    }
}

/// A copy of a stack, addressed as if it still lived at `base`.
pub struct WordImage<'a> {
    base: usize,
    words: &'a [usize],
}

impl<'a> WordImage<'a> {
    pub const fn new(base: usize, words: &'a [usize]) -> Self {
        Self { base, words }
    }

    /// Address one past the last word of the image.
    pub fn end(&self) -> usize {
        self.base + self.words.len() * WORD_SIZE
    }
}

impl MemoryReader for WordImage<'_> {
    fn read_word(&self, addr: usize) -> Result<usize, MonitorError> {
        check_word(&(self.base..self.end()), addr)?;
        Ok(self.words[(addr - self.base) / WORD_SIZE])
    }
}
