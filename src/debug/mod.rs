//! Kernel state introspection: stack memory, symbols and the frame walker.

pub mod layout;
pub mod memory;
pub mod symbols;
pub mod unwind;

pub use layout::KernelLayout;
pub use memory::{BoundedMemory, MemoryReader, WORD_SIZE, WordImage};
pub use symbols::{DebugInfo, FunctionSymbol, LineEntry, SymbolResolver, SymbolTable};
pub use unwind::{FrameRecord, FrameWalker, SAVED_ARGS, print_backtrace};
