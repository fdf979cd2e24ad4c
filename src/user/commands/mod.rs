//! Command implementations.
//!
//! Each command is defined in its own module file.

pub mod backtrace;
pub mod help;
pub mod kerninfo;
pub mod showmappings;

// Re-export command instances for registry
pub use backtrace::BACKTRACE;
pub use help::HELP;
pub use kerninfo::KERNINFO;
pub use showmappings::SHOWMAPPINGS;
