//! Hardware abstraction layer.
//!
//! The monitor only needs two things from the CPU: the saved register state
//! of the trap that entered it, and the current frame pointer.

pub mod context;
pub mod cpu;

pub use context::TrapFrame;
pub use cpu::read_frame_pointer;
