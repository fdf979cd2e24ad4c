//! Monitor configuration.
//!
//! Build-time constants live in [`kernel`] and [`monitor`]; the runtime
//! knobs of a monitor instance are collected in [`MonitorConfig`].

pub mod kernel;
pub mod monitor;

pub use kernel::{PAGE_SIZE, PHYS_VIRT_OFFSET};
pub use monitor::{CMDBUF_SIZE, MAXARGS, MONITOR_MAX_FRAMES, MonitorConfig, PROMPT};
