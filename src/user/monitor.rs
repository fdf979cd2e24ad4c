//! The monitor read-eval loop.

use core::fmt::Write;

use crate::config::MonitorConfig;
use crate::console::{Console, LineBuffer};
use crate::debug::{KernelLayout, MemoryReader, SymbolResolver};
use crate::hal::TrapFrame;
use crate::mm::PageTable;
use crate::user::command::{CommandContext, Status, tokenize};
use crate::user::registry::{Registry, dispatch};

/// Kernel state the monitor inspects.
pub struct KernelView<'a> {
    /// Linker symbols of the kernel image.
    pub layout: KernelLayout,
    /// Memory the frame walker may read, usually the current kernel stack.
    pub stack: &'a dyn MemoryReader,
    pub symbols: &'a dyn SymbolResolver,
    /// The address space `showmappings` reports on.
    pub page_table: &'a dyn PageTable,
    /// Source of the frame pointer `backtrace` starts from.
    pub frame_pointer: fn() -> usize,
}

/// Interactive kernel monitor.
pub struct Monitor<'a> {
    kernel: KernelView<'a>,
    registry: Registry,
    config: MonitorConfig,
}

impl<'a> Monitor<'a> {
    /// Monitor with the built-in commands and default configuration.
    pub fn new(kernel: KernelView<'a>) -> Self {
        Self {
            kernel,
            registry: Registry::kernel(),
            config: MonitorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Tokenizes and dispatches one input line.
    pub fn run_command(
        &self,
        line: &str,
        trap_frame: Option<&TrapFrame>,
        out: &mut dyn Write,
    ) -> Status {
        let args = match tokenize(line) {
            Ok(args) => args,
            Err(err) => {
                let _ = writeln!(out, "{err}");
                return Status::Continue;
            }
        };

        let mut ctx = CommandContext {
            args: &args,
            trap_frame,
            kernel: &self.kernel,
            config: &self.config,
            registry: &self.registry,
            out,
        };
        dispatch(&mut ctx)
    }

    /// Runs the monitor on `console` until a command returns
    /// [`Status::Exit`].
    ///
    /// `trap_frame` is the register state of the trap that entered the
    /// monitor; it is printed once and handed to every command.
    pub fn run<C: Console>(&self, console: &mut C, trap_frame: Option<&TrapFrame>) {
        let _ = writeln!(console, "Welcome to the kernel monitor!");
        let _ = writeln!(console, "Type 'help' for a list of commands.");

        if let Some(tf) = trap_frame {
            trace!("entered from trap:\n{:?}", tf);
            let _ = write!(console, "{tf}");
        }

        let mut buf = LineBuffer::new();
        loop {
            match console.read_line(self.config.prompt, &mut buf) {
                Ok(Some(line)) => {
                    if self.run_command(line, trap_frame, console) == Status::Exit {
                        break;
                    }
                }
                // End of input: prompt again.
                Ok(None) => {}
                Err(err) => {
                    let _ = writeln!(console, "{err}");
                }
            }
        }
        info!("leaving kernel monitor");
    }
}
