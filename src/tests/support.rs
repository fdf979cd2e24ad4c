//! Fixtures shared by the monitor tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::string::String;
use std::vec::Vec;

use memory_addr::{PhysAddr, VirtAddr, pa, va};

use crate::console::SerialPort;
use crate::debug::{FunctionSymbol, KernelLayout, LineEntry, SymbolTable, WORD_SIZE, WordImage};
use crate::mm::page_table::ENTRY_COUNT;
use crate::mm::{DescriptorAttr, Mapping, PageSize, PageTable, PageTableWalker, TableReader};
use crate::user::KernelView;

/// Serial port fed from a script; records everything written to it.
///
/// A `None` entry in the script is one end-of-input event. Reading past
/// the end of the script panics so a monitor that never exits fails the
/// test instead of hanging it.
pub struct ScriptedPort {
    input: VecDeque<Option<u8>>,
    output: Vec<u8>,
}

impl ScriptedPort {
    pub fn new(script: &str) -> Self {
        Self {
            input: script.bytes().map(Some).collect(),
            output: Vec::new(),
        }
    }

    pub fn eof(mut self) -> Self {
        self.input.push_back(None);
        self
    }

    pub fn then(mut self, script: &str) -> Self {
        self.input.extend(script.bytes().map(Some));
        self
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl SerialPort for ScriptedPort {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front().expect("input script exhausted")
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

const DESC_ADDR_MASK: u64 = 0x0000_ffff_ffff_f000;

/// Memory attribute index 1, normal cacheable memory.
pub const ATTR_NORMAL: u64 = 1 << 2;

pub fn kernel_rwx() -> DescriptorAttr {
    DescriptorAttr::from_bits_retain(ATTR_NORMAL) | DescriptorAttr::INNER | DescriptorAttr::UXN
}

pub fn kernel_ro() -> DescriptorAttr {
    DescriptorAttr::from_bits_retain(ATTR_NORMAL)
        | DescriptorAttr::AP_RO
        | DescriptorAttr::PXN
        | DescriptorAttr::UXN
}

pub fn user_rw() -> DescriptorAttr {
    DescriptorAttr::from_bits_retain(ATTR_NORMAL)
        | DescriptorAttr::AP_EL0
        | DescriptorAttr::PXN
        | DescriptorAttr::UXN
}

pub fn device() -> DescriptorAttr {
    DescriptorAttr::PXN | DescriptorAttr::UXN
}

/// Translation tables kept in a map keyed by their physical address.
pub struct SimTables {
    tables: BTreeMap<usize, Box<[u64; ENTRY_COUNT]>>,
    next_frame: usize,
    root: usize,
}

impl SimTables {
    pub fn new() -> Self {
        let mut sim = Self {
            tables: BTreeMap::new(),
            next_frame: 0x8000_0000,
            root: 0,
        };
        sim.root = sim.alloc_table();
        sim
    }

    fn alloc_table(&mut self) -> usize {
        let frame = self.next_frame;
        self.next_frame += 0x1000;
        self.tables.insert(frame, Box::new([0; ENTRY_COUNT]));
        frame
    }

    pub fn root(&self) -> PhysAddr {
        pa!(self.root)
    }

    /// Maps `va` to `pa` with a page or block of `size`.
    pub fn map(&mut self, va: usize, pa: usize, size: PageSize, attr: DescriptorAttr) {
        let leaf_level = match size {
            PageSize::Size4K => 3,
            PageSize::Size2M => 2,
            PageSize::Size1G => 1,
        };
        let index = |level: usize| (va >> (39 - 9 * level)) & (ENTRY_COUNT - 1);

        let mut table = self.root;
        for level in 0..leaf_level {
            let desc = self.tables[&table][index(level)];
            table = if desc & DescriptorAttr::VALID.bits() != 0 {
                (desc & DESC_ADDR_MASK) as usize
            } else {
                let next = self.alloc_table();
                let table_desc = DescriptorAttr::VALID | DescriptorAttr::NON_BLOCK;
                self.tables.get_mut(&table).unwrap()[index(level)] =
                    next as u64 | table_desc.bits();
                next
            };
        }

        let mut leaf = attr | DescriptorAttr::VALID | DescriptorAttr::AF;
        if leaf_level == 3 {
            leaf |= DescriptorAttr::NON_BLOCK;
        }
        self.tables.get_mut(&table).unwrap()[index(leaf_level)] = pa as u64 | leaf.bits();
    }

    /// Overwrites a raw descriptor of the root table.
    pub fn set_root_entry(&mut self, index: usize, desc: u64) {
        let root = self.root;
        self.tables.get_mut(&root).unwrap()[index] = desc;
    }

    pub fn into_walker(self) -> PageTableWalker<SimTables> {
        PageTableWalker::new(self.root(), self)
    }
}

impl TableReader for SimTables {
    fn read_entry(&self, table: PhysAddr, index: usize) -> Option<u64> {
        self.tables
            .get(&table.as_usize())
            .and_then(|entries| entries.get(index).copied())
    }
}

/// Page table that records every address it is asked about.
pub struct RecordingTable<T: PageTable> {
    pub inner: T,
    pub queries: RefCell<Vec<usize>>,
}

impl<T: PageTable> RecordingTable<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl<T: PageTable> PageTable for RecordingTable<T> {
    fn lookup(&self, vaddr: VirtAddr) -> Option<Mapping> {
        self.queries.borrow_mut().push(vaddr.as_usize());
        self.inner.lookup(vaddr)
    }
}

/// Words per synthetic frame: saved fp, return address, five arguments and
/// one local.
pub const FRAME_WORDS: usize = 8;

/// Base address of the synthetic stack used by [`fixture_view`].
pub const STACK_BASE: usize = 0xffff_0000_4010_0000;

/// Builds a stack holding a frame-pointer chain. Frame `i` starts at
/// `base + i * FRAME_WORDS` words and links to frame `i + 1`; the last frame
/// links to 0.
pub fn build_chain(frames: &[(usize, [usize; 5])]) -> Vec<usize> {
    let mut words = Vec::with_capacity(frames.len() * FRAME_WORDS);
    for (i, (ra, args)) in frames.iter().enumerate() {
        let next = if i + 1 == frames.len() {
            0
        } else {
            frame_addr(i + 1)
        };
        words.push(next);
        words.push(*ra);
        words.extend_from_slice(args);
        words.push(0xdead_beef);
    }
    words
}

/// Address of synthetic frame `i`.
pub const fn frame_addr(i: usize) -> usize {
    STACK_BASE + i * FRAME_WORDS * WORD_SIZE
}

pub const MONITOR_ENTRY: usize = 0xffff_0000_4008_1000;
pub const TRAP_DISPATCH: usize = 0xffff_0000_4008_2000;
pub const KERNEL_MAIN: usize = 0xffff_0000_4008_3000;

static MONITOR_LINES: [LineEntry; 2] = [
    LineEntry {
        addr: MONITOR_ENTRY,
        line: 10,
    },
    LineEntry {
        addr: MONITOR_ENTRY + 0x40,
        line: 14,
    },
];

static TRAP_LINES: [LineEntry; 1] = [LineEntry {
    addr: TRAP_DISPATCH + 0x8,
    line: 120,
}];

static KERNEL_MAIN_LINES: [LineEntry; 1] = [LineEntry {
    addr: KERNEL_MAIN,
    line: 42,
}];

static FUNCTIONS: [FunctionSymbol<'static>; 3] = [
    FunctionSymbol {
        addr: MONITOR_ENTRY,
        size: 0x100,
        name: "monitor_entry:F(0,1)",
        file: "kern/monitor.rs",
        lines: &MONITOR_LINES,
    },
    FunctionSymbol {
        addr: TRAP_DISPATCH,
        size: 0,
        name: "trap_dispatch",
        file: "kern/trap.rs",
        lines: &TRAP_LINES,
    },
    FunctionSymbol {
        addr: KERNEL_MAIN,
        size: 0x80,
        name: "kernel_main",
        file: "kern/init.rs",
        lines: &KERNEL_MAIN_LINES,
    },
];

pub fn symbols() -> SymbolTable<'static> {
    SymbolTable::new(&FUNCTIONS).unwrap()
}

pub fn layout() -> KernelLayout {
    let entry = 0xffff_0000_4008_0000;
    KernelLayout {
        start: pa!(0x4008_0000),
        entry: va!(entry),
        etext: va!(entry + 0x1_2345),
        edata: va!(entry + 0x1_8000),
        end: va!(entry + 0x2_0001),
    }
}

/// Frames of the fixture stack: kernel_main called trap_dispatch called
/// monitor_entry.
pub fn fixture_frames() -> [(usize, [usize; 5]); 3] {
    [
        (MONITOR_ENTRY + 0x50, [1, 2, 3, 4, 5]),
        (TRAP_DISPATCH + 0x10, [0x10, 0x20, 0x30, 0x40, 0x50]),
        (KERNEL_MAIN + 0x20, [0; 5]),
    ]
}

fn fixture_fp() -> usize {
    STACK_BASE
}

/// Kernel view over the fixture stack, symbols and `page_table`.
pub fn fixture_view(page_table: &'static dyn PageTable) -> KernelView<'static> {
    let words: &'static [usize] = Vec::leak(build_chain(&fixture_frames()));
    let stack: &'static WordImage<'static> = Box::leak(Box::new(WordImage::new(STACK_BASE, words)));
    let symbols: &'static SymbolTable<'static> = Box::leak(Box::new(symbols()));
    KernelView {
        layout: layout(),
        stack,
        symbols,
        page_table,
        frame_pointer: fixture_fp,
    }
}

/// The page table used by the monitor tests.
pub fn fixture_tables() -> SimTables {
    let mut tables = SimTables::new();
    tables.map(0xffff_0000_4008_0000, 0x4008_0000, PageSize::Size4K, kernel_rwx());
    tables.map(0xffff_0000_4008_1000, 0x4008_1000, PageSize::Size4K, kernel_ro());
    tables.map(0x0000_0000_0040_0000, 0x8800_0000, PageSize::Size2M, user_rw());
    tables.map(0xffff_0000_0900_0000, 0x0900_0000, PageSize::Size4K, device());
    tables
}
