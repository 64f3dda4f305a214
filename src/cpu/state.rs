//! Architectural register file and the transient per-instruction counters.
//!
//! Grounded in the teacher's `cpu/state.rs` (`CpuState`), generalized from
//! its packed-`u8` status byte to the `Flags` type, and extended with the
//! cycle/IRQ bookkeeping spec.md's data model (§3) requires that the
//! teacher's migration-era `CpuState` didn't carry.

use crate::bus::Bus;

use super::flags::Flags;
use super::irq::{DelayedIFlag, IrqSources};

#[derive(Clone, Debug)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub flags: Flags,
    pub cycles: u64,
    pub extra_cycles: u32,
    pub delayed_i_flag: Option<DelayedIFlag>,
    pub irq_sources: IrqSources,
    pub halted: bool,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            flags: Flags {
                i: true,
                ..Flags::default()
            },
            cycles: 0,
            extra_cycles: 0,
            delayed_i_flag: None,
            irq_sources: IrqSources::default(),
            halted: false,
        }
    }
}

impl CpuState {
    /// Reads the byte at PC and advances PC by one.
    pub fn fetch_u8(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC, advancing PC by two.
    pub fn fetch_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch_u8(bus);
        let hi = self.fetch_u8(bus);
        crate::bytes::make_u16(lo, hi)
    }
}
