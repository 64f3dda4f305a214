//! Stack push/pop on page $01, addressed by SP (§4.3).
//!
//! Grounded in `original_source/src/cpu/Stack.py`: push writes then
//! decrements, pop increments then reads, and 16-bit pushes go high byte
//! first so a matching pop reads low byte first and reconstructs the
//! original value.

use crate::bus::Bus;
use crate::bytes::{hi, lo, make_u16};

use super::state::CpuState;

const STACK_PAGE: u16 = 0x0100;

pub fn push_u8(state: &mut CpuState, bus: &mut Bus, value: u8) {
    bus.write(STACK_PAGE | state.sp as u16, value);
    state.sp = state.sp.wrapping_sub(1);
}

pub fn pop_u8(state: &mut CpuState, bus: &mut Bus) -> u8 {
    state.sp = state.sp.wrapping_add(1);
    bus.read(STACK_PAGE | state.sp as u16)
}

pub fn push_u16(state: &mut CpuState, bus: &mut Bus, value: u16) {
    push_u8(state, bus, hi(value));
    push_u8(state, bus, lo(value));
}

pub fn pop_u16(state: &mut CpuState, bus: &mut Bus) -> u16 {
    let lo_byte = pop_u8(state, bus);
    let hi_byte = pop_u8(state, bus);
    make_u16(lo_byte, hi_byte)
}
