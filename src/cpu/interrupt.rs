//! Interrupt entry (§4.8): RESET/NMI/IRQ/BRK push-and-vector sequences.
//!
//! Confirmed against `original_source/src/interrupts.py`, which encodes
//! exactly the same table — BRK and IRQ both vector through `$FFFE`,
//! distinguished only by the B-flag pushed alongside the status byte — and
//! against the §9 design note calling for the RESET variant that decrements
//! SP three times without writing, rather than pushing anyway.

use crate::bus::Bus;

use super::stack;
use super::state::CpuState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterruptKind {
    Reset,
    Nmi,
    Irq,
    Brk,
}

/// Runs one interrupt-entry sequence to completion, returning the CPU
/// cycles it consumes. An IRQ masked by the I flag consumes zero cycles and
/// leaves all other state untouched.
pub fn enter(kind: InterruptKind, state: &mut CpuState, bus: &mut Bus) -> u32 {
    if kind == InterruptKind::Irq && state.flags.i {
        return 0;
    }

    match kind {
        InterruptKind::Reset => {
            // Real hardware doesn't write to the stack on reset; it just
            // decrements SP three times as if it had.
            state.sp = state.sp.wrapping_sub(3);
        }
        InterruptKind::Nmi | InterruptKind::Irq | InterruptKind::Brk => {
            stack::push_u16(state, bus, state.pc);
            let b_flag = kind == InterruptKind::Brk;
            let status = state.flags.encode(b_flag);
            stack::push_u8(state, bus, status);
        }
    }

    state.flags.i = true;

    let vector = match kind {
        InterruptKind::Reset => 0xFFFC,
        InterruptKind::Nmi => 0xFFFA,
        InterruptKind::Irq | InterruptKind::Brk => 0xFFFE,
    };
    state.pc = bus.read16(vector);
    7
}
