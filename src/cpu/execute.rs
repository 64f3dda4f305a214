//! Operation contracts (§4.6): what each of the ~56 mnemonics does to CPU
//! state once its addressing mode has resolved to a value or an address.
//!
//! Grounded in the teacher's `cpu/execute.rs`, which groups operations the
//! same way (loads/transfers, logical, shifts, arithmetic, RMW, branches,
//! stack) — generalized here to run over the full documented instruction
//! set against the `Flags`/`Mode`/`Operation` types instead of the
//! teacher's bitmask constants.

use crate::bus::Bus;
use crate::error::CoreError;

use super::addressing::{self, Mode, Operand};
use super::flags::Flags;
use super::interrupt::{self, InterruptKind};
use super::irq;
use super::stack;
use super::state::CpuState;
use super::table::{ArgKind, Operation};

/// Executes one decoded instruction: resolves its operand per `arg_kind`,
/// applies the operation, and folds any addressing-mode penalty into
/// `state.extra_cycles`. `page_cross_penalty` is the opcode's table entry
/// for whether a page cross costs an extra cycle at all — stores and the
/// absolute,X read-modify-write instructions take a fixed cycle count
/// regardless of crossing, so callers pass `entry.page_cross_penalty`
/// through from the decode table rather than always enabling it. Branch
/// penalties are handled entirely here since they only apply when the
/// branch is taken (§8 boundary scenarios), independent of this flag.
pub fn dispatch(
    op: Operation,
    mode: Mode,
    operand: Operand,
    state: &mut CpuState,
    bus: &mut Bus,
    page_cross_penalty: bool,
) -> Result<(), CoreError> {
    match op.arg_kind() {
        ArgKind::Value => {
            let (value, extra) =
                addressing::resolve_value(mode, operand, state, bus, page_cross_penalty)?;
            state.extra_cycles += extra;
            apply_value_op(op, value, state);
        }
        ArgKind::Address => {
            let (addr, extra) =
                addressing::resolve_address(mode, operand, state, bus, page_cross_penalty)?;
            state.extra_cycles += extra;
            apply_address_op(op, addr, state, bus);
        }
        ArgKind::Branch => {
            let (target, extra) = addressing::resolve_address(mode, operand, state, bus, true)?;
            if branch_taken(op, state.flags) {
                state.extra_cycles += 1 + extra;
                state.pc = target;
            }
        }
        ArgKind::None => apply_implicit_op(op, state, bus),
    }
    Ok(())
}

fn branch_taken(op: Operation, flags: Flags) -> bool {
    match op {
        Operation::Bcc => !flags.c,
        Operation::Bcs => flags.c,
        Operation::Beq => flags.z,
        Operation::Bne => !flags.z,
        Operation::Bmi => flags.n,
        Operation::Bpl => !flags.n,
        Operation::Bvc => !flags.v,
        Operation::Bvs => flags.v,
        _ => unreachable!("branch_taken called with a non-branch operation"),
    }
}

fn apply_value_op(op: Operation, value: u8, state: &mut CpuState) {
    match op {
        Operation::Lda => {
            state.a = value;
            state.flags.update_zn(value);
        }
        Operation::Ldx => {
            state.x = value;
            state.flags.update_zn(value);
        }
        Operation::Ldy => {
            state.y = value;
            state.flags.update_zn(value);
        }
        Operation::And => {
            state.a &= value;
            state.flags.update_zn(state.a);
        }
        Operation::Ora => {
            state.a |= value;
            state.flags.update_zn(state.a);
        }
        Operation::Eor => {
            state.a ^= value;
            state.flags.update_zn(state.a);
        }
        Operation::Adc => adc(state, value),
        Operation::Sbc => adc(state, value ^ 0xFF),
        Operation::Cmp => compare(state, state.a, value),
        Operation::Cpx => compare(state, state.x, value),
        Operation::Cpy => compare(state, state.y, value),
        Operation::Bit => bit(state, value),
        _ => unreachable!("apply_value_op called with a non-value operation"),
    }
}

/// ADC's result, carry, and overflow formula. SBC reuses this with its
/// operand pre-complemented (`M ^ 0xFF`), per §4.6.
fn adc(state: &mut CpuState, operand: u8) {
    let a_old = state.a;
    let carry_in = state.flags.c as u16;
    let sum = a_old as u16 + operand as u16 + carry_in;
    let result = (sum & 0xFF) as u8;
    state.flags.c = sum > 0xFF;
    state.flags.v = ((a_old ^ result) & (operand ^ result) & 0x80) != 0;
    state.a = result;
    state.flags.update_zn(result);
}

fn compare(state: &mut CpuState, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    state.flags.c = register >= value;
    state.flags.z = register == value;
    state.flags.n = result & 0x80 != 0;
}

fn bit(state: &mut CpuState, value: u8) {
    state.flags.z = (state.a & value) == 0;
    state.flags.n = value & 0x80 != 0;
    state.flags.v = value & 0x40 != 0;
}

fn apply_address_op(op: Operation, addr: u16, state: &mut CpuState, bus: &mut Bus) {
    match op {
        Operation::Sta => bus.write(addr, state.a),
        Operation::Stx => bus.write(addr, state.x),
        Operation::Sty => bus.write(addr, state.y),
        Operation::Jmp => state.pc = addr,
        Operation::Jsr => {
            let return_addr = state.pc.wrapping_sub(1);
            stack::push_u16(state, bus, return_addr);
            state.pc = addr;
        }
        Operation::AslMem => rmw(state, bus, addr, |v, flags| {
            flags.c = v & 0x80 != 0;
            v << 1
        }),
        Operation::LsrMem => rmw(state, bus, addr, |v, flags| {
            flags.c = v & 0x01 != 0;
            v >> 1
        }),
        Operation::RolMem => rmw(state, bus, addr, |v, flags| {
            let old_c = flags.c as u8;
            flags.c = v & 0x80 != 0;
            (v << 1) | old_c
        }),
        Operation::RorMem => rmw(state, bus, addr, |v, flags| {
            let old_c = flags.c as u8;
            flags.c = v & 0x01 != 0;
            (v >> 1) | (old_c << 7)
        }),
        Operation::Inc => rmw(state, bus, addr, |v, _flags| v.wrapping_add(1)),
        Operation::Dec => rmw(state, bus, addr, |v, _flags| v.wrapping_sub(1)),
        _ => unreachable!("apply_address_op called with a non-address operation"),
    }
}

/// The read-modify-write discipline (§4.6): read, write back the
/// unmodified value (a hardware quirk observable by memory-mapped
/// devices), then write the transformed result.
fn rmw(state: &mut CpuState, bus: &mut Bus, addr: u16, f: impl FnOnce(u8, &mut Flags) -> u8) {
    let original = bus.read(addr);
    bus.write(addr, original);
    let result = f(original, &mut state.flags);
    bus.write(addr, result);
    state.flags.update_zn(result);
}

fn apply_implicit_op(op: Operation, state: &mut CpuState, bus: &mut Bus) {
    match op {
        Operation::Nop => {}
        Operation::Clc => state.flags.c = false,
        Operation::Sec => state.flags.c = true,
        Operation::Cld => state.flags.d = false,
        Operation::Sed => state.flags.d = true,
        Operation::Clv => state.flags.v = false,
        Operation::Cli => irq::schedule_i_flag_change(state, false),
        Operation::Sei => irq::schedule_i_flag_change(state, true),
        Operation::Tax => {
            state.x = state.a;
            state.flags.update_zn(state.x);
        }
        Operation::Tay => {
            state.y = state.a;
            state.flags.update_zn(state.y);
        }
        Operation::Tsx => {
            state.x = state.sp;
            state.flags.update_zn(state.x);
        }
        Operation::Txa => {
            state.a = state.x;
            state.flags.update_zn(state.a);
        }
        Operation::Tya => {
            state.a = state.y;
            state.flags.update_zn(state.a);
        }
        // TXS is the one transfer that leaves flags alone.
        Operation::Txs => state.sp = state.x,
        Operation::Inx => {
            state.x = state.x.wrapping_add(1);
            state.flags.update_zn(state.x);
        }
        Operation::Iny => {
            state.y = state.y.wrapping_add(1);
            state.flags.update_zn(state.y);
        }
        Operation::Dex => {
            state.x = state.x.wrapping_sub(1);
            state.flags.update_zn(state.x);
        }
        Operation::Dey => {
            state.y = state.y.wrapping_sub(1);
            state.flags.update_zn(state.y);
        }
        Operation::AslAcc => {
            state.flags.c = state.a & 0x80 != 0;
            state.a <<= 1;
            state.flags.update_zn(state.a);
        }
        Operation::LsrAcc => {
            state.flags.c = state.a & 0x01 != 0;
            state.a >>= 1;
            state.flags.update_zn(state.a);
        }
        Operation::RolAcc => {
            let old_c = state.flags.c as u8;
            state.flags.c = state.a & 0x80 != 0;
            state.a = (state.a << 1) | old_c;
            state.flags.update_zn(state.a);
        }
        Operation::RorAcc => {
            let old_c = state.flags.c as u8;
            state.flags.c = state.a & 0x01 != 0;
            state.a = (state.a >> 1) | (old_c << 7);
            state.flags.update_zn(state.a);
        }
        Operation::Pha => stack::push_u8(state, bus, state.a),
        Operation::Php => {
            let byte = state.flags.encode(true);
            stack::push_u8(state, bus, byte);
        }
        Operation::Pla => {
            state.a = stack::pop_u8(state, bus);
            state.flags.update_zn(state.a);
        }
        Operation::Plp => {
            let byte = stack::pop_u8(state, bus);
            let decoded = Flags::decode(byte);
            state.flags.c = decoded.c;
            state.flags.z = decoded.z;
            state.flags.d = decoded.d;
            state.flags.v = decoded.v;
            state.flags.n = decoded.n;
            irq::schedule_i_flag_change(state, decoded.i);
        }
        Operation::Rti => {
            let byte = stack::pop_u8(state, bus);
            state.flags = Flags::decode(byte);
            state.pc = stack::pop_u16(state, bus);
        }
        Operation::Rts => {
            let addr = stack::pop_u16(state, bus);
            state.pc = addr.wrapping_add(1);
        }
        Operation::Brk => {
            state.pc = state.pc.wrapping_add(1);
            // The table already accounts BRK's 7 cycles as its base_cycles;
            // `interrupt::enter`'s return value is redundant here.
            let _ = interrupt::enter(InterruptKind::Brk, state, bus);
        }
        _ => unreachable!("apply_implicit_op called with a non-implicit operation"),
    }
}
