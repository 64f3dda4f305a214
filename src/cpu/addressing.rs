//! The twelve 6502 addressing modes (§4.4): how many operand bytes each
//! consumes, and how that raw operand resolves to an address or a value.
//!
//! Grounded in the teacher's `cpu/addressing.rs` — same page-cross and
//! zero-page-wrap helpers, same indirect-JMP page-wrap bug — generalized
//! from the teacher's `(u16, bool)` return convention to `(value, extra
//! cycles)` so callers can fold the penalty straight into `extra_cycles`.

use crate::bus::Bus;
use crate::bytes::{crosses_page, make_u16};
use crate::error::CoreError;

use super::state::CpuState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl Mode {
    /// Operand bytes consumed after the opcode byte.
    pub fn input_size(self) -> u8 {
        match self {
            Mode::Implicit | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::Relative
            | Mode::IndirectX
            | Mode::IndirectY => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Implicit => "implicit",
            Mode::Accumulator => "accumulator",
            Mode::Immediate => "immediate",
            Mode::ZeroPage => "zero_page",
            Mode::ZeroPageX => "zero_page_x",
            Mode::ZeroPageY => "zero_page_y",
            Mode::Relative => "relative",
            Mode::Absolute => "absolute",
            Mode::AbsoluteX => "absolute_x",
            Mode::AbsoluteY => "absolute_y",
            Mode::Indirect => "indirect",
            Mode::IndirectX => "indirect_x",
            Mode::IndirectY => "indirect_y",
        }
    }
}

/// The raw operand bytes fetched after the opcode, shaped by `Mode::input_size`.
#[derive(Copy, Clone, Debug)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
}

impl Operand {
    fn byte(self) -> u8 {
        match self {
            Operand::Byte(b) => b,
            _ => unreachable!("operand fetch size disagreed with addressing mode"),
        }
    }

    fn word(self) -> u16 {
        match self {
            Operand::Word(w) => w,
            _ => unreachable!("operand fetch size disagreed with addressing mode"),
        }
    }
}

fn unsupported(mode: Mode, resolver: &'static str) -> CoreError {
    CoreError::UnsupportedAddressingResolver {
        mode: mode.name(),
        resolver,
    }
}

/// Reads a zero-page-indirect pointer: the high byte wraps within the zero
/// page rather than crossing into page 1.
fn read_word_zp_wrap(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read(base as u16);
    let hi = bus.read(base.wrapping_add(1) as u16);
    make_u16(lo, hi)
}

/// Resolves an address for modes that have one. Returns the address and any
/// page-cross penalty (not yet gated by `penalty_enabled` for Relative,
/// since branches only apply that bump when taken — see `cpu::execute`).
pub fn resolve_address(
    mode: Mode,
    operand: Operand,
    state: &CpuState,
    bus: &mut Bus,
    penalty_enabled: bool,
) -> Result<(u16, u32), CoreError> {
    match mode {
        Mode::Implicit | Mode::Accumulator | Mode::Immediate => {
            Err(unsupported(mode, "address"))
        }
        Mode::ZeroPage => Ok((operand.byte() as u16, 0)),
        Mode::ZeroPageX => Ok((operand.byte().wrapping_add(state.x) as u16, 0)),
        Mode::ZeroPageY => Ok((operand.byte().wrapping_add(state.y) as u16, 0)),
        Mode::Relative => {
            let offset = operand.byte() as i8 as i16;
            let target = (state.pc as i16).wrapping_add(offset) as u16;
            let extra = if penalty_enabled && crosses_page(state.pc, target) {
                1
            } else {
                0
            };
            Ok((target, extra))
        }
        Mode::Absolute => Ok((operand.word(), 0)),
        Mode::AbsoluteX => {
            let base = operand.word();
            let addr = base.wrapping_add(state.x as u16);
            let extra = if penalty_enabled && crosses_page(base, addr) {
                1
            } else {
                0
            };
            Ok((addr, extra))
        }
        Mode::AbsoluteY => {
            let base = operand.word();
            let addr = base.wrapping_add(state.y as u16);
            let extra = if penalty_enabled && crosses_page(base, addr) {
                1
            } else {
                0
            };
            Ok((addr, extra))
        }
        Mode::Indirect => {
            // Hardware bug: the high byte wraps within the same page as the
            // pointer instead of crossing into the next one.
            let ptr = operand.word();
            let lo = bus.read(ptr);
            let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
            let hi = bus.read(hi_addr);
            Ok((make_u16(lo, hi), 0))
        }
        Mode::IndirectX => {
            let zp = operand.byte().wrapping_add(state.x);
            Ok((read_word_zp_wrap(bus, zp), 0))
        }
        Mode::IndirectY => {
            let zp = operand.byte();
            let base = read_word_zp_wrap(bus, zp);
            let addr = base.wrapping_add(state.y as u16);
            let extra = if penalty_enabled && crosses_page(base, addr) {
                1
            } else {
                0
            };
            Ok((addr, extra))
        }
    }
}

/// Resolves a value for modes that have one, reading through the bus for
/// every mode except Immediate (which carries its own operand).
pub fn resolve_value(
    mode: Mode,
    operand: Operand,
    state: &CpuState,
    bus: &mut Bus,
    penalty_enabled: bool,
) -> Result<(u8, u32), CoreError> {
    match mode {
        Mode::Immediate => Ok((operand.byte(), 0)),
        Mode::Implicit | Mode::Accumulator | Mode::Relative | Mode::Indirect => {
            Err(unsupported(mode, "value"))
        }
        _ => {
            let (addr, extra) = resolve_address(mode, operand, state, bus, penalty_enabled)?;
            Ok((bus.read(addr), extra))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Cartridge;
    use crate::test_utils::build_nrom_with_prg;

    fn bus() -> Bus {
        let rom = build_nrom_with_prg(&[], 0, 1, None);
        Bus::new(Cartridge::from_ines_bytes(&rom).expect("valid rom"))
    }

    #[test]
    fn zero_page_x_wraps() {
        let mut bus = bus();
        let state = CpuState {
            x: 0xE0,
            ..CpuState::default()
        };
        let (addr, extra) =
            resolve_address(Mode::ZeroPageX, Operand::Byte(0x20), &state, &mut bus, true).unwrap();
        assert_eq!(addr, 0x00);
        assert_eq!(extra, 0);
    }

    #[test]
    fn absolute_x_page_cross_adds_penalty() {
        let mut bus = bus();
        let state = CpuState {
            x: 0x01,
            ..CpuState::default()
        };
        let (addr, extra) = resolve_address(
            Mode::AbsoluteX,
            Operand::Word(0x30FF),
            &state,
            &mut bus,
            true,
        )
        .unwrap();
        assert_eq!(addr, 0x3100);
        assert_eq!(extra, 1);
    }

    #[test]
    fn indirect_jmp_page_wrap_bug() {
        let mut bus = bus();
        bus.write(0x30FF, 0x07);
        bus.write(0x3000, 0x06);
        let state = CpuState::default();
        let (addr, _) = resolve_address(
            Mode::Indirect,
            Operand::Word(0x30FF),
            &state,
            &mut bus,
            true,
        )
        .unwrap();
        assert_eq!(addr, 0x0607);
    }

    #[test]
    fn indirect_y_page_cross() {
        let mut bus = bus();
        bus.write(0x00FE, 0xFE);
        bus.write(0x00FF, 0x02);
        let state = CpuState {
            y: 0x03,
            ..CpuState::default()
        };
        let (addr, extra) = resolve_address(
            Mode::IndirectY,
            Operand::Byte(0xFE),
            &state,
            &mut bus,
            true,
        )
        .unwrap();
        assert_eq!(addr, 0x0301);
        assert_eq!(extra, 1);
    }

    #[test]
    fn relative_page_cross() {
        let mut bus = bus();
        let state = CpuState {
            pc: 0x30FF, // PC already advanced past the operand byte
            ..CpuState::default()
        };
        let (target, extra) =
            resolve_address(Mode::Relative, Operand::Byte(0x01), &state, &mut bus, true).unwrap();
        assert_eq!(target, 0x3100);
        assert_eq!(extra, 1);
    }

    #[test]
    fn immediate_has_no_address() {
        let mut bus = bus();
        let state = CpuState::default();
        let err = resolve_address(Mode::Immediate, Operand::Byte(1), &state, &mut bus, true)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedAddressingResolver { .. }
        ));
    }
}
