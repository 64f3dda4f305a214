//! The dense opcode table (§4.5): every documented 6502 opcode maps to an
//! operation, an addressing mode, a base cycle count, and whether that
//! opcode's addressing resolution can add a page-cross penalty.
//!
//! The teacher's `cpu/table.rs` ships this behind a `table_dispatch`
//! feature flag and only covers LDA plus a handful of control opcodes,
//! falling back to a separate legacy dispatcher for everything else. This
//! version makes the table itself the sole, always-on, complete dispatch
//! path for the full documented instruction set, as spec.md's design notes
//! (§9) call for. Unofficial/illegal opcodes are intentionally absent:
//! `decode` returns `None` for them, and the caller surfaces that as the
//! unimplemented-opcode error from §7.

use super::addressing::Mode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgKind {
    None,
    Value,
    Address,
    Branch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Adc,
    And,
    AslAcc,
    AslMem,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    LsrAcc,
    LsrMem,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    RolAcc,
    RolMem,
    RorAcc,
    RorMem,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Operation {
    /// Argument kind depends only on the operation, never on the
    /// addressing mode it happens to be dispatched through (§4.5).
    pub fn arg_kind(self) -> ArgKind {
        use Operation::*;
        match self {
            Lda | Ldx | Ldy | And | Ora | Eor | Adc | Sbc | Cmp | Cpx | Cpy | Bit => ArgKind::Value,
            Sta | Stx | Sty | Jmp | Jsr | AslMem | LsrMem | RolMem | RorMem | Inc | Dec => {
                ArgKind::Address
            }
            Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => ArgKind::Branch,
            _ => ArgKind::None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct OpEntry {
    pub operation: Operation,
    pub mode: Mode,
    pub base_cycles: u8,
    pub page_cross_penalty: bool,
}

impl OpEntry {
    const fn new(operation: Operation, mode: Mode, base_cycles: u8, page_cross_penalty: bool) -> Self {
        Self {
            operation,
            mode,
            base_cycles,
            page_cross_penalty,
        }
    }
}

/// Decodes one opcode byte into its table entry, or `None` if the byte is
/// not a documented 6502 instruction.
pub fn decode(opcode: u8) -> Option<OpEntry> {
    use Mode::*;
    use Operation::*;

    Some(match opcode {
        // ADC
        0x69 => OpEntry::new(Adc, Immediate, 2, false),
        0x65 => OpEntry::new(Adc, ZeroPage, 3, false),
        0x75 => OpEntry::new(Adc, ZeroPageX, 4, false),
        0x6D => OpEntry::new(Adc, Absolute, 4, false),
        0x7D => OpEntry::new(Adc, AbsoluteX, 4, true),
        0x79 => OpEntry::new(Adc, AbsoluteY, 4, true),
        0x61 => OpEntry::new(Adc, IndirectX, 6, false),
        0x71 => OpEntry::new(Adc, IndirectY, 5, true),

        // AND
        0x29 => OpEntry::new(And, Immediate, 2, false),
        0x25 => OpEntry::new(And, ZeroPage, 3, false),
        0x35 => OpEntry::new(And, ZeroPageX, 4, false),
        0x2D => OpEntry::new(And, Absolute, 4, false),
        0x3D => OpEntry::new(And, AbsoluteX, 4, true),
        0x39 => OpEntry::new(And, AbsoluteY, 4, true),
        0x21 => OpEntry::new(And, IndirectX, 6, false),
        0x31 => OpEntry::new(And, IndirectY, 5, true),

        // ASL
        0x0A => OpEntry::new(AslAcc, Accumulator, 2, false),
        0x06 => OpEntry::new(AslMem, ZeroPage, 5, false),
        0x16 => OpEntry::new(AslMem, ZeroPageX, 6, false),
        0x0E => OpEntry::new(AslMem, Absolute, 6, false),
        0x1E => OpEntry::new(AslMem, AbsoluteX, 7, false),

        // Branches
        0x90 => OpEntry::new(Bcc, Relative, 2, true),
        0xB0 => OpEntry::new(Bcs, Relative, 2, true),
        0xF0 => OpEntry::new(Beq, Relative, 2, true),
        0x30 => OpEntry::new(Bmi, Relative, 2, true),
        0xD0 => OpEntry::new(Bne, Relative, 2, true),
        0x10 => OpEntry::new(Bpl, Relative, 2, true),
        0x50 => OpEntry::new(Bvc, Relative, 2, true),
        0x70 => OpEntry::new(Bvs, Relative, 2, true),

        // BIT
        0x24 => OpEntry::new(Bit, ZeroPage, 3, false),
        0x2C => OpEntry::new(Bit, Absolute, 4, false),

        // BRK
        0x00 => OpEntry::new(Brk, Implicit, 7, false),

        // Flag ops
        0x18 => OpEntry::new(Clc, Implicit, 2, false),
        0xD8 => OpEntry::new(Cld, Implicit, 2, false),
        0x58 => OpEntry::new(Cli, Implicit, 2, false),
        0xB8 => OpEntry::new(Clv, Implicit, 2, false),
        0x38 => OpEntry::new(Sec, Implicit, 2, false),
        0xF8 => OpEntry::new(Sed, Implicit, 2, false),
        0x78 => OpEntry::new(Sei, Implicit, 2, false),

        // CMP
        0xC9 => OpEntry::new(Cmp, Immediate, 2, false),
        0xC5 => OpEntry::new(Cmp, ZeroPage, 3, false),
        0xD5 => OpEntry::new(Cmp, ZeroPageX, 4, false),
        0xCD => OpEntry::new(Cmp, Absolute, 4, false),
        0xDD => OpEntry::new(Cmp, AbsoluteX, 4, true),
        0xD9 => OpEntry::new(Cmp, AbsoluteY, 4, true),
        0xC1 => OpEntry::new(Cmp, IndirectX, 6, false),
        0xD1 => OpEntry::new(Cmp, IndirectY, 5, true),

        // CPX / CPY
        0xE0 => OpEntry::new(Cpx, Immediate, 2, false),
        0xE4 => OpEntry::new(Cpx, ZeroPage, 3, false),
        0xEC => OpEntry::new(Cpx, Absolute, 4, false),
        0xC0 => OpEntry::new(Cpy, Immediate, 2, false),
        0xC4 => OpEntry::new(Cpy, ZeroPage, 3, false),
        0xCC => OpEntry::new(Cpy, Absolute, 4, false),

        // DEC / DEX / DEY
        0xC6 => OpEntry::new(Dec, ZeroPage, 5, false),
        0xD6 => OpEntry::new(Dec, ZeroPageX, 6, false),
        0xCE => OpEntry::new(Dec, Absolute, 6, false),
        0xDE => OpEntry::new(Dec, AbsoluteX, 7, false),
        0xCA => OpEntry::new(Dex, Implicit, 2, false),
        0x88 => OpEntry::new(Dey, Implicit, 2, false),

        // EOR
        0x49 => OpEntry::new(Eor, Immediate, 2, false),
        0x45 => OpEntry::new(Eor, ZeroPage, 3, false),
        0x55 => OpEntry::new(Eor, ZeroPageX, 4, false),
        0x4D => OpEntry::new(Eor, Absolute, 4, false),
        0x5D => OpEntry::new(Eor, AbsoluteX, 4, true),
        0x59 => OpEntry::new(Eor, AbsoluteY, 4, true),
        0x41 => OpEntry::new(Eor, IndirectX, 6, false),
        0x51 => OpEntry::new(Eor, IndirectY, 5, true),

        // INC / INX / INY
        0xE6 => OpEntry::new(Inc, ZeroPage, 5, false),
        0xF6 => OpEntry::new(Inc, ZeroPageX, 6, false),
        0xEE => OpEntry::new(Inc, Absolute, 6, false),
        0xFE => OpEntry::new(Inc, AbsoluteX, 7, false),
        0xE8 => OpEntry::new(Inx, Implicit, 2, false),
        0xC8 => OpEntry::new(Iny, Implicit, 2, false),

        // JMP / JSR
        0x4C => OpEntry::new(Jmp, Absolute, 3, false),
        0x6C => OpEntry::new(Jmp, Indirect, 5, false),
        0x20 => OpEntry::new(Jsr, Absolute, 6, false),

        // LDA
        0xA9 => OpEntry::new(Lda, Immediate, 2, false),
        0xA5 => OpEntry::new(Lda, ZeroPage, 3, false),
        0xB5 => OpEntry::new(Lda, ZeroPageX, 4, false),
        0xAD => OpEntry::new(Lda, Absolute, 4, false),
        0xBD => OpEntry::new(Lda, AbsoluteX, 4, true),
        0xB9 => OpEntry::new(Lda, AbsoluteY, 4, true),
        0xA1 => OpEntry::new(Lda, IndirectX, 6, false),
        0xB1 => OpEntry::new(Lda, IndirectY, 5, true),

        // LDX
        0xA2 => OpEntry::new(Ldx, Immediate, 2, false),
        0xA6 => OpEntry::new(Ldx, ZeroPage, 3, false),
        0xB6 => OpEntry::new(Ldx, ZeroPageY, 4, false),
        0xAE => OpEntry::new(Ldx, Absolute, 4, false),
        0xBE => OpEntry::new(Ldx, AbsoluteY, 4, true),

        // LDY
        0xA0 => OpEntry::new(Ldy, Immediate, 2, false),
        0xA4 => OpEntry::new(Ldy, ZeroPage, 3, false),
        0xB4 => OpEntry::new(Ldy, ZeroPageX, 4, false),
        0xAC => OpEntry::new(Ldy, Absolute, 4, false),
        0xBC => OpEntry::new(Ldy, AbsoluteX, 4, true),

        // LSR
        0x4A => OpEntry::new(LsrAcc, Accumulator, 2, false),
        0x46 => OpEntry::new(LsrMem, ZeroPage, 5, false),
        0x56 => OpEntry::new(LsrMem, ZeroPageX, 6, false),
        0x4E => OpEntry::new(LsrMem, Absolute, 6, false),
        0x5E => OpEntry::new(LsrMem, AbsoluteX, 7, false),

        // NOP
        0xEA => OpEntry::new(Nop, Implicit, 2, false),

        // ORA
        0x09 => OpEntry::new(Ora, Immediate, 2, false),
        0x05 => OpEntry::new(Ora, ZeroPage, 3, false),
        0x15 => OpEntry::new(Ora, ZeroPageX, 4, false),
        0x0D => OpEntry::new(Ora, Absolute, 4, false),
        0x1D => OpEntry::new(Ora, AbsoluteX, 4, true),
        0x19 => OpEntry::new(Ora, AbsoluteY, 4, true),
        0x01 => OpEntry::new(Ora, IndirectX, 6, false),
        0x11 => OpEntry::new(Ora, IndirectY, 5, true),

        // Stack ops
        0x48 => OpEntry::new(Pha, Implicit, 3, false),
        0x08 => OpEntry::new(Php, Implicit, 3, false),
        0x68 => OpEntry::new(Pla, Implicit, 4, false),
        0x28 => OpEntry::new(Plp, Implicit, 4, false),

        // ROL
        0x2A => OpEntry::new(RolAcc, Accumulator, 2, false),
        0x26 => OpEntry::new(RolMem, ZeroPage, 5, false),
        0x36 => OpEntry::new(RolMem, ZeroPageX, 6, false),
        0x2E => OpEntry::new(RolMem, Absolute, 6, false),
        0x3E => OpEntry::new(RolMem, AbsoluteX, 7, false),

        // ROR
        0x6A => OpEntry::new(RorAcc, Accumulator, 2, false),
        0x66 => OpEntry::new(RorMem, ZeroPage, 5, false),
        0x76 => OpEntry::new(RorMem, ZeroPageX, 6, false),
        0x6E => OpEntry::new(RorMem, Absolute, 6, false),
        0x7E => OpEntry::new(RorMem, AbsoluteX, 7, false),

        // RTI / RTS
        0x40 => OpEntry::new(Rti, Implicit, 6, false),
        0x60 => OpEntry::new(Rts, Implicit, 6, false),

        // SBC
        0xE9 => OpEntry::new(Sbc, Immediate, 2, false),
        0xE5 => OpEntry::new(Sbc, ZeroPage, 3, false),
        0xF5 => OpEntry::new(Sbc, ZeroPageX, 4, false),
        0xED => OpEntry::new(Sbc, Absolute, 4, false),
        0xFD => OpEntry::new(Sbc, AbsoluteX, 4, true),
        0xF9 => OpEntry::new(Sbc, AbsoluteY, 4, true),
        0xE1 => OpEntry::new(Sbc, IndirectX, 6, false),
        0xF1 => OpEntry::new(Sbc, IndirectY, 5, true),

        // STA
        0x85 => OpEntry::new(Sta, ZeroPage, 3, false),
        0x95 => OpEntry::new(Sta, ZeroPageX, 4, false),
        0x8D => OpEntry::new(Sta, Absolute, 4, false),
        0x9D => OpEntry::new(Sta, AbsoluteX, 5, false),
        0x99 => OpEntry::new(Sta, AbsoluteY, 5, false),
        0x81 => OpEntry::new(Sta, IndirectX, 6, false),
        0x91 => OpEntry::new(Sta, IndirectY, 6, false),

        // STX / STY
        0x86 => OpEntry::new(Stx, ZeroPage, 3, false),
        0x96 => OpEntry::new(Stx, ZeroPageY, 4, false),
        0x8E => OpEntry::new(Stx, Absolute, 4, false),
        0x84 => OpEntry::new(Sty, ZeroPage, 3, false),
        0x94 => OpEntry::new(Sty, ZeroPageX, 4, false),
        0x8C => OpEntry::new(Sty, Absolute, 4, false),

        // Register transfers
        0xAA => OpEntry::new(Tax, Implicit, 2, false),
        0xA8 => OpEntry::new(Tay, Implicit, 2, false),
        0xBA => OpEntry::new(Tsx, Implicit, 2, false),
        0x8A => OpEntry::new(Txa, Implicit, 2, false),
        0x9A => OpEntry::new(Txs, Implicit, 2, false),
        0x98 => OpEntry::new(Tya, Implicit, 2, false),

        _ => return None,
    })
}
