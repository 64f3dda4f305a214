#![doc = r#"
NES CPU core library crate.

This crate implements the CPU interpreter and bus for a Nintendo
Entertainment System: cycle-counted 6502 execution, the three addressing-mode
families, interrupt delivery (RESET/NMI/IRQ/BRK), and a banked memory map
multiplexing work RAM, memory-mapped I/O, controllers, and a cartridge
mapper. Pixel rendering, audio synthesis, and mapper-specific bank switching
are out of scope; the PPU and APU register windows are modeled as opaque
collaborator traits a frontend can implement.

Modules:
- bytes: little-endian byte helpers and page-cross detection
- error: `CoreError`, the crate's fallible surface
- cpu: register/flag state, addressing modes, the opcode table, execution,
  interrupt entry, and the `Cpu` facade
- bus: the CPU-visible address bus, open-bus latch, and port delegation
- mapper: the `Mapper` trait and the NROM (mapper 0) implementation
- controller: NES controller shift-register emulation and port coupling
- cartridge: iNES v1 loader producing a `Cartridge` wired to a mapper

Shared iNES test fixtures live under `crate::test_utils`.
"#]

pub mod bus;
pub mod bytes;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use error::CoreError;

#[cfg(test)]
pub mod test_utils;
