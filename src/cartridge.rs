//! iNES (v1) loader producing a `Cartridge` wired to an NROM mapper.
//!
//! Adapted from the teacher's `cartridge.rs`: header parsing, PRG/CHR
//! extraction, and trainer handling are unchanged; the mapper factory is
//! trimmed to mapper 0 only (CNROM/MMC1/MMC3 are mapper-specific bank
//! switching, an explicit non-goal), and errors now return `CoreError`
//! instead of ad hoc `String`s.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::error::CoreError;
use crate::mapper::{Mapper, Nrom};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InesVersion {
    Ines1,
    Ines2, // rejected at load time; see from_ines_bytes
}

pub struct Cartridge {
    pub mapper: RefCell<Box<dyn Mapper>>,

    mapper_id: u16,
    mirroring: Mirroring,
    battery: bool,
    has_trainer: bool,
    pub ines_version: InesVersion,

    prg_rom_len: usize,
    chr_len: usize,
    prg_ram_len: usize,
    chr_is_ram: bool,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("mirroring", &self.mirroring)
            .field("battery", &self.battery)
            .field("has_trainer", &self.has_trainer)
            .field("ines_version", &self.ines_version)
            .field("prg_rom_len", &self.prg_rom_len)
            .field("chr_len", &self.chr_len)
            .field("prg_ram_len", &self.prg_ram_len)
            .field("chr_is_ram", &self.chr_is_ram)
            .finish()
    }
}

impl Cartridge {
    /// Loads a cartridge from raw iNES bytes and constructs its mapper
    /// (NROM / mapper 0 only — see §6).
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CoreError> {
        if data.len() < 16 {
            return Err(CoreError::RomParse("data too small for iNES header".into()));
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(CoreError::RomParse(
                "invalid iNES header magic (expected NES<1A>)".into(),
            ));
        }

        let prg_rom_16k_units = data[4] as usize;
        let chr_rom_8k_units = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];
        let prg_ram_8k_units = data.get(8).copied().unwrap_or(0) as usize;

        let is_ines2 = (flags7 & 0x0C) == 0x08;
        let version = if is_ines2 {
            InesVersion::Ines2
        } else {
            InesVersion::Ines1
        };
        if is_ines2 {
            return Err(CoreError::RomParse("NES 2.0 format is not supported".into()));
        }

        let mapper_low = (flags6 >> 4) as u16;
        let mapper_high = (flags7 & 0xF0) as u16;
        let mapper_id = mapper_high | mapper_low;

        let four_screen = (flags6 & 0b0000_1000) != 0;
        let vertical_mirroring = (flags6 & 0b0000_0001) != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if vertical_mirroring {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = (flags6 & 0b0000_0010) != 0;
        let has_trainer = (flags6 & 0b0000_0100) != 0;

        let mut offset = 16usize;
        if has_trainer {
            if data.len() < offset + 512 {
                return Err(CoreError::RomParse("data too small for iNES trainer".into()));
            }
            offset += 512;
        }

        let prg_rom_len = prg_rom_16k_units
            .checked_mul(16 * 1024)
            .ok_or_else(|| CoreError::RomParse("PRG ROM size overflow".into()))?;
        let (chr_len, chr_is_ram) = if chr_rom_8k_units == 0 {
            (8 * 1024, true)
        } else {
            (
                chr_rom_8k_units
                    .checked_mul(8 * 1024)
                    .ok_or_else(|| CoreError::RomParse("CHR ROM size overflow".into()))?,
                false,
            )
        };

        if data.len() < offset + prg_rom_len {
            return Err(CoreError::RomParse("data too small for PRG ROM".into()));
        }
        let prg_rom = data[offset..offset + prg_rom_len].to_vec();
        offset += prg_rom_len;

        let chr = if chr_is_ram {
            vec![0; chr_len]
        } else {
            if data.len() < offset + chr_len {
                return Err(CoreError::RomParse("data too small for CHR ROM".into()));
            }
            data[offset..offset + chr_len].to_vec()
        };

        let prg_ram_len = if prg_ram_8k_units == 0 {
            8 * 1024
        } else {
            prg_ram_8k_units
                .checked_mul(8 * 1024)
                .ok_or_else(|| CoreError::RomParse("PRG RAM size overflow".into()))?
        };

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Nrom::new(prg_rom, chr, chr_is_ram, prg_ram_len)),
            other => {
                return Err(CoreError::RomParse(format!(
                    "unsupported mapper id: {other} (only NROM/mapper 0 is implemented)"
                )))
            }
        };

        Ok(Self {
            mapper: RefCell::new(mapper),
            mapper_id,
            mirroring,
            battery,
            has_trainer,
            ines_version: version,
            prg_rom_len,
            chr_len,
            prg_ram_len,
            chr_is_ram,
        })
    }

    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let bytes = fs::read(path)
            .map_err(|e| CoreError::RomParse(format!("failed to read iNES file: {e}")))?;
        Self::from_ines_bytes(&bytes)
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn has_trainer(&self) -> bool {
        self.has_trainer
    }

    pub fn has_prg_ram(&self) -> bool {
        self.prg_ram_len > 0
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom_len
    }

    pub fn chr_len(&self) -> usize {
        self.chr_len
    }

    pub fn prg_ram_len(&self) -> usize {
        self.prg_ram_len
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_ines;

    #[test]
    fn parse_simple_nrom_32k_chr8k() {
        let flags6 = 0b0000_0001; // vertical mirroring
        let flags7 = 0u8;
        let data = build_ines(2, 1, flags6, flags7, 1, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        assert_eq!(cart.mapper_id(), 0);
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        assert!(cart.has_prg_ram());
        assert_eq!(cart.prg_rom_len(), 32 * 1024);
        assert_eq!(cart.chr_len(), 8 * 1024);

        assert_eq!(cart.mapper.borrow_mut().cpu_read(0x8000), Some(0xAA));
        assert_eq!(cart.mapper.borrow_mut().cpu_read(0xFFFF), Some(0xAA));
    }

    #[test]
    fn parse_nrom_16k_chr_ram() {
        let flags6 = 0b0000_0000;
        let flags7 = 0u8;
        let data = build_ines(1, 0, flags6, flags7, 0, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        assert_eq!(cart.mapper_id(), 0);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
        assert!(cart.has_prg_ram());
        assert_eq!(cart.prg_rom_len(), 16 * 1024);
        assert_eq!(cart.chr_len(), 8 * 1024); // allocated as CHR RAM
        assert!(cart.chr_is_ram());

        let first = cart.mapper.borrow_mut().cpu_read(0x8000);
        let mirrored = cart.mapper.borrow_mut().cpu_read(0xC000);
        assert_eq!(first, mirrored);
    }

    #[test]
    fn trainer_moves_data_offset() {
        let mut trainer = [0u8; 512];
        for (i, b) in trainer.iter_mut().enumerate() {
            *b = (i & 0xFF) as u8;
        }
        let flags6 = 0b0000_0100; // trainer present
        let flags7 = 0u8;
        let data = build_ines(1, 1, flags6, flags7, 1, Some(&trainer));
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.mapper_id(), 0);
        assert!(cart.has_trainer());
        assert!(cart.has_prg_ram());
    }

    #[test]
    fn ines2_rejected() {
        let flags6 = 0u8;
        let flags7 = 0b0000_1000;
        let data = build_ines(1, 1, flags6, flags7, 1, None);
        let err = Cartridge::from_ines_bytes(&data).unwrap_err();
        assert!(matches!(err, CoreError::RomParse(_)));
    }

    #[test]
    fn unsupported_mapper_rejected() {
        let flags6 = 0b0001_0000; // mapper low nibble = 1 (MMC1)
        let flags7 = 0u8;
        let data = build_ines(1, 1, flags6, flags7, 1, None);
        let err = Cartridge::from_ines_bytes(&data).unwrap_err();
        assert!(matches!(err, CoreError::RomParse(_)));
    }

    #[test]
    fn prg_ram_read_write() {
        let flags6 = 0u8;
        let flags7 = 0u8;
        let data = build_ines(2, 1, flags6, flags7, 1, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        cart.mapper.borrow_mut().cpu_write(0x6000, 0x42);
        assert_eq!(cart.mapper.borrow_mut().cpu_read(0x6000), Some(0x42));
    }
}
