use std::path::Path;

use crate::error::RomError;

const INES_MAGIC: &[u8; 4] = b"NES\x1a";
const INES_HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_LEN: usize = 16384;
pub const MAX_FLAT_PRG: usize = 0x8000;

/// Flat program image: PRG ROM mapped at $8000-$FFFF without bank switching.
#[derive(Debug, Clone)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    mapper: u8,
    checksum: u32,
}

impl Cartridge {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RomError> {
        let data = std::fs::read(path.as_ref())?;
        let cartridge = Self::from_bytes(&data)?;
        log::info!(
            "Cartridge loaded - {}: mapper {}, PRG ROM {} bytes, checksum 0x{:08X}",
            path.as_ref().display(),
            cartridge.mapper,
            cartridge.prg_rom.len(),
            cartridge.checksum
        );
        Ok(cartridge)
    }

    /// Accepts an iNES container or a raw program binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RomError> {
        if data.len() >= INES_HEADER_LEN && &data[0..4] == INES_MAGIC {
            Self::from_ines(data)
        } else {
            Self::from_prg(data.to_vec(), 0)
        }
    }

    fn from_ines(data: &[u8]) -> Result<Self, RomError> {
        let prg_rom_size = data[4] as usize * PRG_BANK_LEN;
        let flags6 = data[6];
        let flags7 = data[7];
        let mapper = (flags7 & 0xF0) | (flags6 >> 4);

        let mut prg_rom_start = INES_HEADER_LEN;
        if flags6 & 0x04 != 0 {
            prg_rom_start += TRAINER_LEN;
        }
        let prg_rom_end = prg_rom_start + prg_rom_size;
        if data.len() < prg_rom_end {
            return Err(RomError::TooShort {
                expected: prg_rom_end,
                actual: data.len(),
            });
        }
        if mapper != 0 {
            log::warn!("Mapper {} ignored; PRG ROM is mapped flat", mapper);
        }
        Self::from_prg(data[prg_rom_start..prg_rom_end].to_vec(), mapper)
    }

    fn from_prg(prg_rom: Vec<u8>, mapper: u8) -> Result<Self, RomError> {
        if prg_rom.is_empty() || prg_rom.len() > MAX_FLAT_PRG {
            return Err(RomError::BadProgramSize(prg_rom.len()));
        }
        let checksum = calculate_checksum(&prg_rom);
        Ok(Cartridge {
            prg_rom,
            mapper,
            checksum,
        })
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn mapper(&self) -> u8 {
        self.mapper
    }

    /// Identifies the image for automation entry and save-state validation.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }
}

pub fn calculate_checksum(data: &[u8]) -> u32 {
    data.iter()
        .fold(0u32, |acc, &byte| acc.wrapping_add(byte as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ines(prg_banks: u8, flags6: u8, body: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; INES_HEADER_LEN];
        data[0..4].copy_from_slice(INES_MAGIC);
        data[4] = prg_banks;
        data[6] = flags6;
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_ines_prg_extraction() {
        let mut body = vec![0xEAu8; PRG_BANK_LEN];
        body[0] = 0x4C;
        let cart = Cartridge::from_bytes(&ines(1, 0, &body)).unwrap();
        assert_eq!(cart.prg_rom().len(), PRG_BANK_LEN);
        assert_eq!(cart.prg_rom()[0], 0x4C);
        assert_eq!(cart.mapper(), 0);
    }

    #[test]
    fn test_trainer_is_skipped() {
        let mut body = vec![0xFFu8; TRAINER_LEN];
        body.extend(vec![0x11u8; PRG_BANK_LEN]);
        let cart = Cartridge::from_bytes(&ines(1, 0x04, &body)).unwrap();
        assert!(cart.prg_rom().iter().all(|&b| b == 0x11));
    }

    #[test]
    fn test_truncated_ines_is_rejected() {
        let err = Cartridge::from_bytes(&ines(2, 0, &[0u8; 100])).unwrap_err();
        assert!(matches!(err, RomError::TooShort { .. }));
    }

    #[test]
    fn test_raw_image_and_checksum() {
        let cart = Cartridge::from_bytes(&[0x01, 0x02, 0xFF]).unwrap();
        assert_eq!(cart.checksum(), 0x102);
        assert!(matches!(
            Cartridge::from_bytes(&[]),
            Err(RomError::BadProgramSize(0))
        ));
    }
}
