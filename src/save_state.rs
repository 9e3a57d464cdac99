use serde::{Deserialize, Serialize};

use crate::error::SaveStateError;

/// Complete CPU state at any tick, including the in-flight cycle count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub version: u32,
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub work_cycles_left: u32,
    pub total_cycles: u64,
}

impl CpuSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveStateError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SaveStateError> {
        let snapshot: CpuSnapshot = bincode::deserialize(data)?;
        if snapshot.version > Self::CURRENT_VERSION {
            return Err(SaveStateError::Version {
                found: snapshot.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        Ok(snapshot)
    }

    pub fn save_to_file(&self, filename: &str) -> Result<(), SaveStateError> {
        std::fs::write(filename, self.to_bytes()?)?;
        log::info!("Save state written to: {}", filename);
        Ok(())
    }

    pub fn load_from_file(filename: &str) -> Result<Self, SaveStateError> {
        let data = std::fs::read(filename)?;
        let snapshot = Self::from_bytes(&data)?;
        log::info!("Save state loaded from: {}", filename);
        Ok(snapshot)
    }
}
