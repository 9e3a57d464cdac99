use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// Opcode byte with no enabled table entry (strict mode only).
    #[error("unhandled opcode 0x{opcode:02X} at PC 0x{pc:04X}")]
    UnhandledOpcode { opcode: u8, pc: u16 },
}

#[derive(Debug, Error)]
pub enum RomError {
    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),

    /// Header promises more data than the file holds.
    #[error("ROM truncated: expected {expected} bytes, found {actual}")]
    TooShort { expected: usize, actual: usize },

    /// Program data that cannot be mapped at $8000-$FFFF.
    #[error("program image of {0} bytes cannot be mapped (need 1..=32768)")]
    BadProgramSize(usize),
}

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("save state I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save state encoding failed: {0}")]
    Encode(#[from] bincode::Error),

    #[error("save state version {found} is not supported (current: {supported})")]
    Version { found: u32, supported: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_and_sources() {
        let err = CpuError::UnhandledOpcode {
            opcode: 0x02,
            pc: 0xC000,
        };
        assert_eq!(err.to_string(), "unhandled opcode 0x02 at PC 0xC000");

        let err = RomError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.to_string(), "failed to read ROM: missing");
        assert!(err.source().is_some());

        let err = SaveStateError::Version {
            found: 3,
            supported: 1,
        };
        assert!(err.source().is_none());
    }
}
