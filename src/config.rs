use std::sync::OnceLock;

use crate::cpu_bus::CpuBus;

/// How the engine treats opcode bytes with no enabled table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Fail with `CpuError::UnhandledOpcode`; used for conformance ROMs.
    Strict,
    /// Report once through `Diagnostics` and execute as a 2-cycle NOP.
    #[default]
    Permissive,
}

/// Recognises a conformance image from what is mapped at reset, without
/// needing its checksum up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySignature {
    pub reset_vector: u16,
    /// Bytes expected at the automation entry point.
    pub entry_bytes: &'static [u8],
}

impl EntrySignature {
    pub fn matches(&self, bus: &mut dyn CpuBus, reset_vector: u16, entry: u16) -> bool {
        reset_vector == self.reset_vector
            && self
                .entry_bytes
                .iter()
                .enumerate()
                .all(|(i, &b)| bus.read(entry.wrapping_add(i as u16)) == b)
    }
}

/// nestest: reset vector $C004, and `JMP $C5F5` at $C000 opens the automated run.
pub const NESTEST_SIGNATURE: EntrySignature = EntrySignature {
    reset_vector: 0xC004,
    entry_bytes: &[0x4C, 0xF5, 0xC5],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuConfig {
    pub mode: ExecutionMode,
    /// Decode the stable undocumented opcodes instead of treating them as unhandled.
    pub undocumented_opcodes: bool,
    /// Program image checksums that trigger the `$C000` automation entry on reset.
    pub automation_checksums: Vec<u32>,
    /// Known images that take the automation entry regardless of checksum.
    pub automation_signatures: Vec<EntrySignature>,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            mode: ExecutionMode::Permissive,
            undocumented_opcodes: true,
            automation_checksums: Vec::new(),
            automation_signatures: vec![NESTEST_SIGNATURE],
        }
    }
}

impl CpuConfig {
    pub fn strict() -> Self {
        CpuConfig {
            mode: ExecutionMode::Strict,
            ..Self::default()
        }
    }

    /// Defaults overridden by `CPU_STRICT`, `CPU_UNDOCUMENTED` and
    /// `CPU_AUTOMATION_CHECKSUM`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mode = if env_flag("CPU_STRICT", false) {
            ExecutionMode::Strict
        } else {
            ExecutionMode::Permissive
        };
        CpuConfig {
            mode,
            undocumented_opcodes: env_flag("CPU_UNDOCUMENTED", defaults.undocumented_opcodes),
            automation_checksums: std::env::var("CPU_AUTOMATION_CHECKSUM")
                .ok()
                .map(|v| parse_u32_list(&v))
                .unwrap_or_default(),
            automation_signatures: defaults.automation_signatures,
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_undocumented_opcodes(mut self, enabled: bool) -> Self {
        self.undocumented_opcodes = enabled;
        self
    }

    pub fn with_automation_checksum(mut self, checksum: u32) -> Self {
        if !self.automation_checksums.contains(&checksum) {
            self.automation_checksums.push(checksum);
        }
        self
    }

    pub fn without_automation_signatures(mut self) -> Self {
        self.automation_signatures.clear();
        self
    }

    pub fn is_automation_checksum(&self, checksum: u32) -> bool {
        self.automation_checksums.contains(&checksum)
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(default)
}

pub fn parse_u32_hex_or_dec(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(stripped, 16).ok()
    } else {
        s.parse::<u32>().ok()
    }
}

fn parse_u32_list(s: &str) -> Vec<u32> {
    s.split(',').filter_map(parse_u32_hex_or_dec).collect()
}

// CPU trace / verbose instruction logs (very noisy)
pub fn trace() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("DEBUG_TRACE", false))
}

pub fn quiet() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("QUIET", false))
}
