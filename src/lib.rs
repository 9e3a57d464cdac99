//! Cycle-stepped Ricoh 2A03 (NES 6502) CPU core.
//!
//! The core owns only registers, flags and cycle accounting. Memory and
//! interrupt lines come from a [`CpuBus`] implementation passed to every
//! `tick`/`step`; [`bus::FlatBus`] is a mapper-less one for running program
//! images such as CPU conformance ROMs.

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod cpu_bus;
pub mod error;
pub mod save_state;

pub use config::{CpuConfig, ExecutionMode};
pub use cpu::{Cpu, Registers, StatusFlags};
pub use cpu_bus::CpuBus;
pub use error::CpuError;
