//! Register map definitions for the D7S seismic sensor.
//!
//! The chip addresses its register space with a two-byte (group, offset)
//! pair; constants here carry the full 16-bit address with the group in the
//! high byte.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{Axis, Threshold};

/// Register address of `STATE`.
pub const REG_STATE: u16 = 0x1000;
/// Register address of `AXIS_STATE`.
pub const REG_AXIS_STATE: u16 = 0x1001;
/// Register address of `EVENT`.
pub const REG_EVENT: u16 = 0x1002;
/// Register address of `MODE`.
pub const REG_MODE: u16 = 0x1003;
/// Register address of `CTRL`.
pub const REG_CTRL: u16 = 0x1004;
/// Register address of `CLEAR_COMMAND`.
pub const REG_CLEAR_COMMAND: u16 = 0x1005;
/// Register address of the current SI value (2 bytes, big-endian).
pub const REG_CURRENT_SI: u16 = 0x2000;
/// Register address of the current PGA value (2 bytes, big-endian).
pub const REG_CURRENT_PGA: u16 = 0x2002;

/// Valid bits of the `STATE` field.
pub const STATE_MASK: u8 = 0b111;
/// Valid bits of the `AXIS_STATE` field.
pub const AXIS_STATE_MASK: u8 = 0b11;
/// Valid bits of the `MODE` field.
pub const MODE_MASK: u8 = 0b111;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u16;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `EVENT` register (address `0x1002`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    // Shutoff judgment raised (bit 0).
    pub shutoff: bool,
    // Collapse judgment raised (bit 1).
    pub collapse: bool,
    // Self-diagnostic detected an error (bit 2).
    pub self_test_error: bool,
    // Offset acquisition detected an error (bit 3).
    pub offset_acquisition_error: bool,
    #[skip]
    __: B4,
}

impl From<u8> for Event {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Event> for u8 {
    fn from(value: Event) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL` register (address `0x1004`).
///
/// The meaningful payload sits in bits 6:3; bits 2:0 and 7 are reserved.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl {
    #[skip]
    __: B3,
    // Shutoff judgment threshold selection (bit 3).
    pub threshold: Threshold,
    // Axis selection (bits 6:4).
    pub axis: Axis,
    #[skip]
    __: B1,
}

impl From<u8> for Ctrl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl> for u8 {
    fn from(value: Ctrl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CLEAR_COMMAND` register (address `0x1005`).
///
/// Each flag clears the corresponding stored data when written as 1.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCommand {
    // Clear the stored earthquake (latest/ranked) data (bit 0).
    pub earthquake_data: bool,
    // Clear the self-diagnostic result (bit 1).
    pub self_test_data: bool,
    // Clear the acquired axis offset data (bit 2).
    pub offset_data: bool,
    // Clear the initial installation data (bit 3).
    pub installation_data: bool,
    #[skip]
    __: B4,
}

impl ClearCommand {
    /// Command clearing every stored data category at once.
    pub fn all() -> Self {
        Self::new()
            .with_earthquake_data(true)
            .with_self_test_data(true)
            .with_offset_data(true)
            .with_installation_data(true)
    }
}

impl From<u8> for ClearCommand {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ClearCommand> for u8 {
    fn from(value: ClearCommand) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Event {
    type Raw = u8;
    const ADDRESS: u16 = REG_EVENT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Ctrl {
    type Raw = u8;
    const ADDRESS: u16 = REG_CTRL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x40);
}

impl Register for ClearCommand {
    type Raw = u8;
    const ADDRESS: u16 = REG_CLEAR_COMMAND;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}
