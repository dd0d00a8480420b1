//! Strongly typed parameter enumerations for the D7S driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep register values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use d7s::params::{Axis, Mode, Threshold};
//!
//! let axis = Axis::SwitchAtInstallation;
//! let threshold = Threshold::High;
//! let mode = Mode::Normal;
//! let _ = (axis, threshold, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Sensor states reported by the `STATE` register (bits 2:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum State {
    /// Normal mode, in standby.
    Normal = 0b000,
    /// Normal mode, processing vibration data (not in standby).
    NormalNotInStandby = 0b001,
    /// Initial installation mode.
    InitialInstallation = 0b010,
    /// Offset acquisition mode.
    OffsetAcquisition = 0b011,
    /// Self-diagnostic mode.
    SelfTest = 0b100,
}

impl State {
    /// Decodes a masked `STATE` field; encodings 5..=7 are reserved.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Normal),
            0b001 => Some(Self::NormalNotInStandby),
            0b010 => Some(Self::InitialInstallation),
            0b011 => Some(Self::OffsetAcquisition),
            0b100 => Some(Self::SelfTest),
            _ => None,
        }
    }
}

/// Operating modes selectable through the `MODE` register (bits 2:0).
///
/// The encoding matches [`State`]; the chip reports the transition through
/// `STATE` once the requested mode becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Normal measurement mode.
    Normal = 0b000,
    /// Normal mode without entering standby.
    NormalNotInStandby = 0b001,
    /// Initial installation mode.
    InitialInstallation = 0b010,
    /// Offset acquisition mode.
    OffsetAcquisition = 0b011,
    /// Self-diagnostic mode.
    SelfTest = 0b100,
}

impl Mode {
    /// Decodes a masked `MODE` field; encodings 5..=7 are reserved.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Normal),
            0b001 => Some(Self::NormalNotInStandby),
            0b010 => Some(Self::InitialInstallation),
            0b011 => Some(Self::OffsetAcquisition),
            0b100 => Some(Self::SelfTest),
            _ => None,
        }
    }

    /// Returns the 3-bit register encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Axis pair currently used for SI calculation (`AXIS_STATE` bits 1:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AxisPair {
    /// Y and Z axes.
    Yz = 0b00,
    /// X and Z axes.
    Xz = 0b01,
    /// X and Y axes.
    Xy = 0b10,
}

impl AxisPair {
    /// Decodes a masked `AXIS_STATE` field; encoding 3 is reserved.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Yz),
            0b01 => Some(Self::Xz),
            0b10 => Some(Self::Xy),
            _ => None,
        }
    }
}

/// Axis selection programmed through `CTRL[6:4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Axis {
    /// Force the Y/Z axis pair.
    ForceYz = 0b000,
    /// Force the X/Z axis pair.
    ForceXz = 0b001,
    /// Force the X/Y axis pair.
    ForceXy = 0b010,
    /// Switch the axis pair automatically during operation.
    AutoSwitch = 0b011,
    /// Select the axis pair once, at initial installation.
    SwitchAtInstallation = 0b100,
}

/// Shutoff judgment threshold programmed through `CTRL[3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Threshold {
    /// High sensitivity threshold (datasheet level H).
    High = 0,
    /// Low sensitivity threshold (datasheet level L).
    Low = 1,
}
