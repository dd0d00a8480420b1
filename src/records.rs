//! Stored event record banks and their register addressing.
//!
//! The chip keeps two banks of earthquake records: the five most recent
//! events and the five largest-SI events. Each record `n` (1-based) owns a
//! register group of its own at `base + n - 1`, with a fixed field layout
//! inside the group.

/// Number of records held in each bank.
pub const MAX_RECORDS: u8 = 5;

/// Register group base of the latest-events bank.
const LATEST_BASE_GROUP: u8 = 0x30;
/// Register group base of the SI-ranked bank.
const RANKED_BASE_GROUP: u8 = 0x35;

/// The two stored record banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordBank {
    /// Most recent events, newest first.
    Latest,
    /// Events ranked by SI value, largest first.
    Ranked,
}

impl RecordBank {
    const fn base_group(self) -> u8 {
        match self {
            Self::Latest => LATEST_BASE_GROUP,
            Self::Ranked => RANKED_BASE_GROUP,
        }
    }
}

/// Fields stored for every record, with their offset inside the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordField {
    /// X-axis offset at the time of the event (signed).
    OffsetX = 0x00,
    /// Y-axis offset at the time of the event (signed).
    OffsetY = 0x02,
    /// Z-axis offset at the time of the event (signed).
    OffsetZ = 0x04,
    /// Temperature at the time of the event (signed).
    Temperature = 0x06,
    /// SI value of the event (unsigned).
    Si = 0x08,
    /// PGA value of the event (unsigned).
    Pga = 0x0A,
}

/// Computes the 16-bit register address of one record field.
///
/// Returns `None` when `index` falls outside the stored range `1..=5`.
pub const fn record_register(bank: RecordBank, index: u8, field: RecordField) -> Option<u16> {
    if index < 1 || index > MAX_RECORDS {
        return None;
    }

    let group = bank.base_group() + index - 1;
    Some(((group as u16) << 8) | field as u16)
}

/// A fully decoded stored event record.
///
/// All values are raw register readings; no unit conversion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventRecord {
    /// X-axis offset (raw, signed 16-bit).
    pub offset_x: i16,
    /// Y-axis offset (raw, signed 16-bit).
    pub offset_y: i16,
    /// Z-axis offset (raw, signed 16-bit).
    pub offset_z: i16,
    /// Temperature (raw, signed 16-bit).
    pub temperature: i16,
    /// SI value (raw, unsigned 16-bit).
    pub si: u16,
    /// PGA value (raw, unsigned 16-bit).
    pub pga: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_bank_addressing() {
        assert_eq!(
            record_register(RecordBank::Latest, 2, RecordField::OffsetX),
            Some(0x3100)
        );
        assert_eq!(
            record_register(RecordBank::Latest, 1, RecordField::Si),
            Some(0x3008)
        );
    }

    #[test]
    fn ranked_bank_addressing() {
        assert_eq!(
            record_register(RecordBank::Ranked, 3, RecordField::OffsetZ),
            Some(0x3704)
        );
        assert_eq!(
            record_register(RecordBank::Ranked, 5, RecordField::Pga),
            Some(0x390A)
        );
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert_eq!(
            record_register(RecordBank::Latest, 0, RecordField::OffsetX),
            None
        );
        assert_eq!(
            record_register(RecordBank::Ranked, 6, RecordField::Temperature),
            None
        );
    }
}
