//! Bus interface abstraction for the D7S driver.

pub mod i2c;

/// Abstraction over the low-level bus access required by the driver.
///
/// Register addresses are the chip's two-byte (group, offset) pairs packed
/// big-endian into a `u16`.
pub trait D7sInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u16, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u16) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u16, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;
}
