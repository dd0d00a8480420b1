//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::D7sInterface;

/// Fixed 7-bit bus address of the D7S. The chip exposes no address pins.
pub const DEVICE_ADDRESS: u8 = 0x55;

/// I2C-based interface implementation for the D7S driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Splits a packed register address into the (group, offset) byte pair.
    fn address_bytes(register: u16) -> [u8; 2] {
        register.to_be_bytes()
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> D7sInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u16, value: u8) -> core::result::Result<(), Self::Error> {
        let [group, offset] = Self::address_bytes(register);
        self.i2c.write(DEVICE_ADDRESS, &[group, offset, value])
    }

    fn read_register(&mut self, register: u16) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u16, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        // Repeated start between the address bytes and the data phase; the
        // chip aborts the access if the bus is released in between.
        let address = Self::address_bytes(register);
        self.i2c.write_read(DEVICE_ADDRESS, &address, buf)
    }
}
