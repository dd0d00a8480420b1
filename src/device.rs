//! High-level D7S device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::D7sInterface;
use crate::interface::i2c::I2cInterface;
use crate::log::debug;
use crate::params::{AxisPair, Mode, State};
use crate::records::{EventRecord, RecordBank, RecordField, record_register};
use crate::registers::{
    AXIS_STATE_MASK, ClearCommand, Ctrl, Event, MODE_MASK, REG_AXIS_STATE, REG_CLEAR_COMMAND,
    REG_CTRL, REG_CURRENT_PGA, REG_CURRENT_SI, REG_EVENT, REG_MODE, REG_STATE, STATE_MASK,
};
use crate::self_test::{SelfTestReport, run_self_test};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// Bytes occupied by every 16-bit measurement field.
const FIELD_BYTES: usize = 2;

/// High-level synchronous driver for the D7S seismic sensor.
///
/// Bus bring-up (clock speed, pull-ups) is the platform's responsibility;
/// the chip expects a 400 kHz fast-mode bus.
pub struct D7s<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> D7s<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }
}

impl<I2C> D7s<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> D7s<IFACE>
where
    IFACE: D7sInterface<Error = CommE>,
{
    // ==================================================================
    // == Settings Registers ============================================
    // ==================================================================
    /// Reads the current sensor state.
    pub fn read_state(&mut self) -> Result<State, CommE> {
        let raw = self
            .interface
            .read_register(REG_STATE)
            .map_err(Error::from)?;

        State::from_bits(raw & STATE_MASK).ok_or(Error::InvalidFieldValue)
    }

    /// Reads the axis pair currently used for SI calculation.
    pub fn read_axis_state(&mut self) -> Result<AxisPair, CommE> {
        let raw = self
            .interface
            .read_register(REG_AXIS_STATE)
            .map_err(Error::from)?;

        AxisPair::from_bits(raw & AXIS_STATE_MASK).ok_or(Error::InvalidFieldValue)
    }

    /// Reads the event flags raised since the last clear.
    pub fn read_events(&mut self) -> Result<Event, CommE> {
        let raw = self
            .interface
            .read_register(REG_EVENT)
            .map_err(Error::from)?;

        Ok(Event::from(raw))
    }

    /// Reads the currently programmed operating mode.
    pub fn read_mode(&mut self) -> Result<Mode, CommE> {
        let raw = self
            .interface
            .read_register(REG_MODE)
            .map_err(Error::from)?;

        Mode::from_bits(raw & MODE_MASK).ok_or(Error::InvalidFieldValue)
    }

    /// Requests a mode transition.
    ///
    /// The chip acknowledges the switch asynchronously; poll
    /// [`read_state`](Self::read_state) to observe it taking effect.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), CommE> {
        self.interface
            .write_register(REG_MODE, mode.bits())
            .map_err(Error::from)
    }

    /// Reads the active `CTRL` settings as a [`Config`].
    pub fn read_ctrl(&mut self) -> Result<Config, CommE> {
        let raw = self
            .interface
            .read_register(REG_CTRL)
            .map_err(Error::from)?;

        let ctrl = Ctrl::from(raw);
        let axis = ctrl.axis_or_err().map_err(|_| Error::InvalidFieldValue)?;

        Ok(Config {
            axis,
            threshold: ctrl.threshold(),
        })
    }

    /// Applies a new configuration through a read-modify-write of `CTRL`.
    ///
    /// Reserved bits are preserved; the register is only rewritten when the
    /// payload actually changes, so passing the already-active configuration
    /// performs a single read and no write.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        let current = self
            .interface
            .read_register(REG_CTRL)
            .map_err(Error::from)?;

        let ctrl = Ctrl::from(current)
            .with_axis(config.axis)
            .with_threshold(config.threshold);

        let updated = u8::from(ctrl);
        if updated != current {
            debug!("d7s: ctrl {=u8:#x} -> {=u8:#x}", current, updated);
            self.interface
                .write_register(REG_CTRL, updated)
                .map_err(Error::from)?;
        }

        self.config = config;
        Ok(())
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads back the pending clear flags from `CLEAR_COMMAND`.
    pub fn read_clear_command(&mut self) -> Result<ClearCommand, CommE> {
        let raw = self
            .interface
            .read_register(REG_CLEAR_COMMAND)
            .map_err(Error::from)?;

        Ok(ClearCommand::from(raw))
    }

    /// Clears the selected stored data categories.
    pub fn clear(&mut self, command: ClearCommand) -> Result<(), CommE> {
        self.interface
            .write_register(REG_CLEAR_COMMAND, u8::from(command))
            .map_err(Error::from)
    }

    /// Clears every stored data category at once.
    pub fn clear_all(&mut self) -> Result<(), CommE> {
        self.clear(ClearCommand::all())
    }

    // ==================================================================
    // == Current Measurements ==========================================
    // ==================================================================
    /// Reads the SI value of the vibration currently being processed.
    pub fn read_current_si(&mut self) -> Result<u16, CommE> {
        self.read_u16(REG_CURRENT_SI)
    }

    /// Reads the PGA value of the vibration currently being processed.
    pub fn read_current_pga(&mut self) -> Result<u16, CommE> {
        self.read_u16(REG_CURRENT_PGA)
    }

    // ==================================================================
    // == Stored Event Records ==========================================
    // ==================================================================
    /// Reads the X-axis offset of record `index` (1-based) in `bank`.
    pub fn read_offset_x(&mut self, bank: RecordBank, index: u8) -> Result<i16, CommE> {
        self.read_record_i16(bank, index, RecordField::OffsetX)
    }

    /// Reads the Y-axis offset of record `index` (1-based) in `bank`.
    pub fn read_offset_y(&mut self, bank: RecordBank, index: u8) -> Result<i16, CommE> {
        self.read_record_i16(bank, index, RecordField::OffsetY)
    }

    /// Reads the Z-axis offset of record `index` (1-based) in `bank`.
    pub fn read_offset_z(&mut self, bank: RecordBank, index: u8) -> Result<i16, CommE> {
        self.read_record_i16(bank, index, RecordField::OffsetZ)
    }

    /// Reads the temperature stored with record `index` (1-based) in `bank`.
    pub fn read_temperature(&mut self, bank: RecordBank, index: u8) -> Result<i16, CommE> {
        self.read_record_i16(bank, index, RecordField::Temperature)
    }

    /// Reads the SI value of record `index` (1-based) in `bank`.
    pub fn read_si(&mut self, bank: RecordBank, index: u8) -> Result<u16, CommE> {
        let register = Self::record_address(bank, index, RecordField::Si)?;
        self.read_u16(register)
    }

    /// Reads the PGA value of record `index` (1-based) in `bank`.
    pub fn read_pga(&mut self, bank: RecordBank, index: u8) -> Result<u16, CommE> {
        let register = Self::record_address(bank, index, RecordField::Pga)?;
        self.read_u16(register)
    }

    /// Reads every field of record `index` (1-based) in `bank`.
    pub fn read_record(&mut self, bank: RecordBank, index: u8) -> Result<EventRecord, CommE> {
        Ok(EventRecord {
            offset_x: self.read_offset_x(bank, index)?,
            offset_y: self.read_offset_y(bank, index)?,
            offset_z: self.read_offset_z(bank, index)?,
            temperature: self.read_temperature(bank, index)?,
            si: self.read_si(bank, index)?,
            pga: self.read_pga(bank, index)?,
        })
    }

    /// Reads record `index` (1-based) from the latest-events bank.
    pub fn latest_record(&mut self, index: u8) -> Result<EventRecord, CommE> {
        self.read_record(RecordBank::Latest, index)
    }

    /// Reads record `index` (1-based) from the SI-ranked bank.
    pub fn ranked_record(&mut self, index: u8) -> Result<EventRecord, CommE> {
        self.read_record(RecordBank::Ranked, index)
    }

    // ==================================================================
    // == Self-Test ======================================================
    // ==================================================================
    /// Executes the datasheet self-diagnostic routine.
    pub fn run_self_test(&mut self, delay: &mut impl DelayNs) -> Result<SelfTestReport, CommE> {
        run_self_test(self, delay)
    }

    // ==================================================================
    // == Internal Read Helpers =========================================
    // ==================================================================
    fn record_address(bank: RecordBank, index: u8, field: RecordField) -> Result<u16, CommE> {
        record_register(bank, index, field).ok_or(Error::InvalidRecordIndex)
    }

    fn read_record_i16(
        &mut self,
        bank: RecordBank,
        index: u8,
        field: RecordField,
    ) -> Result<i16, CommE> {
        let register = Self::record_address(bank, index, field)?;
        self.read_i16(register)
    }

    fn read_u16(&mut self, register: u16) -> Result<u16, CommE> {
        let mut raw = [0u8; FIELD_BYTES];
        self.interface
            .read_many(register, &mut raw)
            .map_err(Error::from)?;

        Ok(u16::from_be_bytes(raw))
    }

    fn read_i16(&mut self, register: u16) -> Result<i16, CommE> {
        let mut raw = [0u8; FIELD_BYTES];
        self.interface
            .read_many(register, &mut raw)
            .map_err(Error::from)?;

        // Offsets and temperature are two's complement 16-bit quantities.
        Ok(i16::from_be_bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::D7s;
    use crate::config::Config;
    use crate::error::Error;
    use crate::interface::i2c::DEVICE_ADDRESS;
    use crate::params::{Axis, AxisPair, Mode, State, Threshold};
    use crate::records::{EventRecord, RecordBank};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn device(expectations: &[I2cTransaction]) -> D7s<crate::interface::i2c::I2cInterface<I2cMock>> {
        D7s::new_i2c(I2cMock::new(expectations), Config::default())
    }

    fn finish(device: D7s<crate::interface::i2c::I2cInterface<I2cMock>>) {
        let (mut i2c, _) = device.release_i2c();
        i2c.done();
    }

    #[test]
    fn read_state_decodes_known_values() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x10, 0x00], vec![0x00]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x10, 0x00], vec![0x04]),
        ];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_state(), Ok(State::Normal));
        assert_eq!(d7s.read_state(), Ok(State::SelfTest));

        finish(d7s);
    }

    #[test]
    fn read_state_rejects_reserved_encodings() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x10, 0x00],
            vec![0x07],
        )];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_state(), Err(Error::InvalidFieldValue));

        finish(d7s);
    }

    #[test]
    fn read_axis_state_masks_reserved_bits() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x10, 0x01],
            vec![0b1111_1010],
        )];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_axis_state(), Ok(AxisPair::Xy));

        finish(d7s);
    }

    #[test]
    fn set_mode_writes_the_three_bit_encoding() {
        let expectations = [I2cTransaction::write(
            DEVICE_ADDRESS,
            vec![0x10, 0x03, 0x02],
        )];
        let mut d7s = device(&expectations);

        d7s.set_mode(Mode::InitialInstallation).unwrap();

        finish(d7s);
    }

    #[test]
    fn mode_roundtrips_for_every_encoding() {
        let modes = [
            Mode::Normal,
            Mode::NormalNotInStandby,
            Mode::InitialInstallation,
            Mode::OffsetAcquisition,
            Mode::SelfTest,
        ];

        for mode in modes {
            let expectations = [
                I2cTransaction::write(DEVICE_ADDRESS, vec![0x10, 0x03, mode.bits()]),
                I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x10, 0x03], vec![mode.bits()]),
            ];
            let mut d7s = device(&expectations);

            d7s.set_mode(mode).unwrap();
            assert_eq!(d7s.read_mode(), Ok(mode));

            finish(d7s);
        }
    }

    #[test]
    fn read_ctrl_decodes_bits_6_to_3() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x10, 0x04],
            vec![0b0_010_1_000],
        )];
        let mut d7s = device(&expectations);

        assert_eq!(
            d7s.read_ctrl(),
            Ok(Config {
                axis: Axis::ForceXy,
                threshold: Threshold::Low,
            })
        );

        finish(d7s);
    }

    #[test]
    fn configure_rewrites_ctrl_preserving_reserved_bits() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x10, 0x04], vec![0b1000_0101]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x10, 0x04, 0b1011_1101]),
        ];
        let mut d7s = device(&expectations);

        let config = Config::new()
            .axis(Axis::AutoSwitch)
            .threshold(Threshold::Low)
            .build();
        d7s.configure(config).unwrap();
        assert_eq!(d7s.config(), &config);

        finish(d7s);
    }

    #[test]
    fn configure_skips_the_write_when_nothing_changes() {
        // Factory default: axis switched at installation, threshold H.
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x10, 0x04],
            vec![0b0100_0000],
        )];
        let mut d7s = device(&expectations);

        d7s.configure(Config::default()).unwrap();

        finish(d7s);
    }

    #[test]
    fn read_clear_command_decodes_pending_flags() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x10, 0x05],
            vec![0b0000_0101],
        )];
        let mut d7s = device(&expectations);

        let pending = d7s.read_clear_command().unwrap();
        assert!(pending.earthquake_data());
        assert!(!pending.self_test_data());
        assert!(pending.offset_data());
        assert!(!pending.installation_data());

        finish(d7s);
    }

    #[test]
    fn clear_all_writes_the_four_clear_flags() {
        let expectations = [I2cTransaction::write(
            DEVICE_ADDRESS,
            vec![0x10, 0x05, 0x0F],
        )];
        let mut d7s = device(&expectations);

        d7s.clear_all().unwrap();

        finish(d7s);
    }

    #[test]
    fn current_si_assembles_big_endian() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x20, 0x00],
            vec![0x12, 0x34],
        )];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_current_si(), Ok(0x1234));

        finish(d7s);
    }

    #[test]
    fn latest_offset_x_hits_group_0x31_for_record_two() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x31, 0x00],
            vec![0xFF, 0xFF],
        )];
        let mut d7s = device(&expectations);

        // 0xFFFF is a legitimate reading of -1, not a failure.
        assert_eq!(d7s.read_offset_x(RecordBank::Latest, 2), Ok(-1));

        finish(d7s);
    }

    #[test]
    fn ranked_offset_z_hits_group_0x37_for_record_three() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x37, 0x04],
            vec![0x7F, 0xFF],
        )];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_offset_z(RecordBank::Ranked, 3), Ok(0x7FFF));

        finish(d7s);
    }

    #[test]
    fn whole_record_reads_all_six_fields_in_order() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x00], vec![0x00, 0x0A]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x02], vec![0xFF, 0xF6]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x04], vec![0x00, 0x00]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x06], vec![0x00, 0xFA]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x08], vec![0x03, 0xE8]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x30, 0x0A], vec![0x01, 0x90]),
        ];
        let mut d7s = device(&expectations);

        assert_eq!(
            d7s.latest_record(1),
            Ok(EventRecord {
                offset_x: 10,
                offset_y: -10,
                offset_z: 0,
                temperature: 250,
                si: 1000,
                pga: 400,
            })
        );

        finish(d7s);
    }

    #[test]
    fn out_of_range_record_index_fails_without_bus_traffic() {
        let mut d7s = device(&[]);

        assert_eq!(
            d7s.read_si(RecordBank::Latest, 6),
            Err(Error::InvalidRecordIndex)
        );
        assert_eq!(
            d7s.read_pga(RecordBank::Ranked, 0),
            Err(Error::InvalidRecordIndex)
        );

        finish(d7s);
    }

    #[test]
    fn bus_errors_surface_as_interface_errors() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x20, 0x00], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x10, 0x03, 0x00])
                .with_error(ErrorKind::Other),
        ];
        let mut d7s = device(&expectations);

        assert_eq!(d7s.read_current_si(), Err(Error::Interface(ErrorKind::Other)));
        assert_eq!(d7s.set_mode(Mode::Normal), Err(Error::Interface(ErrorKind::Other)));

        finish(d7s);
    }
}
