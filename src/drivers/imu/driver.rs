//! MPU-6050 / MPU-9250 register protocol driver
//!
//! This driver provides the register-level interface to the chip over I2C.
//! It handles:
//! - Scoped, per-transaction register reads and writes
//! - Device identity verification
//! - Power-mode control (wake and sleep)
//! - Full-scale range discovery
//! - The 14-byte accel/temp/gyro burst read

use super::error::{Error, TransportError};
use super::registers::{Chip, Register, Scales, BURST_LEN, PWR_MGMT_1_SLEEP, PWR_MGMT_1_WAKE};
use crate::peripherals::i2c::{I2cBus, I2cHandle};

/// One chip on one bus.
///
/// Holds no bus resources: every method opens a handle for a single transaction
/// and releases it before returning, on success and on error alike.
pub struct Device<'a, B> {
    bus: &'a B,
    bus_name: &'static str,
    address: u8,
    chip: Chip,
}

impl<B> Clone for Device<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Device<'_, B> {}

impl<'a, B: I2cBus> Device<'a, B> {
    pub fn new(bus: &'a B, bus_name: &'static str, address: u8, chip: Chip) -> Self {
        Self {
            bus,
            bus_name,
            address,
            chip,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn bus_name(&self) -> &'static str {
        self.bus_name
    }

    pub fn chip(&self) -> Chip {
        self.chip
    }

    fn transport_error(&self, register: Register, error: B::Error) -> TransportError {
        TransportError::new(self.bus_name, self.address, register.into(), error)
    }

    /// Read `buffer.len()` consecutive registers starting at `register`.
    pub async fn read_block(&self, register: Register, buffer: &mut [u8]) -> Result<(), TransportError> {
        let mut handle = self
            .bus
            .open_handle(self.address)
            .await
            .map_err(|e| self.transport_error(register, e))?;

        handle
            .read_block_data(register.into(), buffer)
            .await
            .map_err(|e| self.transport_error(register, e))
    }

    /// Read a single register.
    pub async fn read_byte(&self, register: Register) -> Result<u8, TransportError> {
        let mut value = [0u8; 1];
        self.read_block(register, &mut value).await?;
        Ok(value[0])
    }

    /// Write a single register.
    pub async fn write_byte(&self, register: Register, value: u8) -> Result<(), TransportError> {
        let mut handle = self
            .bus
            .open_handle(self.address)
            .await
            .map_err(|e| self.transport_error(register, e))?;

        handle
            .write_byte_data(register.into(), value)
            .await
            .map_err(|e| self.transport_error(register, e))
    }

    /// Check that the expected chip answers at this address.
    ///
    /// A bus failure is reported as [`Error::Transport`]; a healthy bus with the
    /// wrong answer as [`Error::DeviceMismatch`].
    pub async fn verify_identity(&self) -> Result<(), Error> {
        let expected = self.chip.who_am_i();
        let found = self.read_byte(Register::WhoAmI).await?;
        if found != expected {
            error!(
                "Wrong chip ID at 0x{:02X}: expected 0x{:02X}, got 0x{:02X}",
                self.address,
                expected,
                found
            );
            return Err(Error::DeviceMismatch {
                address: self.address,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Clear the sleep bit; the chip powers up in sleep mode.
    pub async fn wake(&self) -> Result<(), Error> {
        self.write_byte(Register::PwrMgmt1, PWR_MGMT_1_WAKE)
            .await
            .map_err(Error::WakeUp)
    }

    /// Set the sleep bit.
    pub async fn sleep(&self) -> Result<(), TransportError> {
        self.write_byte(Register::PwrMgmt1, PWR_MGMT_1_SLEEP).await
    }

    /// Read the configured gyro and accel full-scale ranges.
    pub async fn read_scales(&self) -> Result<Scales, TransportError> {
        let gyro_config = self.read_byte(Register::GyroConfig).await?;
        let accel_config = self.read_byte(Register::AccelConfig).await?;
        Ok(Scales::from_registers(gyro_config, accel_config))
    }

    /// Read accel, temperature and gyro in one transaction.
    pub async fn read_burst(&self) -> Result<[u8; BURST_LEN], TransportError> {
        let mut packet = [0u8; BURST_LEN];
        self.read_block(Register::AccelXoutH, &mut packet).await?;
        Ok(packet)
    }

    /// Bring the chip from power-on to measuring.
    ///
    /// This function:
    /// 1. Verifies the chip ID
    /// 2. Clears the sleep bit
    /// 3. Reads the full-scale ranges the conversions will use
    pub async fn initialize(&self) -> Result<Scales, Error> {
        info!("Initializing {} at 0x{:02X} on bus {}...", self.chip.name(), self.address, self.bus_name);

        self.verify_identity().await?;
        self.wake().await?;
        let scales = self.read_scales().await?;

        debug!("Scales: {:?}", scales);
        info!("{} initialized successfully", self.chip.name());
        Ok(scales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::imu::error::BusFault;
    use crate::drivers::imu::mock::MockBus;
    use crate::drivers::imu::registers::{AccelRange, GyroRange};
    use embassy_futures::block_on;

    fn device(bus: &MockBus, chip: Chip) -> Device<'_, MockBus> {
        Device::new(bus, "1", 0x68, chip)
    }

    #[test]
    fn initialize_wakes_and_reads_scales() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        bus.set_register(Register::GyroConfig, 0x03);
        bus.set_register(Register::AccelConfig, 0x01);

        let scales = block_on(device(&bus, Chip::Mpu9250).initialize()).unwrap();

        assert_eq!(
            scales,
            Scales {
                gyro: GyroRange::Dps2000,
                accel: AccelRange::G4
            }
        );
        assert_eq!(bus.writes(), std::vec![(u8::from(Register::PwrMgmt1), PWR_MGMT_1_WAKE)]);
        assert_eq!(bus.open_handles(), 0);
    }

    #[test]
    fn wrong_identity_is_a_mismatch() {
        let bus = MockBus::new(0x68, Chip::Mpu6050);
        let result = block_on(device(&bus, Chip::Mpu9250).initialize());
        assert_eq!(
            result,
            Err(Error::DeviceMismatch {
                address: 0x68,
                expected: 0x71,
                found: 0x68
            })
        );
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn nothing_at_address_is_a_transport_error() {
        let bus = MockBus::new(0x69, Chip::Mpu9250);
        let result = block_on(device(&bus, Chip::Mpu9250).initialize());
        match result {
            Err(Error::Transport(error)) => {
                assert_eq!(error.address, 0x68);
                assert_eq!(error.bus, "1");
                assert_eq!(error.register, u8::from(Register::WhoAmI));
                assert_eq!(error.fault, BusFault::AddressNack);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(bus.open_handles(), 0);
    }

    #[test]
    fn failed_wake_is_fatal() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        bus.fail_writes(true);
        let result = block_on(device(&bus, Chip::Mpu9250).initialize());
        assert!(matches!(result, Err(Error::WakeUp(_))));
        assert_eq!(bus.open_handles(), 0);
    }

    #[test]
    fn burst_reads_fourteen_bytes_from_accel_xout_h() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        let mut packet = [0u8; BURST_LEN];
        for (i, byte) in packet.iter_mut().enumerate() {
            *byte = i as u8 + 1;
        }
        bus.set_burst(packet);

        let read = block_on(device(&bus, Chip::Mpu9250).read_burst()).unwrap();
        assert_eq!(read, packet);
    }

    #[test]
    fn sleep_sets_sleep_bit() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        block_on(device(&bus, Chip::Mpu9250).sleep()).unwrap();
        assert_eq!(bus.writes(), std::vec![(107, 1 << 6)]);
    }
}
