//! Register map shared by the MPU-6050 and MPU-9250.
//!
//! Addresses and field layouts follow the MPU-9250 register map (RM-MPU-9250A-00);
//! the MPU-6050 uses the same offsets for everything this driver touches.

/// Register addresses
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    GyroConfig = 0x1B,
    AccelConfig = 0x1C,
    /// First register of the accel/temp/gyro output block
    AccelXoutH = 0x3B,
    PwrMgmt1 = 0x6B,
    WhoAmI = 0x75,
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register as u8
    }
}

/// Length of the output block starting at [`Register::AccelXoutH`]:
/// 6 bytes accel + 2 bytes temp + 6 bytes gyro
pub const BURST_LEN: usize = 14;

/// PWR_MGMT_1 with every bit clear: sleep off, internal oscillator
pub const PWR_MGMT_1_WAKE: u8 = 0b0000_0000;
/// PWR_MGMT_1 SLEEP bit
pub const PWR_MGMT_1_SLEEP: u8 = 0b0100_0000;

/// The full-scale code is the low two bits of GYRO_CONFIG and ACCEL_CONFIG
const FS_SEL_MASK: u8 = 0b11;

/// Full scale of a signed 16-bit sample
const LSB_FULL_SCALE: f32 = 32768.0;

/// Supported chip variants
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chip {
    /// 6-axis accel + gyro
    Mpu6050,
    /// 9-axis; the AK8963 magnetometer is not used
    Mpu9250,
}

impl Chip {
    /// Value the chip answers from WHO_AM_I
    pub const fn who_am_i(self) -> u8 {
        match self {
            Chip::Mpu6050 => 0x68,
            Chip::Mpu9250 => 0x71,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Chip::Mpu6050 => "MPU-6050",
            Chip::Mpu9250 => "MPU-9250",
        }
    }
}

/// I2C address, selected by wiring the AD0 pin
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// AD0 tied to ground
    #[default]
    Default = 0x68,
    /// AD0 tied high
    Alternate = 0x69,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        address as u8
    }
}

/// Accelerometer full-scale range
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    #[default]
    G2 = 0b00,
    G4 = 0b01,
    G8 = 0b10,
    G16 = 0b11,
}

impl AccelRange {
    /// Range for a 2-bit full-scale code. Only the low two bits of `code` are used.
    pub const fn from_code(code: u8) -> Self {
        match code & FS_SEL_MASK {
            0b00 => AccelRange::G2,
            0b01 => AccelRange::G4,
            0b10 => AccelRange::G8,
            _ => AccelRange::G16,
        }
    }

    /// Range selected by an ACCEL_CONFIG register value.
    pub const fn from_register(value: u8) -> Self {
        Self::from_code(value & FS_SEL_MASK)
    }

    /// Maximum measurable magnitude in g
    pub const fn full_scale(self) -> f32 {
        match self {
            AccelRange::G2 => 2.0,
            AccelRange::G4 => 4.0,
            AccelRange::G8 => 8.0,
            AccelRange::G16 => 16.0,
        }
    }

    /// g per LSB
    pub fn scale(self) -> f32 {
        self.full_scale() / LSB_FULL_SCALE
    }
}

/// Gyroscope full-scale range
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    #[default]
    Dps250 = 0b00,
    Dps500 = 0b01,
    Dps1000 = 0b10,
    Dps2000 = 0b11,
}

impl GyroRange {
    /// Range for a 2-bit full-scale code. Only the low two bits of `code` are used.
    pub const fn from_code(code: u8) -> Self {
        match code & FS_SEL_MASK {
            0b00 => GyroRange::Dps250,
            0b01 => GyroRange::Dps500,
            0b10 => GyroRange::Dps1000,
            _ => GyroRange::Dps2000,
        }
    }

    /// Range selected by a GYRO_CONFIG register value.
    pub const fn from_register(value: u8) -> Self {
        Self::from_code(value & FS_SEL_MASK)
    }

    /// Maximum measurable rate in degrees per second
    pub const fn full_scale(self) -> f32 {
        match self {
            GyroRange::Dps250 => 250.0,
            GyroRange::Dps500 => 500.0,
            GyroRange::Dps1000 => 1000.0,
            GyroRange::Dps2000 => 2000.0,
        }
    }

    /// Degrees per second per LSB
    pub fn scale(self) -> f32 {
        self.full_scale() / LSB_FULL_SCALE
    }
}

/// Full-scale ranges read from the chip at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scales {
    pub gyro: GyroRange,
    pub accel: AccelRange,
}

impl Scales {
    /// Decode the GYRO_CONFIG and ACCEL_CONFIG register values.
    pub const fn from_registers(gyro_config: u8, accel_config: u8) -> Self {
        Self {
            gyro: GyroRange::from_register(gyro_config),
            accel: AccelRange::from_register(accel_config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyro_scale_table_is_exact() {
        let expected = [250.0 / 32768.0, 500.0 / 32768.0, 1000.0 / 32768.0, 2000.0 / 32768.0];
        for (code, scale) in expected.into_iter().enumerate() {
            assert_eq!(GyroRange::from_code(code as u8).scale(), scale);
        }
    }

    #[test]
    fn accel_scale_table_is_exact() {
        let expected = [2.0 / 32768.0, 4.0 / 32768.0, 8.0 / 32768.0, 16.0 / 32768.0];
        for (code, scale) in expected.into_iter().enumerate() {
            assert_eq!(AccelRange::from_code(code as u8).scale(), scale);
        }
    }

    #[test]
    fn range_code_is_the_low_two_bits() {
        assert_eq!(GyroRange::from_register(0x00), GyroRange::Dps250);
        assert_eq!(GyroRange::from_register(0x01), GyroRange::Dps500);
        assert_eq!(GyroRange::from_register(0x02), GyroRange::Dps1000);
        assert_eq!(GyroRange::from_register(0x03), GyroRange::Dps2000);
        assert_eq!(AccelRange::from_register(0x01), AccelRange::G4);
        assert_eq!(
            Scales::from_registers(0x01, 0x03),
            Scales {
                gyro: GyroRange::Dps500,
                accel: AccelRange::G16
            }
        );

        // Upper bits do not leak into the range
        assert_eq!(GyroRange::from_register(0b1111_1100), GyroRange::Dps250);
        assert_eq!(AccelRange::from_register(0b1110_1010), AccelRange::G8);
    }

    #[test]
    fn every_register_value_yields_a_nonzero_scale() {
        for value in 0..=u8::MAX {
            let scales = Scales::from_registers(value, value);
            assert!(scales.gyro.scale() > 0.0);
            assert!(scales.accel.scale() > 0.0);
        }
    }

    #[test]
    fn enum_discriminants_match_codes() {
        for code in 0..4u8 {
            assert_eq!(GyroRange::from_code(code) as u8, code);
            assert_eq!(AccelRange::from_code(code) as u8, code);
        }
    }

    #[test]
    fn chip_identity_and_addresses() {
        assert_eq!(Chip::Mpu9250.who_am_i(), 0x71);
        assert_eq!(Chip::Mpu6050.who_am_i(), 0x68);
        assert_eq!(u8::from(Address::Default), 0x68);
        assert_eq!(u8::from(Address::Alternate), 0x69);
        assert_eq!(u8::from(Register::WhoAmI), 117);
        assert_eq!(u8::from(Register::PwrMgmt1), 107);
        assert_eq!(u8::from(Register::AccelXoutH), 59);
    }
}
