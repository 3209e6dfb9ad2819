//! Raw sample to physical unit conversion.
//!
//! Everything here is pure: scales are passed in explicitly, so two sensors configured
//! with different ranges never share state.

use super::registers::{Scales, BURST_LEN};
use crate::drivers::movement::Vector3;

/// m/s² per g
pub const GRAVITY: f32 = 9.81;
/// LSB per °C
pub const TEMP_SENSITIVITY: f32 = 333.87;
/// °C at a raw reading of zero
pub const TEMP_OFFSET: f32 = 21.0;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Scaled IMU sample in physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Angular velocity in rad/s (X, Y, Z)
    pub angular_velocity: Vector3,
    /// Acceleration in m/s² (X, Y, Z)
    pub linear_acceleration: Vector3,
    /// Temperature in °C
    pub temperature: f32,
}

impl Sample {
    pub const ZERO: Self = Self {
        angular_velocity: Vector3::ZERO,
        linear_acceleration: Vector3::ZERO,
        temperature: 0.0,
    };
}

/// Big-endian two's complement
pub const fn decode_i16(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode X/Y/Z from six big-endian bytes.
pub const fn decode_axes(bytes: &[u8; 6]) -> [i16; 3] {
    [
        decode_i16([bytes[0], bytes[1]]),
        decode_i16([bytes[2], bytes[3]]),
        decode_i16([bytes[4], bytes[5]]),
    ]
}

/// Raw gyro counts to rad/s.
///
/// `gyro_scale` is in degrees per second per LSB, as given by
/// [`GyroRange::scale`](super::registers::GyroRange::scale).
pub fn angular_velocity(raw: [i16; 3], gyro_scale: f32) -> Vector3 {
    let [x, y, z] = raw.map(|axis| f32::from(axis) * gyro_scale * DEG_TO_RAD);
    Vector3::new(x, y, z)
}

/// Raw accel counts to m/s².
///
/// `accel_scale` is in g per LSB, as given by
/// [`AccelRange::scale`](super::registers::AccelRange::scale).
pub fn linear_acceleration(raw: [i16; 3], accel_scale: f32) -> Vector3 {
    let [x, y, z] = raw.map(|axis| f32::from(axis) * accel_scale * GRAVITY);
    Vector3::new(x, y, z)
}

/// Raw temperature counts to °C.
pub fn temperature_celsius(raw: i32) -> f32 {
    raw as f32 / TEMP_SENSITIVITY + TEMP_OFFSET
}

/// Parse one output block read from ACCEL_XOUT_H.
///
/// Layout: [accel_x_h, accel_x_l, accel_y_h, accel_y_l, accel_z_h, accel_z_l, temp_h,
/// temp_l, gyro_x_h, gyro_x_l, gyro_y_h, gyro_y_l, gyro_z_h, gyro_z_l]
pub fn decode_burst(packet: &[u8; BURST_LEN], scales: Scales) -> Sample {
    let [ax_h, ax_l, ay_h, ay_l, az_h, az_l, t_h, t_l, gx_h, gx_l, gy_h, gy_l, gz_h, gz_l] = *packet;

    let raw_accel = decode_axes(&[ax_h, ax_l, ay_h, ay_l, az_h, az_l]);
    let raw_temperature = decode_i16([t_h, t_l]);
    let raw_gyro = decode_axes(&[gx_h, gx_l, gy_h, gy_l, gz_h, gz_l]);

    Sample {
        angular_velocity: angular_velocity(raw_gyro, scales.gyro.scale()),
        linear_acceleration: linear_acceleration(raw_accel, scales.accel.scale()),
        temperature: temperature_celsius(i32::from(raw_temperature)),
    }
}
