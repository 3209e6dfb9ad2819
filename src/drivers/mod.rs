//! Sensor drivers and the capability contract they expose to the host runtime.

/// MPU-6050 / MPU-9250 IMU driver
pub mod imu;
pub mod movement;
