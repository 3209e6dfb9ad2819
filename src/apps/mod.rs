//! Applications running on top of the movement sensor.

/// Periodic reading dump over RTT
pub mod imu_monitor;
