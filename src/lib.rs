//! Movement-sensor driver for the TDK InvenSense MPU-6050 and MPU-9250.
//!
//! The chip is reached over I2C through the [`peripherals::i2c::I2cBus`] abstraction.
//! Construction verifies the device, wakes it and reads its full-scale ranges; a
//! [`Runner`] then polls the 14-byte data burst every millisecond and publishes the
//! converted readings into a [`State`] that the [`Mpu`] facade reads from any context.
//!
//! ```ignore
//! static STATE: State = State::new();
//!
//! let (sensor, runner) = Mpu::new(Chip::Mpu9250, &bus, &Config::new("i2c1"), &STATE).await?;
//! spawner.spawn(imu_runner(runner)).unwrap();
//!
//! let accel = sensor.linear_acceleration()?;
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the other modules see the logging macros.
mod fmt;

pub mod drivers;
pub mod peripherals;

pub use drivers::imu::{
    AccelRange, Address, Chip, Config, ConfigError, Device, Error, GyroRange, Mpu, Runner, Sample, Scales, State,
    TransportError,
};
pub use drivers::movement::{Accuracy, Capability, MovementSensor, Properties, Readings, Sampled, Vector3};
pub use peripherals::i2c::{I2cBus, I2cHandle, SharedI2c};
