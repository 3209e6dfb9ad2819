//! Bus abstractions shared by the drivers.

pub mod i2c;

pub use i2c::{I2cBus, I2cHandle, SharedHandle, SharedI2c};
