//! InvenSense MPU-6050 / MPU-9250 driver

pub mod config;
pub mod convert;
pub mod driver;
pub mod error;
pub mod registers;
pub mod runner;
pub mod sensor;
pub mod state;
pub mod window;

#[cfg(test)]
mod mock;

pub use config::Config;
pub use convert::Sample;
pub use driver::Device;
pub use error::{BusFault, ConfigError, Error, TransportError};
pub use registers::{AccelRange, Address, Chip, GyroRange, Register, Scales};
pub use runner::{Runner, POLL_INTERVAL};
pub use sensor::Mpu;
pub use state::{State, FAULT_THRESHOLD, FAULT_WINDOW};
pub use window::ErrorWindow;
