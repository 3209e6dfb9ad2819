//! IMU driver errors

use core::fmt;

use embedded_hal_async::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};

use crate::drivers::movement::Capability;

/// Bus-level cause of a failed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// Misplaced start/stop condition
    Bus,
    ArbitrationLoss,
    /// No device acknowledged its address
    AddressNack,
    /// The device stopped acknowledging data bytes
    DataNack,
    Overrun,
    Other,
}

impl From<ErrorKind> for BusFault {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusFault::Bus,
            ErrorKind::ArbitrationLoss => BusFault::ArbitrationLoss,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusFault::AddressNack,
            ErrorKind::NoAcknowledge(_) => BusFault::DataNack,
            ErrorKind::Overrun => BusFault::Overrun,
            _ => BusFault::Other,
        }
    }
}

/// A single I2C transaction with the chip failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportError {
    pub bus: &'static str,
    pub address: u8,
    pub register: u8,
    pub fault: BusFault,
}

impl TransportError {
    pub fn new(bus: &'static str, address: u8, register: u8, error: impl embedded_hal_async::i2c::Error) -> Self {
        Self {
            bus,
            address,
            register,
            fault: error.kind().into(),
        }
    }
}

/// Invalid driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required attribute is empty
    MissingField(&'static str),
}

/// IMU driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Config(ConfigError),
    /// I2C communication error
    Transport(TransportError),
    /// The bus works but another device, or no InvenSense chip, answered
    DeviceMismatch { address: u8, expected: u8, found: u8 },
    /// Clearing the sleep bit failed
    WakeUp(TransportError),
    /// The sensor does not measure this quantity
    Unsupported(Capability),
    /// Too many recent transactions failed; carries the latest failure
    Faulted(TransportError),
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Error::Transport(error)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I2C transaction on register 0x{:02X} at address 0x{:02X} on bus {} failed: {:?}",
            self.register, self.address, self.bus, self.fault
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(ConfigError::MissingField(field)) => {
                write!(f, "invalid config: \"{field}\" is required")
            }
            Error::Transport(error) => fmt::Display::fmt(error, f),
            Error::DeviceMismatch {
                address,
                expected,
                found,
            } => write!(
                f,
                "unexpected device at address 0x{address:02X}: WHO_AM_I returned 0x{found:02X}, expected 0x{expected:02X}"
            ),
            Error::WakeUp(error) => write!(f, "unable to wake up the sensor: {error}"),
            Error::Unsupported(capability) => write!(f, "{capability:?} is not supported by this sensor"),
            Error::Faulted(error) => write!(f, "sensor is faulted, most recent failure: {error}"),
        }
    }
}

impl core::error::Error for Error {}
