//! Movement-sensor capability contract.
//!
//! A host runtime talks to every movement sensor through [`MovementSensor`]. Each
//! accessor has a default implementation that reports the capability as unsupported,
//! so a driver overrides exactly the axes it measures and advertises the same set in
//! [`MovementSensor::properties`].

use crate::drivers::imu::Error;

/// Three-axis quantity in the sensor's body frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Accuracy estimates; `None` where the sensor provides none
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accuracy {
    /// Horizontal dilution of precision
    pub hdop: Option<f32>,
    /// Vertical dilution of precision
    pub vdop: Option<f32>,
    /// Degrees
    pub compass_degree_error: Option<f32>,
}

/// Capabilities a movement sensor may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    AngularVelocity,
    LinearAcceleration,
    LinearVelocity,
    Temperature,
    Orientation,
    CompassHeading,
    Position,
}

/// Capability flags advertised to the host runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Properties {
    pub angular_velocity: bool,
    pub linear_acceleration: bool,
    pub linear_velocity: bool,
    pub orientation: bool,
    pub compass_heading: bool,
    pub position: bool,
}

impl Properties {
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::AngularVelocity => self.angular_velocity,
            Capability::LinearAcceleration => self.linear_acceleration,
            Capability::LinearVelocity => self.linear_velocity,
            Capability::Orientation => self.orientation,
            Capability::CompassHeading => self.compass_heading,
            Capability::Position => self.position,
            Capability::Temperature => false,
        }
    }
}

/// A cached value together with the sensor's health verdict.
///
/// The value is the last one successfully read; `fault` is set while the sensor's
/// recent transactions are failing, in which case the value may be stale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sampled<T> {
    pub value: T,
    pub fault: Option<Error>,
}

impl<T> Sampled<T> {
    /// Drop the value if the sensor is faulted.
    pub fn into_result(self) -> Result<T, Error> {
        match self.fault {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

/// One entry of [`Readings::entries`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Vector(Vector3),
    Scalar(f32),
}

/// Every quantity the sensor measures
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    /// m/s²
    pub linear_acceleration: Vector3,
    /// °C
    pub temperature_celsius: f32,
    /// rad/s
    pub angular_velocity: Vector3,
}

impl Readings {
    /// Named readings, keyed the way the host's generic sensor API reports them.
    pub fn entries(&self) -> [(&'static str, Reading); 3] {
        [
            ("linear_acceleration", Reading::Vector(self.linear_acceleration)),
            ("temperature_celsius", Reading::Scalar(self.temperature_celsius)),
            ("angular_velocity", Reading::Vector(self.angular_velocity)),
        ]
    }
}

/// Accessor surface of a movement sensor.
///
/// Accessors are synchronous and never touch the bus: they copy the latest cached
/// values, so they are safe to call from any task or interrupt priority.
pub trait MovementSensor {
    /// rad/s
    fn angular_velocity(&self) -> Result<Sampled<Vector3>, Error> {
        Err(Error::Unsupported(Capability::AngularVelocity))
    }

    /// m/s²
    fn linear_acceleration(&self) -> Result<Vector3, Error> {
        Err(Error::Unsupported(Capability::LinearAcceleration))
    }

    /// m/s
    fn linear_velocity(&self) -> Result<Vector3, Error> {
        Err(Error::Unsupported(Capability::LinearVelocity))
    }

    /// °C
    fn temperature(&self) -> Result<f32, Error> {
        Err(Error::Unsupported(Capability::Temperature))
    }

    /// Orientation vector
    fn orientation(&self) -> Result<Vector3, Error> {
        Err(Error::Unsupported(Capability::Orientation))
    }

    /// Degrees from north
    fn compass_heading(&self) -> Result<f32, Error> {
        Err(Error::Unsupported(Capability::CompassHeading))
    }

    /// Latitude, longitude and altitude in metres
    fn position(&self) -> Result<(f64, f64, f32), Error> {
        Err(Error::Unsupported(Capability::Position))
    }

    /// Reported as known-but-empty rather than unsupported.
    fn accuracy(&self) -> Result<Accuracy, Error> {
        Ok(Accuracy::default())
    }

    fn readings(&self) -> Result<Sampled<Readings>, Error>;

    fn properties(&self) -> Properties {
        Properties::default()
    }
}
