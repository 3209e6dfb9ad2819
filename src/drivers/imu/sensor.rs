//! Movement-sensor facade over the MPU-6050 / MPU-9250.

use super::config::Config;
use super::driver::Device;
use super::error::Error;
use super::registers::{Chip, Scales};
use super::runner::Runner;
use super::state::State;
use crate::drivers::movement::{MovementSensor, Properties, Readings, Sampled, Vector3};
use crate::peripherals::i2c::I2cBus;

/// InvenSense MPU-6050 / MPU-9250 movement sensor
///
/// Measures angular velocity, linear acceleration and temperature. Readings come
/// from the cache maintained by the paired [`Runner`]; no accessor touches the bus.
pub struct Mpu<'a, B> {
    device: Device<'a, B>,
    scales: Scales,
    state: &'a State,
}

impl<'a, B: I2cBus> Mpu<'a, B> {
    /// Capabilities this driver implements
    pub const PROPERTIES: Properties = Properties {
        angular_velocity: true,
        linear_acceleration: true,
        linear_velocity: false,
        orientation: false,
        compass_heading: false,
        position: false,
    };

    /// Bring up the chip and return the sensor with its acquisition loop.
    ///
    /// In order: config validation, identity check, wake-up, range discovery. The
    /// first failing step aborts construction; no bus handle outlives its
    /// transaction, so nothing needs releasing on the error path.
    ///
    /// `state` must not be shared with another live sensor.
    pub async fn new(chip: Chip, bus: &'a B, config: &Config, state: &'a State) -> Result<(Self, Runner<'a, B>), Error> {
        config.validate()?;

        let address = u8::from(config.address());
        debug!("Using address 0x{:02X} for {} sensor", address, chip.name());

        let device = Device::new(bus, config.i2c_bus, address, chip);
        let scales = device.initialize().await?;

        state.reset();

        let sensor = Self { device, scales, state };
        Ok((sensor, Runner::new(device, scales, state)))
    }

    pub fn device(&self) -> &Device<'a, B> {
        &self.device
    }

    /// Ranges the chip reported at construction
    pub fn scales(&self) -> Scales {
        self.scales
    }

    /// Stop the acquisition loop and put the chip back to sleep.
    ///
    /// Waits until the runner has exited, so no reading changes after this returns.
    /// A failed sleep write is logged and otherwise ignored: the sensor is going away
    /// and the chip wakes up in sleep mode anyway. Later or concurrent calls also wait
    /// for the runner to exit but do not write to the chip again.
    ///
    /// Never returns if the [`Runner`] was not spawned, or was dropped before `run`
    /// completed.
    pub async fn close(&self) {
        let first = !self.state.with(|shared| core::mem::replace(&mut shared.closed, true));
        if first {
            self.state.stop.signal(());
        } else {
            debug!("{} already closing", self.device.chip().name());
        }

        self.state.wait_stopped().await;
        if !first {
            return;
        }

        if let Err(error) = self.device.sleep().await {
            error!("Failed to put {} to sleep: {:?}", self.device.chip().name(), error);
        }
        info!("{} closed", self.device.chip().name());
    }
}

impl<B: I2cBus> MovementSensor for Mpu<'_, B> {
    /// The cached value is returned even while faulted, alongside the fault.
    fn angular_velocity(&self) -> Result<Sampled<Vector3>, Error> {
        let (sample, fault) = self.state.snapshot();
        Ok(Sampled {
            value: sample.angular_velocity,
            fault,
        })
    }

    /// Only the fault is returned while faulted.
    fn linear_acceleration(&self) -> Result<Vector3, Error> {
        let (sample, fault) = self.state.snapshot();
        match fault {
            Some(error) => Err(error),
            None => Ok(sample.linear_acceleration),
        }
    }

    fn readings(&self) -> Result<Sampled<Readings>, Error> {
        let (sample, fault) = self.state.snapshot();
        Ok(Sampled {
            value: Readings {
                linear_acceleration: sample.linear_acceleration,
                temperature_celsius: sample.temperature,
                angular_velocity: sample.angular_velocity,
            },
            fault,
        })
    }

    fn properties(&self) -> Properties {
        Self::PROPERTIES
    }
}
