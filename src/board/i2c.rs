//! I2C1 wiring for the movement sensor.
//!
//! SCL on PB6, SDA on PB7, both transfer directions on DMA.

use embassy_stm32::{
    bind_interrupts, i2c,
    i2c::I2c,
    mode::Async,
    peripherals::{DMA1_CH2, DMA1_CH3, I2C1, PB6, PB7},
    time::Hertz,
    Peri,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use invensense_mpu::{Mpu, SharedI2c};

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<I2C1>;
});

/// Fast-mode clock; both chips accept up to 400 kHz
const BUS_FREQUENCY: Hertz = Hertz(400_000);

/// Name the bus is configured under
pub const BUS_NAME: &str = "i2c1";

pub type Bus = Mutex<CriticalSectionRawMutex, I2c<'static, Async>>;
pub type SensorBus = SharedI2c<'static, CriticalSectionRawMutex, I2c<'static, Async>>;
pub type Sensor = Mpu<'static, SensorBus>;

/// Peripherals owned by the sensor bus
pub struct I2cPeripherals<'d> {
    pub i2c1: Peri<'d, I2C1>,
    pub scl: Peri<'d, PB6>,
    pub sda: Peri<'d, PB7>,
    pub dma_tx: Peri<'d, DMA1_CH2>,
    pub dma_rx: Peri<'d, DMA1_CH3>,
}

/// Macro to claim the peripherals for [`I2cPeripherals`]
#[macro_export]
macro_rules! claim_i2c {
    ($peripherals:expr) => {{
        $crate::board::i2c::I2cPeripherals {
            i2c1: $peripherals.I2C1,
            scl: $peripherals.PB6,
            sda: $peripherals.PB7,
            dma_tx: $peripherals.DMA1_CH2,
            dma_rx: $peripherals.DMA1_CH3,
        }
    }};
}

/// Configure I2C1 and put it behind a mutex so several devices can share it.
pub fn new_bus(peripherals: I2cPeripherals<'static>) -> Bus {
    let mut config = i2c::Config::default();
    config.frequency = BUS_FREQUENCY;

    let i2c = I2c::new(
        peripherals.i2c1,
        peripherals.scl,
        peripherals.sda,
        Irqs,
        peripherals.dma_tx,
        peripherals.dma_rx,
        config,
    );

    Mutex::new(i2c)
}
