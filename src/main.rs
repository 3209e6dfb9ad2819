//! Demonstration firmware: an MPU-6050 / MPU-9250 on I2C1 of an STM32H753.
//!
//! Brings the sensor up, spawns its acquisition loop and logs readings over RTT.

#![no_std]
#![no_main]

mod apps;
mod board;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use invensense_mpu::{Chip, Config, Mpu, Runner, SharedI2c, State};
use static_cell::StaticCell;

use board::i2c::{Bus, Sensor, SensorBus, BUS_NAME};
use board::init_system;

#[cfg(not(feature = "debug"))]
use panic_halt as _;
#[cfg(feature = "debug")]
use panic_probe as _;
use defmt_rtt as _;

/// Chip fitted to the board
const CHIP: Chip = Chip::Mpu6050;
/// AD0 strapped low
const SENSOR_CONFIG: Config = Config::new(BUS_NAME);
/// Delay before retrying a failed bring-up
const RETRY_DELAY: Duration = Duration::from_secs(5);

static STATE: State = State::new();
static BUS: StaticCell<Bus> = StaticCell::new();
static SHARED_BUS: StaticCell<SensorBus> = StaticCell::new();
static SENSOR: StaticCell<Sensor> = StaticCell::new();

#[embassy_executor::task]
async fn imu_runner(runner: Runner<'static, SensorBus>) {
    runner.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting mpu-monitor v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = init_system();

    let bus: &'static Bus = BUS.init(board::i2c::new_bus(claim_i2c!(peripherals)));
    let shared: &'static SensorBus = SHARED_BUS.init(SharedI2c::new(bus));

    // Keep retrying: a missing or miswired sensor is reported, not fatal
    let (sensor, runner) = loop {
        match Mpu::new(CHIP, shared, &SENSOR_CONFIG, &STATE).await {
            Ok(parts) => break parts,
            Err(e) => {
                error!("{} bring-up failed: {}, retrying in 5 seconds...", CHIP.name(), e);
                Timer::after(RETRY_DELAY).await;
            }
        }
    };

    let sensor = SENSOR.init(sensor);
    spawner.spawn(imu_runner(runner)).unwrap();
    spawner.spawn(apps::imu_monitor::task(sensor)).unwrap();

    loop {
        Timer::after(Duration::from_secs(60)).await;
        info!("System heartbeat - all tasks running");
    }
}
