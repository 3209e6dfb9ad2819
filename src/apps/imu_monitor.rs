//! Logs the sensor's readings once a second.

use defmt::{info, warn};
use embassy_time::{Duration, Ticker};
use invensense_mpu::MovementSensor;

use crate::board::i2c::Sensor;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[embassy_executor::task]
pub async fn task(sensor: &'static Sensor) -> ! {
    info!("Monitoring {} with {:?}", sensor.device().chip().name(), sensor.scales());

    let mut ticker = Ticker::every(REPORT_INTERVAL);
    loop {
        ticker.next().await;

        // Still reported while faulted, flagged as possibly stale
        match sensor.angular_velocity() {
            Ok(rate) => {
                if let Some(fault) = rate.fault {
                    warn!("Angular velocity may be stale: {}", fault);
                }
                info!("Angular velocity: {} rad/s", rate.value);
            }
            Err(e) => warn!("Angular velocity unavailable: {}", e),
        }

        match sensor.linear_acceleration() {
            Ok(accel) => info!("Linear acceleration: {} m/s^2", accel),
            Err(e) => warn!("Linear acceleration unavailable: {}", e),
        }

        if let Ok(readings) = sensor.readings() {
            info!("Temperature: {} C", readings.value.temperature_celsius);
        }
    }
}
