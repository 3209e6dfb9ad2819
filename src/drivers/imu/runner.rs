//! Background acquisition loop.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use super::convert::decode_burst;
use super::driver::Device;
use super::registers::Scales;
use super::state::State;
use crate::peripherals::i2c::I2cBus;

/// Time between burst reads
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Polls the chip and publishes converted samples into the sensor's [`State`].
///
/// Returned by [`Mpu::new`](super::Mpu::new). The host must spawn [`Runner::run`] on
/// its executor; until it runs, readings stay at zero and `close` does not return.
/// Dropping the runner without letting `run` finish has the same effect on `close`.
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn imu_runner(runner: Runner<'static, Bus>) {
///     runner.run().await
/// }
/// ```
pub struct Runner<'a, B> {
    device: Device<'a, B>,
    scales: Scales,
    state: &'a State,
}

impl<'a, B: I2cBus> Runner<'a, B> {
    pub(crate) fn new(device: Device<'a, B>, scales: Scales, state: &'a State) -> Self {
        Self { device, scales, state }
    }

    /// Poll every [`POLL_INTERVAL`] until the sensor is closed.
    ///
    /// A failed read is recorded and the previous sample kept; the next tick is the
    /// retry. The stop request is checked before every tick, so the loop exits
    /// between transactions, never during one.
    pub async fn run(self) {
        info!(
            "Starting {} acquisition every {} us",
            self.device.chip().name(),
            POLL_INTERVAL.as_micros()
        );

        let mut ticker = Ticker::every(POLL_INTERVAL);
        loop {
            match select(self.state.stop.wait(), ticker.next()).await {
                Either::First(()) => break,
                Either::Second(()) => self.tick().await,
            }
        }

        info!("{} acquisition stopped", self.device.chip().name());
        self.state.mark_stopped();
    }

    /// One burst read, decoded and published.
    pub(crate) async fn tick(&self) {
        match self.device.read_burst().await {
            Ok(packet) => {
                // Decode outside the lock; only the copy happens in the critical section
                let sample = decode_burst(&packet, self.scales);
                self.state.publish(sample);
            }
            Err(error) => {
                warn!("Error reading {} sensor: {:?}", self.device.chip().name(), error);
                self.state.record_failure(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::imu::convert::Sample;
    use crate::drivers::imu::mock::MockBus;
    use crate::drivers::imu::registers::{Chip, BURST_LEN};
    use crate::drivers::imu::state::FAULT_WINDOW;
    use embassy_futures::block_on;

    fn runner<'a>(bus: &'a MockBus, state: &'a State) -> Runner<'a, MockBus> {
        Runner::new(Device::new(bus, "1", 0x68, Chip::Mpu9250), Scales::default(), state)
    }

    fn one_g_packet() -> [u8; BURST_LEN] {
        let mut packet = [0u8; BURST_LEN];
        packet[4..6].copy_from_slice(&16384i16.to_be_bytes());
        packet
    }

    #[test]
    fn tick_publishes_decoded_sample() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        bus.set_burst(one_g_packet());
        let state = State::new();

        block_on(runner(&bus, &state).tick());

        let (sample, fault) = state.snapshot();
        assert!((sample.linear_acceleration.z - 9.81).abs() < 1e-4);
        assert_eq!(sample.temperature, 21.0);
        assert_eq!(fault, None);
        assert_eq!(bus.open_handles(), 0);
    }

    #[test]
    fn failed_tick_keeps_stale_sample() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        bus.set_burst(one_g_packet());
        let state = State::new();
        let runner = runner(&bus, &state);

        block_on(runner.tick());
        let (before, _) = state.snapshot();

        bus.set_burst([0xFF; BURST_LEN]);
        bus.fail_bursts(1);
        block_on(runner.tick());

        let (after, fault) = state.snapshot();
        assert_eq!(after, before);
        assert_eq!(fault, None);
        assert_eq!(state.with(|shared| shared.errors.failures()), 1);
        assert_eq!(bus.open_handles(), 0);
    }

    #[test]
    fn loop_survives_a_run_of_failures() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        let state = State::new();
        let runner = runner(&bus, &state);

        bus.fail_bursts(FAULT_WINDOW);
        for _ in 0..FAULT_WINDOW {
            block_on(runner.tick());
        }
        assert!(state.snapshot().1.is_some());

        bus.set_burst(one_g_packet());
        for _ in 0..FAULT_WINDOW {
            block_on(runner.tick());
        }
        let (sample, fault) = state.snapshot();
        assert_eq!(fault, None);
        assert_ne!(sample, Sample::ZERO);
    }

    #[test]
    fn run_exits_immediately_when_already_stopped() {
        let bus = MockBus::new(0x68, Chip::Mpu9250);
        let state = State::new();
        state.stop.signal(());

        block_on(runner(&bus, &state).run());

        assert!(state.with(|shared| shared.stopped));
        assert_eq!(bus.burst_reads(), 0);
    }
}
