//! Simulated chip behind an [`I2cBus`], for host tests.
//!
//! Registers live in a 256-byte map; block reads auto-increment through it the way the
//! real chip does, so the burst is served from ACCEL_XOUT_H onwards.

use std::sync::Mutex;
use std::vec::Vec;

use embedded_hal_async::i2c::{ErrorKind, NoAcknowledgeSource};

use super::registers::{Chip, Register, BURST_LEN};
use crate::peripherals::i2c::{I2cBus, I2cHandle};

#[derive(Debug)]
pub(crate) struct MockFault(ErrorKind);

impl embedded_hal_async::i2c::Error for MockFault {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct Inner {
    registers: [u8; 256],
    writes: Vec<(u8, u8)>,
    open: usize,
    failing_bursts: usize,
    fail_writes: bool,
    burst_reads: usize,
}

pub(crate) struct MockBus {
    address: u8,
    inner: Mutex<Inner>,
}

impl MockBus {
    /// A chip of type `chip` answering at `address`, ranges at their reset values.
    pub(crate) fn new(address: u8, chip: Chip) -> Self {
        let mut registers = [0u8; 256];
        registers[usize::from(u8::from(Register::WhoAmI))] = chip.who_am_i();
        registers[usize::from(u8::from(Register::PwrMgmt1))] = 0b0100_0000;
        Self {
            address,
            inner: Mutex::new(Inner {
                registers,
                writes: Vec::new(),
                open: 0,
                failing_bursts: 0,
                fail_writes: false,
                burst_reads: 0,
            }),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut *self.inner.lock().unwrap())
    }

    pub(crate) fn set_register(&self, register: Register, value: u8) {
        self.with(|inner| inner.registers[usize::from(u8::from(register))] = value);
    }

    pub(crate) fn register(&self, register: Register) -> u8 {
        self.with(|inner| inner.registers[usize::from(u8::from(register))])
    }

    /// Contents served by the next burst reads.
    pub(crate) fn set_burst(&self, packet: [u8; BURST_LEN]) {
        let start = usize::from(u8::from(Register::AccelXoutH));
        self.with(|inner| inner.registers[start..start + BURST_LEN].copy_from_slice(&packet));
    }

    /// Fail the next `count` burst reads.
    pub(crate) fn fail_bursts(&self, count: usize) {
        self.with(|inner| inner.failing_bursts = count);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.with(|inner| inner.fail_writes = fail);
    }

    /// Successful writes as (register, value)
    pub(crate) fn writes(&self) -> Vec<(u8, u8)> {
        self.with(|inner| inner.writes.clone())
    }

    /// Handles currently open
    pub(crate) fn open_handles(&self) -> usize {
        self.with(|inner| inner.open)
    }

    pub(crate) fn burst_reads(&self) -> usize {
        self.with(|inner| inner.burst_reads)
    }
}

pub(crate) struct MockHandle<'a> {
    bus: &'a MockBus,
}

impl Drop for MockHandle<'_> {
    fn drop(&mut self) {
        self.bus.with(|inner| inner.open -= 1);
    }
}

impl I2cBus for MockBus {
    type Error = MockFault;
    type Handle<'a> = MockHandle<'a>;

    async fn open_handle(&self, address: u8) -> Result<MockHandle<'_>, MockFault> {
        if address != self.address {
            return Err(MockFault(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        }
        self.with(|inner| inner.open += 1);
        Ok(MockHandle { bus: self })
    }
}

impl I2cHandle for MockHandle<'_> {
    type Error = MockFault;

    async fn read_block_data(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), MockFault> {
        self.bus.with(|inner| {
            if register == u8::from(Register::AccelXoutH) {
                if inner.failing_bursts > 0 {
                    inner.failing_bursts -= 1;
                    return Err(MockFault(ErrorKind::Bus));
                }
                inner.burst_reads += 1;
            }
            let start = usize::from(register);
            buffer.copy_from_slice(&inner.registers[start..start + buffer.len()]);
            Ok(())
        })
    }

    async fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), MockFault> {
        self.bus.with(|inner| {
            if inner.fail_writes {
                return Err(MockFault(ErrorKind::Other));
            }
            inner.registers[usize::from(register)] = value;
            inner.writes.push((register, value));
            Ok(())
        })
    }
}
