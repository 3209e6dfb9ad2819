//! I2C transport used by the drivers.
//!
//! A driver never holds the bus between transactions. For every register access it
//! opens an [`I2cHandle`] at its device address, performs one transfer and drops the
//! handle, which releases the bus. This keeps co-tenant devices on the same bus
//! (other sensors, the host's own traffic) from being starved by a polling loop.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal_async::i2c::I2c;

/// A named I2C bus that hands out per-transaction handles.
#[allow(async_fn_in_trait)]
pub trait I2cBus {
    /// Fault reported by the bus hardware
    type Error: embedded_hal_async::i2c::Error;

    /// Exclusive access to one device on the bus, released on drop
    type Handle<'a>: I2cHandle<Error = Self::Error>
    where
        Self: 'a;

    /// Open a handle addressed at the 7-bit `address`.
    async fn open_handle(&self, address: u8) -> Result<Self::Handle<'_>, Self::Error>;
}

/// Register-level access to one addressed device.
#[allow(async_fn_in_trait)]
pub trait I2cHandle {
    type Error;

    /// Read `buffer.len()` consecutive registers starting at `register`.
    async fn read_block_data(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Write a single register.
    async fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

/// [`I2cBus`] over any async I2C peripheral kept behind an embassy mutex.
///
/// Each handle owns the mutex guard for the duration of one transaction, so several
/// drivers (or several [`SharedI2c`] values) can share one peripheral.
pub struct SharedI2c<'a, M: RawMutex, T> {
    bus: &'a Mutex<M, T>,
}

impl<'a, M: RawMutex, T> SharedI2c<'a, M, T> {
    pub fn new(bus: &'a Mutex<M, T>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, T> Clone for SharedI2c<'_, M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, T> Copy for SharedI2c<'_, M, T> {}

impl<M, T> I2cBus for SharedI2c<'_, M, T>
where
    M: RawMutex,
    T: I2c,
{
    type Error = T::Error;
    type Handle<'h>
        = SharedHandle<'h, M, T>
    where
        Self: 'h;

    async fn open_handle(&self, address: u8) -> Result<Self::Handle<'_>, Self::Error> {
        Ok(SharedHandle {
            guard: self.bus.lock().await,
            address,
        })
    }
}

/// Handle returned by [`SharedI2c`]; the bus lock is held until it is dropped.
pub struct SharedHandle<'a, M: RawMutex, T> {
    guard: MutexGuard<'a, M, T>,
    address: u8,
}

impl<M, T> I2cHandle for SharedHandle<'_, M, T>
where
    M: RawMutex,
    T: I2c,
{
    type Error = T::Error;

    /// Performs a repeated-start transfer: the register address is written, then the
    /// device auto-increments through `buffer.len()` registers.
    async fn read_block_data(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.guard.write_read(self.address, &[register], buffer).await
    }

    async fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.guard.write(self.address, &[register, value]).await
    }
}
