//! STM32H753 board support for the demonstration firmware.

pub mod i2c;
pub mod system;

pub use system::init_system;
