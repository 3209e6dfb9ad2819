//! Driver configuration supplied by the host runtime.

use super::error::ConfigError;
use super::registers::Address;

/// Attributes of one sensor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Name of the I2C bus the chip is wired to, e.g. `"1"` or `"i2c1"`
    pub i2c_bus: &'static str,
    /// AD0 is tied high, so the chip answers on the alternate address
    pub use_alt_i2c_address: bool,
}

impl Config {
    pub const fn new(i2c_bus: &'static str) -> Self {
        Self {
            i2c_bus,
            use_alt_i2c_address: false,
        }
    }

    pub const fn with_alt_address(mut self) -> Self {
        self.use_alt_i2c_address = true;
        self
    }

    /// Check required attributes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.i2c_bus.is_empty() {
            return Err(ConfigError::MissingField("i2c_bus"));
        }
        Ok(())
    }

    pub const fn address(&self) -> Address {
        if self.use_alt_i2c_address {
            Address::Alternate
        } else {
            Address::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bus_is_rejected() {
        assert_eq!(
            Config::default().validate(),
            Err(ConfigError::MissingField("i2c_bus"))
        );
        assert_eq!(Config::new("1").validate(), Ok(()));
    }

    #[test]
    fn alternate_address_flag() {
        assert_eq!(Config::new("1").address(), Address::Default);
        assert_eq!(Config::new("1").with_alt_address().address(), Address::Alternate);
    }
}
