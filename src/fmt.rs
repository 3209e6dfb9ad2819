//! Logging macros for the driver.
//!
//! - `defmt` feature: forwarded to `defmt`
//! - Host tests: printed to stdout
//! - Otherwise: compiled out, arguments are still evaluated by reference so
//!   variables used only for logging do not trigger warnings
#![macro_use]
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[TRACE] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[DEBUG] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[INFO] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[WARN] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        ::std::eprintln!(concat!("[ERROR] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}
