//! Exposure core of the lightmeter firmware.
//!
//! This library holds everything that does not touch the RP2040
//! peripherals directly, so it builds and tests on the host:
//!
//! - parameter tables, exposure state and the mode state machine
//! - the saturating exposure stepper
//! - the EV engine (lux → EV → derived shutter / aperture)
//! - the dirty-field diff and the OLED layout
//! - the LTR-303 driver, written against `embedded-hal` traits
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod diff;
pub mod error;
pub mod ev;
pub mod exposure;
pub mod io;
pub mod layout;
pub mod meter;
pub mod mode;
pub mod sensor;
pub mod stepper;
pub mod tables;

pub use config::MeterConfig;
pub use error::Error;
pub use meter::{Frame, Meter};
pub use mode::Mode;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
