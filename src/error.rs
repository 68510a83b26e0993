//! Unified error type for lightmeter.
//!
//! We avoid `alloc` - all error variants are fieldless.
//! Implements `defmt::Format` for on-target logging when the `defmt`
//! feature is on.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Light sensor
    /// The LTR-303 did not answer with the expected part/manufacturer id.
    SensorNotFound,

    /// I²C transaction to the light sensor failed.
    SensorBus,

    // Display
    /// The SSD1306 did not accept its init sequence.
    DisplayInit,

    /// I²C transfer of the frame buffer failed.
    DisplayBus,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::SensorNotFound => "light sensor not found",
            Error::SensorBus => "light sensor bus error",
            Error::DisplayInit => "display init failed",
            Error::DisplayBus => "display bus error",
        };
        f.write_str(msg)
    }
}

/// Result alias over [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
