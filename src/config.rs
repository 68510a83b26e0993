//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and layout
//! constants live here so they can be tuned in one place.

use crate::ev::DerivePolicy;
use crate::tables::ShutterScale;

// Exposure core

/// Shutter table the firmware runs with.
pub const SHUTTER_SCALE: ShutterScale = ShutterScale::Classic;

/// Which derived values are shown for each mode.
pub const DERIVE_POLICY: DerivePolicy = DerivePolicy::COMPLEMENTARY;

// Timing

/// Delay between two passes of the control loop (ms).
pub const PASS_INTERVAL_MS: u64 = 30;

/// The light sensor is polled every Nth pass (10 × 30 ms = 300 ms).
pub const SAMPLE_EVERY_PASSES: u32 = 10;

/// Input is ignored for this long after a mode change (ms).
pub const MODE_SETTLE_MS: u64 = 100;

/// Sleep between wake-ups once a fatal startup error halted the device (ms).
pub const HALT_POLL_MS: u64 = 100;

// GPIO pin assignments (RP2040 / Pico defaults)
//
// These are logical names; the concrete `embassy_rp::peripherals::PIN_*`
// are picked in `main.rs`.  Adjust for your custom PCB.
//
//   OLED SDA        → GP4  (I2C0)
//   OLED SCL        → GP5  (I2C0)
//   LTR-303 SDA     → GP2  (I2C1)
//   LTR-303 SCL     → GP3  (I2C1)
//   Encoder A       → GP20 (PIO0 SM0)
//   Encoder B       → GP21 (PIO0 SM0)
//   Mode button     → GP17 (active-low, internal pull-up)

/// SSD1306 I²C address.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// I²C bus frequency for both buses (Hz).
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// Display layout (128×32, 5×8 font)

pub const ROW_HEIGHT: i32 = 8;
pub const LABEL_COLUMN: i32 = 0;
pub const VALUE_COLUMN: i32 = 48;
pub const DERIVED_COLUMN: i32 = 90;

/// Runtime knobs of the exposure core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterConfig {
    pub shutter_scale: ShutterScale,
    pub derive_policy: DerivePolicy,
    /// Poll the light sensor every this many passes (0 is treated as 1).
    pub sample_every: u32,
    pub settle_ms: u64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            shutter_scale: SHUTTER_SCALE,
            derive_policy: DERIVE_POLICY,
            sample_every: SAMPLE_EVERY_PASSES,
            settle_ms: MODE_SETTLE_MS,
        }
    }
}
