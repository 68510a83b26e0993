//! Seams to the hardware collaborators the meter polls.
//!
//! The firmware implements these on top of the LTR-303 driver, the PIO
//! quadrature decoder and a GPIO input; tests use plain structs.

/// Ambient light sensor.
pub trait LightSource {
    /// Lux, or `None` when no new sample is ready.  Must not block.
    fn read_light(&mut self) -> Option<f32>;
}

/// Rotary encoder.
pub trait EncoderSource {
    /// Signed detents since the previous call.  The underlying counter is
    /// reset by the read, so a nonzero value is always a fresh delta.
    fn read_encoder_delta(&mut self) -> i32;
}

/// Mode push-button.
pub trait ModeButtonSource {
    /// `true` while the button is held down.
    fn read_mode_button(&mut self) -> bool;
}
