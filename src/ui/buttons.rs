//! Mode push-button on the encoder shaft.
//!
//! Active-low with internal pull-up.  The button is sampled once per loop
//! pass; edge detection and the settle window after a mode change live in
//! the exposure core, so nothing here waits or debounces.

use embassy_rp::gpio::Input;
use lightmeter::io::ModeButtonSource;

pub struct ModeButton<'d> {
    pin: Input<'d>,
}

impl<'d> ModeButton<'d> {
    /// `pin` must be configured with `Pull::Up`.
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl ModeButtonSource for ModeButton<'_> {
    fn read_mode_button(&mut self) -> bool {
        self.pin.is_low()
    }
}
