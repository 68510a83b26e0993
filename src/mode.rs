//! Adjustment mode state machine and the mode-button settle guard.

use crate::exposure::Tracked;

/// Which exposure parameter the encoder currently adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Aperture,
    Shutter,
    Iso,
}

impl Mode {
    /// Round-robin successor: Aperture → Shutter → ISO → Aperture.
    pub const fn next(self) -> Self {
        match self {
            Mode::Aperture => Mode::Shutter,
            Mode::Shutter => Mode::Iso,
            Mode::Iso => Mode::Aperture,
        }
    }

    /// Three-letter label shown on the display.
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Aperture => "APT",
            Mode::Shutter => "SHU",
            Mode::Iso => "ISO",
        }
    }
}

/// Current and last-rendered mode.
pub type ModeState = Tracked<Mode>;

impl ModeState {
    /// ISO selected, with the shutter label still on screen.
    pub const fn power_on() -> Self {
        Tracked::with_previous(Mode::Iso, Mode::Shutter)
    }

    /// Advance to the next mode, remembering the one we left.
    pub fn cycle_mode(&mut self) {
        self.previous = self.current;
        self.current = self.current.next();
    }
}

/// Non-blocking settle window after a mode change.
///
/// The mode button sits on the encoder shaft, so pressing it tends to
/// nudge the encoder and bounce the contact.  While the guard is armed
/// all input is dropped; nothing sleeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettleGuard {
    settle_ms: u64,
    until_ms: Option<u64>,
}

impl SettleGuard {
    pub const fn new(settle_ms: u64) -> Self {
        Self {
            settle_ms,
            until_ms: None,
        }
    }

    /// Open the window starting at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(self.settle_ms));
    }

    /// `true` while input must still be ignored.  Disarms itself once the
    /// window has elapsed.
    pub fn is_settling(&mut self, now_ms: u64) -> bool {
        match self.until_ms {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.until_ms = None;
                false
            }
            None => false,
        }
    }
}

/// Turns a sampled button level into press edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressEdge {
    was_pressed: bool,
}

impl PressEdge {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Feed the current level; returns `true` on released → pressed.
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}
