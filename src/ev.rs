//! Exposure value engine.
//!
//! Converts a lux reading into EV and derives the shutter denominator or
//! aperture that balances the exposure against the two parameters the
//! user has fixed.
//!
//! ```text
//! EV       = log2(2 · lux / 5)
//! shutter  = round(iso · 2^EV / (100 · (aperture/100)²))
//! aperture = round₁((1/shutter) · iso · 2^EV / 100)
//! ```
//!
//! The derived values are advisory: they are shown next to the dialled-in
//! settings and never written back into the table indices.

use crate::exposure::ExposureValues;
use crate::mode::Mode;
use libm::{exp2f, log2f, roundf};

/// EV for a lux reading.
///
/// Readings that are zero, negative or not finite (sensor not ready,
/// saturated, dark) give `None`: the caller keeps its previous EV instead
/// of propagating `-inf`.
pub fn compute_ev(lux: f32) -> Option<f32> {
    if !lux.is_finite() || lux <= 0.0 {
        return None;
    }
    let ev = log2f(2.0 * lux / 5.0);
    ev.is_finite().then_some(ev)
}

/// Shutter denominator (1/x s) that balances `ev` at the given aperture
/// (f-number × 100) and ISO.
///
/// Rounds to the nearest integer.  Exposures longer than two seconds round
/// to 0, which is a valid answer.
pub fn derive_shutter(ev: f32, aperture_x100: u32, iso: u32) -> u32 {
    let f_number = aperture_x100 as f32 / 100.0;
    let t = 100.0 * f_number * f_number;
    let n = iso as f32 * exp2f(ev);
    // `as` saturates: inf → u32::MAX, NaN → 0.
    roundf(1.0 / (t / n)) as u32
}

/// Aperture that balances `ev` at the given shutter denominator and ISO,
/// rounded to one decimal.  A zero denominator gives 0.0.
pub fn derive_aperture(ev: f32, shutter_denominator: u32, iso: u32) -> f32 {
    if shutter_denominator == 0 {
        return 0.0;
    }
    let apt = (1.0 / shutter_denominator as f32) * iso as f32 * exp2f(ev) / 100.0;
    roundf(apt * 10.0) / 10.0
}

/// Which derived values to compute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Targets {
    pub shutter: bool,
    pub aperture: bool,
}

impl Targets {
    pub const NONE: Self = Self {
        shutter: false,
        aperture: false,
    };
    pub const SHUTTER: Self = Self {
        shutter: true,
        aperture: false,
    };
    pub const APERTURE: Self = Self {
        shutter: false,
        aperture: true,
    };
    pub const BOTH: Self = Self {
        shutter: true,
        aperture: true,
    };
}

/// Mapping from the active mode to the derived values shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DerivePolicy {
    pub aperture_mode: Targets,
    pub shutter_mode: Targets,
    pub iso_mode: Targets,
}

impl DerivePolicy {
    /// Aperture priority shows a shutter, shutter priority shows an
    /// aperture, ISO mode shows nothing.
    pub const COMPLEMENTARY: Self = Self {
        aperture_mode: Targets::SHUTTER,
        shutter_mode: Targets::APERTURE,
        iso_mode: Targets::NONE,
    };

    /// Both values whenever ISO is not the active mode.
    pub const ALL_BUT_ISO: Self = Self {
        aperture_mode: Targets::BOTH,
        shutter_mode: Targets::BOTH,
        iso_mode: Targets::NONE,
    };

    pub const fn targets(&self, mode: Mode) -> Targets {
        match mode {
            Mode::Aperture => self.aperture_mode,
            Mode::Shutter => self.shutter_mode,
            Mode::Iso => self.iso_mode,
        }
    }
}

impl Default for DerivePolicy {
    fn default() -> Self {
        Self::COMPLEMENTARY
    }
}

/// Derived values as displayed.  `None` means "not shown".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Derived {
    /// Shutter denominator.
    pub shutter: Option<u32>,
    /// Aperture in tenths (56 = f5.6).
    pub aperture_tenths: Option<u32>,
}

/// Holds the last good EV between samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EvEngine {
    last_ev: Option<f32>,
}

impl EvEngine {
    pub const fn new() -> Self {
        Self { last_ev: None }
    }

    /// Last good EV, if any sample has been usable yet.
    pub fn ev(&self) -> Option<f32> {
        self.last_ev
    }

    /// Feed one sensor poll.  Returns `true` if the EV was updated; a
    /// missing or unusable sample leaves the previous EV in place.
    pub fn feed(&mut self, lux: Option<f32>) -> bool {
        match lux.and_then(compute_ev) {
            Some(ev) => {
                self.last_ev = Some(ev);
                true
            }
            None => false,
        }
    }

    /// Derived values for `mode` under `policy`, from the last good EV.
    pub fn derive(&self, policy: &DerivePolicy, mode: Mode, values: &ExposureValues) -> Derived {
        let Some(ev) = self.last_ev else {
            return Derived::default();
        };
        let targets = policy.targets(mode);

        Derived {
            shutter: targets
                .shutter
                .then(|| derive_shutter(ev, values.aperture_x100, values.iso)),
            aperture_tenths: targets.aperture.then(|| {
                roundf(derive_aperture(ev, values.shutter, values.iso) * 10.0) as u32
            }),
        }
    }
}
