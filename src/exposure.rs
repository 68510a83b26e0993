//! Exposure state - table indices plus a last-rendered snapshot.

use crate::mode::Mode;
use crate::tables::{ShutterScale, Tables};

/// A value paired with the copy that was last put on screen.
///
/// `previous` is a render cache, not a history: it is overwritten with
/// `current` by [`Tracked::commit`] once the change has been drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tracked<T> {
    pub current: T,
    pub previous: T,
}

impl<T: Copy + PartialEq> Tracked<T> {
    /// Both slots start equal.
    pub const fn new(value: T) -> Self {
        Self {
            current: value,
            previous: value,
        }
    }

    /// Start with a pending change from `previous` to `current`.
    pub const fn with_previous(current: T, previous: T) -> Self {
        Self { current, previous }
    }

    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.previous
    }

    /// Mark the current value as rendered.
    pub fn commit(&mut self) {
        self.previous = self.current;
    }
}

/// Indices into the aperture, shutter and ISO tables.
///
/// Every index is always in `0..table.len()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExposureIndex {
    pub aperture: usize,
    pub shutter: usize,
    pub iso: usize,
}

impl ExposureIndex {
    /// Power-on indices for the given shutter scale.
    pub const fn power_on(scale: ShutterScale) -> Self {
        Self {
            aperture: 4,
            shutter: scale.default_index(),
            iso: 3,
        }
    }

    /// Index currently targeted by `mode`.
    pub fn get(&self, mode: Mode) -> usize {
        match mode {
            Mode::Aperture => self.aperture,
            Mode::Shutter => self.shutter,
            Mode::Iso => self.iso,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut usize {
        match mode {
            Mode::Aperture => &mut self.aperture,
            Mode::Shutter => &mut self.shutter,
            Mode::Iso => &mut self.iso,
        }
    }

    /// Resolve the indices to table values.
    pub fn values(&self, tables: &Tables) -> ExposureValues {
        ExposureValues {
            aperture_x100: tables.apertures.value(self.aperture),
            shutter: tables.shutters.value(self.shutter),
            iso: tables.isos.value(self.iso),
        }
    }

    /// `true` when every index lies inside its table.
    pub fn in_bounds(&self, tables: &Tables) -> bool {
        self.aperture < tables.apertures.len()
            && self.shutter < tables.shutters.len()
            && self.iso < tables.isos.len()
    }
}

/// The dialled-in parameters as real values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExposureValues {
    /// f-number × 100.
    pub aperture_x100: u32,
    /// Shutter denominator (1/x s).
    pub shutter: u32,
    pub iso: u32,
}

/// Current and last-rendered exposure indices.
pub type ExposureState = Tracked<ExposureIndex>;

impl ExposureState {
    pub const fn power_on(scale: ShutterScale) -> Self {
        Tracked::new(ExposureIndex::power_on(scale))
    }
}
