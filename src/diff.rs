//! Dirty-field diff between the last-rendered readout and the current one.
//!
//! The display is never cleared during normal operation; instead each
//! changed field is erased by redrawing its old text in background colour
//! and then drawn anew.  That only works if the old text is known, so every
//! change carries both strings.

use core::fmt::Write;

use crate::ev::Derived;
use crate::exposure::ExposureValues;
use crate::mode::Mode;
use heapless::{String, Vec};

/// Rendered text of a single field.
pub type FieldText = String<16>;

/// Number of logical display fields.
pub const FIELD_COUNT: usize = 6;

/// Logical display fields, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Iso,
    Aperture,
    Shutter,
    Mode,
    DerivedAperture,
    DerivedShutter,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Iso,
        Field::Aperture,
        Field::Shutter,
        Field::Mode,
        Field::DerivedAperture,
        Field::DerivedShutter,
    ];
}

/// Everything the display shows, as values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    pub exposure: ExposureValues,
    pub mode: Mode,
    pub derived: Derived,
}

impl Readout {
    /// Render one field to text.
    pub fn text(&self, field: Field) -> FieldText {
        match field {
            Field::Iso => format_iso(self.exposure.iso),
            Field::Aperture => format_aperture(self.exposure.aperture_x100),
            Field::Shutter => format_shutter(self.exposure.shutter),
            Field::Mode => text(self.mode.label()),
            Field::DerivedAperture => self
                .derived
                .aperture_tenths
                .map(format_derived_aperture)
                .unwrap_or_default(),
            Field::DerivedShutter => self
                .derived
                .shutter
                .map(format_derived_shutter)
                .unwrap_or_default(),
        }
    }

    fn same(&self, other: &Readout, field: Field) -> bool {
        match field {
            Field::Iso => self.exposure.iso == other.exposure.iso,
            Field::Aperture => self.exposure.aperture_x100 == other.exposure.aperture_x100,
            Field::Shutter => self.exposure.shutter == other.exposure.shutter,
            Field::Mode => self.mode == other.mode,
            Field::DerivedAperture => self.derived.aperture_tenths == other.derived.aperture_tenths,
            Field::DerivedShutter => self.derived.shutter == other.derived.shutter,
        }
    }
}

/// One field whose value changed since it was last drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldChange {
    pub field: Field,
    pub previous: FieldText,
    pub current: FieldText,
}

/// Changed fields of one pass.
pub type Changes = Vec<FieldChange, FIELD_COUNT>;

/// Fields that differ between `previous` and `current`.
///
/// Fields whose value is unchanged are never returned, so nothing is
/// formatted or redrawn for them.
pub fn diff(previous: &Readout, current: &Readout) -> Changes {
    let mut changes = Changes::new();
    for field in Field::ALL {
        if current.same(previous, field) {
            continue;
        }
        // Capacity equals the field count.
        let _ = changes.push(FieldChange {
            field,
            previous: previous.text(field),
            current: current.text(field),
        });
    }
    changes
}

// Text formats

fn text(s: &str) -> FieldText {
    let mut t = FieldText::new();
    let _ = t.push_str(s);
    t
}

/// `95` → `f0.95`, `350` → `f3.5`, `1100` → `f11`.
pub fn format_aperture(aperture_x100: u32) -> FieldText {
    let whole = aperture_x100 / 100;
    let frac = aperture_x100 % 100;
    let mut t = FieldText::new();
    let _ = if frac == 0 {
        write!(t, "f{}", whole)
    } else if frac % 10 == 0 {
        write!(t, "f{}.{}", whole, frac / 10)
    } else {
        write!(t, "f{}.{:02}", whole, frac)
    };
    t
}

/// `20` → `1/20`.
pub fn format_shutter(denominator: u32) -> FieldText {
    let mut t = FieldText::new();
    let _ = write!(t, "1/{}", denominator);
    t
}

pub fn format_iso(iso: u32) -> FieldText {
    let mut t = FieldText::new();
    let _ = write!(t, "{}", iso);
    t
}

/// Derived shutter; a zero denominator means longer than two seconds.
pub fn format_derived_shutter(denominator: u32) -> FieldText {
    if denominator == 0 {
        return text(">2s");
    }
    format_shutter(denominator)
}

/// `56` → `f5.6`.
pub fn format_derived_aperture(tenths: u32) -> FieldText {
    let mut t = FieldText::new();
    let _ = write!(t, "f{}.{}", tenths / 10, tenths % 10);
    t
}
