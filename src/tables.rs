//! Photographic parameter tables.
//!
//! Every value the user can dial in lives in one of these fixed, ordered
//! tables.  The exposure state only ever stores *indices* into them.
//!
//! ```text
//! Aperture: f/0.95 .. f/32     stored as f-number × 100
//! Shutter:  1/x seconds        stored as the denominator x
//! ISO:      50 .. 12800        stored as-is
//! ```

/// An immutable, ordered table of parameter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterTable(&'static [u32]);

impl ParameterTable {
    pub const fn new(values: &'static [u32]) -> Self {
        Self(values)
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest valid index.
    pub const fn last_index(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Value at `index`, clamped to the last entry.
    pub fn value(&self, index: usize) -> u32 {
        self.0[index.min(self.last_index())]
    }

    pub fn values(&self) -> &'static [u32] {
        self.0
    }
}

/// f/0.95 .. f/32 in f-number × 100.
pub const APERTURES: ParameterTable = ParameterTable::new(&[
    95, 140, 200, 280, 350, 400, 560, 800, 1100, 1600, 2200, 3200,
]);

/// Shutter denominators, nine-step scale.
pub const SHUTTERS_CLASSIC: ParameterTable =
    ParameterTable::new(&[2, 4, 10, 20, 40, 100, 200, 500, 1000]);

/// Shutter denominators, ten-step full-stop scale (1 s .. 1/500 s).
pub const SHUTTERS_EXTENDED: ParameterTable =
    ParameterTable::new(&[1, 2, 4, 8, 15, 30, 60, 125, 250, 500]);

/// ISO 50 .. 12800 in full stops.
pub const ISOS: ParameterTable =
    ParameterTable::new(&[50, 100, 200, 400, 800, 1600, 3200, 6400, 12800]);

/// Which shutter table the instrument runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutterScale {
    /// Nine entries, starts at index 3.
    #[default]
    Classic,
    /// Ten entries, starts at index 5.
    Extended,
}

impl ShutterScale {
    pub const fn table(self) -> ParameterTable {
        match self {
            ShutterScale::Classic => SHUTTERS_CLASSIC,
            ShutterScale::Extended => SHUTTERS_EXTENDED,
        }
    }

    /// Power-on shutter index for this scale.
    pub const fn default_index(self) -> usize {
        match self {
            ShutterScale::Classic => 3,
            ShutterScale::Extended => 5,
        }
    }
}

/// The full set of tables in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tables {
    pub apertures: ParameterTable,
    pub shutters: ParameterTable,
    pub isos: ParameterTable,
}

impl Tables {
    pub const fn new(scale: ShutterScale) -> Self {
        Self {
            apertures: APERTURES,
            shutters: scale.table(),
            isos: ISOS,
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new(ShutterScale::default())
    }
}
