//! Exposure stepper - moves the active index one table entry at a time.

use crate::exposure::ExposureIndex;
use crate::mode::Mode;
use crate::tables::Tables;

/// Apply one encoder step to the index selected by `mode`.
///
/// Only the sign of `delta` matters: a burst of detents collected during
/// one poll becomes a single step.  The result saturates at both ends of
/// the table, it never wraps.  Returns `true` if the index moved.
pub fn step(index: &mut ExposureIndex, tables: &Tables, mode: Mode, delta: i32) -> bool {
    let last = match mode {
        Mode::Aperture => tables.apertures.last_index(),
        Mode::Shutter => tables.shutters.last_index(),
        Mode::Iso => tables.isos.last_index(),
    };

    let slot = index.get_mut(mode);
    let before = *slot;
    *slot = match delta.signum() {
        1 => before.saturating_add(1).min(last),
        -1 => before.saturating_sub(1).min(last),
        _ => before.min(last),
    };
    *slot != before
}
