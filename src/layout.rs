//! Screen layout for the 128×32 OLED and the draw instructions derived
//! from field changes.
//!
//! ```text
//!  x=0    x=48        x=90
//!  ISO:   400                 y=0
//!  APT:   f3.5        f5.6    y=8
//!  SHU:   1/20        1/125   y=16
//!  MODE:  ISO                 y=24
//! ```

use crate::config::{DERIVED_COLUMN, LABEL_COLUMN, ROW_HEIGHT, VALUE_COLUMN};
use crate::diff::{Changes, Field, FieldText, Readout};
use heapless::Vec;

/// Top-left corner of a text run, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x: i32,
    pub y: i32,
}

/// Font scale; 1 is the small 5×8 font.
pub type TextSize = u8;

/// Foreground or background colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ink {
    /// Redraw old text in background colour.
    Erase,
    Draw,
}

/// One text operation for the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawOp {
    pub region: Region,
    pub text: FieldText,
    pub size: TextSize,
    pub ink: Ink,
}

/// Enough for an erase and a draw per field.
pub const MAX_OPS: usize = 12;

/// Draw instructions of one pass.
pub type DrawOps = Vec<DrawOp, MAX_OPS>;

/// Labels plus one draw per field.
pub const MAX_BOOT_OPS: usize = MAX_OPS + LABELS.len();

const fn row(n: i32) -> i32 {
    n * ROW_HEIGHT
}

/// Where a field lives and how large it is drawn.
pub const fn placement(field: Field) -> (Region, TextSize) {
    let region = match field {
        Field::Iso => Region {
            x: VALUE_COLUMN,
            y: row(0),
        },
        Field::Aperture => Region {
            x: VALUE_COLUMN,
            y: row(1),
        },
        Field::Shutter => Region {
            x: VALUE_COLUMN,
            y: row(2),
        },
        Field::Mode => Region {
            x: VALUE_COLUMN,
            y: row(3),
        },
        Field::DerivedAperture => Region {
            x: DERIVED_COLUMN,
            y: row(1),
        },
        Field::DerivedShutter => Region {
            x: DERIVED_COLUMN,
            y: row(2),
        },
    };
    (region, 1)
}

/// Static labels drawn once at boot.
pub const LABELS: [(&str, Region); 4] = [
    ("ISO:", Region { x: LABEL_COLUMN, y: row(0) }),
    ("APT:", Region { x: LABEL_COLUMN, y: row(1) }),
    ("SHU:", Region { x: LABEL_COLUMN, y: row(2) }),
    ("MODE:", Region { x: LABEL_COLUMN, y: row(3) }),
];

fn push(ops: &mut DrawOps, field: Field, text: &FieldText, ink: Ink) {
    if text.is_empty() {
        return;
    }
    let (region, size) = placement(field);
    let _ = ops.push(DrawOp {
        region,
        text: text.clone(),
        size,
        ink,
    });
}

/// Erase-then-draw instructions for every change.
pub fn draw_ops(changes: &Changes) -> DrawOps {
    let mut ops = DrawOps::new();
    for change in changes {
        push(&mut ops, change.field, &change.previous, Ink::Erase);
        push(&mut ops, change.field, &change.current, Ink::Draw);
    }
    ops
}

/// Labels and every field of `readout`, for an empty screen.
pub fn boot_ops(readout: &Readout) -> Vec<DrawOp, MAX_BOOT_OPS> {
    let mut ops = Vec::new();
    for (label, region) in LABELS {
        let mut text = FieldText::new();
        let _ = text.push_str(label);
        let _ = ops.push(DrawOp {
            region,
            text,
            size: 1,
            ink: Ink::Draw,
        });
    }
    for field in Field::ALL {
        let text = readout.text(field);
        if text.is_empty() {
            continue;
        }
        let (region, size) = placement(field);
        let _ = ops.push(DrawOp {
            region,
            text,
            size,
            ink: Ink::Draw,
        });
    }
    ops
}
