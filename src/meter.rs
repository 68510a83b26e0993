//! The meter - all instrument state, owned by the control loop.
//!
//! One call to [`Meter::pass`] is one iteration of the polling loop:
//!
//! 1. read the encoder delta and the mode button
//! 2. apply at most one mode cycle *or* one step (nothing while settling)
//! 3. every Nth pass, poll the light sensor and update the EV
//! 4. recompute the derived values if the EV or the settings moved
//! 5. diff against what is on screen, then mark it rendered

use core::fmt::Write;

use crate::config::MeterConfig;
use crate::diff::{diff, Changes, Readout};
use crate::ev::{Derived, EvEngine};
use crate::exposure::{ExposureState, Tracked};
use crate::io::{EncoderSource, LightSource, ModeButtonSource};
use crate::layout::{self, DrawOp, DrawOps, MAX_BOOT_OPS};
use crate::mode::{ModeState, PressEdge, SettleGuard};
use crate::stepper;
use crate::tables::Tables;
use heapless::{String, Vec};

/// Space-separated `aperture shutter iso [ev]` line for the debug log.
pub type Diagnostic = String<40>;

/// Result of one loop pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Fields that changed and must be redrawn.
    pub changes: Changes,
    /// Set on sampling passes.
    pub diagnostic: Option<Diagnostic>,
}

impl Frame {
    /// Erase-then-draw instructions for this frame.
    pub fn draw_ops(&self) -> DrawOps {
        layout::draw_ops(&self.changes)
    }
}

/// Exposure meter state.
#[derive(Clone, Debug)]
pub struct Meter {
    config: MeterConfig,
    tables: Tables,
    exposure: ExposureState,
    mode: ModeState,
    derived: Tracked<Derived>,
    engine: EvEngine,
    settle: SettleGuard,
    button: PressEdge,
    passes: u32,
}

impl Meter {
    /// Meter in its power-on state.
    pub fn new(config: MeterConfig) -> Self {
        Self {
            config,
            tables: Tables::new(config.shutter_scale),
            exposure: ExposureState::power_on(config.shutter_scale),
            mode: ModeState::power_on(),
            derived: Tracked::new(Derived::default()),
            engine: EvEngine::new(),
            settle: SettleGuard::new(config.settle_ms),
            button: PressEdge::new(),
            passes: 0,
        }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn exposure(&self) -> &ExposureState {
        &self.exposure
    }

    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    pub fn derived(&self) -> &Tracked<Derived> {
        &self.derived
    }

    /// Last good EV.
    pub fn ev(&self) -> Option<f32> {
        self.engine.ev()
    }

    /// What the display should show now.
    pub fn readout(&self) -> Readout {
        Readout {
            exposure: self.exposure.current.values(&self.tables),
            mode: self.mode.current,
            derived: self.derived.current,
        }
    }

    /// What the display shows now.
    fn rendered(&self) -> Readout {
        Readout {
            exposure: self.exposure.previous.values(&self.tables),
            mode: self.mode.previous,
            derived: self.derived.previous,
        }
    }

    fn commit(&mut self) {
        self.exposure.commit();
        self.mode.commit();
        self.derived.commit();
    }

    /// Full-screen draw for a freshly cleared display.  Everything is
    /// considered rendered afterwards.
    pub fn boot(&mut self) -> Vec<DrawOp, MAX_BOOT_OPS> {
        let ops = layout::boot_ops(&self.readout());
        self.commit();
        ops
    }

    /// Switch to the next mode and open the settle window.  The derived
    /// values follow the new mode immediately.
    pub fn cycle_mode(&mut self, now_ms: u64) {
        self.mode.cycle_mode();
        self.settle.arm(now_ms);
        self.refresh_derived();
    }

    /// Step the active parameter.  Returns `true` if it moved, in which
    /// case the derived values are recomputed.
    pub fn step(&mut self, delta: i32) -> bool {
        let moved = stepper::step(
            &mut self.exposure.current,
            &self.tables,
            self.mode.current,
            delta,
        );
        if moved {
            self.refresh_derived();
        }
        moved
    }

    fn refresh_derived(&mut self) {
        let values = self.exposure.current.values(&self.tables);
        let derived = self
            .engine
            .derive(&self.config.derive_policy, self.mode.current, &values);
        self.derived.set(derived);
    }

    /// Run one loop pass at monotonic time `now_ms`.
    pub fn pass<L, E, B>(&mut self, light: &mut L, encoder: &mut E, button: &mut B, now_ms: u64) -> Frame
    where
        L: LightSource,
        E: EncoderSource,
        B: ModeButtonSource,
    {
        // Both are read every pass so the encoder counter is always
        // drained and the edge detector sees every level.
        let delta = encoder.read_encoder_delta();
        let pressed = self.button.update(button.read_mode_button());

        if !self.settle.is_settling(now_ms) {
            if pressed {
                self.cycle_mode(now_ms);
            } else if delta != 0 {
                self.step(delta);
            }
        }

        let sampling = self.passes % self.config.sample_every.max(1) == 0;
        self.passes = self.passes.wrapping_add(1);

        if sampling && self.engine.feed(light.read_light()) {
            self.refresh_derived();
        }

        let changes = diff(&self.rendered(), &self.readout());
        self.commit();

        Frame {
            changes,
            diagnostic: sampling.then(|| self.diagnostic_line()),
        }
    }

    /// Current settings and EV as a space-separated line.
    pub fn diagnostic_line(&self) -> Diagnostic {
        let values = self.exposure.current.values(&self.tables);
        let mut line = Diagnostic::new();
        let _ = write!(
            line,
            "{} {} {}",
            values.aperture_x100, values.shutter, values.iso
        );
        if let Some(ev) = self.engine.ev() {
            let _ = write!(line, " {:.2}", ev);
        }
        line
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new(MeterConfig::default())
    }
}
