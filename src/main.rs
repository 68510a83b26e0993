//! Light meter firmware - RP2040 + LTR-303 + SSD1306 + rotary encoder.
//!
//! Single control loop: every pass drains the encoder, samples the mode
//! button, and every `SAMPLE_EVERY_PASSES` passes polls the light sensor.
//! Only the screen regions whose text changed are redrawn.
//!
//! A missing sensor or display at boot is fatal: the firmware logs the
//! reason and parks forever.

#![no_std]
#![no_main]

mod encoder;
mod ui;

use defmt::{debug, error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::rotary_encoder::{PioEncoder, PioEncoderProgram};
use embassy_time::{Delay, Duration, Instant, Timer};
use lightmeter::config::{HALT_POLL_MS, I2C_FREQUENCY_HZ, PASS_INTERVAL_MS};
use lightmeter::sensor::{Ltr303, Ltr303Config};
use lightmeter::{Error, Meter, MeterConfig};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}

/// Log the failure and idle forever.
async fn halt(reason: Error) -> ! {
    error!("Fatal: {} - halting", reason);
    loop {
        Timer::after(Duration::from_millis(HALT_POLL_MS)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Light meter starting...");

    let p = embassy_rp::init(Default::default());

    // ── Light sensor (I²C1: GP2 = SDA, GP3 = SCL) ──────────────────
    let sensor_bus = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, i2c_config());
    let mut sensor = Ltr303::new(sensor_bus, Ltr303Config::METER);
    if let Err(e) = sensor.begin(&mut Delay) {
        halt(e).await;
    }
    info!(
        "LTR-303 ready: gain={}, integration={}",
        sensor.config().gain,
        sensor.config().integration
    );

    // ── Display (I²C0: GP4 = SDA, GP5 = SCL) ───────────────────────
    let display_bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config());
    let mut display = match ui::display::init(display_bus) {
        Ok(display) => display,
        Err(e) => halt(e).await,
    };
    info!("Display ready");

    // ── Encoder (PIO0 SM0: GP20 / GP21) ─────────────────────────────
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioEncoderProgram::new(&mut common);
    let quadrature = PioEncoder::new(&mut common, sm0, p.PIN_20, p.PIN_21, &program);
    spawner.must_spawn(encoder::encoder_task(quadrature));
    let mut detents = encoder::EncoderDelta;

    // ── Mode button (GP17, active-low) ──────────────────────────────
    let mut button = ui::buttons::ModeButton::new(Input::new(p.PIN_17, Pull::Up));

    let mut meter = Meter::new(MeterConfig::default());
    info!(
        "Meter: scale={}, sample every {} passes",
        meter.config().shutter_scale,
        meter.config().sample_every
    );

    if let Err(e) = ui::display::apply(&mut display, &meter.boot()) {
        warn!("Display: boot draw failed: {}", e);
    }

    loop {
        let now = Instant::now().as_millis();
        let frame = meter.pass(&mut sensor, &mut detents, &mut button, now);

        if !frame.changes.is_empty() {
            debug!("Redraw: {} fields", frame.changes.len());
            if let Err(e) = ui::display::apply(&mut display, &frame.draw_ops()) {
                warn!("Display: {}", e);
            }
        }

        if let Some(line) = frame.diagnostic {
            debug!("{}", line.as_str());
        }

        Timer::after(Duration::from_millis(PASS_INTERVAL_MS)).await;
    }
}
