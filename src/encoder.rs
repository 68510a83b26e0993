//! Rotary encoder - PIO quadrature decoding into a shared detent counter.
//!
//! The PIO state machine does the edge decoding; this task only turns
//! each reported detent into ±1 on an atomic counter.  The control loop
//! swaps the counter back to zero on every read, so what it sees is
//! always the movement since its previous pass, never an absolute
//! position.

use defmt::trace;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::rotary_encoder::{Direction, PioEncoder};
use lightmeter::io::EncoderSource;
use portable_atomic::{AtomicI32, Ordering};

/// Detents accumulated since the last read.
static DETENTS: AtomicI32 = AtomicI32::new(0);

/// Decoder task for the encoder on PIO0 SM0.
#[embassy_executor::task]
pub async fn encoder_task(mut encoder: PioEncoder<'static, PIO0, 0>) {
    loop {
        let step = match encoder.read().await {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        };
        let total = DETENTS.fetch_add(step, Ordering::Relaxed) + step;
        trace!("Encoder: {}", total);
    }
}

/// Read side of the detent counter.
pub struct EncoderDelta;

impl EncoderSource for EncoderDelta {
    fn read_encoder_delta(&mut self) -> i32 {
        DETENTS.swap(0, Ordering::Relaxed)
    }
}
