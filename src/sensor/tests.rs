//! Unit tests for the LTR-303 driver against a register-level fake bus.

use super::ltr303::{lux, Channels, Gain, IntegrationTime, Ltr303, Ltr303Config, LTR303_ADDR};
use crate::error::Error;
use crate::io::LightSource;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

// ═══════════════════════════════════════════════════════════════════════════
// Fake I²C bus
// ═══════════════════════════════════════════════════════════════════════════

/// 256 byte-wide registers with an auto-incrementing pointer.
struct FakeBus {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    fail: bool,
}

impl FakeBus {
    fn ltr303() -> Self {
        let mut regs = [0u8; 256];
        regs[0x86] = 0xA0;
        regs[0x87] = 0x05;
        Self {
            regs,
            writes: Vec::new(),
            fail: false,
        }
    }

    fn with_sample(mut self, status: u8, ch0: u16, ch1: u16) -> Self {
        self.regs[0x8C] = status;
        self.regs[0x88..0x8A].copy_from_slice(&ch1.to_le_bytes());
        self.regs[0x8A..0x8C].copy_from_slice(&ch0.to_le_bytes());
        self
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        assert_eq!(address, LTR303_ADDR);

        let mut ptr = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    ptr = bytes[0] as usize;
                    for (i, &b) in bytes[1..].iter().enumerate() {
                        self.regs[ptr + i] = b;
                        self.writes.push(((ptr + i) as u8, b));
                    }
                }
                Operation::Read(buf) => {
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.regs[ptr + i];
                    }
                }
            }
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

// ═══════════════════════════════════════════════════════════════════════════
// Initialisation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn begin_resets_then_configures() {
    let mut sensor = Ltr303::new(FakeBus::ltr303(), Ltr303Config::METER);
    sensor.begin(&mut NoDelay).unwrap();

    let bus = sensor.release();
    assert_eq!(
        bus.writes,
        [
            (0x80, 0x02), // SW reset
            (0x85, 0x08), // 50 ms integration, 50 ms rate
            (0x80, 0x01), // 1× gain, active
        ]
    );
}

#[test]
fn begin_rejects_wrong_part_id() {
    let mut bus = FakeBus::ltr303();
    bus.regs[0x86] = 0x90;
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    assert_eq!(sensor.begin(&mut NoDelay), Err(Error::SensorNotFound));

    // The id is only checked once the part has been reset and enabled.
    let bus = sensor.release();
    assert_eq!(bus.writes, [(0x80, 0x02), (0x85, 0x08), (0x80, 0x01)]);
}

#[test]
fn begin_reports_bus_failure() {
    let mut bus = FakeBus::ltr303();
    bus.fail = true;
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    assert_eq!(sensor.begin(&mut NoDelay), Err(Error::SensorBus));
}

#[test]
fn set_config_writes_gain_bits() {
    let mut sensor = Ltr303::new(FakeBus::ltr303(), Ltr303Config::METER);
    sensor
        .set_config(Ltr303Config {
            gain: Gain::X96,
            ..Ltr303Config::METER
        })
        .unwrap();
    assert_eq!(sensor.config().gain, Gain::X96);
    assert_eq!(sensor.config().integration, Ltr303Config::METER.integration);

    let bus = sensor.release();
    assert_eq!(bus.regs[0x80], (0b111 << 2) | 0x01);
}

// ═══════════════════════════════════════════════════════════════════════════
// Sampling
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn poll_returns_none_without_new_data() {
    let bus = FakeBus::ltr303().with_sample(0x00, 1000, 200);
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    assert_eq!(sensor.poll_lux(), Ok(None));
}

#[test]
fn poll_returns_none_for_invalid_data() {
    let bus = FakeBus::ltr303().with_sample(0x84, 1000, 200);
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    assert_eq!(sensor.poll_lux(), Ok(None));
}

#[test]
fn poll_reads_channels_in_datasheet_order() {
    let bus = FakeBus::ltr303().with_sample(0x04, 1000, 200);
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    let channels = sensor.read_channels().unwrap();
    assert_eq!(channels, Channels { ch0: 1000, ch1: 200 });

    // (1.7743·1000 + 1.1059·200) / 1 / 0.5
    let lux = sensor.poll_lux().unwrap().unwrap();
    assert!(approx(lux, 3990.96));
}

#[test]
fn read_light_swallows_bus_errors() {
    let mut bus = FakeBus::ltr303().with_sample(0x04, 1000, 200);
    bus.fail = true;
    let mut sensor = Ltr303::new(bus, Ltr303Config::METER);
    assert_eq!(sensor.read_light(), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Lux conversion
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn lux_of_darkness_is_zero() {
    let dark = Channels { ch0: 0, ch1: 0 };
    assert_eq!(lux(dark, Gain::X1, IntegrationTime::Ms100), 0.0);
}

#[test]
fn lux_uses_ratio_bands() {
    let mid = Channels { ch0: 500, ch1: 500 };
    // ratio 0.5: 4.2785·500 − 1.9548·500
    assert!(approx(lux(mid, Gain::X1, IntegrationTime::Ms100), 1161.85));

    let ir = Channels { ch0: 10, ch1: 90 };
    assert_eq!(lux(ir, Gain::X1, IntegrationTime::Ms100), 0.0);
}

#[test]
fn lux_scales_with_gain_and_integration() {
    let ch = Channels { ch0: 960, ch1: 0 };
    let base = lux(ch, Gain::X1, IntegrationTime::Ms100);
    assert!(approx(lux(ch, Gain::X96, IntegrationTime::Ms100), base / 96.0));
    assert!(approx(lux(ch, Gain::X1, IntegrationTime::Ms400), base / 4.0));
}
