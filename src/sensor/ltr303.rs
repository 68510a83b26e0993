//! LTR-303ALS ambient light sensor driver.
//!
//! Register map (subset used here):
//! ```text
//! 0x80 ALS_CONTR      [4:2] gain, [1] SW reset, [0] active mode
//! 0x85 ALS_MEAS_RATE  [5:3] integration time, [2:0] repeat rate
//! 0x86 PART_ID        0xA0
//! 0x87 MANUFAC_ID     0x05
//! 0x88 ALS_DATA_CH1_0 CH1 lo, CH1 hi, CH0 lo, CH0 hi (burst read)
//! 0x8C ALS_STATUS     [7] data invalid, [2] new data
//! ```
//!
//! CH0 sees visible + IR, CH1 mostly IR.  Lux uses the ratio formula
//! from the LTR-303 appendix.

use crate::error::{Error, Result};
use crate::io::LightSource;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Fixed 7-bit I²C address.
pub const LTR303_ADDR: u8 = 0x29;

const REG_ALS_CONTR: u8 = 0x80;
const REG_ALS_MEAS_RATE: u8 = 0x85;
const REG_PART_ID: u8 = 0x86;
const REG_MANUFAC_ID: u8 = 0x87;
const REG_ALS_DATA_CH1_0: u8 = 0x88;
const REG_ALS_STATUS: u8 = 0x8C;

const PART_ID: u8 = 0xA0;
const MANUFAC_ID: u8 = 0x05;

const CONTR_ACTIVE: u8 = 0x01;
const CONTR_SW_RESET: u8 = 0x02;
const STATUS_NEW_DATA: u8 = 0x04;
const STATUS_INVALID: u8 = 0x80;

/// Time the part needs after a soft reset (ms).
const RESET_DELAY_MS: u32 = 10;

/// ALS analog gain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// 1 lux .. 64k lux.
    #[default]
    X1,
    X2,
    X4,
    X8,
    X48,
    /// 0.01 lux .. 600 lux.
    X96,
}

impl Gain {
    const fn bits(self) -> u8 {
        match self {
            Gain::X1 => 0b000,
            Gain::X2 => 0b001,
            Gain::X4 => 0b010,
            Gain::X8 => 0b011,
            Gain::X48 => 0b110,
            Gain::X96 => 0b111,
        }
    }

    pub const fn factor(self) -> f32 {
        match self {
            Gain::X1 => 1.0,
            Gain::X2 => 2.0,
            Gain::X4 => 4.0,
            Gain::X8 => 8.0,
            Gain::X48 => 48.0,
            Gain::X96 => 96.0,
        }
    }
}

/// ALS integration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    Ms50,
    #[default]
    Ms100,
    Ms150,
    Ms200,
    Ms250,
    Ms300,
    Ms350,
    Ms400,
}

impl IntegrationTime {
    const fn bits(self) -> u8 {
        match self {
            IntegrationTime::Ms100 => 0b000,
            IntegrationTime::Ms50 => 0b001,
            IntegrationTime::Ms200 => 0b010,
            IntegrationTime::Ms400 => 0b011,
            IntegrationTime::Ms150 => 0b100,
            IntegrationTime::Ms250 => 0b101,
            IntegrationTime::Ms300 => 0b110,
            IntegrationTime::Ms350 => 0b111,
        }
    }

    pub const fn millis(self) -> u32 {
        match self {
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms150 => 150,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms250 => 250,
            IntegrationTime::Ms300 => 300,
            IntegrationTime::Ms350 => 350,
            IntegrationTime::Ms400 => 400,
        }
    }

    /// Integration factor of the lux formula (100 ms = 1.0).
    pub fn factor(self) -> f32 {
        self.millis() as f32 / 100.0
    }
}

/// How often the part starts a new conversion.  Must not be shorter than
/// the integration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementRate {
    Ms50,
    Ms100,
    Ms200,
    #[default]
    Ms500,
    Ms1000,
    Ms2000,
}

impl MeasurementRate {
    const fn bits(self) -> u8 {
        match self {
            MeasurementRate::Ms50 => 0b000,
            MeasurementRate::Ms100 => 0b001,
            MeasurementRate::Ms200 => 0b010,
            MeasurementRate::Ms500 => 0b011,
            MeasurementRate::Ms1000 => 0b100,
            MeasurementRate::Ms2000 => 0b101,
        }
    }
}

/// Sensor configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ltr303Config {
    pub gain: Gain,
    pub integration: IntegrationTime,
    pub rate: MeasurementRate,
}

impl Ltr303Config {
    /// Settings the meter runs with: widest range, fastest refresh.
    pub const METER: Self = Self {
        gain: Gain::X1,
        integration: IntegrationTime::Ms50,
        rate: MeasurementRate::Ms50,
    };
}

/// Raw channel counts of one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels {
    /// Visible + IR.
    pub ch0: u16,
    /// IR.
    pub ch1: u16,
}

/// Convert channel counts to lux.
///
/// The CH1/(CH0+CH1) ratio selects the coefficient pair; above 0.85 the
/// light is almost pure IR and reads as 0 lux.
pub fn lux(channels: Channels, gain: Gain, integration: IntegrationTime) -> f32 {
    let ch0 = channels.ch0 as f32;
    let ch1 = channels.ch1 as f32;
    let total = ch0 + ch1;
    if total == 0.0 {
        return 0.0;
    }

    let ratio = ch1 / total;
    let raw = if ratio < 0.45 {
        1.7743 * ch0 + 1.1059 * ch1
    } else if ratio < 0.64 {
        4.2785 * ch0 - 1.9548 * ch1
    } else if ratio < 0.85 {
        0.5926 * ch0 + 0.1185 * ch1
    } else {
        0.0
    };

    (raw / gain.factor() / integration.factor()).max(0.0)
}

/// LTR-303 on an `embedded-hal` I²C bus.
pub struct Ltr303<I2C> {
    i2c: I2C,
    config: Ltr303Config,
}

impl<I2C: I2c> Ltr303<I2C> {
    pub fn new(i2c: I2C, config: Ltr303Config) -> Self {
        Self { i2c, config }
    }

    /// Reset and start the sensor, then check that it is an LTR-303.
    ///
    /// Returns [`Error::SensorNotFound`] if the part id or manufacturer id
    /// read back after the reset does not match.
    pub fn begin(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        self.write_reg(REG_ALS_CONTR, CONTR_SW_RESET)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.apply_config()?;

        let part = self.read_reg(REG_PART_ID)?;
        let manufacturer = self.read_reg(REG_MANUFAC_ID)?;
        if part != PART_ID || manufacturer != MANUFAC_ID {
            return Err(Error::SensorNotFound);
        }
        Ok(())
    }

    /// Change gain / timing at runtime.
    pub fn set_config(&mut self, config: Ltr303Config) -> Result<()> {
        self.config = config;
        self.apply_config()
    }

    pub fn config(&self) -> &Ltr303Config {
        &self.config
    }

    fn apply_config(&mut self) -> Result<()> {
        let meas = (self.config.integration.bits() << 3) | self.config.rate.bits();
        self.write_reg(REG_ALS_MEAS_RATE, meas)?;
        let contr = (self.config.gain.bits() << 2) | CONTR_ACTIVE;
        self.write_reg(REG_ALS_CONTR, contr)
    }

    /// `true` once a conversion finished since the last data read.
    pub fn new_data_available(&mut self) -> Result<bool> {
        let status = self.read_reg(REG_ALS_STATUS)?;
        Ok(status & STATUS_NEW_DATA != 0 && status & STATUS_INVALID == 0)
    }

    /// Burst-read both channels (CH1 first, as the datasheet requires).
    pub fn read_channels(&mut self) -> Result<Channels> {
        let mut buf = [0u8; 4];
        self.i2c
            .write_read(LTR303_ADDR, &[REG_ALS_DATA_CH1_0], &mut buf)
            .map_err(|_| Error::SensorBus)?;
        Ok(Channels {
            ch1: u16::from_le_bytes([buf[0], buf[1]]),
            ch0: u16::from_le_bytes([buf[2], buf[3]]),
        })
    }

    /// Lux of the newest conversion, `Ok(None)` if nothing new is ready.
    pub fn poll_lux(&mut self) -> Result<Option<f32>> {
        if !self.new_data_available()? {
            return Ok(None);
        }
        let channels = self.read_channels()?;
        Ok(Some(lux(
            channels,
            self.config.gain,
            self.config.integration,
        )))
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(LTR303_ADDR, &[reg], &mut buf)
            .map_err(|_| Error::SensorBus)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c
            .write(LTR303_ADDR, &[reg, value])
            .map_err(|_| Error::SensorBus)
    }
}

impl<I2C: I2c> LightSource for Ltr303<I2C> {
    /// Bus errors are treated like "no sample": the meter keeps its last EV.
    fn read_light(&mut self) -> Option<f32> {
        self.poll_lux().ok().flatten()
    }
}
