//! SSD1306 OLED display wrapper.
//!
//! The screen is only cleared once at boot.  After that every update is
//! an erase-then-draw of individual text runs, see [`lightmeter::layout`].

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use lightmeter::config::DISPLAY_I2C_ADDR;
use lightmeter::layout::{DrawOp, Ink, TextSize};
use lightmeter::Error;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Initialise the SSD1306 display and clear the screen.
///
/// Fails with [`Error::DisplayInit`] if the panel does not answer.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
    let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::DisplayInit)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::DisplayBus)?;
    Ok(display)
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_5X8,
        _ => &FONT_10X20,
    }
}

fn text_style(size: TextSize, ink: Ink) -> MonoTextStyle<'static, BinaryColor> {
    let color = match ink {
        Ink::Erase => BinaryColor::Off,
        Ink::Draw => BinaryColor::On,
    };
    MonoTextStyleBuilder::new()
        .font(font(size))
        .text_color(color)
        .build()
}

/// Execute draw instructions in order and push the frame to the panel.
pub fn apply<I2C>(display: &mut Display<I2C>, ops: &[DrawOp]) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    for op in ops {
        let origin = Point::new(op.region.x, op.region.y);
        // Drawing into the RAM buffer cannot fail.
        let _ = Text::with_baseline(
            op.text.as_str(),
            origin,
            text_style(op.size, op.ink),
            Baseline::Top,
        )
        .draw(display);
    }
    display.flush().map_err(|_| Error::DisplayBus)
}
