//! User interface subsystem - OLED display + mode button.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×32 OLED via I²C0
//! - **Mode button**: push switch on the encoder shaft (GP17)
//!
//! The rotary encoder itself is decoded by PIO, see `encoder.rs`.

pub mod buttons;
pub mod display;
