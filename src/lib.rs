//! Blocking channel driver for the AS5047D magnetic rotary position sensor.
//!
//! The driver owns the SPI bus, the chip-select line and a delay source for
//! the lifetime of the program. [`EncoderChannel::initialize`] claims the bus
//! once and never releases it; every [`EncoderChannel::read_position`] call is
//! one self-contained two-byte frame.
//!
//! ```ignore
//! use as5047d_channel::{EncoderChannel, EncoderConfig, Preconfigured};
//!
//! let mut encoder = EncoderChannel::new(Preconfigured::new(spi), cs, delay, EncoderConfig::AS5047D);
//! encoder.initialize();
//!
//! loop {
//!     let counts = encoder.read_position();
//! }
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod bus;
mod config;
mod driver;
mod error;
mod frame;
pub mod parity;

pub use bus::{Bus, Preconfigured};
pub use config::{BitOrder, EncoderConfig, SpiSettings};
pub use driver::{EncoderChannel, FILLER_BYTE, POSITION_MAX};
pub use error::Error;
pub use frame::ResponseFrame;
