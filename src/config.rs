//! Fixed channel parameters for a sensor/board pairing.

use embedded_hal::spi::{MODE_1, Mode};

/// Order in which bits of each byte are shifted onto the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Settings the bus session is claimed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiSettings {
    /// Upper bound for the SCK frequency in Hz
    pub max_frequency_hz: u32,
    pub bit_order: BitOrder,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl SpiSettings {
    #[must_use]
    pub const fn new(max_frequency_hz: u32, bit_order: BitOrder, mode: Mode) -> Self {
        Self {
            max_frequency_hz,
            bit_order,
            mode,
        }
    }
}

/// Immutable configuration held by an [`EncoderChannel`](crate::EncoderChannel)
///
/// The chip-select line is not part of this record: its identity is the typed
/// pin handle given to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub spi: SpiSettings,
    /// Time the sensor needs after the bus comes up before it accepts frames
    pub settle_delay_ms: u32,
    /// Bits of the response frame that carry the position
    pub position_mask: u16,
}

impl EncoderConfig {
    /// AS5047D: up to 10 MHz, MSB first, data sampled on the falling edge (mode 1)
    pub const AS5047D: Self = Self {
        spi: SpiSettings::new(10_000_000, BitOrder::MsbFirst, MODE_1),
        settle_delay_ms: 1000,
        position_mask: 0x3FFF,
    };

    #[must_use]
    pub const fn with_max_frequency_hz(mut self, max_frequency_hz: u32) -> Self {
        self.spi.max_frequency_hz = max_frequency_hz;
        self
    }

    #[must_use]
    pub const fn with_settle_delay_ms(mut self, settle_delay_ms: u32) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    #[must_use]
    pub const fn with_position_mask(mut self, position_mask: u16) -> Self {
        self.position_mask = position_mask;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::AS5047D
    }
}
