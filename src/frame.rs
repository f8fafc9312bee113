//! Layout of the 16-bit response clocked out by the sensor.

use crate::parity;

bitfield::bitfield! {
    /// One response frame, MSB first on the wire
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ResponseFrame(u16);
    impl Debug;
    /// Even parity over bits 14..0
    pub parity, _: 15;
    /// Set when the sensor saw an error in the previous frame; cleared by
    /// reading ERRFL
    pub error_flag, _: 14;
    /// Angle in counts, 0..=16383
    pub u16, position, _: 13, 0;
}

impl ResponseFrame {
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Join the two bytes of a frame in the order they were received
    #[must_use]
    pub const fn from_bytes(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    #[must_use]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn has_valid_parity(&self) -> bool {
        parity::verify_parity(self.0)
    }
}

impl From<u16> for ResponseFrame {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ResponseFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ResponseFrame(0x{:04X})", self.0);
    }
}
