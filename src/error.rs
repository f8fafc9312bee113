use core::fmt;

/// Fault reported by [`EncoderChannel::read_position_checked`](crate::EncoderChannel::read_position_checked)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Parity error in received frame
    ParityError,
    /// Error flag set by the sensor (invalid command, framing or parity error
    /// on its side)
    SensorError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParityError => f.write_str("parity error in response frame"),
            Error::SensorError => f.write_str("sensor error flag set"),
        }
    }
}

impl core::error::Error for Error {}
