//! Blocking single-device channel to an AS5047D

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{bus::Bus, config::EncoderConfig, error::Error, frame::ResponseFrame};

/// Byte clocked out for every byte clocked in. `0xFFFF` also happens to be a
/// parity-correct read of ANGLECOM, so the sensor keeps streaming the angle.
pub const FILLER_BYTE: u8 = 0xFF;

/// Largest position reading (14-bit: 0-16383 over one revolution)
pub const POSITION_MAX: u16 = 0x3FFF;

/// AS5047D channel
///
/// Owns the bus, the chip-select line and a delay source. After
/// [`initialize`](Self::initialize) the bus stays claimed for as long as the
/// channel exists; nothing in this type ever ends the session. The channel
/// must be the only user of the bus.
///
/// Reads take `&mut self`. Callers sharing a channel between tasks or
/// threads serialize access themselves, e.g. behind a mutex.
#[derive(Debug)]
pub struct EncoderChannel<BUS, CS, D> {
    bus: BUS,
    cs: CS,
    delay: D,
    config: EncoderConfig,
    claimed: bool,
}

impl<BUS, CS, D> EncoderChannel<BUS, CS, D>
where
    BUS: Bus,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a channel. No bus or pin activity happens until
    /// [`initialize`](Self::initialize).
    pub fn new(bus: BUS, cs: CS, delay: D, config: EncoderConfig) -> Self {
        Self {
            bus,
            cs,
            delay,
            config,
            claimed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Hand back the bus, chip-select and delay, consuming the channel
    ///
    /// The bus is returned as-is: the session claimed by
    /// [`initialize`](Self::initialize) is not ended.
    pub fn release(self) -> (BUS, CS, D) {
        (self.bus, self.cs, self.delay)
    }

    /// Bring the channel up and claim the bus for the rest of the program
    ///
    /// Must be called exactly once, before the first read. The steps run in
    /// this order:
    /// 1. chip-select becomes an output, idling high
    /// 2. the bus is started
    /// 3. the configured settling delay elapses
    /// 4. the bus is claimed under [`EncoderConfig::spi`]
    ///
    /// Failures of the bus or pin are not reported.
    pub fn initialize(&mut self) {
        debug_assert!(!self.claimed, "EncoderChannel::initialize called twice");

        self.deselect();

        let settings = self.config.spi;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Starting SPI: {} Hz, {}, settle {} ms",
            settings.max_frequency_hz,
            settings.bit_order,
            self.config.settle_delay_ms
        );

        if self.bus.begin().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI bus failed to start, ignoring");
        }

        self.delay.delay_ms(self.config.settle_delay_ms);

        if self.bus.begin_transaction(&settings).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI transaction could not be claimed, ignoring");
        }

        self.claimed = true;
    }

    /// Clock one frame out of the sensor
    ///
    /// Chip-select is held low across both byte transfers and raised again
    /// before returning. The status bits are left in the frame untouched.
    pub fn read_frame(&mut self) -> ResponseFrame {
        debug_assert!(
            self.claimed,
            "EncoderChannel read before initialize() claimed the bus"
        );

        self.select();
        let high = self.transfer_byte(FILLER_BYTE);
        let low = self.transfer_byte(FILLER_BYTE);
        if self.bus.flush().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI flush failed, ignoring");
        }
        self.deselect();

        let frame = ResponseFrame::from_bytes(high, low);

        #[cfg(feature = "defmt")]
        defmt::trace!("Received frame: 0x{:04X}", frame.raw());

        frame
    }

    /// Get the 14-bit angular position
    ///
    /// Value ranges from 0 to [`POSITION_MAX`]. The parity and error bits are
    /// masked off without being looked at, so a missing or faulty sensor
    /// yields a reading indistinguishable from a real one. Use
    /// [`read_position_checked`](Self::read_position_checked) to have them
    /// inspected.
    pub fn read_position(&mut self) -> u16 {
        let position = self.read_frame().raw() & self.config.position_mask;

        #[cfg(feature = "defmt")]
        defmt::debug!("Position: {}", position);

        position
    }

    /// Get the 14-bit angular position, rejecting frames with bad status bits
    ///
    /// Performs the same single frame as [`read_position`](Self::read_position).
    ///
    /// # Errors
    ///
    /// Returns an error if the frame fails the parity check or the sensor set
    /// its error flag
    pub fn read_position_checked(&mut self) -> Result<u16, Error> {
        let frame = self.read_frame();

        if !frame.has_valid_parity() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Parity error in response: 0x{:04X}", frame.raw());
            return Err(Error::ParityError);
        }

        if frame.error_flag() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Sensor error flag set in response");
            return Err(Error::SensorError);
        }

        Ok(frame.raw() & self.config.position_mask)
    }

    /// Full-duplex transfer of a single byte. On a bus error whatever the
    /// transport left in the buffer is returned.
    fn transfer_byte(&mut self, byte: u8) -> u8 {
        let mut word = [byte];
        if self.bus.transfer_in_place(&mut word).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI transfer failed, ignoring");
        }
        word[0]
    }

    fn select(&mut self) {
        if self.cs.set_low().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to assert chip-select");
        }
    }

    fn deselect(&mut self) {
        if self.cs.set_high().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to release chip-select");
        }
    }
}
