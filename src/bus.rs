//! Bus transport seam.
//!
//! Transfers go through [`SpiBus`]. The extra [`Bus`] methods model the two
//! setup steps some platforms expose separately: bringing the peripheral up
//! and claiming it under a set of [`SpiSettings`].

use embedded_hal::spi::{ErrorType, SpiBus};

use crate::config::SpiSettings;

/// SPI transport with explicit bring-up and session claim
pub trait Bus: SpiBus<u8> {
    /// Acquire the peripheral
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the peripheral could not be brought up
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Claim the bus under `settings`. The claim is never ended by this crate.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the settings could not be applied
    fn begin_transaction(&mut self, settings: &SpiSettings) -> Result<(), Self::Error>;
}

/// Adapts a HAL bus whose clock, mode and bit order were fixed when it was
/// constructed. Both setup steps are no-ops.
#[derive(Debug)]
pub struct Preconfigured<B> {
    inner: B,
}

impl<B> Preconfigured<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: ErrorType> ErrorType for Preconfigured<B> {
    type Error = B::Error;
}

impl<B: SpiBus<u8>> SpiBus<u8> for Preconfigured<B> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(words)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.inner.transfer(read, write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.transfer_in_place(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<B: SpiBus<u8>> Bus for Preconfigured<B> {
    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn begin_transaction(&mut self, _settings: &SpiSettings) -> Result<(), Self::Error> {
        Ok(())
    }
}
