//! Recording doubles that log every collaborator call into one shared
//! timeline, so ordering across bus, pin and delay can be asserted.

#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use as5047d_channel::{Bus, EncoderChannel, EncoderConfig, SpiSettings};
use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, ErrorKind, SpiBus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CsHigh,
    CsLow,
    Begin,
    BeginTransaction(SpiSettings),
    Transfer { sent: u8, received: u8 },
    Flush,
    DelayMs(u32),
    DelayNs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct RecordingBus {
    log: Log,
    responses: VecDeque<u8>,
    pub fail_begin: bool,
    pub fail_transfers: bool,
}

impl RecordingBus {
    pub fn new(log: &Log, responses: impl IntoIterator<Item = u8>) -> Self {
        Self {
            log: log.clone(),
            responses: responses.into_iter().collect(),
            fail_begin: false,
            fail_transfers: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl spi::ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl SpiBus<u8> for RecordingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        panic!("driver must only use transfer_in_place");
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        panic!("driver must only use transfer_in_place");
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        panic!("driver must only use transfer_in_place");
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        assert_eq!(words.len(), 1, "transfers are single bytes");
        if self.fail_transfers {
            return Err(ErrorKind::Other);
        }
        let received = self.responses.pop_front().expect("no response queued");
        self.log.borrow_mut().push(Event::Transfer {
            sent: words[0],
            received,
        });
        words[0] = received;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

impl Bus for RecordingBus {
    fn begin(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Begin);
        if self.fail_begin {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }

    fn begin_transaction(&mut self, settings: &SpiSettings) -> Result<(), Self::Error> {
        self.log
            .borrow_mut()
            .push(Event::BeginTransaction(*settings));
        Ok(())
    }
}

pub struct RecordingPin {
    log: Log,
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::CsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::CsHigh);
        Ok(())
    }
}

pub struct RecordingDelay {
    log: Log,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub type RecordingChannel = EncoderChannel<RecordingBus, RecordingPin, RecordingDelay>;

/// Build an uninitialized channel whose bus answers with `responses`
pub fn channel(responses: impl IntoIterator<Item = u8>) -> (RecordingChannel, Log) {
    channel_with(EncoderConfig::AS5047D, |log| RecordingBus::new(log, responses))
}

pub fn channel_with(
    config: EncoderConfig,
    bus: impl FnOnce(&Log) -> RecordingBus,
) -> (RecordingChannel, Log) {
    let log = Log::default();
    let channel = EncoderChannel::new(
        bus(&log),
        RecordingPin { log: log.clone() },
        RecordingDelay { log: log.clone() },
        config,
    );
    (channel, log)
}

pub fn cs_events(log: &Log) -> Vec<Event> {
    log.borrow()
        .iter()
        .copied()
        .filter(|e| matches!(e, Event::CsHigh | Event::CsLow))
        .collect()
}
