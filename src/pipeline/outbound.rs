use crossbeam_channel::{Sender, TrySendError};
use thiserror::Error;

use crate::types::Frame;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The consumer is busy; the frame was dropped.
    #[error("outbound sink is full, frame dropped")]
    Full,
    #[error("outbound sink is closed")]
    Closed,
}

/// Destination for frames forwarded to the network (e.g. the assistant backend).
pub trait FrameSink {
    fn send(&mut self, frame: Frame) -> Result<(), SinkError>;
}

/// Forwards frames over a bounded channel, dropping them while the consumer is busy.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<Frame>,
}

impl ChannelSink {
    pub fn new(tx: Sender<Frame>) -> Self {
        Self { tx }
    }
}

impl FrameSink for ChannelSink {
    fn send(&mut self, frame: Frame) -> Result<(), SinkError> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::Full),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Closed),
        }
    }
}

/// Lets one display frame in every `stride` through to the outbound sink.
#[derive(Debug)]
pub struct OutboundThrottle {
    stride: u32,
    counter: u32,
}

impl OutboundThrottle {
    pub fn new(stride: u32) -> Self {
        Self {
            stride: stride.max(1),
            counter: 0,
        }
    }

    /// Counts one display frame; true when this one should be sent.
    pub fn tick(&mut self) -> bool {
        let send = self.counter == 0;
        self.counter = (self.counter + 1) % self.stride;
        send
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
