use crate::{
    config::{TrackingConfig, TrackingControls},
    engine::{CursorOverlay, InteractionEngine, InteractionEvent, UiContext},
    error::TrackingError,
    types::Frame,
};

use super::{
    outbound::{FrameSink, OutboundThrottle, SinkError},
    source::LandmarkSource,
};

pub const UNAVAILABLE_MESSAGE: &str = "hand tracking unavailable";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackingStatus {
    Disabled,
    Active,
    /// The landmark source could not be started; carries the user-facing message.
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    InvalidDimensions,
    DuplicateTimestamp,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Processed(Vec<InteractionEvent>),
    /// Nothing ran this cycle; the host should call again next display frame.
    Skipped(SkipReason),
    /// Tracking is off. Carries the events that clear emphasis and end a drag; the host
    /// must not schedule another tick until tracking is enabled again.
    Stopped(Vec<InteractionEvent>),
}

impl TickOutcome {
    pub fn should_reschedule(&self) -> bool {
        !matches!(self, TickOutcome::Stopped(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub processed: u64,
    pub duplicates: u64,
    pub invalid: u64,
    pub discarded: u64,
    pub detector_errors: u64,
    pub outbound_sent: u64,
    pub outbound_dropped: u64,
}

type SourceInit<S> = Box<dyn FnMut() -> anyhow::Result<S>>;

/// Drives the gesture engine once per display frame while tracking is enabled.
pub struct FrameScheduler<S: LandmarkSource> {
    controls: TrackingControls,
    init: SourceInit<S>,
    source: Option<S>,
    engine: InteractionEngine,
    last_timestamp: Option<u64>,
    throttle: OutboundThrottle,
    sink: Option<Box<dyn FrameSink>>,
    status: TrackingStatus,
    stats: FrameStats,
}

impl<S: LandmarkSource> FrameScheduler<S> {
    /// `init` starts the landmark source each time tracking is enabled.
    pub fn new(
        config: &TrackingConfig,
        controls: TrackingControls,
        init: impl FnMut() -> anyhow::Result<S> + 'static,
    ) -> Result<Self, TrackingError> {
        config.validate()?;
        Ok(Self {
            controls,
            init: Box::new(init),
            source: None,
            engine: InteractionEngine::new(config),
            last_timestamp: None,
            throttle: OutboundThrottle::new(config.outbound_stride),
            sink: None,
            status: TrackingStatus::Disabled,
            stats: FrameStats::default(),
        })
    }

    pub fn with_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// One display-frame callback.
    pub fn tick(&mut self, frame: &Frame, ui: &mut UiContext<'_>) -> TickOutcome {
        if !self.controls.is_enabled() {
            return TickOutcome::Stopped(self.shutdown());
        }
        if self.source.is_none() {
            if let Err(err) = self.start_source() {
                log::error!("{err}");
                return TickOutcome::Stopped(Vec::new());
            }
        }

        if !frame.has_valid_dimensions() {
            self.stats.invalid += 1;
            log::debug!(
                "skipping frame with invalid size {}x{}",
                frame.width,
                frame.height
            );
            return TickOutcome::Skipped(SkipReason::InvalidDimensions);
        }

        self.forward_outbound(frame);

        if self.last_timestamp == Some(frame.timestamp_ms) {
            self.stats.duplicates += 1;
            return TickOutcome::Skipped(SkipReason::DuplicateTimestamp);
        }
        self.last_timestamp = Some(frame.timestamp_ms);

        let Some(source) = self.source.as_mut() else {
            return TickOutcome::Stopped(Vec::new());
        };
        let hand = match source.detect(frame, frame.timestamp_ms) {
            Ok(hand) => hand,
            Err(err) => {
                self.stats.detector_errors += 1;
                log::warn!("landmark detection failed: {err:?}");
                None
            }
        };

        // Disabled while the detector was running: drop the result untouched.
        if !self.controls.is_enabled() {
            self.stats.discarded += 1;
            return TickOutcome::Stopped(self.shutdown());
        }

        let events = self
            .engine
            .process(hand.as_ref(), self.controls.sensitivity(), ui);
        self.stats.processed += 1;
        TickOutcome::Processed(events)
    }

    /// On failure tracking is switched off and the status carries the user-facing message.
    fn start_source(&mut self) -> Result<(), TrackingError> {
        match (self.init)() {
            Ok(source) => {
                log::info!("hand tracking enabled");
                self.source = Some(source);
                self.status = TrackingStatus::Active;
                Ok(())
            }
            Err(err) => {
                self.controls.disable();
                self.status = TrackingStatus::Unavailable(UNAVAILABLE_MESSAGE.to_string());
                Err(TrackingError::SourceUnavailable(format!("{err:#}")))
            }
        }
    }

    fn shutdown(&mut self) -> Vec<InteractionEvent> {
        if self.source.take().is_none() {
            return Vec::new();
        }
        log::info!("hand tracking disabled");
        log::debug!("frame stats for session: {:?}", self.stats);
        self.status = TrackingStatus::Disabled;
        self.last_timestamp = None;
        self.throttle.reset();
        self.engine.reset()
    }

    fn forward_outbound(&mut self, frame: &Frame) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if !self.throttle.tick() {
            return;
        }
        match sink.send(frame.clone()) {
            Ok(()) => self.stats.outbound_sent += 1,
            Err(SinkError::Full) => self.stats.outbound_dropped += 1,
            Err(SinkError::Closed) => {
                log::warn!("outbound frame sink closed, no longer forwarding frames");
                self.sink = None;
            }
        }
    }

    pub fn controls(&self) -> &TrackingControls {
        &self.controls
    }

    pub fn status(&self) -> &TrackingStatus {
        &self.status
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Cursor for the renderer; hidden unless tracking is active.
    pub fn overlay(&self) -> CursorOverlay {
        match self.status {
            TrackingStatus::Active => self.engine.overlay(),
            _ => CursorOverlay::default(),
        }
    }

    pub fn engine(&self) -> &InteractionEngine {
        &self.engine
    }
}
