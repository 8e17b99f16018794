use crate::types::{Frame, LandmarkFrame};

/// Per-frame hand landmark detector.
///
/// Calls are synchronous: the scheduler blocks on `detect` and never issues a second call
/// before the first returns. `Ok(None)` means the frame holds no hand.
pub trait LandmarkSource {
    fn detect(&mut self, frame: &Frame, timestamp_ms: u64) -> anyhow::Result<Option<LandmarkFrame>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn detect(&mut self, frame: &Frame, timestamp_ms: u64) -> anyhow::Result<Option<LandmarkFrame>> {
        (**self).detect(frame, timestamp_ms)
    }
}
