use crate::types::{LandmarkFrame, landmarks};

/// Discrete gesture flags carried across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureState {
    pub pinch: bool,
    /// Pinch as of the end of the previous frame; only used for edge detection.
    pub previous_pinch: bool,
    pub fist: bool,
}

impl GestureState {
    pub fn pinch_started(&self) -> bool {
        self.pinch && !self.previous_pinch
    }
}

/// Per-frame pinch and fist classification.
#[derive(Debug)]
pub struct GestureClassifier {
    pinch_threshold: f32,
    state: GestureState,
}

impl GestureClassifier {
    pub fn new(pinch_threshold: f32) -> Self {
        Self {
            pinch_threshold,
            state: GestureState::default(),
        }
    }

    /// Classifies the current hand. With no hand both flags keep their previous value, so a
    /// single dropped frame cannot end a drag or produce a second click edge.
    pub fn classify(&mut self, hand: Option<&LandmarkFrame>) -> GestureState {
        if let Some(hand) = hand {
            self.state.pinch = is_pinch(hand, self.pinch_threshold);
            self.state.fist = is_fist(hand);
        }
        self.state
    }

    /// Latches the pinch edge. Must run after every consumer of `pinch_started` for the frame.
    pub fn end_frame(&mut self) {
        self.state.previous_pinch = self.state.pinch;
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

pub fn is_pinch(hand: &LandmarkFrame, threshold: f32) -> bool {
    let thumb = hand.point(landmarks::THUMB_TIP);
    let index = hand.point(landmarks::INDEX_TIP);
    thumb.distance_2d(index) < threshold
}

/// All four non-thumb fingers folded: each tip sits closer to the wrist than its own MCP.
pub fn is_fist(hand: &LandmarkFrame) -> bool {
    let wrist = hand.point(landmarks::WRIST);
    landmarks::FINGERS.iter().all(|&(tip, mcp)| {
        hand.point(tip).distance_2d(wrist) < hand.point(mcp).distance_2d(wrist)
    })
}
