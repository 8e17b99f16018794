//! Synthetic hands for driving the engine without a camera or a landmark model.
//!
//! Every pose is anchored at the index fingertip, so switching pose between frames keeps
//! the cursor where it was.

use std::collections::VecDeque;

use crate::{
    pipeline::LandmarkSource,
    types::{Frame, LANDMARK_COUNT, Landmark, LandmarkFrame, landmarks},
};

const FINGER_SPREAD: [f32; 4] = [0.0, 0.03, 0.06, 0.09];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    Open,
    Pinch,
    Fist,
}

impl HandPose {
    /// Builds the 21 landmarks with the index fingertip at normalized `(x, y)`.
    pub fn at(self, x: f32, y: f32, timestamp_ms: u64) -> LandmarkFrame {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        let mut set = |idx: usize, dx: f32, dy: f32| {
            points[idx] = Landmark::new(x + dx, y + dy, 0.0);
        };

        match self {
            HandPose::Open | HandPose::Pinch => {
                set(landmarks::WRIST, 0.0, 0.30);
                for (finger, spread) in FINGER_SPREAD.iter().enumerate() {
                    let mcp = 5 + finger * 4;
                    set(mcp, *spread, 0.15);
                    set(mcp + 1, *spread, 0.10);
                    set(mcp + 2, *spread, 0.05);
                    set(mcp + 3, *spread, 0.0);
                }
                set(landmarks::THUMB_CMC, -0.05, 0.27);
                set(landmarks::THUMB_MCP, -0.08, 0.22);
                if self == HandPose::Pinch {
                    set(landmarks::THUMB_IP, -0.05, 0.08);
                    set(landmarks::THUMB_TIP, -0.02, 0.01);
                } else {
                    set(landmarks::THUMB_IP, -0.10, 0.17);
                    set(landmarks::THUMB_TIP, -0.11, 0.13);
                }
            }
            HandPose::Fist => {
                set(landmarks::WRIST, 0.0, 0.12);
                for (finger, spread) in FINGER_SPREAD.iter().enumerate() {
                    let mcp = 5 + finger * 4;
                    set(mcp, *spread, -0.04);
                    set(mcp + 1, *spread, -0.07);
                    set(mcp + 2, *spread, -0.03);
                    set(mcp + 3, *spread, 0.0);
                }
                set(landmarks::THUMB_CMC, -0.05, 0.10);
                set(landmarks::THUMB_MCP, -0.08, 0.06);
                set(landmarks::THUMB_IP, -0.08, 0.02);
                set(landmarks::THUMB_TIP, -0.07, -0.01);
            }
        }

        LandmarkFrame::new(points, timestamp_ms)
    }
}

/// One scripted detector result: a pose at a fingertip position, or no hand.
pub type ScriptStep = Option<(HandPose, f32, f32)>;

/// Landmark source that replays a fixed script, one step per detection call.
/// Once the script runs out it reports no hand.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
    calls: usize,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            calls: 0,
        }
    }

    /// Linear fingertip sweep from `from` to `to` in `frames` steps, holding `pose`.
    pub fn sweep(pose: HandPose, from: (f32, f32), to: (f32, f32), frames: usize) -> Vec<ScriptStep> {
        let frames = frames.max(1);
        (0..=frames)
            .map(|i| {
                // Land exactly on `to`; interpolation can miss it by an ulp.
                if i == frames {
                    return Some((pose, to.0, to.1));
                }
                let t = i as f32 / frames as f32;
                Some((
                    pose,
                    from.0 * (1.0 - t) + to.0 * t,
                    from.1 * (1.0 - t) + to.1 * t,
                ))
            })
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn detect(&mut self, _frame: &Frame, timestamp_ms: u64) -> anyhow::Result<Option<LandmarkFrame>> {
        self.calls += 1;
        Ok(self
            .steps
            .pop_front()
            .flatten()
            .map(|(pose, x, y)| pose.at(x, y, timestamp_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame(timestamp_ms: u64) -> Frame {
        Frame {
            rgba: Vec::new(),
            width: 640,
            height: 480,
            timestamp_ms,
        }
    }

    #[test]
    fn poses_share_the_fingertip() {
        for pose in [HandPose::Open, HandPose::Pinch, HandPose::Fist] {
            let hand = pose.at(0.3, 0.6, 7);
            assert_eq!(hand.pointer(), &Landmark::new(0.3, 0.6, 0.0));
            assert_eq!(hand.timestamp_ms, 7);
        }
    }

    #[test]
    fn scripted_source_replays_then_reports_no_hand() {
        let mut source = ScriptedSource::new([Some((HandPose::Open, 0.5, 0.5)), None]);
        assert!(source.detect(&blank_frame(1), 1).unwrap().is_some());
        assert!(source.detect(&blank_frame(2), 2).unwrap().is_none());
        assert!(source.detect(&blank_frame(3), 3).unwrap().is_none());
        assert_eq!(source.calls(), 3);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn sweep_includes_both_ends() {
        let steps = ScriptedSource::sweep(HandPose::Open, (0.5, 0.5), (0.1, 0.5), 4);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], Some((HandPose::Open, 0.5, 0.5)));
        assert_eq!(steps[4], Some((HandPose::Open, 0.1, 0.5)));
    }

    #[test]
    fn sweep_lands_on_target_for_any_length() {
        for frames in [1, 3, 7, 8, 30] {
            let steps = ScriptedSource::sweep(HandPose::Fist, (0.15, 0.2), (0.3, 0.3), frames);
            assert_eq!(steps.last(), Some(&Some((HandPose::Fist, 0.3, 0.3))));
        }
    }
}
