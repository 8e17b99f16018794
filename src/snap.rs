//! Magnetic target acquisition with hysteresis.
//!
//! The cursor is captured by the nearest interactive element once it comes within the
//! snap-in radius of its centre, and released only after it leaves the larger snap-out
//! radius. While captured, the effective cursor is the element's centre.

use crate::{
    surface::{ElementId, ElementRegistry},
    types::Point,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SnapState {
    #[default]
    Unsnapped,
    Snapped { target: ElementId, anchor: Point },
}

impl SnapState {
    pub fn is_snapped(&self) -> bool {
        matches!(self, SnapState::Snapped { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            SnapState::Snapped { target, .. } => Some(target),
            SnapState::Unsnapped => None,
        }
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            SnapState::Snapped { anchor, .. } => Some(*anchor),
            SnapState::Unsnapped => None,
        }
    }
}

/// Emphasis change for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapTransition {
    Armed(ElementId),
    /// `unmounted` is set when the target left the registry or stopped being interactive.
    Disarmed { target: ElementId, unmounted: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapOutcome {
    /// Where the cursor is displayed and where clicks land.
    pub effective: Point,
    pub transition: Option<SnapTransition>,
}

#[derive(Debug)]
pub struct SnapEngine {
    snap_in: f32,
    snap_out: f32,
    state: SnapState,
}

impl SnapEngine {
    /// A snap-out radius below snap-in is raised to it, so a misordered pair can
    /// never release a capture on the frame it was made.
    pub fn new(snap_in: f32, snap_out: f32) -> Self {
        Self {
            snap_in,
            snap_out: snap_out.max(snap_in),
            state: SnapState::Unsnapped,
        }
    }

    pub fn update(&mut self, cursor: Point, elements: &ElementRegistry) -> SnapOutcome {
        let captured = self.state.target().map(str::to_string);
        match captured {
            None => match nearest_target(cursor, elements) {
                Some((id, anchor, distance)) if distance < self.snap_in => {
                    log::debug!("snap armed on {id} at {distance:.1}px");
                    self.state = SnapState::Snapped {
                        target: id.clone(),
                        anchor,
                    };
                    SnapOutcome {
                        effective: anchor,
                        transition: Some(SnapTransition::Armed(id)),
                    }
                }
                _ => SnapOutcome {
                    effective: cursor,
                    transition: None,
                },
            },
            Some(target) => {
                // A target remounted as non-interactive is no longer a snap target.
                let Some(element) = elements.get(&target).filter(|e| e.interactive) else {
                    log::debug!("snap target {target} no longer mounted as a control, releasing");
                    self.state = SnapState::Unsnapped;
                    return SnapOutcome {
                        effective: cursor,
                        transition: Some(SnapTransition::Disarmed {
                            target,
                            unmounted: true,
                        }),
                    };
                };

                // The target may have moved (e.g. inside a dragged panel).
                let anchor = element.bounds.center();
                let distance = cursor.distance(anchor);
                if distance > self.snap_out {
                    log::debug!("snap released from {target} at {distance:.1}px");
                    self.state = SnapState::Unsnapped;
                    SnapOutcome {
                        effective: cursor,
                        transition: Some(SnapTransition::Disarmed {
                            target,
                            unmounted: false,
                        }),
                    }
                } else {
                    self.state = SnapState::Snapped { target, anchor };
                    SnapOutcome {
                        effective: anchor,
                        transition: None,
                    }
                }
            }
        }
    }

    /// Effective cursor for `cursor` under the current state, without transitions.
    pub fn effective(&self, cursor: Point) -> Point {
        self.state.anchor().unwrap_or(cursor)
    }

    pub fn state(&self) -> &SnapState {
        &self.state
    }

    /// Drops any capture. Returns the released target so its emphasis can be cleared.
    pub fn reset(&mut self) -> Option<ElementId> {
        match std::mem::take(&mut self.state) {
            SnapState::Snapped { target, .. } => Some(target),
            SnapState::Unsnapped => None,
        }
    }
}

/// Closest interactive element centre. Strict comparison keeps the first candidate in scan
/// order on ties, so equidistant targets never alternate.
fn nearest_target(cursor: Point, elements: &ElementRegistry) -> Option<(ElementId, Point, f32)> {
    let mut best: Option<(&str, Point, f32)> = None;
    for element in elements.interactive() {
        let center = element.bounds.center();
        let distance = cursor.distance(center);
        if best.is_none_or(|(_, _, d)| distance < d) {
            best = Some((&element.id, center, distance));
        }
    }
    best.map(|(id, center, distance)| (id.to_string(), center, distance))
}
