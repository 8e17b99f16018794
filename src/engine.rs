//! One frame of gesture interaction.
//!
//! The engine is the single owner of all per-gesture state. The frame scheduler holds it and
//! lends the UI registries in for the duration of a frame, so every component reads the same
//! values and nothing keeps a stale copy between frames.

use crate::{
    click::{Activator, ClickDispatcher},
    config::TrackingConfig,
    cursor::CursorFilter,
    drag::{DragCoordinator, DragEvent, DragInput, LayoutMode},
    gesture::{GestureClassifier, GestureState},
    snap::{SnapEngine, SnapState, SnapTransition},
    surface::{ElementId, ElementRegistry, PanelId, PanelPositionTable, PanelRegistry},
    types::{LandmarkFrame, Point},
};

/// What the renderer needs to draw the hand cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorOverlay {
    /// Effective position: the snap anchor while snapped.
    pub position: Point,
    pub pinch: bool,
    pub hand_present: bool,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    CursorMoved { position: Point, pinch: bool },
    Armed(ElementId),
    Disarmed(ElementId),
    Activated(ElementId),
    DragStarted(PanelId),
    PanelMoved { panel: PanelId, position: Point },
    DragEnded(PanelId),
}

/// UI-owned state lent to the engine for one frame.
pub struct UiContext<'a> {
    pub elements: &'a ElementRegistry,
    pub panels: &'a PanelRegistry,
    pub positions: &'a mut PanelPositionTable,
    pub layout: LayoutMode,
    pub activator: &'a mut dyn Activator,
}

pub struct InteractionEngine {
    cursor: CursorFilter,
    gesture: GestureClassifier,
    snap: SnapEngine,
    click: ClickDispatcher,
    drag: DragCoordinator,
    overlay: CursorOverlay,
}

impl InteractionEngine {
    pub fn new(config: &TrackingConfig) -> Self {
        let cursor = CursorFilter::new(
            config.screen_width,
            config.screen_height,
            config.smoothing,
            config.mirror_x,
        );
        let overlay = CursorOverlay {
            position: cursor.position(),
            ..CursorOverlay::default()
        };
        Self {
            cursor,
            gesture: GestureClassifier::new(config.pinch_threshold),
            snap: SnapEngine::new(config.snap_in_px, config.snap_out_px),
            click: ClickDispatcher::new(),
            drag: DragCoordinator::new(),
            overlay,
        }
    }

    /// Runs classifier and cursor, then snapping, then click and drag, then latches the
    /// pinch edge. A frame without a hand changes nothing.
    pub fn process(
        &mut self,
        hand: Option<&LandmarkFrame>,
        sensitivity: f32,
        ui: &mut UiContext<'_>,
    ) -> Vec<InteractionEvent> {
        let mut events = Vec::new();
        self.overlay.visible = true;
        self.overlay.hand_present = hand.is_some();

        let Some(hand) = hand else {
            return events;
        };

        let gesture = self.gesture.classify(Some(hand));
        let pointer = hand.pointer();
        let cursor = self.cursor.filter(Some((pointer.x, pointer.y)), sensitivity);

        let snap = self.snap.update(cursor, ui.elements);
        match snap.transition {
            Some(SnapTransition::Armed(id)) => events.push(InteractionEvent::Armed(id)),
            Some(SnapTransition::Disarmed { target, .. }) => {
                events.push(InteractionEvent::Disarmed(target))
            }
            None => {}
        }
        let effective = snap.effective;

        if let Some(id) = self
            .click
            .dispatch(&gesture, effective, ui.elements, &mut *ui.activator)
        {
            events.push(InteractionEvent::Activated(id));
        }

        let drag_input = DragInput {
            fist: gesture.fist,
            effective,
            cursor,
            layout: ui.layout,
        };
        match self.drag.update(drag_input, ui.panels, ui.positions) {
            Some(DragEvent::Started(panel)) => events.push(InteractionEvent::DragStarted(panel)),
            Some(DragEvent::Moved { panel, position }) => {
                events.push(InteractionEvent::PanelMoved { panel, position })
            }
            Some(DragEvent::Ended(panel)) => events.push(InteractionEvent::DragEnded(panel)),
            None => {}
        }

        self.gesture.end_frame();

        if effective != self.overlay.position || gesture.pinch != self.overlay.pinch {
            events.insert(
                0,
                InteractionEvent::CursorMoved {
                    position: effective,
                    pinch: gesture.pinch,
                },
            );
        }
        self.overlay.position = effective;
        self.overlay.pinch = gesture.pinch;

        events
    }

    /// Returns every piece of gesture state to neutral. Emits the events needed to clear
    /// emphasis and end a drag that was in progress.
    pub fn reset(&mut self) -> Vec<InteractionEvent> {
        let mut events = Vec::new();
        if let Some(target) = self.snap.reset() {
            events.push(InteractionEvent::Disarmed(target));
        }
        if let Some(panel) = self.drag.reset() {
            events.push(InteractionEvent::DragEnded(panel));
        }
        self.cursor.reset();
        self.gesture.reset();
        self.overlay = CursorOverlay {
            position: self.cursor.position(),
            ..CursorOverlay::default()
        };
        events
    }

    pub fn overlay(&self) -> CursorOverlay {
        self.overlay
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    pub fn snap_state(&self) -> &SnapState {
        self.snap.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.session().is_active()
    }

    pub fn cursor(&self) -> &CursorFilter {
        &self.cursor
    }
}
