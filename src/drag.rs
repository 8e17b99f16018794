use crate::{
    surface::{PanelId, PanelPositionTable, PanelRegistry},
    types::Point,
};

/// Whether floating panels can be rearranged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    Fixed,
    Modular,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging { panel: PanelId, last_cursor: Point },
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    pub fn panel(&self) -> Option<&str> {
        match self {
            DragSession::Dragging { panel, .. } => Some(panel),
            DragSession::Idle => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    Started(PanelId),
    Moved { panel: PanelId, position: Point },
    Ended(PanelId),
}

/// Inputs the drag coordinator needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct DragInput {
    pub fist: bool,
    /// Cursor after snapping, used to pick the grabbed panel.
    pub effective: Point,
    /// Smoothed cursor before snapping, used for deltas.
    pub cursor: Point,
    pub layout: LayoutMode,
}

/// Fist-driven panel dragging. Holds the single drag session of the whole UI.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    session: DragSession,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        input: DragInput,
        panels: &PanelRegistry,
        positions: &mut PanelPositionTable,
    ) -> Option<DragEvent> {
        let grabbing = input.fist && input.layout == LayoutMode::Modular;

        match &mut self.session {
            DragSession::Idle => {
                if !grabbing {
                    return None;
                }
                let panel = panels.panel_at(input.effective, positions)?;
                log::debug!("drag started on {}", panel.id);
                self.session = DragSession::Dragging {
                    panel: panel.id.clone(),
                    last_cursor: input.cursor,
                };
                Some(DragEvent::Started(panel.id.clone()))
            }
            DragSession::Dragging { panel, last_cursor } => {
                if !grabbing {
                    let panel = panel.clone();
                    log::debug!("drag ended on {panel}");
                    self.session = DragSession::Idle;
                    return Some(DragEvent::Ended(panel));
                }
                let delta = input.cursor - *last_cursor;
                *last_cursor = input.cursor;
                if delta == Point::default() {
                    return None;
                }
                let position = positions.translate(panel, delta)?;
                Some(DragEvent::Moved {
                    panel: panel.clone(),
                    position,
                })
            }
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Abandons any drag in progress, returning the released panel.
    pub fn reset(&mut self) -> Option<PanelId> {
        match std::mem::take(&mut self.session) {
            DragSession::Dragging { panel, .. } => Some(panel),
            DragSession::Idle => None,
        }
    }
}
