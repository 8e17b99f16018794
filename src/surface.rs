//! Spatial view of the UI that the engine reads each frame.
//!
//! The UI layer owns and refreshes these registries; the engine never queries the
//! renderer directly.

use std::collections::HashMap;

use crate::types::{Point, Rect};

pub type ElementId = String;
pub type PanelId = String;

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub bounds: Rect,
    pub parent: Option<ElementId>,
    /// Actionable control: a snap target and a click receiver.
    pub interactive: bool,
}

impl Element {
    pub fn control(id: impl Into<ElementId>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            parent: None,
            interactive: true,
        }
    }

    pub fn container(id: impl Into<ElementId>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            parent: None,
            interactive: false,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Mounted elements in paint order: later entries are drawn on top.
#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    elements: Vec<Element>,
}

impl ElementRegistry {
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// Mounts an element, replacing any previous one with the same id.
    pub fn mount(&mut self, element: Element) {
        self.unmount(&element.id);
        self.elements.push(element);
    }

    pub fn unmount(&mut self, id: &str) -> Option<Element> {
        let idx = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Snap candidates in scan order.
    pub fn interactive(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.interactive)
    }

    /// Topmost element whose bounds contain `point`.
    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.bounds.contains(point))
    }

    /// Nearest interactive ancestor-or-self of `id`, falling back to `id` itself.
    pub fn actionable_for(&self, id: &str) -> Option<&Element> {
        let hit = self.get(id)?;
        let mut current = Some(hit);
        // Bounded walk so a malformed parent cycle cannot hang the frame.
        for _ in 0..=self.elements.len() {
            let Some(element) = current else {
                break;
            };
            if element.interactive {
                return Some(element);
            }
            current = element.parent.as_deref().and_then(|parent| self.get(parent));
        }
        Some(hit)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A draggable floating panel. Its bounds follow its entry in the position table.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub id: PanelId,
    pub width: f32,
    pub height: f32,
}

/// Fixed, ordered set of draggable panels.
#[derive(Clone, Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<PanelSpec>,
}

impl PanelRegistry {
    pub fn new(panels: impl IntoIterator<Item = PanelSpec>) -> Self {
        Self {
            panels: panels.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelSpec> {
        self.panels.iter()
    }

    /// First panel, in registry order, whose current bounds contain `point`.
    pub fn panel_at(&self, point: Point, positions: &PanelPositionTable) -> Option<&PanelSpec> {
        self.panels.iter().find(|panel| {
            positions
                .bounds(panel)
                .is_some_and(|bounds| bounds.contains(point))
        })
    }
}

/// Screen positions (top-left) of the floating panels.
///
/// Renderers read it freely; during a drag only the drag coordinator writes to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelPositionTable {
    positions: HashMap<PanelId, Point>,
}

impl PanelPositionTable {
    pub fn new(entries: impl IntoIterator<Item = (PanelId, Point)>) -> Self {
        Self {
            positions: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PanelId, &Point)> {
        self.positions.iter()
    }

    /// Layout placement by the UI layer (initial layout, reset to defaults).
    pub fn place(&mut self, id: impl Into<PanelId>, position: Point) {
        self.positions.insert(id.into(), position);
    }

    pub fn bounds(&self, panel: &PanelSpec) -> Option<Rect> {
        self.get(&panel.id)
            .map(|origin| Rect::new(origin.x, origin.y, panel.width, panel.height))
    }

    /// Relative move; the only mutation the gesture engine performs.
    pub(crate) fn translate(&mut self, id: &str, delta: Point) -> Option<Point> {
        let entry = self.positions.get_mut(id)?;
        *entry = *entry + delta;
        Some(*entry)
    }
}
