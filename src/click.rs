use crate::{
    gesture::GestureState,
    surface::{ElementId, ElementRegistry},
    types::Point,
};

/// Programmatic equivalent of a user click on a resolved element.
pub trait Activator {
    fn activate(&mut self, element: &str);
}

impl<F: FnMut(&str)> Activator for F {
    fn activate(&mut self, element: &str) {
        self(element)
    }
}

/// Fires one activation per pinch rising edge.
#[derive(Debug, Default)]
pub struct ClickDispatcher;

impl ClickDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolves and activates the control under `effective` if the pinch just started.
    /// Returns the activated element, if any.
    pub fn dispatch(
        &self,
        gesture: &GestureState,
        effective: Point,
        elements: &ElementRegistry,
        activator: &mut dyn Activator,
    ) -> Option<ElementId> {
        if !gesture.pinch_started() {
            return None;
        }

        let Some(hit) = elements.hit_test(effective) else {
            log::debug!("pinch at ({:.0}, {:.0}) hit nothing", effective.x, effective.y);
            return None;
        };
        let target = elements.actionable_for(&hit.id).unwrap_or(hit);
        log::debug!("pinch activates {} (hit {})", target.id, hit.id);
        activator.activate(&target.id);
        Some(target.id.clone())
    }
}
