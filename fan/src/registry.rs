//! The set of page elements the simulated cursor can hover and activate.
//!
//! Elements are identified by their DOM `id`. Elements discovered without one
//! are given `auto-id-<n>` from a counter owned by the registry, so IDs stay
//! unique across re-scans and mutation notifications. Registration order is
//! preserved; when several elements overlap the hotspot, the earliest
//! registered one consumes a pending activation.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix for generated element IDs.
pub const AUTO_ID_PREFIX: &str = "auto-id-";

/// Stable identifier of a page element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// How a synthetic activation must be delivered to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activation {
    /// The element's native `click()` does the job.
    #[default]
    Standard,
    /// A graphical element whose handler lives in an `onclick` attribute; it
    /// needs a dispatched, bubbling click event.
    AttributeDriven,
}

/// A tracked element and its presentation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveElement {
    pub id: ElementId,
    pub activation: Activation,
    /// Hotspot currently overlaps the element.
    pub hovered: bool,
    /// Element was activated recently.
    pub activated: bool,
}

impl InteractiveElement {
    #[must_use]
    pub fn new(id: ElementId, activation: Activation) -> Self {
        Self { id, activation, hovered: false, activated: false }
    }
}

/// A presentation flag flip the host must mirror onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Hovered,
    Activated,
}

/// Ordered, de-duplicated collection of interactive elements.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: Vec<InteractiveElement>,
    next_auto_id: usize,
}

impl ElementRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the ID to use for an element: its existing non-empty id, or a
    /// freshly generated `auto-id-<n>`. The bool is true when the ID was
    /// generated and must be written back to the element.
    pub fn resolve_id(&mut self, existing: Option<&str>) -> (ElementId, bool) {
        if let Some(id) = existing.map(str::trim).filter(|id| !id.is_empty()) {
            return (ElementId::from(id), false);
        }
        loop {
            let candidate = ElementId(format!("{AUTO_ID_PREFIX}{}", self.next_auto_id));
            self.next_auto_id += 1;
            if !self.contains(&candidate) {
                return (candidate, true);
            }
        }
    }

    /// Start tracking an element. Returns false if it was already tracked.
    pub fn register(&mut self, id: ElementId, activation: Activation) -> bool {
        if self.contains(&id) {
            return false;
        }
        log::debug!("tracking element `{id}` ({activation:?})");
        self.elements.push(InteractiveElement::new(id, activation));
        true
    }

    /// Stop tracking an element, returning it if it was tracked.
    pub fn unregister(&mut self, id: &ElementId) -> Option<InteractiveElement> {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        log::debug!("untracking element `{id}`");
        Some(self.elements.remove(index))
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.iter().any(|e| &e.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&InteractiveElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut InteractiveElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveElement> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InteractiveElement> {
        self.elements.iter_mut()
    }

    /// Clear both flags everywhere. Returns every flag that actually flipped.
    pub fn clear_presentation(&mut self) -> Vec<(ElementId, Flag)> {
        let mut cleared = Vec::new();
        for element in &mut self.elements {
            if element.hovered {
                element.hovered = false;
                cleared.push((element.id.clone(), Flag::Hovered));
            }
            if element.activated {
                element.activated = false;
                cleared.push((element.id.clone(), Flag::Activated));
            }
        }
        cleared
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
