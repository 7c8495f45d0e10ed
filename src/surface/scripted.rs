//! In-memory surface implementation with recorded effects.
//!
//! [`ScriptedSurface`] hosts a scripted set of elements and records every click
//! and focus effect the engine performs against it. It is the concrete
//! [`Surface`](crate::surface::Surface) implementation shipped with the crate:
//! tests drive full activation cycles through it, and embedders can use it to
//! prototype against the engine without a real element tree.
//!
//! Elements keep their insertion order within each category, which stands in
//! for surface-native document order. Targets can be detached mid-session to
//! model elements disappearing between labeling and resolution.

use std::cell::Cell;
use std::collections::HashSet;

use kurbo::Rect;

use crate::domain::error::{HintsError, Result};
use crate::domain::{TargetId, TargetKind};
use crate::surface::{Category, ElementStyle, Surface, SurfaceElement};

/// Vertical pitch between auto-placed scripted elements.
const ROW_HEIGHT: f64 = 30.0;

/// A click or focus effect performed against the scripted surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedEffect {
    /// Plain default activation was performed on the target.
    Click(TargetId),
    /// Input focus was given to the target.
    Focus(TargetId),
}

/// Scripted in-memory surface.
///
/// Elements are laid out one per row inside the viewport by default; use
/// [`push_element`](Self::push_element) for full control over geometry and
/// style when exercising the visibility predicate.
#[derive(Debug)]
pub struct ScriptedSurface {
    viewport: Rect,
    elements: Vec<(Category, SurfaceElement)>,
    detached: HashSet<TargetId>,
    effects: Vec<RecordedEffect>,
    queries: Cell<usize>,
    next_id: u64,
}

impl ScriptedSurface {
    /// Creates an empty surface with the given viewport.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
            detached: HashSet::new(),
            effects: Vec::new(),
            queries: Cell::new(0),
            next_id: 1,
        }
    }

    /// Adds a link element with an optional destination. Returns its target id.
    pub fn push_link(&mut self, text: &str, href: Option<&str>) -> TargetId {
        let bounds = self.next_row();
        self.push_element(
            Category::Links,
            TargetKind::Link,
            text,
            href.map(str::to_string),
            bounds,
            ElementStyle::default(),
        )
    }

    /// Adds a button element. Returns its target id.
    pub fn push_button(&mut self, text: &str) -> TargetId {
        let bounds = self.next_row();
        self.push_element(Category::Buttons, TargetKind::Button, text, None, bounds, ElementStyle::default())
    }

    /// Adds a text-entry element. Returns its target id.
    pub fn push_text_entry(&mut self, text: &str) -> TargetId {
        let bounds = self.next_row();
        self.push_element(
            Category::TextEntry,
            TargetKind::TextEntry,
            text,
            None,
            bounds,
            ElementStyle::default(),
        )
    }

    /// Adds a selection control. Returns its target id.
    pub fn push_selection(&mut self, text: &str) -> TargetId {
        let bounds = self.next_row();
        self.push_element(
            Category::Selection,
            TargetKind::Selection,
            text,
            None,
            bounds,
            ElementStyle::default(),
        )
    }

    /// Adds an element under an explicit category with explicit geometry and
    /// style. Returns its target id.
    pub fn push_element(
        &mut self,
        category: Category,
        kind: TargetKind,
        text: &str,
        href: Option<String>,
        bounds: Rect,
        style: ElementStyle,
    ) -> TargetId {
        let target = TargetId(self.next_id);
        self.next_id += 1;
        self.elements.push((
            category,
            SurfaceElement {
                target,
                kind,
                text: text.to_string(),
                href,
                bounds,
                style,
            },
        ));
        target
    }

    /// Registers an element under a second category, modeling an element that
    /// matches more than one selector set.
    pub fn alias_into(&mut self, target: TargetId, category: Category) {
        if let Some((_, element)) = self.elements.iter().find(|(_, e)| e.target == target) {
            let element = element.clone();
            self.elements.push((category, element));
        }
    }

    /// Detaches a target: it disappears from queries and effects on it fail.
    pub fn detach(&mut self, target: TargetId) {
        self.detached.insert(target);
    }

    /// All effects performed so far, in order.
    #[must_use]
    pub fn effects(&self) -> &[RecordedEffect] {
        &self.effects
    }

    /// Number of category queries served so far. Lets tests assert that a
    /// cached enumeration was used without touching the surface.
    #[must_use]
    pub fn queries_served(&self) -> usize {
        self.queries.get()
    }

    fn next_row(&self) -> Rect {
        let row = self.elements.len() as f64;
        Rect::new(10.0, 10.0 + row * ROW_HEIGHT, 210.0, 10.0 + row * ROW_HEIGHT + 20.0)
    }

    fn live(&self, target: TargetId) -> Result<()> {
        if self.detached.contains(&target) || !self.elements.iter().any(|(_, e)| e.target == target) {
            return Err(HintsError::Surface(format!("target {} is not attached", target.0)));
        }
        Ok(())
    }
}

impl Surface for ScriptedSurface {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn elements(&self, category: Category) -> Vec<SurfaceElement> {
        self.queries.set(self.queries.get() + 1);
        self.elements
            .iter()
            .filter(|(c, e)| *c == category && !self.detached.contains(&e.target))
            .map(|(_, e)| e.clone())
            .collect()
    }

    fn click(&mut self, target: TargetId) -> Result<()> {
        self.live(target)?;
        self.effects.push(RecordedEffect::Click(target));
        Ok(())
    }

    fn focus(&mut self, target: TargetId) -> Result<()> {
        self.live(target)?;
        self.effects.push(RecordedEffect::Focus(target));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_effects_in_order() {
        let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let link = surface.push_link("home", Some("https://example.com"));
        let field = surface.push_text_entry("search");

        surface.click(link).unwrap();
        surface.focus(field).unwrap();

        assert_eq!(
            surface.effects(),
            &[RecordedEffect::Click(link), RecordedEffect::Focus(field)]
        );
    }

    #[test]
    fn detached_target_fails_effects_and_leaves_queries() {
        let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let link = surface.push_link("home", None);
        surface.detach(link);

        assert!(surface.click(link).is_err());
        assert!(surface.elements(Category::Links).is_empty());
    }
}
