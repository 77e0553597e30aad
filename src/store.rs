//! The label entity store: the single source of truth for labels and selection.
//!
//! All mutations go through [`LabelStore`], which keeps the collection in
//! insertion order, guarantees id uniqueness, and broadcasts a [`StoreEvent`]
//! after every change so the UI has exactly one observation point.

use crate::error::StoreError;
use crate::event::{EventBus, EventHandler, StoreEvent};
use crate::label::{Label, LabelId, LabelPatch};

#[derive(Debug, Default)]
pub struct LabelStore {
    labels: Vec<Label>,
    selected: Option<LabelId>,
    event_bus: EventBus,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer that is notified after every mutation
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Append a label and make it the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a label with the same id exists.
    pub fn add(&mut self, label: Label) -> Result<(), StoreError> {
        let id = label.id();
        if self.contains(id) {
            return Err(StoreError::DuplicateId(id));
        }
        self.labels.push(label);
        self.selected = Some(id);

        self.event_bus.emit(StoreEvent::Added(id));
        self.event_bus.emit(StoreEvent::SelectionChanged(Some(id)));
        Ok(())
    }

    /// Merge `patch` into the label with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such label exists; nothing changes.
    pub fn update(&mut self, id: LabelId, patch: &LabelPatch) -> Result<(), StoreError> {
        let label = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        label.apply(patch);
        self.event_bus.emit(StoreEvent::Updated(id));
        Ok(())
    }

    /// Delete the label with the given id.
    ///
    /// Selection is cleared unconditionally, even when another label was
    /// selected or `id` was not found.
    pub fn remove(&mut self, id: LabelId) -> Option<Label> {
        let removed = self
            .labels
            .iter()
            .position(|label| label.id() == id)
            .map(|index| self.labels.remove(index));

        if removed.is_some() {
            self.event_bus.emit(StoreEvent::Removed(id));
        }
        self.set_selection(None);
        removed
    }

    /// Set the selection; `None` deselects
    pub fn select(&mut self, id: Option<LabelId>) {
        self.set_selection(id);
    }

    /// Discard every label and the selection
    pub fn clear(&mut self) {
        self.labels.clear();
        self.selected = None;
        self.event_bus.emit(StoreEvent::Cleared);
    }

    fn set_selection(&mut self, id: Option<LabelId>) {
        if self.selected != id {
            self.selected = id;
            self.event_bus.emit(StoreEvent::SelectionChanged(id));
        }
    }

    /// Labels in insertion (render) order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, id: LabelId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|label| label.id() == id)
    }

    fn get_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|label| label.id() == id)
    }

    /// The selected id, resolved against the collection
    pub fn selected_id(&self) -> Option<LabelId> {
        self.selected().map(Label::id)
    }

    /// The selected label, or `None` if nothing is selected or the id is stale
    pub fn selected(&self) -> Option<&Label> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: LabelId) -> bool {
        self.selected_id() == Some(id)
    }
}
