use crate::error::StoreError;
use crate::label::{Label, LabelId, LabelPatch};
use crate::store::LabelStore;

/// Mutations requested by the UI. Panels and tools return these instead of
/// touching the store, and the app executes them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddLabel(Label),
    UpdateLabel { id: LabelId, patch: LabelPatch },
    RemoveLabel(LabelId),
    Select(Option<LabelId>),
}

impl Command {
    pub fn update(id: LabelId, patch: LabelPatch) -> Self {
        Self::UpdateLabel { id, patch }
    }

    pub fn execute(&self, store: &mut LabelStore) -> Result<(), StoreError> {
        match self {
            Command::AddLabel(label) => store.add(label.clone()),
            Command::UpdateLabel { id, patch } => store.update(*id, patch),
            Command::RemoveLabel(id) => {
                if store.remove(*id).is_none() {
                    log::warn!("remove of unknown label {}", id);
                }
                Ok(())
            }
            Command::Select(id) => {
                store.select(*id);
                Ok(())
            }
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddLabel(_) => "AddLabel",
            Command::UpdateLabel { .. } => "UpdateLabel",
            Command::RemoveLabel(_) => "RemoveLabel",
            Command::Select(_) => "Select",
        }
    }
}

/// Execute every command against the store, logging and skipping failures
pub fn execute_all(commands: impl IntoIterator<Item = Command>, store: &mut LabelStore) {
    for command in commands {
        if let Err(err) = command.execute(store) {
            log::warn!("{} ignored: {}", command.name(), err);
        }
    }
}
