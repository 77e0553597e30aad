use crate::label::LabelId;

/// Changes broadcast by the label store after every successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(LabelId),
    Updated(LabelId),
    Removed(LabelId),
    SelectionChanged(Option<LabelId>),
    /// The whole collection was discarded, e.g. because a new image was loaded
    Cleared,
}

impl StoreEvent {
    /// The label this event is about, if any
    pub fn label_id(&self) -> Option<LabelId> {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Removed(id) => Some(*id),
            Self::SelectionChanged(id) => *id,
            Self::Cleared => None,
        }
    }
}
