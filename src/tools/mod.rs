//! Interaction tools for labels on the canvas.
//!
//! Both tools return [`crate::Command`]s instead of mutating the store, and
//! each refuses to start while the other is active on the same label.

mod drag_tool;
pub use drag_tool::{DragSession, DragState, DragTool};

mod edit_tool;
pub use edit_tool::{initial_selection, EditKey, EditResponse, EditState, EditTool, KeyOutcome};
