/// Everything the canvas edits, kept together so the transitions that touch
/// several parts at once go through one place.
///
/// - `replace_image`: a new upload becomes the viewport; all labels, the
///   selection, and any drag or edit in progress are discarded
/// - `prepare_export`: ends drag and edit so the next frame can be captured
///   without editor chrome
use egui::{Rect, Vec2};

use crate::event::EventHandler;
use crate::file_handler::LoadedImage;
use crate::store::LabelStore;
use crate::tools::{DragTool, EditTool};
use crate::viewport::Viewport;

#[derive(Debug, Default)]
pub struct EditorContext {
    pub store: LabelStore,
    pub viewport: Option<Viewport>,
    pub drag_tool: DragTool,
    pub edit_tool: EditTool,
}

impl EditorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.store.subscribe(handler);
    }

    pub fn has_image(&self) -> bool {
        self.viewport.is_some()
    }

    /// Show `image`, sized for a window of `available` points
    pub fn replace_image(&mut self, ctx: &egui::Context, image: LoadedImage, available: Vec2, fraction: f32) {
        self.viewport = Some(Viewport::new(ctx, image, available, fraction));
        self.store.clear();
        self.drag_tool.reset();
        self.edit_tool.reset();
    }

    /// Leave drag and edit mode; the text field is not shown while capturing,
    /// so it would never report losing focus
    pub fn prepare_export(&mut self) {
        self.drag_tool.reset();
        self.edit_tool.on_blur();
    }

    /// Screen region of the viewport as last laid out
    pub fn export_region(&self) -> Option<Rect> {
        self.viewport.as_ref().and_then(Viewport::rect)
    }

    /// Drop edit mode for a label that no longer exists
    pub fn sync_tools(&mut self) {
        let store = &self.store;
        self.edit_tool.retain(|id| store.contains(id));
    }
}
