mod central_panel;
mod style_panel;
mod toolbar;

pub use central_panel::{central_panel, CanvasOutput, CanvasState};
pub use style_panel::{style_panel, toggle_style, toggle_weight};
pub use toolbar::{toolbar_panel, ToolbarAction, ToolbarState};
