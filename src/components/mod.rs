mod toggle_button;

pub use toggle_button::ToggleButton;
