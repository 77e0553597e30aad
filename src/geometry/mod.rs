pub mod hit_testing;
pub mod layout;

pub use hit_testing::topmost_label_at;
pub use layout::{clamp_to_viewport, fit_display_size};
