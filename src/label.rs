use std::fmt;
use std::ops::RangeInclusive;

use egui::{Color32, Pos2, Vec2};
use uuid::Uuid;

/// Allowed font sizes, in pixels
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=72;

/// Size assumed for a label that has not been laid out yet
pub const ASSUMED_LABEL_SIZE: Vec2 = Vec2::new(100.0, 50.0);

/// Viewport size assumed when no viewport has been laid out yet
pub const FALLBACK_VIEWPORT_SIZE: Vec2 = Vec2::new(300.0, 200.0);

/// Opaque identifier of a label, stable for the label's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(Uuid);

impl LabelId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LabelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Bold,
            Self::Bold => Self::Normal,
        }
    }

    pub fn is_bold(self) -> bool {
        self == Self::Bold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Italic,
            Self::Italic => Self::Normal,
        }
    }

    pub fn is_italic(self) -> bool {
        self == Self::Italic
    }
}

/// A positioned, styled text overlay on the image
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    id: LabelId,
    pub text: String,
    /// Top-left corner relative to the viewport
    pub position: Pos2,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color32,
    /// `None` renders without a background
    pub background: Option<Color32>,
}

impl Label {
    pub fn new(id: LabelId, text: impl Into<String>, position: Pos2) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            font_size: 24,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            color: Color32::BLACK,
            background: None,
        }
    }

    pub fn id(&self) -> LabelId {
        self.id
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = clamp_font_size(font_size);
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: Option<Color32>) -> Self {
        self.background = background;
        self
    }

    /// Merge the set fields of `patch` into this label
    pub fn apply(&mut self, patch: &LabelPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = clamp_font_size(font_size);
        }
        if let Some(weight) = patch.font_weight {
            self.font_weight = weight;
        }
        if let Some(style) = patch.font_style {
            self.font_style = style;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(background) = patch.background {
            self.background = background;
        }
    }
}

/// Partial update for a [`Label`]. The id is deliberately not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelPatch {
    pub text: Option<String>,
    pub position: Option<Pos2>,
    pub font_size: Option<u32>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub color: Option<Color32>,
    pub background: Option<Option<Color32>>,
}

impl LabelPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn font_size(font_size: u32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn font_weight(weight: FontWeight) -> Self {
        Self {
            font_weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn font_style(style: FontStyle) -> Self {
        Self {
            font_style: Some(style),
            ..Default::default()
        }
    }

    pub fn color(color: Color32) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn background(background: Option<Color32>) -> Self {
        Self {
            background: Some(background),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end())
}

/// Top-left corner of a freshly added label: centered for the assumed label size
pub fn initial_position(viewport: Option<Vec2>) -> Pos2 {
    let viewport = viewport
        .filter(|size| size.x > 0.0 && size.y > 0.0)
        .unwrap_or(FALLBACK_VIEWPORT_SIZE);
    Pos2::new(
        viewport.x / 2.0 - ASSUMED_LABEL_SIZE.x / 2.0,
        viewport.y / 2.0 - ASSUMED_LABEL_SIZE.y / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_set_fields() {
        let mut label = Label::new(LabelId::new(), "hello", Pos2::new(1.0, 2.0));
        let before = label.clone();
        label.apply(&LabelPatch::color(Color32::RED));

        assert_eq!(label.color, Color32::RED);
        assert_eq!(label.text, before.text);
        assert_eq!(label.position, before.position);
        assert_eq!(label.id(), before.id());
    }

    #[test]
    fn font_size_is_clamped() {
        let mut label = Label::new(LabelId::new(), "a", Pos2::ZERO);
        label.apply(&LabelPatch::font_size(200));
        assert_eq!(label.font_size, 72);
        label.apply(&LabelPatch::font_size(1));
        assert_eq!(label.font_size, 10);
    }

    #[test]
    fn missing_viewport_uses_fallback() {
        assert_eq!(initial_position(None), Pos2::new(100.0, 75.0));
        assert_eq!(initial_position(Some(Vec2::ZERO)), Pos2::new(100.0, 75.0));
    }
}
