use egui::{vec2, ColorImage, Pos2};
use image_labeler::config::EditorConfig;
use image_labeler::file_handler::LoadedImage;
use image_labeler::label::initial_position;
use image_labeler::{LabelId, LabelStore, Viewport};

fn loaded(width: usize, height: usize) -> LoadedImage {
    LoadedImage {
        name: "test.png".to_owned(),
        pixels: ColorImage::new([width, height], egui::Color32::GRAY),
    }
}

#[test]
fn large_image_fits_seventy_percent_of_the_window() {
    let ctx = egui::Context::default();
    let viewport = Viewport::new(&ctx, loaded(2000, 1000), vec2(1000.0, 800.0), 0.7);

    assert_eq!(viewport.display_size(), vec2(700.0, 350.0));
    assert_eq!(viewport.image_size(), [2000, 1000]);
    assert_eq!(viewport.rect(), None);
}

#[test]
fn small_image_keeps_its_size() {
    let ctx = egui::Context::default();
    let viewport = Viewport::new(&ctx, loaded(320, 200), vec2(1000.0, 800.0), 0.7);
    assert_eq!(viewport.display_size(), vec2(320.0, 200.0));
}

#[test]
fn new_label_is_centered_on_the_viewport() {
    let config = EditorConfig::default();
    let mut store = LabelStore::new();

    let label = config.new_label(LabelId::new(), initial_position(Some(vec2(400.0, 300.0))));
    let id = label.id();
    store.add(label).unwrap();

    let added = store.get(id).unwrap();
    assert_eq!(added.position, Pos2::new(150.0, 125.0));
    assert_eq!(added.text, "New Text");
    assert_eq!(added.font_size, 24);
    assert_eq!(store.selected_id(), Some(id));
}

#[test]
fn unknown_viewport_size_uses_the_fallback() {
    assert_eq!(initial_position(None), Pos2::new(100.0, 75.0));
    assert_eq!(initial_position(Some(vec2(0.0, 0.0))), Pos2::new(100.0, 75.0));
}
