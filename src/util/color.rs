use egui::Color32;

/// Parse `#rrggbb` (the leading `#` is optional)
pub fn parse_hex(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format as `#rrggbb`, ignoring alpha
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Parse an optional background: the empty string means transparent
pub fn parse_background(text: &str) -> Option<Option<Color32>> {
    if text.trim().is_empty() {
        Some(None)
    } else {
        parse_hex(text).map(Some)
    }
}
