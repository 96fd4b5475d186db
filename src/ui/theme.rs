// ReportBar - ui/theme.rs
//
// Colour scheme, status-code colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Colour for an HTTP status code class.
pub fn status_colour(status: u16, dark_mode: bool) -> Color32 {
    match (status / 100, dark_mode) {
        (2, true) => Color32::from_rgb(74, 222, 128),   // Green 400
        (2, false) => Color32::from_rgb(21, 128, 61),   // Green 700
        (3, true) => Color32::from_rgb(96, 165, 250),   // Blue 400
        (3, false) => Color32::from_rgb(29, 78, 216),   // Blue 700
        (4, true) => Color32::from_rgb(251, 191, 36),   // Amber 400
        (4, false) => Color32::from_rgb(180, 83, 9),    // Amber 700
        (5, true) => Color32::from_rgb(248, 113, 113),  // Red 400
        (5, false) => Color32::from_rgb(185, 28, 28),   // Red 700
        (_, true) => Color32::from_rgb(156, 163, 175),  // Gray 400
        (_, false) => Color32::from_rgb(75, 85, 99),    // Gray 600
    }
}

/// Foreground colour for table rows.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Background of a filter chip.
pub fn chip_fill(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(229, 231, 235) // Gray 200
    }
}

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Warning badge colour.
pub const WARNING_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Layout constants.
pub const DETAIL_PANE_HEIGHT: f32 = 180.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const DATE_FIELD_WIDTH: f32 = 190.0;
pub const ADD_FILTER_WIDTH: f32 = 280.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes_differ() {
        assert_ne!(status_colour(200, true), status_colour(500, true));
        assert_eq!(status_colour(201, false), status_colour(204, false));
        assert_eq!(status_colour(99, true), status_colour(600, true));
    }
}
