//! Theme constants for the tic-tac-toe GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(44, 47, 53);
pub const GRID_LINE: Color32 = Color32::from_rgb(150, 155, 165);

// Marks
pub const X_MARK: Color32 = Color32::from_rgb(90, 170, 255);
pub const O_MARK: Color32 = Color32::from_rgb(255, 150, 80);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 18)
}

pub fn suggestion_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 200, 120, 40)
}

/// Translucent version of a mark color for previews
pub fn ghost(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 90)
}

pub fn mark_color(stone: crate::Stone) -> Color32 {
    match stone {
        crate::Stone::O => O_MARK,
        _ => X_MARK,
    }
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(32, 34, 37);
pub const PANEL_HEADER: Color32 = Color32::from_rgb(42, 44, 48);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const MARK_RATIO: f32 = 0.30;
pub const MARK_WIDTH: f32 = 8.0;
pub const GRID_LINE_WIDTH: f32 = 4.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
