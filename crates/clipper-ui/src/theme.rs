// src/theme.rs
//
// Colours for the things the clipper actually draws: the video canvas, the
// labeling rows, time fields that do not parse, and the two status levels.
// Widget styling starts from egui's dark visuals and only adjusts what the
// labeling panel leans on (buttons, text fields, the class combo).

use clipper_core::state::StatusLevel;
use egui::{Color32, Context, FontId, Stroke, TextStyle};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 90, 170, 255);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 40, 100, 170);

pub const PANEL_BG:      Color32 = Color32::from_rgb( 22,  23,  27);
pub const FIELD_BG:      Color32 = Color32::from_rgb( 12,  12,  15);
pub const BUTTON_BG:     Color32 = Color32::from_rgb( 40,  42,  50);
pub const BANNER_BG:     Color32 = Color32::from_rgb( 30,  31,  37);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(220, 221, 228);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(122, 124, 138);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 58,  60,  72);

/// Alternating backgrounds for labeling rows.
const ROW_EVEN:          Color32 = Color32::from_rgb( 27,  28,  33);
const ROW_ODD:           Color32 = Color32::from_rgb( 33,  34,  40);

pub const OK_GREEN:      Color32 = Color32::from_rgb( 80, 190, 120);
pub const ERROR_RED:     Color32 = Color32::from_rgb(230,  85,  75);

/// Text colour of a time field that does not parse as HH:MM:SS.
pub const INVALID_TIME:  Color32 = ERROR_RED;

/// Monospace size used by time fields and the timestamp label.
pub const TIME_FONT_SIZE: f32 = 14.0;

/// Icon and colour for a status banner.
pub fn status_style(level: StatusLevel) -> (&'static str, Color32) {
    match level {
        StatusLevel::Info  => ("✓", OK_GREEN),
        StatusLevel::Error => ("✕", ERROR_RED),
    }
}

pub fn row_fill(index: usize) -> Color32 {
    if index % 2 == 0 { ROW_EVEN } else { ROW_ODD }
}

pub fn configure_style(ctx: &Context) {
    ctx.style_mut(|style| {
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(TIME_FONT_SIZE));
        style.spacing.item_spacing   = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(9.0, 4.0);
        style.spacing.combo_width    = 120.0;

        let v = &mut style.visuals;
        v.panel_fill          = PANEL_BG;
        v.extreme_bg_color    = FIELD_BG;
        v.selection.bg_fill   = ACCENT_DIM;
        v.selection.stroke    = Stroke::new(1.0, DARK_TEXT);
        v.override_text_color = Some(DARK_TEXT);

        v.widgets.inactive.weak_bg_fill = BUTTON_BG;
        v.widgets.inactive.bg_stroke    = Stroke::new(1.0, DARK_BORDER);
        v.widgets.hovered.bg_stroke     = Stroke::new(1.0, ACCENT);
        v.widgets.active.weak_bg_fill   = ACCENT_DIM;
    });
}
