use egui::{Color32, Vec2};

use crate::models::Quality;

// Quality accents
pub const QUALITY_DEFAULT: Color32 = Color32::from_rgb(0xba, 0xff, 0xc9); // mint
pub const QUALITY_HIGH: Color32 = Color32::from_rgb(0xff, 0xdf, 0xba); // peach
pub const QUALITY_ULTRA: Color32 = Color32::from_rgb(0xff, 0xb3, 0xba); // rose

// Surfaces
pub const FRAME_BG: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const BORDER_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255);

// Text
pub const BUTTON_MAIN_TEXT: Color32 = Color32::WHITE;
pub const TITLE_TEXT: Color32 = Color32::WHITE;
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(138, 138, 143);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(255, 99, 99);
pub const TEXT_SUCCESS: Color32 = Color32::from_rgb(120, 220, 120);

// Sizing
pub const ROUNDING_FRAME: f32 = 4.0;
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: Vec2 = Vec2::new(120.0, 36.0);
pub const BUTTON_FONT_SIZE: f32 = 15.0;

pub fn quality_color(quality: Quality) -> Color32 {
    match quality {
        Quality::Default => QUALITY_DEFAULT,
        Quality::High => QUALITY_HIGH,
        Quality::Ultra => QUALITY_ULTRA,
    }
}
