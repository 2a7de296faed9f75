use iced::Color;
use newsdesk_core::{Rgb, Severity};

pub const WINDOW_WIDTH: f32 = 1180.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const SIDEBAR_WIDTH: f32 = 220.0;

pub const PAGE_PADDING: u16 = 24;
pub const SECTION_SPACING: u16 = 20;
pub const ITEM_SPACING: u16 = 8;

pub const TITLE_SIZE: u16 = 26;
pub const HEADING_SIZE: u16 = 18;
pub const BODY_SIZE: u16 = 14;
pub const CAPTION_SIZE: u16 = 12;

pub const CHART_LABEL_WIDTH: f32 = 180.0;
pub const CHART_BAR_HEIGHT: f32 = 18.0;
pub const PREVIEW_CELL_WIDTH: f32 = 180.0;
pub const DIALOG_WIDTH: f32 = 560.0;
pub const PREVIEW_DIALOG_WIDTH: f32 = 960.0;

pub const PRIMARY: Color = Color::from_rgb(0.098, 0.463, 0.824);
pub const SIDEBAR_BACKGROUND: Color = Color::from_rgb(0.133, 0.165, 0.212);
pub const SIDEBAR_TEXT: Color = Color::from_rgb(0.88, 0.90, 0.93);
pub const SURFACE: Color = Color::from_rgb(0.97, 0.975, 0.98);
pub const BORDER: Color = Color::from_rgb(0.86, 0.87, 0.89);
pub const SELECTED_ROW: Color = Color::from_rgb(0.89, 0.94, 0.99);
pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.47, 0.50);
pub const CHART_TRACK: Color = Color::from_rgb(0.92, 0.93, 0.94);
pub const BACKDROP: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.55,
};

pub const SUCCESS: Color = Color::from_rgb(0.298, 0.686, 0.314);
pub const ERROR: Color = Color::from_rgb(0.957, 0.263, 0.212);

pub fn color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.0, rgb.1, rgb.2)
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => PRIMARY,
        Severity::Success => SUCCESS,
        Severity::Error => ERROR,
    }
}
