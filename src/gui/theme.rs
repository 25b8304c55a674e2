//! Dark theme for the SQLite Explorer GUI

#![allow(dead_code)]

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2, Visuals};

/// Dark theme colors
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG_DARK: Color32 = Color32::from_rgb(15, 23, 42); // slate-900
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(30, 41, 59); // slate-800
    pub const BG_LIGHT: Color32 = Color32::from_rgb(51, 65, 85); // slate-700
    pub const BG_HOVER: Color32 = Color32::from_rgb(71, 85, 105); // slate-600

    // Accent colors
    pub const ACCENT: Color32 = Color32::from_rgb(56, 189, 248); // sky-400
    pub const ACCENT_MUTED: Color32 = Color32::from_rgb(12, 74, 110); // sky-900

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(248, 250, 252); // slate-50
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184); // slate-400
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139); // slate-500

    // Status colors
    pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128); // green-400
    pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113); // red-400

    // Border
    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85); // slate-700

    pub fn apply(ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = Self::BG_MEDIUM;
        visuals.window_stroke = Stroke::new(1.0, Self::BORDER);
        visuals.window_rounding = Rounding::same(6.0);
        visuals.panel_fill = Self::BG_DARK;

        visuals.widgets.noninteractive.bg_fill = Self::BG_MEDIUM;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.bg_fill = Self::BG_LIGHT;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.hovered.bg_fill = Self::BG_HOVER;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.active.bg_fill = Self::ACCENT_MUTED;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.open.bg_fill = Self::BG_HOVER;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.selection.bg_fill = Self::ACCENT_MUTED;
        visuals.selection.stroke = Stroke::new(1.0, Self::ACCENT);
        visuals.hyperlink_color = Self::ACCENT;
        visuals.extreme_bg_color = Self::BG_DARK;
        visuals.faint_bg_color = Self::BG_MEDIUM;
        visuals.striped = true;

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::new(8.0, 6.0);
        style.spacing.button_padding = Vec2::new(10.0, 5.0);
        ctx.set_style(style);
    }
}
