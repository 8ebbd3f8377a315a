use eframe::egui::{self, Align2, FontId, Pos2, Rect};

use crate::catalog::INTRO;
use crate::render::text;
use crate::theme::{Accent, Theme, blend};

/// Top of the 1920x1080 reference frame centered in `rect`.
fn frame_top(rect: Rect, scale: f32) -> f32 {
    rect.center().y - 540.0 * scale
}

/// Clickable "Comenzar Presentación" button.
pub fn button_rect(rect: Rect, scale: f32) -> Rect {
    Rect::from_center_size(
        Pos2::new(rect.center().x, frame_top(rect, scale) + 820.0 * scale),
        egui::vec2(440.0 * scale, 84.0 * scale),
    )
}

pub fn render(
    ui: &egui::Ui,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
    hover: Option<Pos2>,
) {
    let cx = rect.center().x;
    let max_w = 1400.0 * scale;
    let heading = Theme::with_opacity(theme.heading_color, opacity);
    let muted = Theme::with_opacity(theme.muted, opacity);
    let mut y = frame_top(rect, scale) + 150.0 * scale;

    y += text::draw_centered(
        ui,
        INTRO.title,
        FontId::proportional(theme.title_size * scale),
        heading,
        cx,
        y,
        max_w,
    ) + 24.0 * scale;
    y += text::draw_centered(
        ui,
        INTRO.region,
        FontId::proportional(theme.h3_size * scale),
        Theme::with_opacity(theme.foreground, opacity),
        cx,
        y,
        max_w,
    ) + 8.0 * scale;
    y += text::draw_centered(
        ui,
        INTRO.year,
        FontId::proportional(theme.body_size * scale),
        muted,
        cx,
        y,
        max_w,
    ) + 40.0 * scale;

    // Headline pill
    let font = FontId::proportional(theme.h3_size * scale);
    let width = text::line_width(ui, INTRO.headline, font.clone()) + 64.0 * scale;
    let pill = Rect::from_min_size(
        Pos2::new(cx - width / 2.0, y),
        egui::vec2(width, 64.0 * scale),
    );
    ui.painter().rect_filled(
        pill,
        pill.height() / 2.0,
        Theme::with_opacity(Accent::Indigo.soft(theme), opacity),
    );
    text::draw_line(
        ui,
        INTRO.headline,
        font,
        Theme::with_opacity(Accent::Indigo.text(theme), opacity),
        pill.center(),
        Align2::CENTER_CENTER,
    );
    y = pill.bottom() + 56.0 * scale;

    y += text::draw_centered(
        ui,
        INTRO.members_heading,
        FontId::proportional(theme.body_size * scale),
        heading,
        cx,
        y,
        max_w,
    ) + 12.0 * scale;
    text::draw_centered(
        ui,
        &INTRO.members.join("  \u{00B7}  "),
        FontId::proportional(theme.body_size * scale),
        muted,
        cx,
        y,
        max_w,
    );

    let button = button_rect(rect, scale);
    let hovered = hover.is_some_and(|p| button.contains(p));
    let fill = if hovered {
        blend(theme.accent, egui::Color32::BLACK, 0.15)
    } else {
        theme.accent
    };
    ui.painter()
        .rect_filled(button, 16.0 * scale, Theme::with_opacity(fill, opacity));
    text::draw_line(
        ui,
        INTRO.button,
        FontId::proportional(theme.body_size * 1.1 * scale),
        Theme::with_opacity(egui::Color32::WHITE, opacity),
        button.center(),
        Align2::CENTER_CENTER,
    );

    text::draw_centered(
        ui,
        INTRO.hint,
        FontId::proportional(theme.small_size * scale),
        muted,
        cx,
        button.bottom() + 32.0 * scale,
        max_w,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_centered_and_scaled() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        let button = button_rect(rect, 1.0);
        assert_eq!(button.center().x, 960.0);
        assert_eq!(button.width(), 440.0);

        let half = Rect::from_min_size(Pos2::ZERO, egui::vec2(960.0, 540.0));
        assert_eq!(button_rect(half, 0.5).width(), 220.0);
        assert!(half.contains_rect(button_rect(half, 0.5)));
    }
}
