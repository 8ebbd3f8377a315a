//! The panel tab strip across the top of every panel screen.

use eframe::egui::{self, Align2, FontId, Pos2, Rect};

use crate::catalog::PANELS;
use crate::navigator::PANEL_COUNT;
use crate::render::text;
use crate::theme::Theme;

pub const TAB_BAR_HEIGHT: f32 = 88.0;
const TAB_GAP: f32 = 10.0;
const MARGIN: f32 = 32.0;

/// Strip occupied by the tab bar at the top of `rect`.
pub fn bar_rect(rect: Rect, scale: f32) -> Rect {
    Rect::from_min_size(rect.min, egui::vec2(rect.width(), TAB_BAR_HEIGHT * scale))
}

/// Equal-width tab rects, left to right in panel order.
pub fn tab_rects(rect: Rect, scale: f32) -> [Rect; PANEL_COUNT] {
    let bar = bar_rect(rect, scale);
    let margin = MARGIN * scale;
    let gap = TAB_GAP * scale;
    let width = (bar.width() - margin * 2.0 - gap * (PANEL_COUNT as f32 - 1.0)) / PANEL_COUNT as f32;
    let height = bar.height() - 28.0 * scale;
    std::array::from_fn(|i| {
        Rect::from_min_size(
            Pos2::new(bar.left() + margin + (width + gap) * i as f32, bar.top() + 14.0 * scale),
            egui::vec2(width, height),
        )
    })
}

/// Index of the tab under `pos`.
pub fn hit_test(rect: Rect, scale: f32, pos: Pos2) -> Option<usize> {
    tab_rects(rect, scale).iter().position(|r| r.contains(pos))
}

pub fn render(
    ui: &egui::Ui,
    active: usize,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
    hover: Option<Pos2>,
) {
    let bar = bar_rect(rect, scale);
    ui.painter()
        .rect_filled(bar, 0.0, Theme::with_opacity(theme.surface, opacity));
    ui.painter().hline(
        bar.x_range(),
        bar.bottom(),
        egui::Stroke::new(1.0 * scale, Theme::with_opacity(theme.grid_line, opacity)),
    );

    let font = FontId::proportional(theme.small_size * 1.1 * scale);
    for (i, (tab, panel)) in tab_rects(rect, scale).iter().zip(PANELS.iter()).enumerate() {
        let hovered = hover.is_some_and(|p| tab.contains(p));
        let (fill, color) = if i == active {
            (theme.accent, egui::Color32::WHITE)
        } else if hovered {
            (theme.table_stripe, theme.heading_color)
        } else {
            (theme.background, theme.foreground)
        };
        ui.painter()
            .rect_filled(*tab, 12.0 * scale, Theme::with_opacity(fill, opacity));
        text::draw_line(
            ui,
            &format!("{} {}", panel.icon, panel.label),
            font.clone(),
            Theme::with_opacity(color, opacity),
            tab.center(),
            Align2::CENTER_CENTER,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 1080.0))
    }

    #[test]
    fn test_tabs_are_ordered_and_disjoint() {
        let tabs = tab_rects(screen(), 1.0);
        for pair in tabs.windows(2) {
            assert!(pair[0].right() < pair[1].left());
        }
        assert!(tabs.iter().all(|t| bar_rect(screen(), 1.0).contains_rect(*t)));
    }

    #[test]
    fn test_hit_test() {
        let tabs = tab_rects(screen(), 1.0);
        assert_eq!(hit_test(screen(), 1.0, tabs[3].center()), Some(3));
        assert_eq!(hit_test(screen(), 1.0, tabs[7].center()), Some(7));
        assert_eq!(hit_test(screen(), 1.0, Pos2::new(960.0, 600.0)), None);
    }
}
