use eframe::egui::{self, FontId, Pos2, Rect};

use crate::catalog::{Content, Panel, PanelBody, SummaryPage};
use crate::render::{chart, text, widgets};
use crate::theme::Theme;

pub const PADDING: f32 = 64.0;
const SECTION_GAP: f32 = 48.0;
const CHART_HEIGHT: f32 = 540.0;

/// Draw the body of `panel` (page `page` for the summary) into `rect`.
/// Returns the full content height, which may exceed `rect`.
pub fn render(
    ui: &egui::Ui,
    panel: &Panel,
    page: u8,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let padding = PADDING * scale;
    let left = rect.left() + padding;
    let width = rect.width() - padding * 2.0;
    let mut y = rect.top() + padding * 0.75;

    y += text::draw_wrapped(
        ui,
        &format!("{}  {}", panel.icon, panel.title),
        FontId::proportional(theme.h2_size * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(left, y),
        width,
    ) + SECTION_GAP * 0.75 * scale;

    let pos = Pos2::new(left, y);
    y += match &panel.body {
        PanelBody::Content(content) => draw_content(ui, content, theme, pos, width, opacity, scale),
        PanelBody::Summary(pages) => {
            let page = &pages[(page as usize).min(pages.len() - 1)];
            draw_summary_page(ui, page, theme, pos, width, opacity, scale)
        }
    };

    y + padding - rect.top()
}

fn draw_content(
    ui: &egui::Ui,
    content: &Content,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let gap = SECTION_GAP * scale;
    let mut y = pos.y;

    if !content.charts.is_empty() {
        let count = content.charts.len() as f32;
        let chart_w = (width - gap * (count - 1.0)) / count;
        let height = CHART_HEIGHT * scale;
        for (i, chart) in content.charts.iter().enumerate() {
            let rect = Rect::from_min_size(
                Pos2::new(pos.x + (chart_w + gap) * i as f32, y),
                egui::vec2(chart_w, height),
            );
            chart::draw_chart(ui, chart, theme, rect, opacity, scale);
        }
        y += height + gap;
    }

    if !content.cards.is_empty() {
        y += widgets::draw_stat_cards(ui, content.cards, Pos2::new(pos.x, y), width, opacity, scale)
            + gap;
    }

    y += widgets::draw_insight(ui, &content.insight, theme, Pos2::new(pos.x, y), width, opacity, scale);

    for analysis in content.analyses {
        y += gap;
        y += widgets::draw_analysis(ui, analysis, theme, Pos2::new(pos.x, y), width, opacity, scale);
    }

    y - pos.y
}

fn draw_summary_page(
    ui: &egui::Ui,
    page: &SummaryPage,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let gap = SECTION_GAP * scale;
    let mut y = pos.y;

    y += text::draw_wrapped(
        ui,
        page.heading,
        FontId::proportional(theme.h3_size * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(pos.x, y),
        width,
    ) + 8.0 * scale;
    y += text::draw_wrapped(
        ui,
        page.hint,
        FontId::proportional(theme.small_size * scale),
        Theme::with_opacity(theme.muted, opacity),
        Pos2::new(pos.x, y),
        width,
    ) + gap;
    y += text::draw_wrapped(
        ui,
        page.section,
        FontId::proportional(theme.h3_size * 0.8 * scale),
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(pos.x, y),
        width,
    ) + 20.0 * scale;

    y += widgets::draw_stat_cards(ui, page.cards, Pos2::new(pos.x, y), width, opacity, scale) + gap;
    y += widgets::draw_insight(ui, &page.insight, theme, Pos2::new(pos.x, y), width, opacity, scale);

    y - pos.y
}
