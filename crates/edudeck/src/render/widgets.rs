use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke};

use crate::catalog::{Analysis, Insight, StatCard};
use crate::data::classification;
use crate::render::text;
use crate::theme::{Accent, Theme, blend};

const CARD_GAP: f32 = 24.0;

/// Lay out stat cards in rows of at most four, returning the height used.
pub fn draw_stat_cards(
    ui: &egui::Ui,
    cards: &[StatCard],
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    if cards.is_empty() {
        return 0.0;
    }
    let per_row = cards.len().min(4);
    let gap = CARD_GAP * scale;
    let card_w = (width - gap * (per_row as f32 - 1.0)) / per_row as f32;
    let card_h = if cards.iter().any(|c| c.sublabel.is_some()) {
        210.0 * scale
    } else {
        170.0 * scale
    };

    let mut y = pos.y;
    for row in cards.chunks(per_row) {
        for (i, card) in row.iter().enumerate() {
            let rect = Rect::from_min_size(
                Pos2::new(pos.x + (card_w + gap) * i as f32, y),
                egui::vec2(card_w, card_h),
            );
            draw_stat_card(ui, card, rect, opacity, scale);
        }
        y += card_h + gap;
    }
    y - gap - pos.y
}

fn draw_stat_card(ui: &egui::Ui, card: &StatCard, rect: Rect, opacity: f32, scale: f32) {
    let top = card.accent.strong();
    let bottom = blend(top, egui::Color32::BLACK, 0.15);
    let radius = 20.0 * scale;

    ui.painter()
        .rect_filled(rect, radius, Theme::with_opacity(bottom, opacity));
    let highlight = Rect::from_min_max(rect.min, Pos2::new(rect.right(), rect.center().y));
    ui.painter().rect_filled(
        highlight,
        egui::CornerRadius {
            nw: radius as u8,
            ne: radius as u8,
            sw: 0,
            se: 0,
        },
        Theme::with_opacity(top, opacity),
    );

    let white = Theme::with_opacity(egui::Color32::WHITE, opacity);
    let soft_white = Theme::with_opacity(egui::Color32::WHITE, opacity * 0.9);
    let pad = 24.0 * scale;
    let inner_w = rect.width() - pad * 2.0;
    let mut y = rect.top() + pad;

    y += text::draw_wrapped(
        ui,
        card.icon,
        FontId::proportional(36.0 * scale),
        white,
        Pos2::new(rect.left() + pad, y),
        inner_w,
    ) + 8.0 * scale;
    y += text::draw_wrapped(
        ui,
        card.label,
        FontId::proportional(17.0 * scale),
        soft_white,
        Pos2::new(rect.left() + pad, y),
        inner_w,
    ) + 6.0 * scale;
    y += text::draw_wrapped(
        ui,
        card.value,
        FontId::proportional(38.0 * scale),
        white,
        Pos2::new(rect.left() + pad, y),
        inner_w,
    ) + 6.0 * scale;
    if let Some(sub) = card.sublabel {
        text::draw_wrapped(
            ui,
            sub,
            FontId::proportional(14.0 * scale),
            soft_white,
            Pos2::new(rect.left() + pad, y),
            inner_w,
        );
    }
}

/// 💡 box with a title and bullet lines, returning the height used.
pub fn draw_insight(
    ui: &egui::Ui,
    insight: &Insight,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let pad = 32.0 * scale;
    let inner_w = width - pad * 2.0 - 8.0 * scale;
    let title_font = FontId::proportional(theme.h3_size * 0.8 * scale);
    let body_font = FontId::proportional(theme.body_size * 0.9 * scale);
    let line_gap = 8.0 * scale;

    let title = format!("\u{1F4A1}  {}", insight.title);
    let bullets: Vec<String> = insight.lines.iter().map(|l| format!("\u{2022} {l}")).collect();

    let title_h = text::measure_wrapped(ui, &title, title_font.clone(), inner_w);
    let body_h: f32 = bullets
        .iter()
        .map(|b| text::measure_wrapped(ui, b, body_font.clone(), inner_w) + line_gap)
        .sum();
    let height = pad * 2.0 + title_h + 16.0 * scale + body_h;

    let rect = Rect::from_min_size(pos, egui::vec2(width, height));
    draw_accent_box(ui, insight.accent, theme, rect, opacity, scale);

    let x = rect.left() + pad + 8.0 * scale;
    let mut y = rect.top() + pad;
    y += text::draw_wrapped(
        ui,
        &title,
        title_font,
        Theme::with_opacity(theme.heading_color, opacity),
        Pos2::new(x, y),
        inner_w,
    ) + 16.0 * scale;
    let body_color = Theme::with_opacity(theme.foreground, opacity);
    for bullet in &bullets {
        y += text::draw_wrapped(ui, bullet, body_font.clone(), body_color, Pos2::new(x, y), inner_w)
            + line_gap;
    }
    height
}

/// Pale accent background with a strong left border.
fn draw_accent_box(ui: &egui::Ui, accent: Accent, theme: &Theme, rect: Rect, opacity: f32, scale: f32) {
    let radius = 12.0 * scale;
    ui.painter()
        .rect_filled(rect, radius, Theme::with_opacity(accent.soft(theme), opacity));
    let border = Rect::from_min_size(rect.min, egui::vec2(6.0 * scale, rect.height()));
    ui.painter().rect_filled(
        border,
        egui::CornerRadius {
            nw: radius as u8,
            ne: 0,
            sw: radius as u8,
            se: 0,
        },
        Theme::with_opacity(accent.strong(), opacity),
    );
}

/// Rounded label, returning its width.
fn draw_pill(ui: &egui::Ui, label: &str, accent: Accent, pos: Pos2, opacity: f32, scale: f32) -> f32 {
    let font = FontId::proportional(14.0 * scale);
    let pad = egui::vec2(14.0 * scale, 6.0 * scale);
    let text_color = Theme::with_opacity(blend(accent.strong(), egui::Color32::BLACK, 0.45), opacity);
    let galley = ui.painter().layout_no_wrap(label.to_string(), font, text_color);
    let rect = Rect::from_min_size(pos, galley.rect.size() + pad * 2.0);
    ui.painter().rect_filled(
        rect,
        rect.height() / 2.0,
        Theme::with_opacity(blend(accent.strong(), egui::Color32::WHITE, 0.6), opacity),
    );
    ui.painter().galley(pos + pad, galley, text_color);
    rect.width()
}

/// "Análisis Descriptivo de la Variable": variable name, classification
/// pills and the frequency table. Returns the height used.
pub fn draw_analysis(
    ui: &egui::Ui,
    analysis: &Analysis,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let heading = Theme::with_opacity(theme.heading_color, opacity);
    let mut y = pos.y;

    let rule = Stroke::new(4.0 * scale, Theme::with_opacity(theme.grid_line, opacity));
    ui.painter()
        .hline(pos.x..=pos.x + width, y, rule);
    y += 32.0 * scale;

    y += text::draw_wrapped(
        ui,
        "Análisis Descriptivo de la Variable",
        FontId::proportional(theme.h3_size * scale),
        heading,
        Pos2::new(pos.x, y),
        width,
    ) + 24.0 * scale;

    // Variable box
    let pad = 24.0 * scale;
    let class = classification::classify(analysis.variable);
    let line_h = theme.body_size * 1.4 * scale;
    let box_h = pad * 2.0 + line_h + if class.is_some() { line_h + 8.0 * scale } else { 0.0 };
    let box_rect = Rect::from_min_size(Pos2::new(pos.x, y), egui::vec2(width, box_h));
    draw_accent_box(ui, analysis.accent, theme, box_rect, opacity, scale);

    let font = FontId::proportional(theme.body_size * scale);
    let x = box_rect.left() + pad + 8.0 * scale;
    let mut by = box_rect.top() + pad;
    let label = text::draw_line(ui, "Variable: ", font.clone(), heading, Pos2::new(x, by), Align2::LEFT_TOP);
    text::draw_line(
        ui,
        analysis.variable,
        font.clone(),
        Theme::with_opacity(analysis.accent.text(theme), opacity),
        Pos2::new(x + label.x, by),
        Align2::LEFT_TOP,
    );
    by += line_h + 8.0 * scale;
    if let Some(class) = class {
        let label = text::draw_line(ui, "Clasificación:", font, heading, Pos2::new(x, by), Align2::LEFT_TOP);
        let mut px = x + label.x + 12.0 * scale;
        for name in [class.kind.display_name(), class.scale.display_name()] {
            px += draw_pill(ui, name, analysis.accent, Pos2::new(px, by), opacity, scale) + 10.0 * scale;
        }
    }
    y += box_h + 24.0 * scale;

    y += text::draw_wrapped(
        ui,
        "Tabla de Frecuencia",
        FontId::proportional(theme.h3_size * 0.8 * scale),
        heading,
        Pos2::new(pos.x, y),
        width,
    ) + 16.0 * scale;

    y += draw_table(ui, analysis, theme, Pos2::new(pos.x, y), width, opacity, scale);
    y - pos.y
}

fn draw_table(
    ui: &egui::Ui,
    analysis: &Analysis,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let dataset = analysis.dataset;
    let headers = dataset.headers();
    let col_w = width / headers.len() as f32;
    let row_h = theme.body_size * 2.4 * scale;
    let pad = 16.0 * scale;
    let font = FontId::proportional(theme.body_size * 0.9 * scale);

    let header_rect = Rect::from_min_size(pos, egui::vec2(width, row_h));
    ui.painter().rect_filled(
        header_rect,
        egui::CornerRadius {
            nw: (8.0 * scale) as u8,
            ne: (8.0 * scale) as u8,
            sw: 0,
            se: 0,
        },
        Theme::with_opacity(theme.table_header, opacity),
    );
    let header_color = Theme::with_opacity(egui::Color32::WHITE, opacity);
    for (c, header) in headers.iter().enumerate() {
        let cell = Pos2::new(pos.x + col_w * c as f32 + pad, header_rect.center().y);
        text::draw_line(ui, header, font.clone(), header_color, cell, Align2::LEFT_CENTER);
    }

    let text_color = Theme::with_opacity(theme.foreground, opacity);
    let divider = Stroke::new(1.0 * scale, Theme::with_opacity(theme.grid_line, opacity));
    let mut y = header_rect.bottom();
    for (r, row) in dataset.rows.iter().enumerate() {
        let row_rect = Rect::from_min_size(Pos2::new(pos.x, y), egui::vec2(width, row_h));
        let fill = if r % 2 == 1 {
            theme.table_stripe
        } else {
            theme.surface
        };
        ui.painter()
            .rect_filled(row_rect, 0.0, Theme::with_opacity(fill, opacity));
        for (c, cell) in dataset.cells(row).iter().enumerate() {
            let at = Pos2::new(pos.x + col_w * c as f32 + pad, row_rect.center().y);
            text::draw_line(ui, cell, font.clone(), text_color, at, Align2::LEFT_CENTER);
        }
        ui.painter()
            .hline(pos.x..=pos.x + width, row_rect.bottom(), divider);
        y += row_h;
    }
    y - pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(sublabel: Option<&'static str>) -> StatCard {
        StatCard {
            icon: "\u{1F465}",
            label: "Total",
            value: "5.796",
            sublabel,
            accent: Accent::Blue,
        }
    }

    fn cards_height(cards: &[StatCard]) -> f32 {
        let ctx = egui::Context::default();
        let mut height = 0.0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                height = draw_stat_cards(ui, cards, Pos2::ZERO, 1000.0, 1.0, 1.0);
            });
        });
        height
    }

    #[test]
    fn test_stat_cards_wrap_after_four() {
        assert_eq!(cards_height(&[]), 0.0);
        assert_eq!(cards_height(&[card(None), card(None)]), 170.0);
        let five: Vec<StatCard> = (0..5).map(|_| card(None)).collect();
        assert_eq!(cards_height(&five), 170.0 * 2.0 + CARD_GAP);
    }

    #[test]
    fn test_sublabel_makes_cards_taller() {
        assert_eq!(cards_height(&[card(None), card(Some("56,3%"))]), 210.0);
    }
}
