use std::f32::consts::{FRAC_PI_4, TAU};

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke};

use crate::catalog::{Chart, ChartKind, Palette};
use crate::data::{Dataset, format_count, format_decimal};
use crate::render::text;
use crate::theme::{self, CHART_PALETTE, GENDER_PALETTE, SERIES_PALETTE, Theme};

const GRID_LINES: usize = 5;

/// Draw one chart filling `rect`.
pub fn draw_chart(
    ui: &egui::Ui,
    chart: &Chart,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) {
    let mut plot = rect;
    if let Some(title) = chart.title {
        let color = Theme::with_opacity(theme.heading_color, opacity);
        let size = text::draw_line(
            ui,
            title,
            FontId::proportional(theme.h3_size * 0.8 * scale),
            color,
            rect.left_top(),
            Align2::LEFT_TOP,
        );
        plot.min.y += size.y + 16.0 * scale;
    }

    match chart.kind {
        ChartKind::Pie => draw_pie(ui, chart, theme, plot, opacity, scale),
        ChartKind::Column => draw_columns(ui, chart, theme, plot, opacity, scale),
        ChartKind::Bar => draw_bars(ui, chart, theme, plot, opacity, scale),
        ChartKind::GroupedColumn => draw_grouped(ui, chart, theme, plot, opacity, scale),
    }
}

/// Round `max` up to an axis extent made of `ticks` equal, human-friendly
/// steps (1, 2, 2.5 or 5 times a power of ten). Returns `(extent, step)`.
pub fn nice_axis(max: u32, ticks: usize) -> (f32, f32) {
    if max == 0 || ticks == 0 {
        return (1.0, 1.0);
    }
    let raw = max as f32 / ticks as f32;
    let magnitude = 10f32.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    (step * ticks as f32, step)
}

fn slice_color(palette: Palette, index: usize) -> Color32 {
    match palette {
        Palette::Categories { offset } => theme::palette_color(&CHART_PALETTE, index + offset),
        Palette::Gender => theme::palette_color(&GENDER_PALETTE, index),
    }
}

fn top_rounded(radius: f32) -> CornerRadius {
    let r = radius.round().clamp(0.0, 255.0) as u8;
    CornerRadius {
        nw: r,
        ne: r,
        sw: 0,
        se: 0,
    }
}

fn right_rounded(radius: f32) -> CornerRadius {
    let r = radius.round().clamp(0.0, 255.0) as u8;
    CornerRadius {
        nw: 0,
        ne: r,
        sw: 0,
        se: r,
    }
}

/// Dashed horizontal grid lines, value labels to the left of `rect`.
fn draw_value_grid(
    ui: &egui::Ui,
    theme: &Theme,
    rect: Rect,
    extent: f32,
    step: f32,
    opacity: f32,
    scale: f32,
) {
    let stroke = Stroke::new(
        1.5 * scale,
        Theme::with_opacity(theme.grid_line, opacity),
    );
    let label_color = Theme::with_opacity(theme.foreground, opacity);
    let font = FontId::proportional(theme.small_size * scale);
    for i in 0..=GRID_LINES {
        let value = step * i as f32;
        let y = rect.bottom() - rect.height() * value / extent;
        ui.painter().extend(egui::Shape::dashed_line(
            &[Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
            6.0 * scale,
            6.0 * scale,
        ));
        text::draw_line(
            ui,
            &format_count(value as u32),
            font.clone(),
            label_color,
            Pos2::new(rect.left() - 8.0 * scale, y),
            Align2::RIGHT_CENTER,
        );
    }
}

/// Category labels under a column chart. Long label sets are rotated so they
/// do not overlap.
fn draw_category_labels(
    ui: &egui::Ui,
    dataset: &Dataset,
    theme: &Theme,
    plot: Rect,
    slot: f32,
    opacity: f32,
    scale: f32,
) {
    let color = Theme::with_opacity(theme.foreground, opacity);
    let font = FontId::proportional(theme.small_size * scale);
    let rotate = rotate_labels(ui, dataset, &font, slot);

    for (i, row) in dataset.rows.iter().enumerate() {
        let x = plot.left() + slot * (i as f32 + 0.5);
        let tick = Pos2::new(x, plot.bottom() + 8.0 * scale);
        if rotate {
            let galley = ui
                .painter()
                .layout_no_wrap(row.label.to_string(), font.clone(), color);
            let w = galley.rect.width();
            let (sin, cos) = (-FRAC_PI_4).sin_cos();
            let start = Pos2::new(tick.x - w * cos, tick.y - w * sin);
            ui.painter().add(egui::Shape::Text(
                egui::epaint::TextShape::new(start, galley, color).with_angle(-FRAC_PI_4),
            ));
        } else {
            text::draw_line(ui, row.label, font.clone(), color, tick, Align2::CENTER_TOP);
        }
    }
}

fn rotate_labels(ui: &egui::Ui, dataset: &Dataset, font: &FontId, slot: f32) -> bool {
    dataset.rows.len() > 6
        || dataset
            .rows
            .iter()
            .any(|r| text::line_width(ui, r.label, font.clone()) > slot * 0.95)
}

fn column_plot_area(ui: &egui::Ui, dataset: &Dataset, theme: &Theme, rect: Rect, scale: f32) -> Rect {
    let font = FontId::proportional(theme.small_size * scale);
    let slot = (rect.width() - 96.0 * scale) / dataset.rows.len().max(1) as f32;
    let bottom = if rotate_labels(ui, dataset, &font, slot) {
        let longest = dataset
            .rows
            .iter()
            .map(|r| text::line_width(ui, r.label, font.clone()))
            .fold(0.0, f32::max);
        longest * FRAC_PI_4.sin() + 24.0 * scale
    } else {
        48.0 * scale
    };
    Rect::from_min_max(
        Pos2::new(rect.left() + 80.0 * scale, rect.top() + 36.0 * scale),
        Pos2::new(rect.right() - 16.0 * scale, rect.bottom() - bottom),
    )
}

fn draw_columns(
    ui: &egui::Ui,
    chart: &Chart,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) {
    let dataset = chart.dataset;
    if dataset.rows.is_empty() {
        return;
    }
    let plot = column_plot_area(ui, dataset, theme, rect, scale);
    let (extent, step) = nice_axis(dataset.max_value(), GRID_LINES);
    draw_value_grid(ui, theme, plot, extent, step, opacity, scale);

    let slot = plot.width() / dataset.rows.len() as f32;
    let bar_w = slot * 0.7;
    let label_color = Theme::with_opacity(theme.heading_color, opacity);
    let label_font = FontId::proportional(theme.body_size * 0.9 * scale);

    for (i, row) in dataset.rows.iter().enumerate() {
        let value = row.values.first().copied().unwrap_or(0);
        let h = plot.height() * value as f32 / extent;
        let x = plot.left() + slot * i as f32 + (slot - bar_w) / 2.0;
        let bar = Rect::from_min_max(Pos2::new(x, plot.bottom() - h), Pos2::new(x + bar_w, plot.bottom()));
        let color = Theme::with_opacity(slice_color(chart.palette, i), opacity);
        ui.painter().rect_filled(bar, top_rounded(12.0 * scale), color);
        text::draw_line(
            ui,
            &format_count(value),
            label_font.clone(),
            label_color,
            Pos2::new(bar.center().x, bar.top() - 6.0 * scale),
            Align2::CENTER_BOTTOM,
        );
    }

    draw_category_labels(ui, dataset, theme, plot, slot, opacity, scale);
}

fn draw_bars(
    ui: &egui::Ui,
    chart: &Chart,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) {
    let dataset = chart.dataset;
    if dataset.rows.is_empty() {
        return;
    }
    let font = FontId::proportional(theme.body_size * 0.85 * scale);
    let label_w = dataset
        .rows
        .iter()
        .map(|r| text::line_width(ui, r.label, font.clone()))
        .fold(0.0, f32::max)
        + 24.0 * scale;
    let value_w = 90.0 * scale;
    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + label_w, rect.top() + 8.0 * scale),
        Pos2::new(rect.right() - value_w, rect.bottom() - 40.0 * scale),
    );
    let (extent, step) = nice_axis(dataset.max_value(), GRID_LINES);

    let grid = Stroke::new(1.5 * scale, Theme::with_opacity(theme.grid_line, opacity));
    let text_color = Theme::with_opacity(theme.foreground, opacity);
    let small = FontId::proportional(theme.small_size * scale);
    for i in 0..=GRID_LINES {
        let value = step * i as f32;
        let x = plot.left() + plot.width() * value / extent;
        ui.painter().extend(egui::Shape::dashed_line(
            &[Pos2::new(x, plot.top()), Pos2::new(x, plot.bottom())],
            grid,
            6.0 * scale,
            6.0 * scale,
        ));
        text::draw_line(
            ui,
            &format_count(value as u32),
            small.clone(),
            text_color,
            Pos2::new(x, plot.bottom() + 8.0 * scale),
            Align2::CENTER_TOP,
        );
    }

    let slot = plot.height() / dataset.rows.len() as f32;
    let bar_h = slot * 0.65;
    let value_color = Theme::with_opacity(theme.heading_color, opacity);
    for (i, row) in dataset.rows.iter().enumerate() {
        let value = row.values.first().copied().unwrap_or(0);
        let w = plot.width() * value as f32 / extent;
        let y = plot.top() + slot * i as f32 + (slot - bar_h) / 2.0;
        let bar = Rect::from_min_size(Pos2::new(plot.left(), y), egui::vec2(w, bar_h));
        let color = Theme::with_opacity(slice_color(chart.palette, i), opacity);
        ui.painter().rect_filled(bar, right_rounded(12.0 * scale), color);

        text::draw_line(
            ui,
            row.label,
            font.clone(),
            text_color,
            Pos2::new(plot.left() - 12.0 * scale, bar.center().y),
            Align2::RIGHT_CENTER,
        );
        text::draw_line(
            ui,
            &format_count(value),
            font.clone(),
            value_color,
            Pos2::new(bar.right() + 8.0 * scale, bar.center().y),
            Align2::LEFT_CENTER,
        );
    }
}

fn draw_grouped(
    ui: &egui::Ui,
    chart: &Chart,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) {
    let dataset = chart.dataset;
    let series = dataset.series_count();
    if dataset.rows.is_empty() || series == 0 {
        return;
    }

    // Legend, top right
    let legend_font = FontId::proportional(theme.small_size * scale);
    let legend_color = Theme::with_opacity(theme.foreground, opacity);
    let mut x = rect.right() - 16.0 * scale;
    for (s, header) in dataset.value_headers.iter().enumerate().rev() {
        let name = header.trim_start_matches("Frecuencia ");
        let size = text::draw_line(
            ui,
            name,
            legend_font.clone(),
            legend_color,
            Pos2::new(x, rect.top()),
            Align2::RIGHT_TOP,
        );
        let swatch = Rect::from_min_size(
            Pos2::new(x - size.x - 24.0 * scale, rect.top() + 2.0 * scale),
            egui::vec2(16.0 * scale, 16.0 * scale),
        );
        ui.painter().rect_filled(
            swatch,
            3.0 * scale,
            Theme::with_opacity(theme::palette_color(&SERIES_PALETTE, s), opacity),
        );
        x = swatch.left() - 20.0 * scale;
    }

    let plot = column_plot_area(ui, dataset, theme, rect, scale);
    let (extent, step) = nice_axis(dataset.max_value(), GRID_LINES);
    draw_value_grid(ui, theme, plot, extent, step, opacity, scale);

    let slot = plot.width() / dataset.rows.len() as f32;
    let group_w = slot * 0.8;
    let bar_w = group_w / series as f32;
    let label_color = Theme::with_opacity(theme.heading_color, opacity);
    let label_font = FontId::proportional(theme.small_size * 0.9 * scale);

    for (i, row) in dataset.rows.iter().enumerate() {
        let group_left = plot.left() + slot * i as f32 + (slot - group_w) / 2.0;
        for (s, value) in row.values.iter().enumerate() {
            let h = plot.height() * *value as f32 / extent;
            let x = group_left + bar_w * s as f32;
            let bar = Rect::from_min_max(
                Pos2::new(x + 2.0 * scale, plot.bottom() - h),
                Pos2::new(x + bar_w - 2.0 * scale, plot.bottom()),
            );
            let color = Theme::with_opacity(theme::palette_color(&SERIES_PALETTE, s), opacity);
            ui.painter().rect_filled(bar, top_rounded(10.0 * scale), color);
            text::draw_line(
                ui,
                &format_count(*value),
                label_font.clone(),
                label_color,
                Pos2::new(bar.center().x, bar.top() - 4.0 * scale),
                Align2::CENTER_BOTTOM,
            );
        }
    }

    draw_category_labels(ui, dataset, theme, plot, slot, opacity, scale);
}

/// Share of each row in percent: the published percentage when there is one,
/// otherwise computed from the first series.
pub fn shares(dataset: &Dataset) -> Vec<f32> {
    let total = dataset.total(0).max(1) as f32;
    dataset
        .rows
        .iter()
        .map(|r| {
            r.percentage
                .unwrap_or_else(|| r.values.first().copied().unwrap_or(0) as f32 * 100.0 / total)
        })
        .collect()
}

fn draw_pie(
    ui: &egui::Ui,
    chart: &Chart,
    theme: &Theme,
    rect: Rect,
    opacity: f32,
    scale: f32,
) {
    let dataset = chart.dataset;
    let total = dataset.total(0);
    if total == 0 {
        return;
    }

    let legend_h = 40.0 * scale;
    let pie_area = Rect::from_min_max(rect.min, Pos2::new(rect.right(), rect.bottom() - legend_h));
    let center = pie_area.center();
    let radius = (pie_area.height() * 0.4).min(pie_area.width() * 0.28);
    let label_font = FontId::proportional(theme.body_size * 0.85 * scale);
    let label_color = Theme::with_opacity(theme.heading_color, opacity);
    let shares = shares(dataset);

    // Start at 12 o'clock, clockwise
    let mut angle = -TAU / 4.0;
    for (i, row) in dataset.rows.iter().enumerate() {
        let value = row.values.first().copied().unwrap_or(0);
        let sweep = TAU * value as f32 / total as f32;
        let color = Theme::with_opacity(slice_color(chart.palette, i), opacity);
        fill_slice(ui, center, radius, angle, sweep, color);

        let mid = angle + sweep / 2.0;
        let dir = egui::vec2(mid.cos(), mid.sin());
        let anchor = center + dir * (radius + 16.0 * scale);
        let align = if dir.x >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        let label = format!("{}: {}%", row.label, format_decimal(shares[i]));
        text::draw_line(ui, &label, label_font.clone(), label_color, anchor, align);

        angle += sweep;
    }

    // Slice separators
    let sep = Stroke::new(2.0 * scale, Theme::with_opacity(theme.surface, opacity));
    let mut angle = -TAU / 4.0;
    for row in dataset.rows {
        let value = row.values.first().copied().unwrap_or(0);
        let edge = center + egui::vec2(angle.cos(), angle.sin()) * radius;
        ui.painter().line_segment([center, edge], sep);
        angle += TAU * value as f32 / total as f32;
    }

    // Legend
    let legend_font = FontId::proportional(theme.small_size * scale);
    let legend_color = Theme::with_opacity(theme.foreground, opacity);
    let widths: Vec<f32> = dataset
        .rows
        .iter()
        .map(|r| text::line_width(ui, r.label, legend_font.clone()) + 48.0 * scale)
        .collect();
    let mut x = rect.center().x - widths.iter().sum::<f32>() / 2.0;
    let y = rect.bottom() - legend_h / 2.0;
    for (i, row) in dataset.rows.iter().enumerate() {
        let swatch = Rect::from_center_size(
            Pos2::new(x + 8.0 * scale, y),
            egui::vec2(16.0 * scale, 16.0 * scale),
        );
        ui.painter().rect_filled(
            swatch,
            3.0 * scale,
            Theme::with_opacity(slice_color(chart.palette, i), opacity),
        );
        text::draw_line(
            ui,
            row.label,
            legend_font.clone(),
            legend_color,
            Pos2::new(x + 22.0 * scale, y),
            Align2::LEFT_CENTER,
        );
        x += widths[i];
    }
}

/// Fill a circular sector as a triangle fan.
fn fill_slice(ui: &egui::Ui, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    if sweep <= 0.0 {
        return;
    }
    let segments = ((sweep / TAU) * 96.0).ceil().max(2.0) as u32;
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color);
    for s in 0..=segments {
        let a = start + sweep * s as f32 / segments as f32;
        mesh.colored_vertex(center + egui::vec2(a.cos(), a.sin()) * radius, color);
    }
    for s in 1..=segments {
        mesh.add_triangle(0, s, s + 1);
    }
    ui.painter().add(egui::Shape::mesh(mesh));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tables;

    #[test]
    fn test_nice_axis_covers_max() {
        for max in [1, 7, 73, 821, 1501, 2862, 3294, 5821] {
            let (extent, step) = nice_axis(max, GRID_LINES);
            assert!(extent >= max as f32, "{max} -> {extent}");
            assert!((extent - step * GRID_LINES as f32).abs() < 1e-3);
        }
    }

    #[test]
    fn test_nice_axis_steps() {
        assert_eq!(nice_axis(3294, 5), (5000.0, 1000.0));
        assert_eq!(nice_axis(1000, 5), (1000.0, 200.0));
        assert_eq!(nice_axis(821, 5), (1000.0, 200.0));
        assert_eq!(nice_axis(2862, 5), (5000.0, 1000.0));
        assert_eq!(nice_axis(0, 5), (1.0, 1.0));
    }

    #[test]
    fn test_shares_use_published_percentages() {
        assert_eq!(shares(&tables::GENDER), vec![56.33, 43.67]);
    }

    #[test]
    fn test_shares_computed_without_percentages() {
        let s = shares(&tables::INSTITUTIONS);
        let sum: f32 = s.iter().sum();
        assert!((sum - 100.0).abs() < 0.01);
        assert!(s[0] > 56.0 && s[0] < 57.0);
    }
}
