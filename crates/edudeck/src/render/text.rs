use eframe::egui::{self, Color32, FontId, Pos2};

/// Layout and paint wrapped text, returning the height used.
pub fn draw_wrapped(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    pos: Pos2,
    max_width: f32,
) -> f32 {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint text horizontally centered on `center_x`, returning the height used.
pub fn draw_centered(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    center_x: f32,
    top: f32,
    max_width: f32,
) -> f32 {
    let mut job = egui::text::LayoutJob::simple(text.to_string(), font, color, max_width);
    job.halign = egui::Align::Center;
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(Pos2::new(center_x, top), galley, color);
    height
}

/// Paint a single line anchored by `align` at `anchor`, returning its size.
pub fn draw_line(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    anchor: Pos2,
    align: egui::Align2,
) -> egui::Vec2 {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let size = galley.rect.size();
    let rect = align.anchor_size(anchor, size);
    ui.painter().galley(rect.min, galley, color);
    size
}

/// Width of a single unwrapped line.
pub fn line_width(ui: &egui::Ui, text: &str, font: FontId) -> f32 {
    ui.painter()
        .layout_no_wrap(text.to_string(), font, Color32::WHITE)
        .rect
        .width()
}

/// Height a wrapped paragraph would take, without painting it.
pub fn measure_wrapped(ui: &egui::Ui, text: &str, font: FontId, max_width: f32) -> f32 {
    ui.painter()
        .layout(text.to_string(), font, Color32::WHITE, max_width)
        .rect
        .height()
}
