pub mod chart;
pub mod intro;
pub mod panel;
pub mod tabs;
pub mod text;
pub mod transition;
pub mod widgets;

use eframe::egui;

use crate::catalog;
use crate::navigator::NavigationState;
use crate::theme::Theme;

/// Uniform scale from the 1920x1080 reference frame to `rect`.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Scrollable area of a panel screen, below the tab bar.
pub fn body_rect(rect: egui::Rect, scale: f32) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.left(), tabs::bar_rect(rect, scale).bottom()),
        rect.max,
    )
}

/// Rect filled with a top-to-bottom color ramp.
pub fn vertical_gradient(rect: egui::Rect, top: egui::Color32, bottom: egui::Color32) -> egui::Shape {
    let mut mesh = egui::Mesh::default();
    for (pos, color) in [
        (rect.left_top(), top),
        (rect.right_top(), top),
        (rect.left_bottom(), bottom),
        (rect.right_bottom(), bottom),
    ] {
        mesh.colored_vertex(pos, color);
    }
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);
    egui::Shape::mesh(mesh)
}

/// Draw the screen for `state`. Panel bodies are shifted up by `scroll` and
/// clipped below the tab bar.
///
/// Returns the panel body's full content height (0 on the intro).
#[allow(clippy::too_many_arguments)]
pub fn render_screen(
    ui: &mut egui::Ui,
    state: NavigationState,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    scroll: f32,
    hover: Option<egui::Pos2>,
) -> f32 {
    let Some(panel) = catalog::panel_for(state) else {
        intro::render(ui, theme, rect, opacity, scale, hover);
        return 0.0;
    };

    let body = body_rect(rect, scale);
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(body)
            .id_salt(("panel_body", state)),
    );
    child.set_clip_rect(body.intersect(ui.clip_rect()));
    let content_height = panel::render(
        &child,
        panel,
        state.summary_page(),
        theme,
        body.translate(egui::vec2(0.0, -scroll)),
        opacity,
        scale,
    );

    let active = state.panel_index().unwrap_or_default();
    tabs::render(ui, active, theme, rect, opacity, scale, hover);
    content_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_gradient_is_two_triangles() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 40.0));
        let egui::Shape::Mesh(mesh) =
            vertical_gradient(rect, egui::Color32::WHITE, egui::Color32::TRANSPARENT)
        else {
            panic!("expected a mesh");
        };
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices[0].color, egui::Color32::WHITE);
        assert_eq!(mesh.vertices[3].color, egui::Color32::TRANSPARENT);
    }

    #[test]
    fn test_compute_scale_letterboxes() {
        let full = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(full), 1.0);
        let wide = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(3840.0, 1080.0));
        assert_eq!(compute_scale(wide), 1.0);
        let small = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 720.0));
        assert!((compute_scale(small) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_starts_below_tabs() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        let body = body_rect(rect, 1.0);
        assert_eq!(body.top(), tabs::TAB_BAR_HEIGHT);
        assert_eq!(body.bottom(), 1080.0);
    }

    #[test]
    fn test_render_every_tour_screen() {
        let ctx = egui::Context::default();
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        let input = egui::RawInput {
            screen_rect: Some(screen),
            ..Default::default()
        };
        let theme = Theme::light();

        for state in crate::navigator::tour() {
            let mut height = -1.0;
            let _ = ctx.run(input.clone(), |ctx| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::new().inner_margin(0.0))
                    .show(ctx, |ui| {
                        let rect = ui.max_rect();
                        height = render_screen(ui, state, &theme, rect, 1.0, 1.0, 0.0, None);
                    });
            });
            if state.show_intro() {
                assert_eq!(height, 0.0);
            } else {
                assert!(height > 0.0, "{state}: {height}");
            }
        }
    }
}
