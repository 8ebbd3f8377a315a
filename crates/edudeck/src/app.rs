use eframe::egui;
use std::time::Instant;

use crate::config::{Config, StartPanel};
use crate::navigator::{self, NavEvent, NavigationState};
use crate::render;
use crate::render::transition::{ActiveTransition, TransitionDirection, TransitionKind};
use crate::render::{intro, tabs};
use crate::theme::Theme;

const SCROLL_STEP: f32 = 120.0;

struct DashboardApp {
    state: NavigationState,
    theme: Theme,
    default_transition: TransitionKind,
    transition: Option<ActiveTransition>,
    show_hud: bool,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    scroll_offset: f32,
    scroll_target: f32,
    /// Body height reported by the last render of the current screen
    content_height: f32,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
    /// Screen rect from last frame, used for hit-testing clicks
    last_rect: egui::Rect,
}

const TOAST_SECS: f32 = 1.5;
const TOAST_FADE_SECS: f32 = 0.5;

/// Short status message shown after a hotkey.
struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    /// Fully opaque, then a linear fade over the last half second.
    fn opacity(&self) -> f32 {
        let remaining = TOAST_SECS - self.start.elapsed().as_secs_f32();
        (remaining / TOAST_FADE_SECS).clamp(0.0, 1.0)
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_SECS
    }

    /// Paint centered above the bottom edge. Returns false once faded out.
    fn draw(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) -> bool {
        let opacity = self.opacity();
        if opacity <= 0.0 {
            return false;
        }
        let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
        let fill = Theme::with_opacity(theme.surface, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            self.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            color,
        );
        let pad = egui::vec2(16.0, 16.0) * scale;
        let size = galley.rect.size() + pad * 2.0;
        let min = egui::pos2(rect.center().x - size.x / 2.0, rect.bottom() - 80.0 * scale);
        let pill = egui::Rect::from_min_size(min, size);

        ui.painter().rect_filled(pill, 8.0 * scale, fill);
        ui.painter().galley(pill.min + pad, galley, color);
        true
    }
}

impl DashboardApp {
    fn new(state: NavigationState, theme: Theme, default_transition: TransitionKind) -> Self {
        let now = Instant::now();
        Self {
            state,
            theme,
            default_transition,
            transition: None,
            show_hud: false,
            toast: None,
            last_esc: None,
            scroll_offset: 0.0,
            scroll_target: 0.0,
            content_height: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
            last_rect: egui::Rect::ZERO,
        }
    }

    /// Feed one event through the navigator. A change of screen while a
    /// transition is running restarts the animation toward the new target.
    fn dispatch(&mut self, event: NavEvent) {
        let from = self.state;
        let to = navigator::transition(from, event);
        if to == from {
            tracing::trace!(state = %from, ?event, "event ignored");
            return;
        }
        tracing::debug!(
            from = %from,
            to = %to,
            slide = to.slide(),
            page = to.summary_page(),
            ?event,
            "navigate"
        );

        self.state = to;
        self.scroll_offset = 0.0;
        self.scroll_target = 0.0;
        self.content_height = 0.0;
        self.transition = Some(ActiveTransition::new(from, to, self.default_transition));
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn cycle_transition(&mut self) {
        self.default_transition = self.default_transition.cycled();
        let name = self.default_transition.label();
        self.toast = Some(Toast::new(format!("Transition: {name}")));
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }

    /// Map a click to the tab or button under it.
    fn click_event(&self, pos: egui::Pos2) -> Option<NavEvent> {
        let rect = self.last_rect;
        let scale = render::compute_scale(rect);
        if self.state.show_intro() {
            intro::button_rect(rect, scale)
                .contains(pos)
                .then_some(NavEvent::Start)
        } else {
            tabs::hit_test(rect, scale, pos).map(NavEvent::Select)
        }
    }

    /// Keys and primary clicks, dispatched in delivery order. Clicks are
    /// hit-tested against the state left by the events before them.
    fn handle_navigation(&mut self, events: &[egui::Event]) {
        for event in events {
            let nav = match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => self.click_event(*pos),
                other => navigator::event_for_input(other),
            };
            if let Some(nav) = nav {
                self.dispatch(nav);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            // ESC: double-tap to quit
            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit"));
                return;
            }

            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
                return;
            }

            if i.key_pressed(egui::Key::T) {
                self.cycle_transition();
                return;
            }

            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }

            self.handle_navigation(&i.events);

            // Scroll: Up/Down (animate toward target), clamped at render time
            if i.key_pressed(egui::Key::ArrowUp) {
                self.scroll_target = (self.scroll_target - SCROLL_STEP).max(0.0);
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                self.scroll_target += SCROLL_STEP;
            }
            let scroll = i.smooth_scroll_delta;
            if scroll.y != 0.0 {
                self.scroll_target -= scroll.y;
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.transition.is_some_and(|t| t.is_complete()) {
            self.transition = None;
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                self.last_rect = rect;

                let scale = render::compute_scale(rect);
                let hover = ctx.input(|i| i.pointer.hover_pos());

                if let Some(t) = self.transition {
                    self.draw_transition(ui, &t, rect, scale);
                    ctx.request_repaint();
                } else {
                    self.draw_with_scroll(ui, ctx, rect, scale, hover);
                }

                self.draw_chrome(ui, rect, scale);

                if self
                    .toast
                    .as_ref()
                    .is_some_and(|toast| toast.draw(ui, &self.theme, rect, scale))
                {
                    ctx.request_repaint();
                }

                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }
            });
    }
}

impl DashboardApp {
    fn draw_transition(&self, ui: &mut egui::Ui, t: &ActiveTransition, rect: egui::Rect, scale: f32) {
        let progress = t.progress();
        match t.kind {
            TransitionKind::Fade => {
                render::render_screen(ui, t.from, &self.theme, rect, 1.0 - progress, scale, 0.0, None);
                render::render_screen(ui, t.to, &self.theme, rect, progress, scale, 0.0, None);
            }
            TransitionKind::SlideHorizontal => {
                let w = rect.width();
                let sign = match t.direction {
                    TransitionDirection::Forward => -1.0,
                    TransitionDirection::Backward => 1.0,
                };
                let from_offset = sign * progress * w;
                let to_offset = from_offset - sign * w;

                let from_rect = rect.translate(egui::vec2(from_offset, 0.0));
                let to_rect = rect.translate(egui::vec2(to_offset, 0.0));

                render::render_screen(ui, t.from, &self.theme, from_rect, 1.0, scale, 0.0, None);
                render::render_screen(ui, t.to, &self.theme, to_rect, 1.0, scale, 0.0, None);
            }
            TransitionKind::None => {
                render::render_screen(ui, t.to, &self.theme, rect, 1.0, scale, 0.0, None);
            }
        }
    }

    fn draw_with_scroll(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        rect: egui::Rect,
        scale: f32,
        hover: Option<egui::Pos2>,
    ) {
        let body = render::body_rect(rect, scale);
        let overflow = if self.state.show_intro() {
            0.0
        } else {
            (self.content_height - body.height()).max(0.0)
        };

        self.scroll_target = self.scroll_target.clamp(0.0, overflow);

        // Animate: move 15% of the remaining distance each frame
        let diff = self.scroll_target - self.scroll_offset;
        if diff.abs() < 0.5 {
            self.scroll_offset = self.scroll_target;
        } else {
            self.scroll_offset += diff * 0.15;
            ctx.request_repaint();
        }
        let scroll = self.scroll_offset;

        let height = render::render_screen(ui, self.state, &self.theme, rect, 1.0, scale, scroll, hover);
        if height != self.content_height {
            self.content_height = height;
            ctx.request_repaint();
        }

        if overflow <= 0.0 {
            return;
        }

        let fade = 80.0 * scale;
        let bg = self.theme.background;
        let clear = Theme::with_opacity(bg, 0.0);
        let more_below = scroll < overflow - 0.5;
        let more_above = scroll > 0.5;
        if more_below {
            let band =
                egui::Rect::from_x_y_ranges(body.x_range(), (body.bottom() - fade)..=body.bottom());
            ui.painter().add(render::vertical_gradient(band, clear, bg));
        }
        if more_above {
            let band =
                egui::Rect::from_x_y_ranges(body.x_range(), body.top()..=(body.top() + fade));
            ui.painter().add(render::vertical_gradient(band, bg, clear));
        }

        let indicator_color = Theme::with_opacity(self.theme.foreground, 0.35);
        let indicator_font = egui::FontId::proportional(self.theme.body_size * 0.6 * scale);
        if more_below {
            render::text::draw_line(
                ui,
                "\u{25BC}",
                indicator_font.clone(),
                indicator_color,
                egui::pos2(body.center().x, body.bottom() - 24.0 * scale),
                egui::Align2::CENTER_CENTER,
            );
        }
        if more_above {
            render::text::draw_line(
                ui,
                "\u{25B2}",
                indicator_font,
                indicator_color,
                egui::pos2(body.center().x, body.top() + 20.0 * scale),
                egui::Align2::CENTER_CENTER,
            );
        }
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let color = Theme::with_opacity(self.theme.foreground, 0.3);
        let font = egui::FontId::monospace(14.0 * scale);

        render::text::draw_line(
            ui,
            &self.state.to_string(),
            font.clone(),
            color,
            egui::pos2(rect.right() - 16.0 * scale, rect.bottom() - 30.0 * scale),
            egui::Align2::RIGHT_TOP,
        );
        render::text::draw_line(
            ui,
            &format!("{:.0} fps", self.fps),
            font,
            color,
            egui::pos2(rect.left() + 16.0 * scale, rect.bottom() - 30.0 * scale),
            egui::Align2::LEFT_TOP,
        );
    }
}

const SHORTCUTS: [(&str, &str); 12] = [
    ("Space / \u{2192}", "Next panel / page"),
    ("\u{2190}", "Previous panel / page"),
    ("1 \u{2013} 8", "Jump to panel"),
    ("Enter", "Start presentation"),
    ("\u{2191} / \u{2193} / Wheel", "Scroll panel content"),
    ("Home / End", "First panel / summary"),
    ("Click tab", "Open panel"),
    ("T", "Cycle transition"),
    ("D", "Toggle theme"),
    ("F", "Toggle fullscreen"),
    ("H", "Toggle this HUD"),
    ("Q / Esc \u{00d7}2", "Quit"),
];

fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let bg = Theme::with_opacity(theme.surface, 0.95);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let hud_height = SHORTCUTS.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 400.0 * scale;

    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    render::text::draw_line(
        ui,
        "Keyboard Shortcuts",
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
        egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding),
        egui::Align2::LEFT_TOP,
    );

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in SHORTCUTS {
        render::text::draw_line(
            ui,
            key,
            egui::FontId::monospace(15.0 * scale),
            key_color,
            egui::pos2(hud_rect.left() + padding, y),
            egui::Align2::LEFT_TOP,
        );
        render::text::draw_line(
            ui,
            desc,
            egui::FontId::proportional(15.0 * scale),
            text_color,
            egui::pos2(hud_rect.left() + padding + 180.0 * scale, y),
            egui::Align2::LEFT_TOP,
        );
        y += line_height;
    }
}

/// First screen: `--panel` wins over the configured start panel.
fn initial_state(start_panel: Option<usize>, config: &Config) -> NavigationState {
    let start = match start_panel {
        Some(n) => StartPanel::Panel(n.saturating_sub(1)),
        None => config.start_panel().unwrap_or(StartPanel::Intro),
    };
    match start {
        StartPanel::Intro => NavigationState::INITIAL,
        StartPanel::Panel(index) => navigator::transition(NavigationState::INITIAL, NavEvent::Jump(index)),
    }
}

/// Open the dashboard. CLI flags override the config file.
pub fn run(windowed: bool, start_panel: Option<usize>, theme: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let windowed = windowed || config.windowed();
    let theme = Theme::from_name(theme.or(config.theme()).unwrap_or("light"));
    let transition = TransitionKind::from_name(config.transition().unwrap_or("slide"));
    let state = initial_state(start_panel, &config);

    tracing::info!(
        start = %state,
        theme = %theme.name,
        transition = transition.name(),
        windowed,
        "starting dashboard"
    );

    let title = "edudeck \u{00B7} Educación Superior Magallanes 2021";
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state, theme, transition)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0))
    }

    fn app_at(state: NavigationState) -> DashboardApp {
        let mut app = DashboardApp::new(state, Theme::light(), TransitionKind::Fade);
        app.last_rect = screen();
        app
    }

    #[test]
    fn test_initial_state_prefers_flag() {
        let mut config = Config::default();
        config.set("defaults.start_panel", "5").unwrap();
        assert_eq!(
            initial_state(Some(2), &config),
            NavigationState::panel(1).unwrap()
        );
        assert_eq!(
            initial_state(None, &config),
            NavigationState::panel(4).unwrap()
        );
        assert_eq!(
            initial_state(None, &Config::default()),
            NavigationState::INITIAL
        );
    }

    #[test]
    fn test_dispatch_starts_transition_and_resets_scroll() {
        let mut app = app_at(NavigationState::panel(2).unwrap());
        app.scroll_target = 300.0;
        app.scroll_offset = 300.0;
        app.dispatch(NavEvent::Next);

        assert_eq!(app.state, NavigationState::panel(3).unwrap());
        assert_eq!(app.scroll_target, 0.0);
        let t = app.transition.unwrap();
        assert_eq!(t.from, NavigationState::panel(2).unwrap());
        assert_eq!(t.to, app.state);
    }

    #[test]
    fn test_dispatch_during_transition_retargets() {
        let mut app = app_at(NavigationState::INITIAL);
        app.dispatch(NavEvent::Start);
        app.dispatch(NavEvent::Jump(5));

        assert_eq!(app.state, NavigationState::panel(5).unwrap());
        let t = app.transition.unwrap();
        assert_eq!(t.from, NavigationState::panel(0).unwrap());
        assert_eq!(t.to, app.state);
    }

    #[test]
    fn test_noop_event_keeps_transition_empty() {
        let mut app = app_at(NavigationState::INITIAL);
        app.dispatch(NavEvent::Prev);
        assert!(app.transition.is_none());
        assert_eq!(app.state, NavigationState::INITIAL);
    }

    #[test]
    fn test_click_on_intro_button_starts() {
        let app = app_at(NavigationState::INITIAL);
        let button = intro::button_rect(screen(), 1.0);
        assert_eq!(app.click_event(button.center()), Some(NavEvent::Start));
        assert_eq!(app.click_event(egui::pos2(10.0, 10.0)), None);
    }

    #[test]
    fn test_click_on_tab_selects() {
        let app = app_at(NavigationState::panel(0).unwrap());
        let tab = tabs::tab_rects(screen(), 1.0)[6];
        assert_eq!(app.click_event(tab.center()), Some(NavEvent::Select(6)));
    }

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn click(pos: egui::Pos2) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_follows_delivery_order() {
        let mut app = app_at(NavigationState::panel(0).unwrap());
        app.handle_navigation(&[key(egui::Key::End), key(egui::Key::ArrowRight)]);
        assert!(app.state.is_summary());
        assert_eq!(app.state.summary_page(), 1);

        let mut app = app_at(NavigationState::panel(0).unwrap());
        app.handle_navigation(&[key(egui::Key::ArrowRight), key(egui::Key::Home)]);
        assert_eq!(app.state, NavigationState::panel(0).unwrap());
    }

    #[test]
    fn test_clicks_interleave_with_keys() {
        let mut app = app_at(NavigationState::INITIAL);
        let button = intro::button_rect(screen(), 1.0).center();
        let tab = tabs::tab_rects(screen(), 1.0)[4].center();
        app.handle_navigation(&[click(button), click(tab), key(egui::Key::ArrowLeft)]);
        assert_eq!(app.state, NavigationState::panel(3).unwrap());
    }
}
