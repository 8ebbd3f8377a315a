use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::catalog;
use crate::navigator::{self, NavigationState};
use crate::render;
use crate::theme::Theme;

struct ExportApp {
    screens: Vec<NavigationState>,
    theme: Theme,
    output_dir: PathBuf,
    current: usize,
    screenshot_requested: bool,
    /// Files that could not be written, read back by `run`
    failures: Arc<Mutex<Vec<String>>>,
    done: bool,
}

impl ExportApp {
    fn new(theme: Theme, output_dir: PathBuf, failures: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            screens: navigator::tour(),
            theme,
            output_dir,
            current: 0,
            screenshot_requested: false,
            failures,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let filename = file_name(self.current, self.screens[self.current]);
                    let path = self.output_dir.join(&filename);
                    match save_color_image(image, &path) {
                        Ok(()) => tracing::info!("saved {filename}"),
                        Err(e) => {
                            tracing::error!("failed to save {}: {e}", path.display());
                            if let Ok(mut failures) = self.failures.lock() {
                                failures.push(filename);
                            }
                        }
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current += 1;
            if self.current >= self.screens.len() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let bg = self.theme.background;
        let state = self.screens[self.current];

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = render::compute_scale(rect);
                render::render_screen(ui, state, &self.theme, rect, 1.0, scale, 0.0, None);
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

/// `screen-NN-<slug>.png`, numbered from 1 in tour order.
fn file_name(position: usize, state: NavigationState) -> String {
    format!("screen-{:02}-{}.png", position + 1, slug(state))
}

fn slug(state: NavigationState) -> String {
    let Some(panel) = catalog::panel_for(state) else {
        return "intro".to_string();
    };
    let mut slug: String = panel
        .label
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect();
    if panel.page_count() > 1 {
        slug.push_str(&format!("-{}", state.summary_page() + 1));
    }
    slug
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)?;
    Ok(())
}

pub fn run(output_dir: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    std::fs::create_dir_all(&output_dir)?;

    let config = crate::config::Config::load_or_default();
    let theme = Theme::from_name(config.theme().unwrap_or("light"));
    let screen_count = navigator::tour().len();
    tracing::info!(
        screens = screen_count,
        dir = %output_dir.display(),
        width,
        height,
        "exporting"
    );
    eprintln!(
        "Exporting {} screens to {} ({}x{})",
        screen_count,
        output_dir.display(),
        width,
        height,
    );

    let title = "edudeck export";
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let failures = Arc::new(Mutex::new(Vec::new()));
    let app_failures = Arc::clone(&failures);
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(theme, output_dir, app_failures)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let failures = failures
        .lock()
        .map_err(|_| anyhow::anyhow!("export state poisoned"))?;
    if !failures.is_empty() {
        anyhow::bail!("Failed to save {}", failures.join(", "));
    }
    eprintln!("Export complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_tour() {
        let names: Vec<String> = navigator::tour()
            .into_iter()
            .enumerate()
            .map(|(i, s)| file_name(i, s))
            .collect();
        assert_eq!(names.first().unwrap(), "screen-01-intro.png");
        assert_eq!(names[1], "screen-02-genero.png");
        assert_eq!(names[5], "screen-06-areas.png");
        assert_eq!(names[6], "screen-07-duracion.png");
        assert_eq!(names[8], "screen-09-resumen-1.png");
        assert_eq!(names.last().unwrap(), "screen-10-resumen-2.png");
    }
}
