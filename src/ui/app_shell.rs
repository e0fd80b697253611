use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use eframe::egui;
use eframe::egui::load::SizedTexture;
use image::RgbaImage;

use crate::app::controller::{SorterController, EMPTY_NOTICE};
use crate::app::events::AppEvent;
use crate::engine::animation::Animation;
use crate::engine::decode::{decode_for_display, decode_icon, DisplayImage};
use crate::ui::dialogs::{Prompt, PromptKind, PromptOutcome};

const WINDOW_TITLE: &str = "Image Sorter";
const GRID_COLUMNS: usize = 4;
const BUTTON_SIZE: f32 = 120.0;

/// Textures for the image on screen. Replacing it drops the old animation.
struct ImageView {
    name: String,
    frames: Vec<egui::TextureHandle>,
    animation: Option<Animation>,
}

impl ImageView {
    fn load(ctx: &egui::Context, path: &Path) -> Result<Self, String> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let decoded = decode_for_display(path).map_err(|error| error.to_string())?;

        let (frames, animation) = match decoded {
            DisplayImage::Still(frame) => (vec![to_texture(ctx, &name, &frame)], None),
            DisplayImage::Animated(frames) => {
                let textures: Vec<_> = frames
                    .iter()
                    .enumerate()
                    .map(|(index, frame)| to_texture(ctx, &format!("{name}#{index}"), frame))
                    .collect();
                let animation = Animation::start(textures.len(), Instant::now());
                (textures, Some(animation))
            }
        };

        Ok(Self {
            name,
            frames,
            animation,
        })
    }

    fn texture(&self) -> Option<&egui::TextureHandle> {
        let index = self.animation.as_ref().map_or(0, Animation::frame);
        self.frames.get(index)
    }

    fn caption(&self) -> String {
        if self.animation.is_some() {
            format!("Showing GIF: {}", self.name)
        } else {
            format!("Showing image: {}", self.name)
        }
    }
}

pub struct SorterApp {
    controller: SorterController,
    view: Option<ImageView>,
    view_error: Option<String>,
    icons: HashMap<PathBuf, egui::TextureHandle>,
    seen_image_revision: Option<u64>,
    seen_panel_revision: Option<u64>,
    prompt: Option<Prompt>,
}

impl SorterApp {
    fn new(controller: SorterController) -> Self {
        Self {
            controller,
            view: None,
            view_error: None,
            icons: HashMap::new(),
            seen_image_revision: None,
            seen_panel_revision: None,
            prompt: None,
        }
    }

    fn sync_image(&mut self, ctx: &egui::Context) {
        let revision = self.controller.state().image_revision;
        if self.seen_image_revision == Some(revision) {
            return;
        }
        self.seen_image_revision = Some(revision);
        self.view = None;
        self.view_error = None;

        let Some(path) = self.controller.browser().current_path() else {
            return;
        };
        match ImageView::load(ctx, &path) {
            Ok(view) => self.view = Some(view),
            Err(error) => {
                log::warn!("{error}");
                self.view_error = Some(error);
            }
        }
    }

    fn sync_icons(&mut self, ctx: &egui::Context) {
        let revision = self.controller.state().panel_revision;
        if self.seen_panel_revision == Some(revision) {
            return;
        }
        self.seen_panel_revision = Some(revision);
        self.icons.clear();

        for entry in self.controller.panel().entries() {
            let Some(preview) = &entry.preview else {
                continue;
            };
            match decode_icon(preview) {
                Ok(icon) => {
                    let texture = to_texture(ctx, &entry.name, &icon);
                    self.icons.insert(entry.path.clone(), texture);
                }
                Err(error) => log::warn!("skipping icon for {}: {error}", entry.name),
            }
        }
    }

    fn tick_animation(&mut self, ctx: &egui::Context) {
        let Some(animation) = self.view.as_mut().and_then(|view| view.animation.as_mut()) else {
            return;
        };
        let now = Instant::now();
        animation.tick(now);
        if let Some(delay) = animation.next_deadline(now) {
            ctx.request_repaint_after(delay);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context, events: &mut Vec<AppEvent>) {
        if self.prompt.is_some() {
            return;
        }
        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        }
        if ctx.input_mut(|input| input.consume_key(egui::Modifiers::COMMAND, egui::Key::Z)) {
            events.push(AppEvent::Undo);
        }
        if ctx.input_mut(|input| input.consume_key(egui::Modifiers::COMMAND, egui::Key::F)) {
            self.prompt = Some(Prompt::new(PromptKind::Search));
        }
        if ctx.input_mut(|input| input.consume_key(egui::Modifiers::COMMAND, egui::Key::T)) {
            self.prompt = Some(Prompt::new(PromptKind::AddCategory));
        }
    }

    fn info_line(&self) -> (String, bool) {
        if let Some(error) = &self.view_error {
            return (error.clone(), true);
        }
        if let Some(notice) = &self.controller.state().notice {
            return (notice.text.clone(), notice.is_error);
        }
        match (&self.view, self.controller.browser().position()) {
            (Some(view), Some(position)) => (
                format!(
                    "{} ({}/{})",
                    view.caption(),
                    position + 1,
                    self.controller.browser().len()
                ),
                false,
            ),
            _ => (EMPTY_NOTICE.to_string(), false),
        }
    }

    fn image_side(&self, ui: &mut egui::Ui, events: &mut Vec<AppEvent>) {
        egui::TopBottomPanel::bottom("image_actions")
            .show_separator_line(false)
            .show_inside(ui, |ui| {
                ui.horizontal(|ui| {
                    let undo = ui.add_enabled(
                        self.controller.browser().can_undo(),
                        egui::Button::new("Undo"),
                    );
                    if undo.clicked() {
                        events.push(AppEvent::Undo);
                    }
                    if ui.button("Source folder").clicked() {
                        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                            events.push(AppEvent::SelectSourceFolder(folder));
                        }
                    }
                    if ui.button("Target folder").clicked() {
                        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                            events.push(AppEvent::SelectTargetFolder(folder));
                        }
                    }
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(texture) = self.view.as_ref().and_then(ImageView::texture) {
                    let room = (ui.available_size() - egui::vec2(0.0, 40.0)).max(egui::Vec2::ZERO);
                    ui.add(
                        egui::Image::from_texture(SizedTexture::from_handle(texture))
                            .max_size(room)
                            .maintain_aspect_ratio(true),
                    );
                }
                let (text, is_error) = self.info_line();
                let text = egui::RichText::new(text).size(16.0);
                if is_error {
                    ui.label(text.color(ui.visuals().error_fg_color));
                } else {
                    ui.label(text);
                }
            });
        });
    }

    fn category_side(&mut self, ui: &mut egui::Ui, events: &mut Vec<AppEvent>) {
        ui.horizontal(|ui| {
            let target = &self.controller.config().target_folder;
            if target.is_empty() {
                ui.label("No target folder selected");
            } else {
                ui.label(format!("Target: {target}"));
            }
            if ui.button("Add button").clicked() {
                self.prompt = Some(Prompt::new(PromptKind::AddCategory));
            }
            if ui.button("Search").clicked() {
                self.prompt = Some(Prompt::new(PromptKind::Search));
            }
        });
        ui.separator();

        let panel = self.controller.panel();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(keyword) = panel.filter() {
                    ui.horizontal(|ui| {
                        if ui.button("X").clicked() {
                            events.push(AppEvent::ResetSearch);
                        }
                        ui.label(format!("Filtered by \"{keyword}\""));
                    });
                }

                egui::Grid::new("category_grid")
                    .spacing([10.0, 10.0])
                    .show(ui, |ui| {
                        for (index, entry) in panel.visible().enumerate() {
                            if index > 0 && index % GRID_COLUMNS == 0 {
                                ui.end_row();
                            }
                            let button = match self.icons.get(&entry.path) {
                                Some(icon) => egui::Button::image_and_text(
                                    egui::Image::from_texture(SizedTexture::from_handle(icon)),
                                    entry.name.as_str(),
                                ),
                                None => egui::Button::new(entry.name.as_str()),
                            };
                            let clicked = ui
                                .add(button.min_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE)))
                                .on_hover_text(entry.path.display().to_string())
                                .clicked();
                            if clicked {
                                events.push(AppEvent::MoveToCategory(entry.path.clone()));
                            }
                        }
                    });
            });
    }

    fn show_prompt(&mut self, ctx: &egui::Context, events: &mut Vec<AppEvent>) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match prompt.show(ctx) {
            PromptOutcome::Pending => {}
            PromptOutcome::Submitted(text) => {
                events.push(prompt.kind().into_event(text));
                self.prompt = None;
            }
            PromptOutcome::Cancelled => self.prompt = None,
        }
    }
}

impl eframe::App for SorterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        self.handle_shortcuts(ctx, &mut events);

        self.sync_image(ctx);
        self.sync_icons(ctx);
        self.tick_animation(ctx);

        egui::SidePanel::left("image_side")
            .resizable(false)
            .exact_width(ctx.screen_rect().width() / 3.0)
            .show(ctx, |ui| self.image_side(ui, &mut events));

        egui::CentralPanel::default().show(ctx, |ui| self.category_side(ui, &mut events));

        self.show_prompt(ctx, &mut events);

        if !events.is_empty() {
            for event in events {
                self.controller.dispatch(event);
            }
            ctx.request_repaint();
        }
    }
}

fn to_texture(ctx: &egui::Context, name: &str, frame: &RgbaImage) -> egui::TextureHandle {
    let size = [frame.width() as usize, frame.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
    ctx.load_texture(name, image, egui::TextureOptions::LINEAR)
}

pub fn launch_window(controller: SorterController) -> Result<(), String> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_fullscreen(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(SorterApp::new(controller)))
        }),
    )
    .map_err(|error| format!("failed to start UI: {error}"))
}
