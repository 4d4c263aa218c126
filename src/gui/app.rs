//! Main GUI application
//!
//! Draws the sidebar, game list and cover, and forwards keyboard events
//! and the poll timer to the launcher context.

use eframe::egui;
use gamedeck::core::input::Key;
use gamedeck::core::library::EntryId;
use gamedeck::core::selection::SidebarAction;
use gamedeck::core::theme::{Theme, Tint};
use gamedeck::core::{LauncherContext, Notice, NoticeLevel, UiRequest};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Main launcher application state
pub struct LauncherApp {
    launcher: LauncherContext,
    /// Last time the gamepad and music were polled
    last_tick: Instant,
    poll_interval: Duration,
    /// Open modal, if any
    dialog: Option<Dialog>,
    /// Most recent message for the status bar
    status: Option<Notice>,
    textures: TextureCache,
}

enum Dialog {
    AddGame { path: String },
    Cover { input: String },
    Theme { choice: Theme },
    ConfirmRemove(EntryId),
}

const KEYS: [(egui::Key, Key); 4] = [
    (egui::Key::ArrowUp, Key::Up),
    (egui::Key::ArrowDown, Key::Down),
    (egui::Key::Enter, Key::Enter),
    (egui::Key::Escape, Key::Escape),
];

impl LauncherApp {
    pub fn new(launcher: LauncherContext) -> Self {
        let poll_interval = launcher.config().general.poll_interval();
        Self {
            launcher,
            last_tick: Instant::now(),
            poll_interval,
            dialog: None,
            status: None,
            textures: TextureCache::default(),
        }
    }

    fn handle_request(&mut self, request: UiRequest, ctx: &egui::Context) {
        match request {
            UiRequest::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            UiRequest::ChooseTheme => {
                self.dialog = Some(Dialog::Theme {
                    choice: self.launcher.theme(),
                })
            }
            UiRequest::PromptAddGame => {
                self.dialog = Some(Dialog::AddGame {
                    path: String::new(),
                })
            }
            UiRequest::ConfirmRemove(id) => self.dialog = Some(Dialog::ConfirmRemove(id)),
            // The cover area follows the selection every frame
            UiRequest::SelectionCleared => {}
        }
    }

    fn poll(&mut self, ctx: &egui::Context) {
        if self.last_tick.elapsed() >= self.poll_interval {
            self.last_tick = Instant::now();
            if self.dialog.is_some() {
                self.launcher.tick_suspended();
            } else if let Some(request) = self.launcher.tick() {
                self.handle_request(request, ctx);
            }
        }

        // Dialogs own the keyboard while open
        if self.dialog.is_none() {
            for (egui_key, key) in KEYS {
                if ctx.input(|i| i.key_pressed(egui_key)) {
                    if let Some(request) = self.launcher.handle_key(key) {
                        self.handle_request(request, ctx);
                    }
                }
            }
        }

        if let Some(notice) = self.launcher.drain_notices().pop() {
            self.status = Some(notice);
        }
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let style = self.launcher.theme().style();
        let (tint, hover) = (color(style.tint), color(style.hover));
        ctx.style_mut(|s| {
            s.visuals.widgets.inactive.weak_bg_fill = tint;
            s.visuals.widgets.inactive.bg_fill = tint;
            s.visuals.widgets.hovered.weak_bg_fill = hover;
            s.visuals.widgets.hovered.bg_fill = hover;
            s.visuals.selection.bg_fill = hover;
        });
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll(ctx);
        self.apply_theme(ctx);

        // Left panel - Sidebar actions
        egui::SidePanel::left("sidebar")
            .exact_width(140.0)
            .show(ctx, |ui| self.show_sidebar(ui, ctx));

        // Bottom panel - Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(Notice {
                        level: NoticeLevel::Warning,
                        message,
                    }) => {
                        ui.colored_label(egui::Color32::YELLOW, format!("⚠ {}", message));
                    }
                    Some(notice) => {
                        ui.label(&notice.message);
                    }
                    None => {
                        ui.label("Ready");
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(track) = self.launcher.now_playing().and_then(Path::file_stem) {
                        ui.label(format!("♪ {}", track.to_string_lossy()));
                    }
                });
            });
        });

        // Game list
        egui::SidePanel::left("games")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.show_games(ui));

        // Central panel - Cover and actions
        egui::CentralPanel::default().show(ctx, |ui| self.show_cover(ui, ctx));

        if let Some(mut dialog) = self.dialog.take() {
            if self.show_dialog(ctx, &mut dialog) {
                self.dialog = Some(dialog);
            }
        }

        ctx.request_repaint_after(self.poll_interval);
    }
}

impl LauncherApp {
    fn show_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let launchers = &self.launcher.config().launchers;
        let labels = (launchers.primary.label.clone(), launchers.secondary.label.clone());
        let actions = self.launcher.selection().sidebar().to_vec();
        let focused = self.launcher.selection().sidebar_focus();

        ui.add_space(8.0);
        for (i, action) in actions.into_iter().enumerate() {
            let label = match action {
                SidebarAction::PrimaryLauncher => labels.0.as_str(),
                SidebarAction::SecondaryLauncher => labels.1.as_str(),
                other => other.label(),
            };
            let button = egui::Button::new(label).selected(i == focused);
            if ui.add_sized([124.0, 48.0], button).clicked() {
                if let Some(request) = self.launcher.run_sidebar(action) {
                    self.handle_request(request, ctx);
                }
            }
            ui.add_space(4.0);
        }
    }

    fn show_games(&mut self, ui: &mut egui::Ui) {
        ui.heading("Games");
        ui.separator();

        if self.launcher.library().is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label("No games yet.");
                ui.label("Use 'Add Game' to register one.");
            });
            return;
        }

        let current = self.launcher.selection().current();
        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, game) in self.launcher.library().entries().iter().enumerate() {
                let text = egui::RichText::new(&game.name).size(18.0);
                if ui.selectable_label(current == Some(i), text).clicked() {
                    clicked = Some(i);
                }
            }
        });
        if let Some(i) = clicked {
            self.launcher.select(i);
        }
    }

    fn show_cover(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let background = self
            .launcher
            .config()
            .general
            .resource_dir
            .join(self.launcher.theme().style().background);
        if let Some(texture) = self.textures.get(ctx, &background) {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .image(texture.id(), ui.max_rect(), uv, egui::Color32::WHITE);
        }

        let Some(game) = self.launcher.selected_entry().cloned() else {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label("Select a game");
            });
            return;
        };

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("▶ Play").min_size(egui::vec2(120.0, 36.0)))
                    .clicked()
                {
                    if let Some(request) = self.launcher.launch(game.id) {
                        self.handle_request(request, ctx);
                    }
                }
                if ui.button("🖼 Change Cover").clicked() {
                    self.dialog = Some(Dialog::Cover {
                        input: String::new(),
                    });
                }
            });
            ui.add_space(10.0);

            ui.centered_and_justified(|ui| {
                let texture = game
                    .cover
                    .as_deref()
                    .and_then(|cover| self.textures.get(ctx, cover));
                match texture {
                    Some(texture) => {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                &texture,
                            ))
                            .shrink_to_fit(),
                        );
                    }
                    None => {
                        ui.heading(&game.name);
                    }
                }
            });
        });
    }

    /// Draw the open dialog. Returns false once it should close.
    fn show_dialog(&mut self, ctx: &egui::Context, dialog: &mut Dialog) -> bool {
        let mut keep = true;
        let title = match dialog {
            Dialog::AddGame { .. } => "Add Game",
            Dialog::Cover { .. } => "Change Cover",
            Dialog::Theme { .. } => "Theme",
            Dialog::ConfirmRemove(_) => "Remove Game",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                match dialog {
                    Dialog::AddGame { path } => {
                        ui.label("Path to the game executable:");
                        ui.text_edit_singleline(path);
                        ui.horizontal(|ui| {
                            if ui.button("Add").clicked() && !path.trim().is_empty() {
                                self.launcher.add_game(PathBuf::from(path.trim()));
                                keep = false;
                            }
                            if ui.button("Cancel").clicked() {
                                keep = false;
                            }
                        });
                    }
                    Dialog::Cover { input } => {
                        ui.label("Image file, URL or data:image value:");
                        ui.text_edit_singleline(input);
                        ui.horizontal(|ui| {
                            if ui.button("Apply").clicked() && !input.trim().is_empty() {
                                if self.launcher.change_cover(input.as_str()) {
                                    if let Some(cover) = self
                                        .launcher
                                        .selected_entry()
                                        .and_then(|g| g.cover.clone())
                                    {
                                        self.textures.forget(&cover);
                                    }
                                }
                                keep = false;
                            }
                            if ui.button("Cancel").clicked() {
                                keep = false;
                            }
                        });
                    }
                    Dialog::Theme { choice } => {
                        for theme in Theme::ALL {
                            ui.radio_value(choice, theme, theme.name());
                        }
                        ui.horizontal(|ui| {
                            if ui.button("OK").clicked() {
                                self.launcher.set_theme(choice.name());
                                keep = false;
                            }
                            if ui.button("Cancel").clicked() {
                                keep = false;
                            }
                        });
                    }
                    Dialog::ConfirmRemove(id) => {
                        let name = self
                            .launcher
                            .library()
                            .find(*id)
                            .map(|g| g.name.clone())
                            .unwrap_or_default();
                        ui.label(format!("Remove {}?", name));
                        ui.horizontal(|ui| {
                            if ui.button("Yes").clicked() {
                                if let Some(request) = self.launcher.remove(*id) {
                                    self.handle_request(request, ctx);
                                }
                                keep = false;
                            }
                            if ui.button("No").clicked() {
                                keep = false;
                            }
                        });
                    }
                }
            });

        keep
    }
}

/// Decoded images keyed by path; failed loads are remembered as `None`
#[derive(Default)]
struct TextureCache {
    entries: HashMap<PathBuf, Option<egui::TextureHandle>>,
}

impl TextureCache {
    fn get(&mut self, ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
        self.entries
            .entry(path.to_path_buf())
            .or_insert_with(|| load_texture(ctx, path))
            .clone()
    }

    fn forget(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

fn load_texture(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
    if !path.exists() {
        return None;
    }
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(e) => {
            tracing::warn!("Cannot decode {:?}: {}", path, e);
            return None;
        }
    };
    let size = [image.width() as usize, image.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture(
        path.to_string_lossy(),
        pixels,
        egui::TextureOptions::LINEAR,
    ))
}

fn color(tint: Tint) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(tint.r, tint.g, tint.b, tint.a)
}
