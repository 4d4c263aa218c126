//! Launcher context
//!
//! The one top-level owner of library, selection, theme, music and input
//! state. Presentation layers hold a `LauncherContext` and call into it;
//! anything that needs a window (dialogs, closing) comes back as a
//! [`UiRequest`].

use crate::config::{Config, ExternalLauncher};
use crate::core::cover::{CoverResolver, CoverSource};
use crate::core::error::LauncherError;
use crate::core::input::{Command, Gamepad, GilrsGamepad, InputCoordinator, Key};
use crate::core::launch::{Launch, SystemLauncher};
use crate::core::library::{EntryId, GameEntry, Library, LibraryStore};
use crate::core::playlist::{Playlist, RodioOutput};
use crate::core::selection::{RemovalEffect, Selection, SidebarAction};
use crate::core::theme::Theme;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Something the presentation layer has to do on the core's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    Close,
    ChooseTheme,
    PromptAddGame,
    ConfirmRemove(EntryId),
    /// The selected game went away; clear its cover and title
    SelectionCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub struct LauncherContext {
    config: Config,
    store: LibraryStore,
    library: Library,
    selection: Selection,
    theme: Theme,
    resolver: CoverResolver,
    input: InputCoordinator,
    gamepad: Option<Box<dyn Gamepad>>,
    playlist: Option<Playlist>,
    launcher: Box<dyn Launch>,
    notices: Vec<Notice>,
}

impl LauncherContext {
    /// Full context with gamepad and music. Fails only when the library
    /// cannot be read or the cover directory cannot be created.
    pub fn open(config: Config) -> Result<Self> {
        let mut ctx = Self::headless(config)?;

        match GilrsGamepad::new() {
            Ok(pad) => ctx.gamepad = Some(Box::new(pad)),
            Err(e) => tracing::warn!("Gamepad support disabled: {}", e),
        }

        let audio = &ctx.config.audio;
        if audio.enabled && !audio.tracks.is_empty() {
            match RodioOutput::new(audio.volume) {
                Ok(output) => {
                    ctx.playlist = Some(Playlist::new(audio.tracks.clone(), Box::new(output)))
                }
                Err(e) => tracing::warn!("Music disabled: {}", e),
            }
        }

        Ok(ctx)
    }

    /// Context without input devices or music, for the command line
    pub fn headless(config: Config) -> Result<Self> {
        Self::with_launcher(config, Box::new(SystemLauncher))
    }

    pub fn with_launcher(config: Config, launcher: Box<dyn Launch>) -> Result<Self> {
        let store = LibraryStore::new(&config.library.file);
        let library = store.load()?;
        let resolver = CoverResolver::new(
            &config.library.cover_dir,
            Duration::from_secs(config.network.timeout_seconds),
        )?;
        let selection = Selection::new(config.sidebar.actions.clone());

        tracing::info!(
            "Library {:?}: {} games, covers in {:?}",
            store.path(),
            library.len(),
            resolver.asset_dir()
        );

        Ok(Self {
            config,
            store,
            library,
            selection,
            theme: Theme::default(),
            resolver,
            input: InputCoordinator::new(),
            gamepad: None,
            playlist: None,
            launcher,
            notices: Vec::new(),
        })
    }

    pub fn set_gamepad(&mut self, gamepad: Box<dyn Gamepad>) {
        self.gamepad = Some(gamepad);
        self.input.reset();
    }

    pub fn set_playlist(&mut self, playlist: Playlist) {
        self.playlist = Some(playlist);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn now_playing(&self) -> Option<&Path> {
        self.playlist.as_ref().and_then(|p| p.current())
    }

    pub fn selected_entry(&self) -> Option<&GameEntry> {
        self.selection.current().and_then(|i| self.library.get(i))
    }

    /// Take the messages collected since the last call
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// One poll of the gamepad and the music
    pub fn tick(&mut self) -> Option<UiRequest> {
        let mut request = None;

        if let Some(gamepad) = self.gamepad.as_mut() {
            match gamepad.poll() {
                Some(state) => {
                    let len = self.library.len();
                    if let Some(command) = self.input.apply_pad(state, &mut self.selection, len) {
                        request = self.dispatch(command);
                    }
                }
                None => self.input.reset(),
            }
        }

        self.tick_music();
        request
    }

    /// Tick while a modal dialog owns input. Music keeps advancing and
    /// the controller is sampled so held buttons do not fire on close.
    pub fn tick_suspended(&mut self) {
        if let Some(gamepad) = self.gamepad.as_mut() {
            match gamepad.poll() {
                Some(state) => self.input.observe(state),
                None => self.input.reset(),
            }
        }
        self.tick_music();
    }

    fn tick_music(&mut self) {
        if let Some(playlist) = self.playlist.as_mut() {
            playlist.tick();
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Option<UiRequest> {
        let len = self.library.len();
        let command = self.input.handle_key(key, &mut self.selection, len)?;
        self.dispatch(command)
    }

    pub fn dispatch(&mut self, command: Command) -> Option<UiRequest> {
        match command {
            Command::LaunchSelected => self.launch_selected(),
            Command::Sidebar(action) => self.run_sidebar(action),
            Command::CycleTheme => {
                self.cycle_theme();
                None
            }
            Command::Close => Some(UiRequest::Close),
        }
    }

    pub fn run_sidebar(&mut self, action: SidebarAction) -> Option<UiRequest> {
        match action {
            SidebarAction::PrimaryLauncher => {
                let target = self.config.launchers.primary.clone();
                self.launch_external(&target)
            }
            SidebarAction::SecondaryLauncher => {
                let target = self.config.launchers.secondary.clone();
                self.launch_external(&target)
            }
            SidebarAction::AddGame => Some(UiRequest::PromptAddGame),
            SidebarAction::RemoveGame => match self.selected_entry().map(|e| e.id) {
                Some(id) => Some(UiRequest::ConfirmRemove(id)),
                None => {
                    self.warn(LauncherError::NothingSelected);
                    None
                }
            },
            SidebarAction::PlaySelected => self.launch_selected(),
            SidebarAction::ChangeTheme => Some(UiRequest::ChooseTheme),
        }
    }

    pub fn select(&mut self, index: usize) {
        self.selection.select(index, self.library.len());
    }

    /// Register an executable, named after its file stem
    pub fn add_game(&mut self, path: impl Into<PathBuf>) -> Option<EntryId> {
        self.add_entry(GameEntry::from_executable(path))
    }

    /// Register a game and select it
    pub fn add_entry(&mut self, entry: GameEntry) -> Option<EntryId> {
        let name = entry.name.clone();
        match self.store.add(&mut self.library, entry) {
            Ok(id) => {
                self.select(self.library.len() - 1);
                self.info(format!("Added {}", name));
                Some(id)
            }
            Err(e) => {
                self.warn(e);
                None
            }
        }
    }

    pub fn remove_selected(&mut self) -> Option<UiRequest> {
        match self.selected_entry().map(|e| e.id) {
            Some(id) => self.remove(id),
            None => {
                self.warn(LauncherError::NothingSelected);
                None
            }
        }
    }

    /// Remove a game by id. Asks the presentation to clear the cover
    /// when the removed game was the selected one.
    pub fn remove(&mut self, id: EntryId) -> Option<UiRequest> {
        match self.store.remove(&mut self.library, id) {
            Ok(Some((index, entry))) => {
                self.info(format!("Removed {}", entry.name));
                match self.selection.on_removed(index) {
                    RemovalEffect::Cleared => Some(UiRequest::SelectionCleared),
                    RemovalEffect::Kept => None,
                }
            }
            Ok(None) => None,
            Err(e) => {
                self.warn(e);
                None
            }
        }
    }

    /// Change the selected game's cover from raw user input
    pub fn change_cover(&mut self, input: &str) -> bool {
        match self.selected_entry().map(|e| e.id) {
            Some(id) => self.change_cover_for(id, input),
            None => {
                self.warn(LauncherError::NothingSelected);
                false
            }
        }
    }

    /// Resolve `input` into the cover directory and attach it to `id`.
    /// On failure the entry keeps its previous cover.
    pub fn change_cover_for(&mut self, id: EntryId, input: &str) -> bool {
        let Some(name) = self.library.find(id).map(|e| e.name.clone()) else {
            return false;
        };

        let result = CoverSource::parse(input)
            .and_then(|source| self.resolver.resolve(&name, &source))
            .and_then(|resolved| {
                self.store
                    .set_cover(&mut self.library, id, resolved.path.clone())
                    .map(|_| resolved)
            });

        match result {
            Ok(resolved) => {
                tracing::info!("Cover for '{}' set to {:?}", name, resolved.path);
                self.info(format!("Cover updated for {}", name));
                true
            }
            Err(e) => {
                self.warn(e);
                false
            }
        }
    }

    pub fn set_theme(&mut self, name: &str) -> bool {
        match name.parse::<Theme>() {
            Ok(theme) => {
                self.theme = theme;
                tracing::debug!("Theme set to {}", theme);
                true
            }
            Err(e) => {
                self.warn(e);
                false
            }
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        tracing::debug!("Theme cycled to {}", self.theme);
    }

    pub fn launch_selected(&mut self) -> Option<UiRequest> {
        match self.selected_entry().map(|e| e.id) {
            Some(id) => self.launch(id),
            None => {
                self.warn(LauncherError::NothingSelected);
                None
            }
        }
    }

    pub fn launch(&mut self, id: EntryId) -> Option<UiRequest> {
        let entry = self.library.find(id)?.clone();
        match self.launcher.open(&entry.path) {
            Ok(()) => {
                self.info(format!("Started {}", entry.name));
                self.config
                    .general
                    .close_on_launch
                    .then_some(UiRequest::Close)
            }
            Err(e) => {
                self.warn(e);
                None
            }
        }
    }

    fn launch_external(&mut self, target: &ExternalLauncher) -> Option<UiRequest> {
        if target.path.trim().is_empty() {
            self.notices.push(Notice {
                level: NoticeLevel::Warning,
                message: format!("{} is not configured", target.label),
            });
            return None;
        }
        if let Err(e) = self.launcher.open(Path::new(&target.path)) {
            self.warn(e);
        }
        None
    }

    fn info(&mut self, message: String) {
        self.notices.push(Notice {
            level: NoticeLevel::Info,
            message,
        });
    }

    fn warn(&mut self, error: LauncherError) {
        tracing::warn!("{}", error);
        self.notices.push(Notice {
            level: NoticeLevel::Warning,
            message: error.to_string(),
        });
    }
}
