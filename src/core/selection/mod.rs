//! Selection model
//!
//! Tracks which game is selected and which sidebar action has focus.
//! Holds indices only; the library itself lives in the store.

use serde::{Deserialize, Serialize};

/// Non-list actions reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarAction {
    PrimaryLauncher,
    SecondaryLauncher,
    AddGame,
    RemoveGame,
    PlaySelected,
    ChangeTheme,
}

impl SidebarAction {
    pub fn default_set() -> Vec<SidebarAction> {
        vec![
            Self::PrimaryLauncher,
            Self::SecondaryLauncher,
            Self::AddGame,
            Self::RemoveGame,
            Self::ChangeTheme,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PrimaryLauncher => "Launcher 1",
            Self::SecondaryLauncher => "Launcher 2",
            Self::AddGame => "Add Game",
            Self::RemoveGame => "Remove Game",
            Self::PlaySelected => "Play",
            Self::ChangeTheme => "Theme",
        }
    }
}

/// Region that most recently received navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Sidebar,
}

/// What happened to the selection after a removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalEffect {
    /// The selected game was removed; the presentation should clear it
    Cleared,
    /// Selection still points at the same game, possibly at a new index
    Kept,
}

#[derive(Debug, Clone)]
pub struct Selection {
    current: Option<usize>,
    sidebar: Vec<SidebarAction>,
    sidebar_focus: usize,
    focus: Focus,
}

impl Selection {
    pub fn new(sidebar: Vec<SidebarAction>) -> Self {
        let sidebar = if sidebar.is_empty() {
            SidebarAction::default_set()
        } else {
            sidebar
        };
        Self {
            current: None,
            sidebar,
            sidebar_focus: 0,
            focus: Focus::List,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn sidebar(&self) -> &[SidebarAction] {
        &self.sidebar
    }

    pub fn sidebar_focus(&self) -> usize {
        self.sidebar_focus
    }

    pub fn focused_action(&self) -> SidebarAction {
        self.sidebar[self.sidebar_focus]
    }

    /// Select `index` when it is within the library; otherwise nothing changes
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.current = Some(index);
            self.focus = Focus::List;
        }
    }

    /// Move through the list, wrapping at both ends.
    /// No selection counts as the row just before the first game.
    pub fn move_list(&mut self, delta: isize, len: usize) {
        if len == 0 || delta == 0 {
            return;
        }
        let len = len as isize;
        let next = match self.current {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None => (delta - 1).rem_euclid(len),
        };
        self.current = Some(next as usize);
        self.focus = Focus::List;
    }

    /// Move through the list, stopping at the ends instead of wrapping
    pub fn step_list(&mut self, delta: isize, len: usize) {
        if len == 0 || delta == 0 {
            return;
        }
        let next = match self.current {
            Some(i) => i as isize + delta,
            None if delta > 0 => delta - 1,
            None => return,
        };
        if (0..len as isize).contains(&next) {
            self.current = Some(next as usize);
            self.focus = Focus::List;
        }
    }

    /// Move sidebar focus, always wrapping
    pub fn move_sidebar(&mut self, delta: isize) {
        let count = self.sidebar.len() as isize;
        self.sidebar_focus = (self.sidebar_focus as isize + delta).rem_euclid(count) as usize;
        self.focus = Focus::Sidebar;
    }

    /// Keep the selection consistent after the game at `removed` left the library
    pub fn on_removed(&mut self, removed: usize) -> RemovalEffect {
        match self.current {
            Some(i) if i == removed => {
                self.current = None;
                RemovalEffect::Cleared
            }
            Some(i) if i > removed => {
                self.current = Some(i - 1);
                RemovalEffect::Kept
            }
            _ => RemovalEffect::Kept,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(SidebarAction::default_set())
    }
}
