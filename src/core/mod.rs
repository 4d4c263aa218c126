//! Core module
//!
//! Library, covers, selection and input handling for the launcher.

pub mod context;
pub mod cover;
pub mod error;
pub mod input;
pub mod launch;
pub mod library;
pub mod playlist;
pub mod selection;
pub mod theme;

pub use context::{LauncherContext, Notice, NoticeLevel, UiRequest};
pub use error::LauncherError;
