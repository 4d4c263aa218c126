//! Cover art
//!
//! Turns a user-supplied image source into a file inside the cover
//! directory. Three sources are supported: a local file, an HTTP(S) URL
//! and an inline `data:image/<subtype>;base64,<payload>` value.

use crate::core::error::{LauncherError, Result};
use crate::util::{self, download};
use base64::Engine;
use reqwest::blocking::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension used when a URL path carries none
const FALLBACK_EXTENSION: &str = "png";

/// Where a cover image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    LocalFile(PathBuf),
    RemoteUrl(String),
    InlineImage { subtype: String, payload: String },
}

impl CoverSource {
    /// Classify raw user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix("data:image") {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                LauncherError::DecodeFailed("missing ',' before the payload".into())
            })?;
            let subtype = header
                .strip_prefix('/')
                .and_then(|h| h.split(';').next())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| LauncherError::DecodeFailed("missing image subtype".into()))?;
            // The subtype becomes the file extension
            if !subtype
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
            {
                return Err(LauncherError::DecodeFailed(format!(
                    "invalid image subtype '{}'",
                    subtype
                )));
            }
            // Pasted payloads are often wrapped across lines
            let payload: String = payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            return Ok(Self::InlineImage {
                subtype: subtype.to_ascii_lowercase(),
                payload,
            });
        }

        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::RemoteUrl(input.to_string()));
        }

        Ok(Self::LocalFile(PathBuf::from(input)))
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCover {
    /// Absolute path inside the cover directory
    pub path: PathBuf,
    /// Whether a local source had to be copied in
    pub copied: bool,
}

/// Resolves cover sources into the cover directory
pub struct CoverResolver {
    asset_dir: PathBuf,
    client: Client,
}

impl CoverResolver {
    /// Create the resolver, making sure the cover directory exists
    pub fn new(asset_dir: impl Into<PathBuf>, timeout: Duration) -> anyhow::Result<Self> {
        let asset_dir = asset_dir.into();
        std::fs::create_dir_all(&asset_dir)?;
        Ok(Self {
            asset_dir,
            client: download::http_client(timeout)?,
        })
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Resolve `source` for the game called `game_name`.
    /// Nothing is written when this fails.
    pub fn resolve(&self, game_name: &str, source: &CoverSource) -> Result<ResolvedCover> {
        match source {
            CoverSource::LocalFile(path) => self.copy_local(path),
            CoverSource::RemoteUrl(url) => self.fetch_remote(game_name, url),
            CoverSource::InlineImage { subtype, payload } => {
                self.decode_inline(game_name, subtype, payload)
            }
        }
    }

    fn copy_local(&self, source: &Path) -> Result<ResolvedCover> {
        let readable = source.is_file() && File::open(source).is_ok();
        if !readable {
            return Err(LauncherError::PathUnreadable(source.to_path_buf()));
        }
        let file_name = source
            .file_name()
            .ok_or_else(|| LauncherError::PathUnreadable(source.to_path_buf()))?;

        let dest = self.asset_dir.join(file_name);
        let source_abs = util::absolute(source)?;
        let dest_abs = util::absolute(&dest)?;

        if source_abs == dest_abs {
            tracing::debug!("Cover {:?} already in place", dest_abs);
            return Ok(ResolvedCover {
                path: dest_abs,
                copied: false,
            });
        }

        std::fs::copy(&source_abs, &dest)?;
        tracing::info!("Copied cover {:?} -> {:?}", source_abs, dest);
        Ok(ResolvedCover {
            path: util::absolute(&dest)?,
            copied: true,
        })
    }

    fn fetch_remote(&self, game_name: &str, url: &str) -> Result<ResolvedCover> {
        let extension = url_extension(url)?;
        tracing::info!("Downloading cover for '{}' from {}", game_name, url);
        let bytes = download::download_bytes(&self.client, url)?;
        self.write(game_name, &extension, &bytes)
    }

    fn decode_inline(&self, game_name: &str, subtype: &str, payload: &str) -> Result<ResolvedCover> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| LauncherError::DecodeFailed(e.to_string()))?;
        self.write(game_name, subtype, &bytes)
    }

    fn write(&self, game_name: &str, extension: &str, bytes: &[u8]) -> Result<ResolvedCover> {
        let dest = self
            .asset_dir
            .join(format!("{}.{}", util::file_stem_for(game_name), extension));
        std::fs::write(&dest, bytes)?;
        Ok(ResolvedCover {
            path: util::absolute(&dest)?,
            copied: false,
        })
    }
}

/// Extension of the last URL path segment, ignoring query and fragment
fn url_extension(url: &str) -> Result<String> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| LauncherError::FetchFailed(e.to_string()))?;
    let extension = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|last| last.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(FALLBACK_EXTENSION);
    Ok(extension.to_ascii_lowercase())
}
