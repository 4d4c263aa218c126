//! Library management
//!
//! Load, save and edit the ordered list of registered games.

use crate::core::error::{LauncherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stable identifier assigned when an entry joins the library
pub type EntryId = u64;

/// A registered game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    /// 0 means "not assigned yet"
    #[serde(default)]
    pub id: EntryId,
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub cover: Option<PathBuf>,
}

impl GameEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            path: path.into(),
            cover: None,
        }
    }

    /// Build an entry named after the executable's file stem
    pub fn from_executable(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(name, path)
    }
}

/// Ordered collection of games. Insertion order is display order.
///
/// Ids are never handed out twice while the library is open, even after
/// the highest one is removed. The counter restarts from the largest
/// stored id on the next load.
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<GameEntry>,
    last_id: EntryId,
}

impl PartialEq for Library {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Library {}

impl Library {
    pub fn from_entries(entries: Vec<GameEntry>) -> Self {
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        let mut library = Self { entries, last_id };
        library.assign_missing_ids();
        library
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: EntryId) -> Option<&GameEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn next_id(&mut self) -> EntryId {
        self.last_id += 1;
        self.last_id
    }

    fn assign_missing_ids(&mut self) {
        for index in 0..self.entries.len() {
            if self.entries[index].id == 0 {
                self.entries[index].id = self.next_id();
            }
        }
    }
}

/// File-backed store for the library
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the library file. A missing file is an empty library; a
    /// malformed one is reported as corrupt and never replaced.
    pub fn load(&self) -> Result<Library> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No library at {:?}, starting empty", self.path);
                return Ok(Library::default());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<GameEntry> =
            serde_json::from_str(&content).map_err(|source| LauncherError::StorageCorrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded {} games from {:?}", entries.len(), self.path);
        Ok(Library::from_entries(entries))
    }

    /// Write the whole library, replacing the previous file in one rename
    pub fn save(&self, library: &Library) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&library.entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Append an entry, assigning it a fresh id, then persist.
    /// The library is left untouched when the write fails.
    pub fn add(&self, library: &mut Library, mut entry: GameEntry) -> Result<EntryId> {
        entry.id = library.next_id();
        let id = entry.id;
        tracing::info!("Adding game '{}' ({:?})", entry.name, entry.path);
        library.entries.push(entry);
        if let Err(e) = self.save(library) {
            library.entries.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Remove the entry with `id`, then persist. Unknown ids are a no-op.
    /// The entry is put back in place when the write fails.
    pub fn remove(&self, library: &mut Library, id: EntryId) -> Result<Option<(usize, GameEntry)>> {
        let Some(index) = library.position(id) else {
            return Ok(None);
        };
        let entry = library.entries.remove(index);
        if let Err(e) = self.save(library) {
            library.entries.insert(index, entry);
            return Err(e);
        }
        tracing::info!("Removed game '{}'", entry.name);
        Ok(Some((index, entry)))
    }

    /// Point an entry at a resolved cover image, then persist.
    /// The previous cover is restored when the write fails.
    pub fn set_cover(&self, library: &mut Library, id: EntryId, cover: PathBuf) -> Result<()> {
        let Some(index) = library.position(id) else {
            return Ok(());
        };
        let previous = library.entries[index].cover.replace(cover);
        if let Err(e) = self.save(library) {
            library.entries[index].cover = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LibraryStore {
        LibraryStore::new(dir.path().join("games.json"))
    }

    #[test]
    fn test_missing_file_is_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = store_in(&dir).load().unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_malformed_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "[{\"name\": \"Chess\"").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, LauncherError::StorageCorrupt { .. }));
        // The corrupt file is left alone
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "[{\"name\": \"Chess\""
        );
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();
        let id = store
            .add(&mut library, GameEntry::new("Go", "/games/go.bin"))
            .unwrap();
        store
            .set_cover(&mut library, id, PathBuf::from("/covers/Go.png"))
            .unwrap();

        let first = std::fs::read_to_string(store.path()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, library);

        store.save(&loaded).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let entry = &value[0];
        assert_eq!(entry["name"], "Chess");
        assert_eq!(entry["path"], "/games/chess.bin");
        assert!(entry["cover"].is_null());
    }

    #[test]
    fn test_legacy_entries_get_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"name":"A","path":"a.exe","cover":null},{"id":7,"name":"B","path":"b.exe","cover":null},{"name":"C","path":"c.exe"}]"#,
        )
        .unwrap();

        let library = store.load().unwrap();
        let ids: Vec<EntryId> = library.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![8, 7, 9]);
    }

    #[test]
    fn test_remove_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        // Two structurally identical games stay distinguishable
        let first = store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();
        let second = store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();

        let (index, removed) = store.remove(&mut library, second).unwrap().unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id, second);
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(0).unwrap().id, first);
        assert_eq!(store.load().unwrap(), library);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();

        assert!(store.remove(&mut library, 42).unwrap().is_none());
        assert_eq!(library.len(), 1);
    }

    /// Makes the next save fail by occupying its temporary file name
    fn block_saves(store: &LibraryStore) {
        let mut tmp = store.path().to_path_buf().into_os_string();
        tmp.push(".tmp");
        std::fs::create_dir(PathBuf::from(tmp)).unwrap();
    }

    #[test]
    fn test_failed_add_leaves_library_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();
        block_saves(&store);

        assert!(store
            .add(&mut library, GameEntry::new("Go", "/games/go.bin"))
            .is_err());
        assert_eq!(library.len(), 1);
        assert_eq!(library.get(0).unwrap().name, "Chess");
    }

    #[test]
    fn test_failed_remove_restores_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            ids.push(store.add(&mut library, GameEntry::new(name, name)).unwrap());
        }
        block_saves(&store);

        assert!(store.remove(&mut library, ids[1]).is_err());
        let names: Vec<&str> = library.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(library.position(ids[1]), Some(1));
    }

    #[test]
    fn test_failed_set_cover_restores_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        let id = store
            .add(&mut library, GameEntry::new("Chess", "/games/chess.bin"))
            .unwrap();
        store
            .set_cover(&mut library, id, PathBuf::from("/covers/old.png"))
            .unwrap();
        block_saves(&store);

        assert!(store
            .set_cover(&mut library, id, PathBuf::from("/covers/new.png"))
            .is_err());
        assert_eq!(
            library.find(id).unwrap().cover,
            Some(PathBuf::from("/covers/old.png"))
        );
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut library = Library::default();
        store.add(&mut library, GameEntry::new("a", "a")).unwrap();
        let last = store.add(&mut library, GameEntry::new("b", "b")).unwrap();
        store.remove(&mut library, last).unwrap();

        let next = store.add(&mut library, GameEntry::new("c", "c")).unwrap();
        assert!(next > last);
    }

    #[test]
    fn test_name_from_executable() {
        assert_eq!(GameEntry::from_executable("/games/Doom.exe").name, "Doom");
        assert_eq!(GameEntry::from_executable("/games/chess.bin").name, "chess");
        assert_eq!(GameEntry::from_executable("/games/celeste").name, "celeste");
    }
}
