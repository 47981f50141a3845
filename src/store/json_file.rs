use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::PreferenceStore;
use crate::error::AppResult;
use crate::models::PreferenceState;

/// Whole-file JSON persistence for the preference state
///
/// Every save rewrites the complete document; there are no incremental
/// updates. A missing or empty file loads as `None`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> AppResult<Option<PreferenceState>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if !contents.trim().is_empty() => {
                let state = serde_json::from_str(&contents)?;
                Ok(Some(state))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, state: &PreferenceState) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            path = %self.path.display(),
            total_selections = state.total_selections,
            "Preference state saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "  \n").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("prefs.json"));

        let mut state = PreferenceState::new();
        state.note_selected("Dumplings");
        state.note_recommended("Steak");

        store.save(&state).unwrap();
        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/dir/prefs.json"));

        store.save(&PreferenceState::new()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("prefs.json"));

        let mut first = PreferenceState::new();
        first.note_selected("Sushi");
        store.save(&first).unwrap();

        let second = PreferenceState::new();
        store.save(&second).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, second);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().is_err());
    }
}
