//! Named build presets persisted as TOML files.
//!
//! A preset is a [`BuildConfig`] saved under a user-chosen name, so a
//! project can be re-packaged later without filling the options in again.

use std::path::PathBuf;

use crate::build::BuildConfig;
use crate::error::AppError;
use crate::paths;
use crate::result::AppResult;
use crate::validate::sanitize_filename;

/// Directory-backed store of build presets.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    /// Store rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the per-user presets directory, created on demand.
    pub fn open_default() -> AppResult<Self> {
        let dir = paths::presets_dir()?;
        paths::ensure_dir(&dir)?;
        Ok(Self::new(dir))
    }

    /// Directory this store reads from and writes to.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn file_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", sanitize_filename(name)))
    }

    /// Persist a preset, overwriting any previous one with the same name.
    ///
    /// Returns the path the preset was written to. The name is sanitized
    /// before it becomes a filename.
    pub fn save(&self, name: &str, config: &BuildConfig) -> AppResult<PathBuf> {
        paths::ensure_dir(&self.dir)?;
        let path = self.file_for(name);
        let text = toml::to_string_pretty(config)?;
        std::fs::write(&path, text)?;
        tracing::debug!(preset = %name, path = %path.display(), "preset saved");
        Ok(path)
    }

    /// Load a preset by name.
    pub fn load(&self, name: &str) -> AppResult<BuildConfig> {
        let path = self.file_for(name);
        if !path.is_file() {
            return Err(AppError::not_found(format!("preset not found: {name}")));
        }
        let text = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Names of all stored presets, sorted.
    pub fn list(&self) -> AppResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a preset by name.
    pub fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.file_for(name);
        if !path.is_file() {
            return Err(AppError::not_found(format!("preset not found: {name}")));
        }
        std::fs::remove_file(&path)?;
        tracing::debug!(preset = %name, "preset deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn store() -> (tempfile::TempDir, PresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let mut config = BuildConfig::default();
        config.script_path = "src/main.py".into();
        config.app_name = "demo".into();
        config.one_file = false;

        store.save("my preset", &config).unwrap();
        let back = store.load("my preset").unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn preset_names_are_sanitized_into_filenames() {
        let (_dir, store) = store();
        let path = store.save("release build!", &BuildConfig::default()).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("release_build.toml")
        );
    }

    #[test]
    fn list_returns_sorted_names() {
        let (_dir, store) = store();
        store.save("zeta", &BuildConfig::default()).unwrap();
        store.save("alpha", &BuildConfig::default()).unwrap();
        store.save("mid", &BuildConfig::default()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("nowhere"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn load_unknown_preset_is_not_found() {
        let (_dir, store) = store();
        let err = store.load("ghost").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn delete_removes_the_preset() {
        let (_dir, store) = store();
        store.save("gone", &BuildConfig::default()).unwrap();
        store.delete("gone").unwrap();
        assert_eq!(store.list().unwrap(), Vec::<String>::new());
        let err = store.delete("gone").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
