//! Persisted directory state
//!
//! Two independent JSON documents live under the store's data directory:
//!
//! - `settings.json` — manual entries, the hidden set, and the theme
//! - `overrides.json` — entry id to partial user edits
//!
//! Override edits are high-churn compared to the rest of the settings, so
//! they get their own document and never force a settings rewrite.
//!
//! Overrides are keyed by the entry identifier: the container's runtime id
//! for discovered entries, the generated token for manual ones. They are
//! never keyed by display name; names are neither unique nor stable, and
//! keying by them cross-contaminates containers that happen to share one.
//!
//! A missing or unparsable document loads as its default value. Mutating
//! operations serialize the whole read-modify-write behind a lock, so two
//! concurrent updates cannot lose a writer's change, and writes go through
//! a temp file plus rename so a crash mid-write never truncates a document.

use crate::{
    error::{Error, Result},
    models::{EntryPatch, NewManualEntry, OverrideMap, Settings, ThemeConfig, ThemePatch},
};
use futures::lock::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.json";
const OVERRIDES_FILE: &str = "overrides.json";

/// Where an update landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    /// The update mutated a manual entry in place
    Manual,
    /// The update merged into an override bucket
    Override,
}

/// Persisted store for directory state
pub struct DirectoryStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl DirectoryStore {
    /// Create a store rooted at the given data directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The data directory this store writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the general-settings document
    ///
    /// Missing or corrupt documents yield defaults, never an error.
    pub async fn load_settings(&self) -> Settings {
        self.read_document(SETTINGS_FILE).await
    }

    /// Load the overrides document
    ///
    /// Missing or corrupt documents yield an empty map, never an error.
    pub async fn load_overrides(&self) -> OverrideMap {
        self.read_document(OVERRIDES_FILE).await
    }

    /// Route a partial update to the right persisted location
    ///
    /// An identifier naming a manual entry mutates that entry directly; any
    /// other identifier merges into its override bucket, creating the bucket
    /// if needed. Unknown identifiers are not an error: the directory is
    /// rebuilt from scratch each pass and must tolerate stale ids from a
    /// previous scan.
    pub async fn apply_update(&self, id: &str, patch: EntryPatch) -> Result<UpdateTarget> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.load_settings().await;
        if let Some(entry) = settings.manual.iter_mut().find(|e| e.id == id) {
            patch.apply_to(entry);
            self.write_document(SETTINGS_FILE, &settings).await?;
            debug!("Updated manual entry {}", id);
            return Ok(UpdateTarget::Manual);
        }

        let mut overrides = self.load_overrides().await;
        overrides.entry(id.to_string()).or_default().merge(patch);
        self.write_document(OVERRIDES_FILE, &overrides).await?;
        debug!("Merged override for {}", id);
        Ok(UpdateTarget::Override)
    }

    /// Add an identifier to the hidden set; idempotent
    pub async fn hide(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.load_settings().await;
        if settings.hidden.insert(id.to_string()) {
            self.write_document(SETTINGS_FILE, &settings).await?;
            info!("Hid entry {}", id);
        }
        Ok(())
    }

    /// Append a manual entry, returning its generated identifier
    pub async fn add_manual(&self, new: NewManualEntry) -> Result<String> {
        if new.name.trim().is_empty() {
            return Err(Error::InvalidEntry(
                "Manual entry name cannot be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let mut settings = self.load_settings().await;
        let entry = new.into_entry();
        let id = entry.id.clone();
        settings.manual.push(entry);
        self.write_document(SETTINGS_FILE, &settings).await?;
        info!("Added manual entry {}", id);
        Ok(id)
    }

    /// Remove a manual entry by identifier
    ///
    /// Returns true when an entry was removed. Its override bucket, if one
    /// exists, is left alone; stale buckets are harmless.
    pub async fn remove_manual(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.load_settings().await;
        let before = settings.manual.len();
        settings.manual.retain(|e| e.id != id);
        if settings.manual.len() == before {
            return Ok(false);
        }
        self.write_document(SETTINGS_FILE, &settings).await?;
        info!("Removed manual entry {}", id);
        Ok(true)
    }

    /// The persisted theme
    pub async fn theme(&self) -> ThemeConfig {
        self.load_settings().await.theme
    }

    /// Shallow-merge a theme patch onto the persisted theme
    pub async fn set_theme(&self, patch: ThemePatch) -> Result<ThemeConfig> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.load_settings().await;
        patch.apply_to(&mut settings.theme);
        self.write_document(SETTINGS_FILE, &settings).await?;
        Ok(settings.theme)
    }

    /// Clear all persisted state back to defaults; irreversible
    pub async fn reset_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.write_document(SETTINGS_FILE, &Settings::default())
            .await?;
        self.write_document(OVERRIDES_FILE, &OverrideMap::new())
            .await?;
        info!("Reset all persisted directory state");
        Ok(())
    }

    async fn read_document<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.dir.join(name);
        let contents = match async_fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} yet, using defaults", name);
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", name, e);
                return T::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", name, e);
                T::default()
            }
        }
    }

    async fn write_document<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        async_fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));
        let contents = serde_json::to_string_pretty(value)?;
        async_fs::write(&tmp, contents).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[smol_potat::test]
    async fn test_missing_documents_load_as_defaults() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        let settings = store.load_settings().await;
        assert!(settings.manual.is_empty());
        assert!(settings.hidden.is_empty());
        assert!(store.load_overrides().await.is_empty());
    }

    #[smol_potat::test]
    async fn test_corrupt_document_loads_as_default() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();
        std::fs::write(dir.path().join(OVERRIDES_FILE), "[1,2,3]").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert!(store.load_settings().await.manual.is_empty());
        assert!(store.load_overrides().await.is_empty());
    }

    #[smol_potat::test]
    async fn test_update_routes_to_manual_or_override() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        let id = store
            .add_manual(NewManualEntry::named("Router"))
            .await
            .unwrap();

        let patch = EntryPatch {
            name: Some("Gateway".to_string()),
            ..Default::default()
        };
        let target = store.apply_update(&id, patch.clone()).await.unwrap();
        assert_eq!(target, UpdateTarget::Manual);
        let settings = store.load_settings().await;
        assert_eq!(settings.manual[0].name, "Gateway");

        // Unknown id creates an override bucket instead of failing
        let target = store.apply_update("container-abc", patch).await.unwrap();
        assert_eq!(target, UpdateTarget::Override);
        let overrides = store.load_overrides().await;
        assert_eq!(
            overrides["container-abc"].name.as_deref(),
            Some("Gateway")
        );
    }

    #[smol_potat::test]
    async fn test_override_merge_preserves_earlier_fields() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        store
            .apply_update(
                "abc",
                EntryPatch {
                    group: Some("Pinned".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .apply_update(
                "abc",
                EntryPatch {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let overrides = store.load_overrides().await;
        assert_eq!(overrides["abc"].group.as_deref(), Some("Pinned"));
        assert_eq!(overrides["abc"].order, Some(1));
    }

    #[smol_potat::test]
    async fn test_hide_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        store.hide("abc").await.unwrap();
        store.hide("abc").await.unwrap();
        assert_eq!(store.load_settings().await.hidden.len(), 1);
    }

    #[smol_potat::test]
    async fn test_add_manual_rejects_empty_name() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());
        assert!(store.add_manual(NewManualEntry::named("  ")).await.is_err());
    }

    #[smol_potat::test]
    async fn test_manual_ids_unique_after_removal() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        let first = store
            .add_manual(NewManualEntry::named("one"))
            .await
            .unwrap();
        assert!(store.remove_manual(&first).await.unwrap());

        let second = store
            .add_manual(NewManualEntry::named("two"))
            .await
            .unwrap();
        assert_ne!(first, second);
    }

    #[smol_potat::test]
    async fn test_theme_merge_and_reset() {
        let dir = tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        let theme = store
            .set_theme(ThemePatch {
                accent: Some("#ff0000".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(theme.accent, "#ff0000");
        // Unset fields keep their defaults
        assert_eq!(theme.glass, 0.7);

        store.add_manual(NewManualEntry::named("x")).await.unwrap();
        store.reset_all().await.unwrap();

        let settings = store.load_settings().await;
        assert!(settings.manual.is_empty());
        assert_eq!(settings.theme, ThemeConfig::default());
        assert!(store.load_overrides().await.is_empty());
    }
}
