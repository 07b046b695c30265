//! The directory reconciler

use crate::{
    builder::EntryBuilder,
    catalog::SignatureCatalog,
    error::Result,
    models::{EntryPatch, NewManualEntry, ServiceEntry, ThemeConfig, ThemePatch},
    store::{DirectoryStore, UpdateTarget},
};
use container_inventory::ContainerInventoryProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrates one full reconciliation pass
///
/// A pass fetches a container snapshot, builds one candidate entry per
/// container, layers persisted overrides on top, appends manual entries,
/// and returns the stable-ordered result. The pass holds no state between
/// calls; everything durable lives in the [`DirectoryStore`].
///
/// If the container runtime is unreachable the docker-derived portion
/// degrades to an empty set and manual entries still render. The directory
/// is always renderable from whatever sources are currently available.
pub struct Directory {
    provider: Arc<dyn ContainerInventoryProvider>,
    store: DirectoryStore,
    catalog: SignatureCatalog,
    builder: EntryBuilder,
}

impl Directory {
    /// Create a directory with the built-in signature catalog
    pub fn new(provider: Arc<dyn ContainerInventoryProvider>, store: DirectoryStore) -> Self {
        Self::with_catalog(provider, store, SignatureCatalog::builtin())
    }

    /// Create a directory with a custom signature catalog
    pub fn with_catalog(
        provider: Arc<dyn ContainerInventoryProvider>,
        store: DirectoryStore,
        catalog: SignatureCatalog,
    ) -> Self {
        Self {
            provider,
            store,
            catalog,
            builder: EntryBuilder::new(),
        }
    }

    /// Run one reconciliation pass and return the ordered service list
    pub async fn reconcile(&self) -> Result<Vec<ServiceEntry>> {
        // Runtime unreachable is a degradation, not a failure: the rest of
        // the directory must still render.
        let containers = match self.provider.list(true).await {
            Ok(containers) => containers,
            Err(e) => {
                warn!("Container snapshot unavailable: {}", e);
                Vec::new()
            }
        };

        let settings = self.store.load_settings().await;
        let overrides = self.store.load_overrides().await;

        let mut entries = Vec::new();
        for record in &containers {
            if EntryBuilder::is_hidden_by_label(record) {
                debug!("Container {} hidden by label", record.name);
                continue;
            }
            if settings.hidden.contains(&record.id) {
                debug!("Container {} in hidden set", record.name);
                continue;
            }

            let detected = self.catalog.detect(&record.name, &record.image);
            let mut entry = self.builder.build(record, detected);
            if let Some(patch) = overrides.get(&record.id) {
                patch.apply_to(&mut entry);
            }
            entries.push(entry);
        }

        for manual in settings.manual {
            if !settings.hidden.contains(&manual.id) {
                entries.push(manual);
            }
        }

        // Stable: ties keep scan/append order, containers before manual
        entries.sort_by_key(|e| e.order);

        debug!(
            "Reconciled {} entries from {} containers",
            entries.len(),
            containers.len()
        );
        Ok(entries)
    }

    /// Route a partial update to a manual entry or an override bucket
    pub async fn apply_update(&self, id: &str, patch: EntryPatch) -> Result<UpdateTarget> {
        self.store.apply_update(id, patch).await
    }

    /// Globally exclude an entry from output; idempotent
    pub async fn hide(&self, id: &str) -> Result<()> {
        self.store.hide(id).await
    }

    /// Add a manual entry, returning its generated identifier
    pub async fn add_manual(&self, new: NewManualEntry) -> Result<String> {
        self.store.add_manual(new).await
    }

    /// The persisted theme
    pub async fn theme(&self) -> ThemeConfig {
        self.store.theme().await
    }

    /// Shallow-merge a theme patch onto the persisted theme
    pub async fn set_theme(&self, patch: ThemePatch) -> Result<ThemeConfig> {
        self.store.set_theme(patch).await
    }

    /// Clear all persisted state back to defaults; irreversible
    pub async fn reset_all(&self) -> Result<()> {
        self.store.reset_all().await
    }

    /// The underlying store
    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }
}
