//! Data models for the service directory

use container_inventory::ContainerStatus;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Default display order for entries without an explicit order
///
/// Deliberately large so undecorated entries sort last.
pub const DEFAULT_ORDER: i64 = 999;

/// Fallback group for discovered entries that match nothing
pub const FALLBACK_GROUP: &str = "Other";

/// Default group for manual entries
pub const MANUAL_GROUP: &str = "Custom";

/// One entry in the service directory
///
/// Entries are constructed fresh on every reconciliation pass and never
/// persisted themselves; only [`EntryPatch`] overrides and manual entries
/// persist. Serde names match the persisted document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Unique identifier: the container's runtime id for discovered
    /// entries, a store-generated `manual-<uuid>` token for manual ones
    pub id: String,

    /// Container name, for discovered entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Icon identifier
    #[serde(default)]
    pub icon: String,

    /// Group the entry is displayed under
    #[serde(default)]
    pub group: String,

    /// Resolved access URL, may be empty
    #[serde(default)]
    pub href: String,

    /// Published host ports, in encounter order
    #[serde(default)]
    pub ports: Vec<String>,

    /// Display sort order, ascending
    #[serde(default = "default_order")]
    pub order: i64,

    /// Where the entry came from
    pub source: EntrySource,

    /// Container status, for discovered entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ContainerStatus>,

    /// Whether the entry is shown on the main board
    #[serde(default = "default_pinned")]
    pub pinned: bool,

    /// API key for optional third-party integrations
    #[serde(rename = "apiKey", default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Widget type hint for optional third-party integrations
    #[serde(rename = "widgetType", default, skip_serializing_if = "String::is_empty")]
    pub widget_type: String,
}

fn default_order() -> i64 {
    DEFAULT_ORDER
}

fn default_pinned() -> bool {
    true
}

/// Provenance of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    /// Discovered from the container runtime
    Docker,
    /// Fully user-authored
    Manual,
    /// Declared entirely via container labels
    Label,
    /// Provided by a queue/library integration
    Arr,
}

impl EntrySource {
    /// Source tag as it appears in persisted documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Manual => "manual",
            Self::Label => "label",
            Self::Arr => "arr",
        }
    }
}

impl ServiceEntry {
    /// Create a manual entry with a freshly generated identifier
    ///
    /// Identifiers are random tokens, never derived from list position, so
    /// they stay unique even after other manual entries are removed. The
    /// `manual-` prefix keeps the namespace disjoint from runtime ids.
    pub fn new_manual(name: impl Into<String>) -> Self {
        Self {
            id: format!("manual-{}", Uuid::new_v4()),
            container: None,
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            group: MANUAL_GROUP.to_string(),
            href: String::new(),
            ports: Vec::new(),
            order: DEFAULT_ORDER,
            source: EntrySource::Manual,
            state: None,
            pinned: true,
            api_key: String::new(),
            widget_type: String::new(),
        }
    }
}

/// A partial entry: only the fields a user actually edited
///
/// Patches layer on top of freshly built entries at read time. An absent
/// field never clears anything; only present, non-empty values replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Group override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Access URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Display order override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Pinned flag override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,

    /// API key override
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Widget type override
    #[serde(rename = "widgetType", default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,
}

impl EntryPatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this patch onto an entry
    ///
    /// String fields only replace when present and non-empty; `order` and
    /// `pinned` replace whenever present.
    pub fn apply_to(&self, entry: &mut ServiceEntry) {
        fn overlay(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                if !v.is_empty() {
                    *target = v.clone();
                }
            }
        }

        overlay(&mut entry.name, &self.name);
        overlay(&mut entry.description, &self.description);
        overlay(&mut entry.icon, &self.icon);
        overlay(&mut entry.group, &self.group);
        overlay(&mut entry.href, &self.href);
        overlay(&mut entry.api_key, &self.api_key);
        overlay(&mut entry.widget_type, &self.widget_type);
        if let Some(order) = self.order {
            entry.order = order;
        }
        if let Some(pinned) = self.pinned {
            entry.pinned = pinned;
        }
    }

    /// Fold a newer patch into this one, field by field
    ///
    /// Fields the newer patch carries win; fields it omits survive from the
    /// stored patch.
    pub fn merge(&mut self, newer: EntryPatch) {
        fn take<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        take(&mut self.name, newer.name);
        take(&mut self.description, newer.description);
        take(&mut self.icon, newer.icon);
        take(&mut self.group, newer.group);
        take(&mut self.href, newer.href);
        take(&mut self.order, newer.order);
        take(&mut self.pinned, newer.pinned);
        take(&mut self.api_key, newer.api_key);
        take(&mut self.widget_type, newer.widget_type);
    }
}

/// Theme state persisted alongside the directory
///
/// Pass-through only: reconciliation never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Wallpaper URL or identifier
    #[serde(default)]
    pub wallpaper: String,

    /// Accent color
    #[serde(default = "default_accent")]
    pub accent: String,

    /// Translucency level, 0.0 to 1.0
    #[serde(default = "default_glass")]
    pub glass: f64,
}

fn default_accent() -> String {
    "#007cff".to_string()
}

fn default_glass() -> f64 {
    0.7
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            wallpaper: String::new(),
            accent: default_accent(),
            glass: default_glass(),
        }
    }
}

/// Partial theme update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemePatch {
    /// Wallpaper override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper: Option<String>,

    /// Accent color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,

    /// Translucency override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<f64>,
}

impl ThemePatch {
    /// Overlay this patch onto a theme
    pub fn apply_to(&self, theme: &mut ThemeConfig) {
        if let Some(wallpaper) = &self.wallpaper {
            theme.wallpaper = wallpaper.clone();
        }
        if let Some(accent) = &self.accent {
            theme.accent = accent.clone();
        }
        if let Some(glass) = self.glass {
            theme.glass = glass;
        }
    }
}

/// The general-settings document: manual entries, hidden set, theme
///
/// Kept separate from the override document so high-churn override edits do
/// not rewrite this document on every edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// User-authored entries with no corresponding container
    #[serde(default)]
    pub manual: Vec<ServiceEntry>,

    /// Identifiers globally excluded from output
    #[serde(default)]
    pub hidden: BTreeSet<String>,

    /// Presentation state, passed through untouched
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// The overrides document: entry id to partial edits
pub type OverrideMap = BTreeMap<String, EntryPatch>;

/// Fields accepted when creating a manual entry
///
/// The identifier is never part of this shape; the store generates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewManualEntry {
    /// Display name (required, non-empty)
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Icon identifier
    #[serde(default)]
    pub icon: String,

    /// Group, defaulting to [`MANUAL_GROUP`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Access URL
    #[serde(default)]
    pub href: String,

    /// Display order, defaulting to [`DEFAULT_ORDER`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Pinned flag, defaulting to true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,

    /// API key for optional integrations
    #[serde(rename = "apiKey", default)]
    pub api_key: String,

    /// Widget type hint for optional integrations
    #[serde(rename = "widgetType", default)]
    pub widget_type: String,
}

impl NewManualEntry {
    /// Create a request with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the full entry, generating a fresh identifier
    pub fn into_entry(self) -> ServiceEntry {
        let mut entry = ServiceEntry::new_manual(self.name);
        entry.description = self.description;
        entry.icon = self.icon;
        if let Some(group) = self.group {
            entry.group = group;
        }
        entry.href = self.href;
        if let Some(order) = self.order {
            entry.order = order;
        }
        if let Some(pinned) = self.pinned {
            entry.pinned = pinned;
        }
        entry.api_key = self.api_key;
        entry.widget_type = self.widget_type;
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_overlays_only_non_empty_fields() {
        let mut entry = ServiceEntry::new_manual("Radarr");
        entry.group = "Media".to_string();
        entry.icon = "radarr".to_string();

        let patch = EntryPatch {
            group: Some("Pinned".to_string()),
            icon: Some(String::new()),
            ..Default::default()
        };
        patch.apply_to(&mut entry);

        assert_eq!(entry.group, "Pinned");
        // Empty strings do not clear the built value
        assert_eq!(entry.icon, "radarr");
        assert_eq!(entry.name, "Radarr");
    }

    #[test]
    fn test_patch_merge_keeps_omitted_fields() {
        let mut stored = EntryPatch {
            name: Some("Movies".to_string()),
            order: Some(5),
            ..Default::default()
        };
        stored.merge(EntryPatch {
            order: Some(1),
            pinned: Some(false),
            ..Default::default()
        });

        assert_eq!(stored.name.as_deref(), Some("Movies"));
        assert_eq!(stored.order, Some(1));
        assert_eq!(stored.pinned, Some(false));
    }

    #[test]
    fn test_manual_ids_are_unique_and_prefixed() {
        let a = ServiceEntry::new_manual("a");
        let b = ServiceEntry::new_manual("b");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("manual-"));
        assert_eq!(a.source, EntrySource::Manual);
        assert!(a.pinned);
        assert_eq!(a.group, MANUAL_GROUP);
    }

    #[test]
    fn test_settings_document_defaults() {
        // A missing or empty document deserializes to full defaults
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.manual.is_empty());
        assert!(settings.hidden.is_empty());
        assert_eq!(settings.theme.accent, "#007cff");
        assert_eq!(settings.theme.glass, 0.7);
    }
}
