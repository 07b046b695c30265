//! Application signature catalog and detection

use serde::{Deserialize, Serialize};

/// Default presentation attributes for a well-known application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSignature {
    /// Substring matched against `"{name} {image}"`, lowercase
    pub key: String,

    /// Display name to use when matched
    pub display_name: String,

    /// Icon identifier
    pub icon: String,

    /// Group the application belongs to
    pub group: String,
}

impl AppSignature {
    fn new(key: &str, display_name: &str, icon: &str, group: &str) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            icon: icon.to_string(),
            group: group.to_string(),
        }
    }
}

/// An ordered, first-match-wins signature table
///
/// Detection is a linear scan: the first signature whose key is a
/// case-insensitive substring of `"{name} {image}"` wins. Ordering is a
/// contract of the matching algorithm, not an accident: a generic key
/// occurring before a more specific one shadows it, so specific keys must be
/// listed first when extending the table.
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    signatures: Vec<AppSignature>,
}

impl SignatureCatalog {
    /// The built-in table of well-known self-hosted applications
    pub fn builtin() -> Self {
        Self::from_signatures(vec![
            AppSignature::new("sonarr", "Sonarr", "sonarr", "Media"),
            AppSignature::new("radarr", "Radarr", "radarr", "Media"),
            AppSignature::new("lidarr", "Lidarr", "lidarr", "Media"),
            AppSignature::new("readarr", "Readarr", "readarr", "Media"),
            AppSignature::new("bazarr", "Bazarr", "bazarr", "Media"),
            AppSignature::new("prowlarr", "Prowlarr", "prowlarr", "Media"),
            AppSignature::new("plex", "Plex", "plex", "Media"),
            AppSignature::new("jellyfin", "Jellyfin", "jellyfin", "Media"),
            AppSignature::new("tautulli", "Tautulli", "tautulli", "Admin"),
            AppSignature::new("portainer", "Portainer", "portainer", "Admin"),
            AppSignature::new("transmission", "Transmission", "transmission", "Downloads"),
            AppSignature::new("qbittorrent", "qBittorrent", "qbittorrent", "Downloads"),
            AppSignature::new("saber", "Saber", "notes", "Tools"),
        ])
    }

    /// Build a catalog from an explicit signature list, kept in order
    pub fn from_signatures(signatures: Vec<AppSignature>) -> Self {
        Self { signatures }
    }

    /// An empty catalog (nothing ever matches)
    pub fn empty() -> Self {
        Self::from_signatures(Vec::new())
    }

    /// Match a container's name and image against the catalog
    ///
    /// Returns the first signature whose key occurs in the lowercased
    /// `"{name} {image}"` haystack, or `None`.
    pub fn detect(&self, name: &str, image: &str) -> Option<&AppSignature> {
        let haystack = format!("{} {}", name, image).to_lowercase();
        self.signatures.iter().find(|s| haystack.contains(&s.key))
    }

    /// Number of signatures in the catalog
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// True when the catalog holds no signatures
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl Default for SignatureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
