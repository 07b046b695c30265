//! Entry construction from container records

use crate::{
    catalog::AppSignature,
    models::{DEFAULT_ORDER, EntrySource, FALLBACK_GROUP, ServiceEntry},
    ports::select_primary_port,
};
use container_inventory::ContainerRecord;
use tracing::warn;

/// Label keys read from container configuration
pub mod labels {
    /// Hide the container from the directory entirely
    pub const HIDDEN: &str = "fusiondash.hidden";
    /// Explicit access URL
    pub const HREF: &str = "fusiondash.href";
    /// Explicit display name
    pub const NAME: &str = "fusiondash.name";
    /// Free-form description
    pub const DESCRIPTION: &str = "fusiondash.description";
    /// Explicit icon identifier
    pub const ICON: &str = "fusiondash.icon";
    /// Explicit group
    pub const GROUP: &str = "fusiondash.group";
    /// Explicit display order (integer)
    pub const ORDER: &str = "fusiondash.order";
}

/// Builds one candidate [`ServiceEntry`] per container
///
/// Each display attribute resolves through its own precedence chain
/// (label, then detected signature, then generated fallback), independently
/// of the others: a container can take its name from a label while its group
/// comes from detection. The build is a pure transform over its inputs.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    host: String,
}

impl EntryBuilder {
    /// Create a builder resolving URLs against `http://localhost`
    pub fn new() -> Self {
        Self::with_host("http://localhost")
    }

    /// Create a builder resolving URLs against the given base
    pub fn with_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// True when the container's labels mark it hidden
    pub fn is_hidden_by_label(record: &ContainerRecord) -> bool {
        record.label(labels::HIDDEN) == Some("true")
    }

    /// Assemble a candidate entry for one container
    pub fn build(
        &self,
        record: &ContainerRecord,
        detected: Option<&AppSignature>,
    ) -> ServiceEntry {
        let href = match record.label(labels::HREF) {
            Some(href) if !href.is_empty() => href.to_string(),
            _ => match select_primary_port(&record.ports) {
                Some(port) => format!("{}:{}", self.host, port),
                None => String::new(),
            },
        };

        let name = record
            .label(labels::NAME)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| detected.map(|d| d.display_name.clone()))
            .unwrap_or_else(|| title_case(&record.name));

        let description = record.label(labels::DESCRIPTION).unwrap_or_default();

        let icon = record
            .label(labels::ICON)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| detected.map(|d| d.icon.clone()))
            .unwrap_or_default();

        let group = record
            .label(labels::GROUP)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| detected.map(|d| d.group.clone()))
            .unwrap_or_else(|| FALLBACK_GROUP.to_string());

        // A malformed order label falls back to the sentinel; one bad
        // container must not stop the rest of the directory from rendering.
        let order = match record.label(labels::ORDER) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "Container {} has non-integer {} label '{}', using default",
                    record.name,
                    labels::ORDER,
                    raw
                );
                DEFAULT_ORDER
            }),
            None => DEFAULT_ORDER,
        };

        ServiceEntry {
            id: record.id.clone(),
            container: Some(record.name.clone()),
            name,
            description: description.to_string(),
            icon,
            group,
            href,
            ports: record.ports.clone(),
            order,
            source: EntrySource::Docker,
            state: Some(record.status.clone()),
            pinned: true,
            api_key: String::new(),
            widget_type: String::new(),
        }
    }
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a display name from a container name
///
/// Separators become spaces and each word is capitalized:
/// `"media-server_2"` becomes `"Media Server 2"`.
fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SignatureCatalog;
    use container_inventory::ContainerStatus;
    use std::collections::HashMap;

    fn record(name: &str, image: &str, ports: &[&str]) -> ContainerRecord {
        ContainerRecord {
            id: format!("{}-id", name),
            name: name.to_string(),
            image: image.to_string(),
            status: ContainerStatus::Running,
            labels: HashMap::new(),
            ports: ports.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_detected_radarr_entry() {
        let catalog = SignatureCatalog::builtin();
        let record = record("radarr-1", "linuxserver/radarr:latest", &["7878"]);
        let detected = catalog.detect(&record.name, &record.image);

        let entry = EntryBuilder::new().build(&record, detected);
        assert_eq!(entry.name, "Radarr");
        assert_eq!(entry.icon, "radarr");
        assert_eq!(entry.group, "Media");
        // 7878 is not a preferred port, so the single available port wins
        assert_eq!(entry.href, "http://localhost:7878");
        assert_eq!(entry.order, DEFAULT_ORDER);
        assert_eq!(entry.state, Some(ContainerStatus::Running));
        assert_eq!(entry.source, EntrySource::Docker);
    }

    #[test]
    fn test_labels_beat_detection_per_attribute() {
        let catalog = SignatureCatalog::builtin();
        let mut record = record("radarr-1", "linuxserver/radarr:latest", &["7878"]);
        record
            .labels
            .insert(labels::NAME.to_string(), "Movies".to_string());
        record
            .labels
            .insert(labels::ORDER.to_string(), "3".to_string());
        let detected = catalog.detect(&record.name, &record.image);

        let entry = EntryBuilder::new().build(&record, detected);
        // Name comes from the label, group still from detection
        assert_eq!(entry.name, "Movies");
        assert_eq!(entry.group, "Media");
        assert_eq!(entry.order, 3);
    }

    #[test]
    fn test_undetected_container_fallbacks() {
        let record = record("media-server_2", "custom/thing:1", &[]);
        let entry = EntryBuilder::new().build(&record, None);
        assert_eq!(entry.name, "Media Server 2");
        assert_eq!(entry.group, FALLBACK_GROUP);
        assert_eq!(entry.icon, "");
        assert_eq!(entry.href, "");
    }

    #[test]
    fn test_malformed_order_label_fails_soft() {
        let mut record = record("app", "app:1", &["8080"]);
        record
            .labels
            .insert(labels::ORDER.to_string(), "first".to_string());
        let entry = EntryBuilder::new().build(&record, None);
        assert_eq!(entry.order, DEFAULT_ORDER);
    }

    #[test]
    fn test_href_label_beats_port_construction() {
        let mut record = record("app", "app:1", &["8080"]);
        record
            .labels
            .insert(labels::HREF.to_string(), "https://app.example.com".to_string());
        let entry = EntryBuilder::new().build(&record, None);
        assert_eq!(entry.href, "https://app.example.com");
    }

    #[test]
    fn test_hidden_label_detection() {
        let mut record = record("app", "app:1", &[]);
        assert!(!EntryBuilder::is_hidden_by_label(&record));
        record
            .labels
            .insert(labels::HIDDEN.to_string(), "true".to_string());
        assert!(EntryBuilder::is_hidden_by_label(&record));
        record
            .labels
            .insert(labels::HIDDEN.to_string(), "yes".to_string());
        assert!(!EntryBuilder::is_hidden_by_label(&record));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("radarr-1"), "Radarr 1");
        assert_eq!(title_case("my_cool-app"), "My Cool App");
        assert_eq!(title_case("single"), "Single");
    }
}
