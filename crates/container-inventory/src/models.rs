//! Data models for container inventory

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of one container as reported by the runtime
///
/// Records are ephemeral: they are re-fetched on every scan and never cached
/// across scans. The `id` is stable only for the container's current
/// lifetime; recreating a container yields a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Runtime-assigned container identifier
    pub id: String,

    /// Container name
    pub name: String,

    /// Image reference (e.g. "linuxserver/radarr:latest")
    pub image: String,

    /// Current container status
    pub status: ContainerStatus,

    /// Labels attached at container creation time
    #[serde(default)]
    pub labels: HashMap<String, String>,

    /// Published host ports, in encounter order
    #[serde(default)]
    pub ports: Vec<String>,
}

impl ContainerRecord {
    /// Look up a label value
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(|s| s.as_str())
    }
}

/// Container status as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    /// Container is running
    Running,
    /// Container has exited
    Exited,
    /// Container was created but never started
    Created,
    /// Container is paused
    Paused,
    /// Container is restarting
    Restarting,
    /// Container is dead
    Dead,
    /// Any status string we do not recognize
    #[serde(untagged)]
    Unknown(String),
}

impl ContainerStatus {
    /// Parse a runtime status string, tolerating unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "exited" => Self::Exited,
            "created" => Self::Created,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "dead" => Self::Dead,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Status string as the runtime reports it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Exited => "exited",
            Self::Created => "created",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Dead => "dead",
            Self::Unknown(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        assert_eq!(ContainerStatus::parse("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::parse("exited"), ContainerStatus::Exited);
        assert_eq!(
            ContainerStatus::parse("weird"),
            ContainerStatus::Unknown("weird".to_string())
        );
        assert_eq!(ContainerStatus::parse("weird").as_str(), "weird");
    }
}
