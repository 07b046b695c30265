//! Provider trait for container inventory sources

use crate::{error::Result, models::ContainerRecord};
use async_trait::async_trait;

/// Trait for sources of container snapshots
///
/// Implementations must tolerate an empty runtime (zero containers is a
/// normal result, not an error). Callers are expected to treat a provider
/// error as an empty snapshot when rendering must not fail.
#[async_trait]
pub trait ContainerInventoryProvider: Send + Sync {
    /// Fetch a snapshot of containers known to the runtime
    ///
    /// When `all` is false only running containers are returned.
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>>;
}

/// A provider backed by a fixed set of records
///
/// Used in tests and fixtures where a real runtime is unavailable.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<ContainerRecord>,
}

impl StaticProvider {
    /// Create a provider returning the given records
    pub fn new(records: Vec<ContainerRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ContainerInventoryProvider for StaticProvider {
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        if all {
            Ok(self.records.clone())
        } else {
            Ok(self
                .records
                .iter()
                .filter(|r| r.status == crate::ContainerStatus::Running)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContainerStatus;
    use std::collections::HashMap;

    fn record(name: &str, status: ContainerStatus) -> ContainerRecord {
        ContainerRecord {
            id: format!("{}-id", name),
            name: name.to_string(),
            image: "img:latest".to_string(),
            status,
            labels: HashMap::new(),
            ports: Vec::new(),
        }
    }

    #[smol_potat::test]
    async fn test_static_provider_filters_stopped_containers() {
        let provider = StaticProvider::new(vec![
            record("up", ContainerStatus::Running),
            record("down", ContainerStatus::Exited),
        ]);

        assert_eq!(provider.list(true).await.unwrap().len(), 2);

        let running = provider.list(false).await.unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].name, "up");
    }
}
