//! Docker CLI provider for container inventory

use crate::{
    error::{Error, Result},
    models::{ContainerRecord, ContainerStatus},
    provider::ContainerInventoryProvider,
};
use async_process::Command;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on a single docker CLI invocation
///
/// Directory rendering must not block behind a hung docker daemon, so the
/// snapshot fetch is raced against this timeout.
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Provider that shells out to the `docker` CLI
///
/// Uses `docker ps --format '{{json .}}'`, which emits one JSON object per
/// container per line. Unparsable lines are skipped with a warning; only a
/// failure to run docker at all is reported as an error.
pub struct DockerCliProvider {
    docker_bin: String,
    fetch_timeout: Duration,
}

/// One line of `docker ps --format '{{json .}}'` output
#[derive(Debug, Deserialize)]
struct PsLine {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Names")]
    names: String,
    #[serde(rename = "Image")]
    image: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Ports", default)]
    ports: String,
    #[serde(rename = "Labels", default)]
    labels: String,
}

impl DockerCliProvider {
    /// Create a provider using `docker` from PATH
    pub fn new() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Override the docker binary path
    pub fn with_docker_bin(mut self, bin: impl Into<String>) -> Self {
        self.docker_bin = bin.into();
        self
    }

    /// Override the snapshot fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    async fn run_ps(&self, all: bool) -> Result<String> {
        let mut cmd = Command::new(&self.docker_bin);
        cmd.arg("ps");
        if all {
            cmd.arg("-a");
        }
        cmd.args(["--no-trunc", "--format", "{{json .}}"]);

        let output = futures_lite::future::or(
            async {
                cmd.output()
                    .await
                    .map_err(|e| Error::RuntimeUnavailable(format!("failed to run docker: {}", e)))
            },
            async {
                async_io::Timer::after(self.fetch_timeout).await;
                Err(Error::RuntimeUnavailable(format!(
                    "docker ps timed out after {:?}",
                    self.fetch_timeout
                )))
            },
        )
        .await?;

        if !output.status.success() {
            return Err(Error::RuntimeUnavailable(format!(
                "docker ps exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::MalformedOutput(format!("docker ps output not UTF-8: {}", e)))
    }
}

impl Default for DockerCliProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerInventoryProvider for DockerCliProvider {
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        let raw = self.run_ps(all).await?;

        let mut records = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<PsLine>(line) {
                Ok(ps) => records.push(record_from_ps(ps)),
                Err(e) => {
                    warn!("Skipping unparsable docker ps line: {}", e);
                }
            }
        }

        debug!("Docker snapshot: {} containers", records.len());
        Ok(records)
    }
}

fn record_from_ps(ps: PsLine) -> ContainerRecord {
    ContainerRecord {
        id: ps.id,
        // docker ps joins multiple names with commas; the first is canonical
        name: ps
            .names
            .split(',')
            .next()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image: ps.image,
        status: ContainerStatus::parse(&ps.state),
        labels: parse_labels(&ps.labels),
        ports: parse_published_ports(&ps.ports),
    }
}

/// Parse the `Labels` column (`"key=value,key2=value2"`)
///
/// The column format does not escape commas inside values, so a value
/// containing a comma will be truncated. Docker has the same limitation in
/// its own tabular output.
fn parse_labels(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .collect()
}

/// Parse the `Ports` column into published host ports
///
/// The column looks like `"0.0.0.0:8080->80/tcp, :::8080->80/tcp, 9000/tcp"`.
/// Only mappings with a host side (`->`) count as published; duplicates from
/// v4/v6 double-binding collapse to one entry, preserving encounter order.
fn parse_published_ports(raw: &str) -> Vec<String> {
    let mut ports: Vec<String> = Vec::new();
    for mapping in raw.split(',') {
        let Some((host_side, _container_side)) = mapping.trim().split_once("->") else {
            continue;
        };
        let Some((_addr, host_port)) = host_side.rsplit_once(':') else {
            continue;
        };
        if host_port.is_empty() || !host_port.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if !ports.iter().any(|p| p.as_str() == host_port) {
            ports.push(host_port.to_string());
        }
    }
    ports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_published_ports() {
        let raw = "0.0.0.0:8080->80/tcp, :::8080->80/tcp, 9000/tcp";
        assert_eq!(parse_published_ports(raw), vec!["8080".to_string()]);

        let raw = "0.0.0.0:7878->7878/tcp, 0.0.0.0:9090->9090/tcp";
        assert_eq!(
            parse_published_ports(raw),
            vec!["7878".to_string(), "9090".to_string()]
        );

        assert!(parse_published_ports("").is_empty());
        assert!(parse_published_ports("8080/tcp").is_empty());
    }

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels("fusiondash.name=Radarr,fusiondash.order=5");
        assert_eq!(labels.get("fusiondash.name").map(String::as_str), Some("Radarr"));
        assert_eq!(labels.get("fusiondash.order").map(String::as_str), Some("5"));
        assert!(parse_labels("").is_empty());
    }

    #[test]
    fn test_record_from_ps_line() {
        let line = r#"{"ID":"abc123","Names":"radarr-1","Image":"linuxserver/radarr:latest","State":"running","Ports":"0.0.0.0:7878->7878/tcp","Labels":""}"#;
        let ps: PsLine = serde_json::from_str(line).unwrap();
        let record = record_from_ps(ps);
        assert_eq!(record.id, "abc123");
        assert_eq!(record.name, "radarr-1");
        assert_eq!(record.status, ContainerStatus::Running);
        assert_eq!(record.ports, vec!["7878".to_string()]);
        assert!(record.labels.is_empty());
    }
}
