//! Container runtime inventory snapshots
//!
//! This crate provides the read-only view of a container runtime that the
//! FusionDash directory core consumes: a snapshot of all containers (running
//! and stopped) with their names, images, statuses, published host ports and
//! label maps.
//!
//! The crate is runtime-agnostic: the provider trait is async via
//! `async-trait`, the Docker CLI provider spawns `docker` through
//! `async-process`, and nothing here depends on a specific executor.
//!
//! # Example
//!
//! ```no_run
//! use container_inventory::{ContainerInventoryProvider, DockerCliProvider};
//!
//! # async fn example() -> container_inventory::Result<()> {
//! let provider = DockerCliProvider::new();
//! for record in provider.list(true).await? {
//!     println!("{} ({})", record.name, record.image);
//! }
//! # Ok(())
//! # }
//! ```

pub mod docker;
pub mod error;
pub mod models;
pub mod provider;

pub use docker::DockerCliProvider;
pub use error::{Error, Result};
pub use models::{ContainerRecord, ContainerStatus};
pub use provider::{ContainerInventoryProvider, StaticProvider};
