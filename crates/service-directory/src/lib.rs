//! Service directory reconciliation core
//!
//! This crate builds a unified, user-customizable directory of services on a
//! host by merging a container runtime snapshot with layered user
//! configuration: per-container labels, a persisted override store, manually
//! added entries, and a hidden set.
//!
//! One reconciliation pass is a pure pipeline over immutable layers:
//!
//! 1. fetch the container snapshot (degrading to empty if the runtime is
//!    unreachable),
//! 2. per container: hidden-label short-circuit, signature detection, entry
//!    building, override merge,
//! 3. drop entries in the hidden set,
//! 4. append manual entries not hidden,
//! 5. stable sort by display order.
//!
//! Entries are rebuilt from scratch on every pass; only overrides, manual
//! entries, the hidden set and the theme persist. The defining failure
//! contract is "always render something": every external input (runtime
//! connectivity, persisted documents, label values) has a defined default it
//! degrades to instead of aborting the pass.
//!
//! # Example
//!
//! ```no_run
//! use container_inventory::DockerCliProvider;
//! use service_directory::{Directory, DirectoryStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> service_directory::Result<()> {
//! let store = DirectoryStore::new("/var/lib/fusiondash");
//! let directory = Directory::new(Arc::new(DockerCliProvider::new()), store);
//!
//! for entry in directory.reconcile().await? {
//!     println!("{:>4}  {}  {}", entry.order, entry.name, entry.href);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod directory;
pub mod error;
pub mod models;
pub mod ports;
pub mod store;

pub use builder::{EntryBuilder, labels};
pub use catalog::{AppSignature, SignatureCatalog};
pub use directory::Directory;
pub use error::{Error, Result};
pub use models::{
    EntryPatch, EntrySource, NewManualEntry, OverrideMap, ServiceEntry, Settings, ThemeConfig,
    ThemePatch,
};
pub use ports::select_primary_port;
pub use store::{DirectoryStore, UpdateTarget};

/// Re-export key types for convenience
pub mod prelude {
    pub use crate::{
        Directory, DirectoryStore, EntryPatch, EntrySource, Error, NewManualEntry, Result,
        ServiceEntry, SignatureCatalog, ThemeConfig,
    };
}
