//! FusionDash operator CLI
//!
//! Drives the service directory core from the command line: list the
//! reconciled directory, add manual entries, edit or hide discovered ones,
//! adjust the theme, and factory-reset the persisted state.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use container_inventory::DockerCliProvider;
use service_directory::{
    Directory, DirectoryStore, EntryPatch, NewManualEntry, ThemePatch,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fusiondash")]
#[command(about = "FusionDash - unified service directory for a container host")]
#[command(version)]
struct Cli {
    /// Data directory for persisted state (defaults to the user data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile and print the service directory
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a manual entry
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Access URL
        #[arg(long, default_value = "")]
        href: String,
        /// Icon identifier
        #[arg(long, default_value = "")]
        icon: String,
        /// Group
        #[arg(long)]
        group: Option<String>,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Display order
        #[arg(long)]
        order: Option<i64>,
    },

    /// Update an entry by identifier
    Update {
        /// Entry identifier (container id or manual id)
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New access URL
        #[arg(long)]
        href: Option<String>,
        /// New icon identifier
        #[arg(long)]
        icon: Option<String>,
        /// New group
        #[arg(long)]
        group: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New display order
        #[arg(long)]
        order: Option<i64>,
        /// Pin or unpin from the main board
        #[arg(long)]
        pinned: Option<bool>,
    },

    /// Hide an entry from the directory
    Hide {
        /// Entry identifier
        id: String,
    },

    /// Show or update the theme
    Theme {
        /// Wallpaper URL or identifier
        #[arg(long)]
        wallpaper: Option<String>,
        /// Accent color
        #[arg(long)]
        accent: Option<String>,
        /// Translucency level, 0.0 to 1.0
        #[arg(long)]
        glass: Option<f64>,
    },

    /// Clear all persisted state back to defaults
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    smol::block_on(async {
        let cli = Cli::parse();
        let directory = open_directory(cli.data_dir)?;

        match cli.command {
            Commands::List { json } => list(&directory, json).await,
            Commands::Add {
                name,
                href,
                icon,
                group,
                description,
                order,
            } => {
                let id = directory
                    .add_manual(NewManualEntry {
                        name,
                        href,
                        icon,
                        group,
                        description,
                        order,
                        ..Default::default()
                    })
                    .await?;
                println!("{}", id);
                Ok(())
            }
            Commands::Update {
                id,
                name,
                href,
                icon,
                group,
                description,
                order,
                pinned,
            } => {
                let patch = EntryPatch {
                    name,
                    href,
                    icon,
                    group,
                    description,
                    order,
                    pinned,
                    ..Default::default()
                };
                if patch.is_empty() {
                    bail!("Nothing to update; pass at least one field");
                }
                let target = directory.apply_update(&id, patch).await?;
                println!("Updated {} ({:?})", id, target);
                Ok(())
            }
            Commands::Hide { id } => {
                directory.hide(&id).await?;
                println!("Hidden {}", id);
                Ok(())
            }
            Commands::Theme {
                wallpaper,
                accent,
                glass,
            } => {
                let patch = ThemePatch {
                    wallpaper,
                    accent,
                    glass,
                };
                let theme = if patch.wallpaper.is_none()
                    && patch.accent.is_none()
                    && patch.glass.is_none()
                {
                    directory.theme().await
                } else {
                    directory.set_theme(patch).await?
                };
                println!("{}", serde_json::to_string_pretty(&theme)?);
                Ok(())
            }
            Commands::Reset { yes } => {
                if !yes {
                    bail!("Refusing to reset without --yes");
                }
                directory.reset_all().await?;
                println!("All persisted state cleared");
                Ok(())
            }
        }
    })
}

fn open_directory(data_dir: Option<PathBuf>) -> Result<Directory> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("Could not determine user data directory; pass --data-dir")?
            .join("fusiondash"),
    };

    let store = DirectoryStore::new(data_dir);
    Ok(Directory::new(Arc::new(DockerCliProvider::new()), store))
}

async fn list(directory: &Directory, json: bool) -> Result<()> {
    let entries = directory.reconcile().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Order", "Name", "Group", "URL", "State", "Source", "ID"]);
    for entry in &entries {
        table.add_row(vec![
            entry.order.to_string(),
            entry.name.clone(),
            entry.group.clone(),
            entry.href.clone(),
            entry
                .state
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            entry.source.as_str().to_string(),
            entry.id.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
