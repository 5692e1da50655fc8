//! # Catalog CLI (`catalog`)
//!
//! Query the remote profile catalog from the terminal, or serve the search
//! and listing HTTP routes.
//!
//! ## Usage
//!
//! ```bash
//! catalog --config ./config/catalog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog serve` | Start the HTTP server |
//! | `catalog list` | Print one page of the listing |
//! | `catalog featured` | Print featured profiles |
//! | `catalog get <slug>` | Print one profile by slug |
//! | `catalog get-id <id>` | Print one profile by id |
//! | `catalog search "<query>"` | Free-text search |
//! | `catalog nav <url> <event>` | Print the URL a listing control navigates to |
//!
//! ## Examples
//!
//! ```bash
//! catalog list --order-by birthDate-desc --featured --page 2
//! catalog search "ana"
//! catalog nav "http://localhost:4321/actrices?page=3" search "  maría "
//! ```

use actress_catalog::listing::{ListingQuery, OrderBy};
use actress_catalog::navigation::UiEvent;
use actress_catalog::{commands, config, logging, server};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "catalog",
    about = "Browse and serve a remote catalog of actress profiles",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the file does not exist, the default endpoint
    /// (`http://localhost/api-actriz.php`) and defaults for every other
    /// setting are used. `serve` always requires the file.
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Print one page of the listing.
    List {
        /// `name`, `name-desc`, `birthDate` or `birthDate-desc`.
        #[arg(long)]
        order_by: Option<String>,

        /// Only featured profiles.
        #[arg(long)]
        featured: bool,

        /// Only profiles whose name contains this text.
        #[arg(long)]
        query: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Defaults to `[listing].per_page`.
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Print featured profiles.
    Featured,

    /// Print one profile by slug.
    Get { slug: String },

    /// Print one profile by id.
    GetId { id: String },

    /// Search profiles by free text.
    Search { query: String },

    /// Print the URL a listing control would navigate to from `url`.
    Nav {
        url: String,

        #[command(subcommand)]
        event: NavEvent,
    },
}

#[derive(Subcommand)]
enum NavEvent {
    /// A pagination button.
    Page { page: u32 },
    /// The order select; omit the value to clear it.
    Order { value: Option<String> },
    /// The featured checkbox.
    Featured {
        #[arg(action = clap::ArgAction::Set)]
        on: bool,
    },
    /// The search form.
    Search { input: String },
    /// The clear-filters button.
    Clear,
}

impl From<NavEvent> for UiEvent {
    fn from(event: NavEvent) -> Self {
        match event {
            NavEvent::Page { page } => UiEvent::Paginate(page),
            NavEvent::Order { value } => UiEvent::OrderChanged(value.unwrap_or_default()),
            NavEvent::Featured { on } => UiEvent::FeaturedToggled(on),
            NavEvent::Search { input } => UiEvent::SearchSubmitted(input),
            NavEvent::Clear => UiEvent::ClearFilters,
        }
    }
}

fn load_or_default(cli: &Cli) -> anyhow::Result<config::Config> {
    if cli.config.exists() {
        config::load_config(&cli.config)
    } else {
        Ok(config::Config::with_endpoint(config::DEFAULT_ENDPOINT))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.command {
        Commands::Serve => config::load_config(&cli.config)?,
        _ => load_or_default(&cli)?,
    };
    logging::init_tracing(&cfg.log);

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::List {
            order_by,
            featured,
            query,
            page,
            per_page,
        } => {
            let order_by = order_by
                .map(|o| o.parse::<OrderBy>())
                .transpose()
                .context("invalid --order-by")?;
            let query = ListingQuery {
                order_by,
                featured,
                search: query.filter(|q| !q.trim().is_empty()),
                page: page.max(1),
                per_page: per_page.unwrap_or(cfg.listing.per_page).max(1),
            };
            commands::run_list(&cfg, &query).await?;
        }
        Commands::Featured => {
            commands::run_featured(&cfg).await?;
        }
        Commands::Get { slug } => {
            commands::run_get_slug(&cfg, &slug).await?;
        }
        Commands::GetId { id } => {
            commands::run_get_id(&cfg, &id).await?;
        }
        Commands::Search { query } => {
            commands::run_search(&cfg, &query).await?;
        }
        Commands::Nav { url, event } => {
            commands::run_nav(&url, &event.into())?;
        }
    }

    Ok(())
}
