//! Output for the `catalog` CLI subcommands.
//!
//! Each `run_*` function performs one request and prints plain-text lines.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::client::{ApiClient, ProfileSource};
use crate::config::Config;
use crate::listing::ListingQuery;
use crate::models::Profile;
use crate::navigation::{self, UiEvent};

fn client(config: &Config) -> Result<Arc<ApiClient>> {
    Ok(Arc::new(ApiClient::from_config(config)?))
}

fn print_row(profile: &Profile) {
    let marker = if profile.featured { "*" } else { " " };
    println!(
        "{} {:<28} {:<28} {:<14} {}",
        marker, profile.name, profile.slug, profile.birth_date, profile.birth_place
    );
}

fn print_rows(profiles: &[Profile]) {
    if profiles.is_empty() {
        println!("No profiles.");
        return;
    }
    for profile in profiles {
        print_row(profile);
    }
}

pub async fn run_list(config: &Config, query: &ListingQuery) -> Result<()> {
    let catalog = Catalog::new(client(config)?, config.listing.mode);
    let page = catalog.browse(query).await?;

    print_rows(&page.items);
    println!(
        "\nPage {} of {} ({} profiles, {} per page)",
        page.page, page.total_pages, page.total, page.per_page
    );
    Ok(())
}

pub async fn run_featured(config: &Config) -> Result<()> {
    let profiles = client(config)?.featured().await?;
    print_rows(&profiles);
    Ok(())
}

pub async fn run_search(config: &Config, query: &str) -> Result<()> {
    let profiles = client(config)?.search(query).await?;
    print_rows(&profiles);
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("id:          {}", profile.id);
    println!("name:        {}", profile.name);
    println!("slug:        {}", profile.slug);
    println!("featured:    {}", profile.featured);
    println!("birth date:  {}", profile.birth_date);
    println!("birth place: {}", profile.birth_place);
    println!("height:      {}", profile.height);
    println!("image:       {}", profile.image);
    println!("\n{}", profile.bio);
}

pub async fn run_get_slug(config: &Config, slug: &str) -> Result<()> {
    let profile = client(config)?.by_slug(slug).await?;
    print_profile(&profile);
    Ok(())
}

pub async fn run_get_id(config: &Config, id: &str) -> Result<()> {
    let profile = client(config)?.by_id(id).await?;
    print_profile(&profile);
    Ok(())
}

/// Prints the URL a listing control would navigate to.
pub fn run_nav(current: &str, event: &UiEvent) -> Result<()> {
    let current = reqwest::Url::parse(current)
        .with_context(|| format!("not an absolute URL: {}", current))?;
    println!("{}", navigation::navigate(&current, event));
    Ok(())
}
