//! Canonical browse operation over a [`ProfileSource`].
//!
//! Picks between the remote `filter` action and local shaping of the full
//! listing based on `[listing] mode`. Both paths return the same [`Page`].

use anyhow::Result;
use std::sync::Arc;

use crate::client::ProfileSource;
use crate::config::ListingMode;
use crate::listing::{self, ListingQuery};
use crate::models::{Page, Profile};

pub struct Catalog {
    source: Arc<dyn ProfileSource>,
    mode: ListingMode,
}

impl Catalog {
    pub fn new(source: Arc<dyn ProfileSource>, mode: ListingMode) -> Self {
        Self { source, mode }
    }

    pub fn source(&self) -> &Arc<dyn ProfileSource> {
        &self.source
    }

    /// One page of the listing for `query`.
    pub async fn browse(&self, query: &ListingQuery) -> Result<Page<Profile>> {
        match self.mode {
            ListingMode::Server => Ok(self.source.filter(query).await?),
            ListingMode::Client => {
                let all = self.source.all().await?;
                let shaped = listing::apply(all, query);
                Ok(listing::paginate(shaped, query.page, query.per_page))
            }
        }
    }
}
