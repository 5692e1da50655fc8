//! HTTP client for the remote catalog API.
//!
//! The API is a single PHP endpoint dispatched on an `action` query
//! parameter. Every call here issues exactly one `GET`, decodes the
//! [`Envelope`] and either returns its `data` or an [`ApiError`].
//!
//! | Method | Query string |
//! |--------|--------------|
//! | [`ProfileSource::all`] | `action=all` |
//! | [`ProfileSource::featured`] | `action=featured` |
//! | [`ProfileSource::by_id`] | `action=by-id&id=…` |
//! | [`ProfileSource::by_slug`] | `action=by-slug&slug=…` |
//! | [`ProfileSource::search`] | `action=search&q=…` |
//! | [`ProfileSource::filter`] | `action=filter&orderBy=…&featured=true&q=…&page=…&per_page=…` |
//!
//! Faults are never swallowed here; callers decide whether to degrade.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;
use crate::listing::{total_pages, ListingQuery};
use crate::models::{Envelope, Page, Profile};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {} while {context}", .status.as_u16())]
    Status { status: StatusCode, context: String },

    /// The API answered `success: false`.
    #[error("{0}")]
    Api(String),

    #[error("response had no data while {0}")]
    MissingData(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// Read access to the profile catalog.
///
/// [`ApiClient`] is the production implementation; the HTTP server and the
/// tests accept any implementation.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn all(&self) -> Result<Vec<Profile>, ApiError>;

    async fn featured(&self) -> Result<Vec<Profile>, ApiError>;

    async fn by_id(&self, id: &str) -> Result<Profile, ApiError>;

    async fn by_slug(&self, slug: &str) -> Result<Profile, ApiError>;

    async fn search(&self, query: &str) -> Result<Vec<Profile>, ApiError>;

    /// Server-side filtered, sorted and paginated listing.
    async fn filter(&self, query: &ListingQuery) -> Result<Page<Profile>, ApiError>;
}

/// [`ProfileSource`] backed by the remote PHP endpoint.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let endpoint =
            Url::parse(endpoint).map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the request URL for one action.
    pub fn action_url(&self, action: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", action);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// Issues the GET and unwraps the envelope.
    ///
    /// `context` describes the call for status errors; `default_error` is
    /// used when the API fails without saying why.
    async fn fetch<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
        context: &str,
        default_error: String,
    ) -> Result<(T, Option<u64>), ApiError> {
        let url = self.action_url(action, params);
        tracing::debug!(action, %url, "calling catalog API");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(action, status = status.as_u16(), "catalog API returned error status");
            return Err(ApiError::Status {
                status,
                context: context.to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            let message = envelope
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or(default_error);
            tracing::warn!(action, error = %message, "catalog API reported failure");
            return Err(ApiError::Api(message));
        }

        let count = envelope.count;
        envelope
            .data
            .map(|data| (data, count))
            .ok_or_else(|| ApiError::MissingData(context.to_string()))
    }
}

#[async_trait]
impl ProfileSource for ApiClient {
    async fn all(&self) -> Result<Vec<Profile>, ApiError> {
        let (profiles, _) = self
            .fetch(
                "all",
                &[],
                "fetching profiles",
                "unknown error while fetching profiles".to_string(),
            )
            .await?;
        Ok(profiles)
    }

    async fn featured(&self) -> Result<Vec<Profile>, ApiError> {
        let (profiles, _) = self
            .fetch(
                "featured",
                &[],
                "fetching featured profiles",
                "unknown error while fetching featured profiles".to_string(),
            )
            .await?;
        Ok(profiles)
    }

    async fn by_id(&self, id: &str) -> Result<Profile, ApiError> {
        let (profile, _) = self
            .fetch(
                "by-id",
                &[("id", id.to_string())],
                "fetching profile",
                format!("no profile found with id: {}", id),
            )
            .await?;
        Ok(profile)
    }

    async fn by_slug(&self, slug: &str) -> Result<Profile, ApiError> {
        let (profile, _) = self
            .fetch(
                "by-slug",
                &[("slug", slug.to_string())],
                "fetching profile",
                format!("no profile found with slug: {}", slug),
            )
            .await?;
        Ok(profile)
    }

    async fn search(&self, query: &str) -> Result<Vec<Profile>, ApiError> {
        let (profiles, _) = self
            .fetch(
                "search",
                &[("q", query.to_string())],
                "searching profiles",
                "unknown error while searching profiles".to_string(),
            )
            .await?;
        Ok(profiles)
    }

    async fn filter(&self, query: &ListingQuery) -> Result<Page<Profile>, ApiError> {
        let params = filter_params(query);
        let (items, count): (Vec<Profile>, _) = self
            .fetch(
                "filter",
                &params,
                "filtering profiles",
                "unknown error while filtering profiles".to_string(),
            )
            .await?;

        let total = count.unwrap_or(items.len() as u64);
        Ok(Page {
            items,
            page: query.page,
            per_page: query.per_page,
            total,
            total_pages: total_pages(total, query.per_page),
        })
    }
}

fn filter_params(query: &ListingQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(order_by) = query.order_by {
        params.push(("orderBy", order_by.to_string()));
    }
    if query.featured {
        params.push(("featured", "true".to_string()));
    }
    if let Some(q) = &query.search {
        params.push(("q", q.clone()));
    }
    params.push(("page", query.page.to_string()));
    params.push(("per_page", query.per_page.to_string()));
    params
}
