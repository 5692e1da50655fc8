//! Core data models shared by the client, the listing logic and the server.
//!
//! Field names follow the remote API's JSON (camelCase) so records pass
//! through the search endpoint unchanged.

use serde::{Deserialize, Serialize};

/// A catalog profile as served by the remote API.
///
/// Every field is passed through untouched; dates and heights stay strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub bio: String,
    pub birth_date: String,
    pub birth_place: String,
    pub height: String,
    pub featured: bool,
}

/// The `{success, data, count?, error?}` wrapper used on both sides of the
/// wire: by the remote API and by this crate's own HTTP routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            error: None,
        }
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            error: Some(message.into()),
        }
    }
}

/// One page of a listing plus the numbers needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}
