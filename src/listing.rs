//! Local sort, filter and pagination over a full profile listing.
//!
//! Used when `[listing] mode = "client"`: the whole catalog is fetched once
//! and shaped here. The pagination math is shared with the server-side mode,
//! which only needs [`total_pages`].
//!
//! # Ordering
//!
//! | `orderBy` | Sort |
//! |-----------|------|
//! | `name` / `name-asc` | lexical by name |
//! | `name-desc` | reverse lexical |
//! | `birthDate` / `birthDate-asc` | chronological, oldest first |
//! | `birthDate-desc` | chronological, youngest first |

use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{Page, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    BirthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A sort key plus direction, in its `orderBy` wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderBy {
    pub key: SortKey,
    pub order: SortOrder,
}

impl FromStr for OrderBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.rsplit_once('-') {
            Some((field, dir @ ("asc" | "desc"))) => (field, dir),
            _ => (s, "asc"),
        };
        let key = match field {
            "name" => SortKey::Name,
            "birthDate" => SortKey::BirthDate,
            other => bail!(
                "unknown orderBy field: '{}'. Use name or birthDate.",
                other
            ),
        };
        let order = if direction == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Ok(OrderBy { key, order })
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.key {
            SortKey::Name => "name",
            SortKey::BirthDate => "birthDate",
        };
        match self.order {
            SortOrder::Asc => write!(f, "{}", field),
            SortOrder::Desc => write!(f, "{}-desc", field),
        }
    }
}

/// Everything a listing request can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub order_by: Option<OrderBy>,
    pub featured: bool,
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl ListingQuery {
    pub fn new(per_page: u32) -> Self {
        Self {
            order_by: None,
            featured: false,
            search: None,
            page: 1,
            per_page,
        }
    }

    /// Builds a query from page query-string parameters (`page`, `orderBy`,
    /// `featured`, `q`, `per_page`).
    ///
    /// Missing or unparseable `page`/`per_page` fall back to 1 and
    /// `default_per_page`. An unknown `orderBy` is an error.
    pub fn from_params(params: &HashMap<String, String>, default_per_page: u32) -> Result<Self> {
        let order_by = match params.get("orderBy").map(|s| s.trim()) {
            Some(s) if !s.is_empty() => Some(s.parse::<OrderBy>()?),
            _ => None,
        };
        let page = params
            .get("page")
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let per_page = params
            .get("per_page")
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(default_per_page);
        let search = params
            .get("q")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Ok(Self {
            order_by,
            featured: params.get("featured").map(|v| v == "true").unwrap_or(false),
            search,
            page,
            per_page,
        })
    }
}

/// Filters and sorts `profiles` according to `query`. Pagination is not
/// applied; see [`paginate`].
///
/// The sort is stable, so records that compare equal keep their input order.
pub fn apply(mut profiles: Vec<Profile>, query: &ListingQuery) -> Vec<Profile> {
    if query.featured {
        profiles.retain(|p| p.featured);
    }

    if let Some(needle) = &query.search {
        let needle = needle.to_lowercase();
        profiles.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    if let Some(order_by) = query.order_by {
        sort_profiles(&mut profiles, order_by);
    }

    profiles
}

pub fn sort_profiles(profiles: &mut [Profile], order_by: OrderBy) {
    profiles.sort_by(|a, b| {
        let ord = match order_by.key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::BirthDate => compare_birth_dates(&a.birth_date, &b.birth_date),
        };
        match order_by.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

// Unparseable dates sort after every parseable one.
fn compare_birth_dates(a: &str, b: &str) -> Ordering {
    match (parse_birth_date(a), parse_birth_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

const DATE_FORMATS: &[&str] = &["%d-%b-%Y", "%Y-%m-%d", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parses the free-form birth date strings the API serves.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Number of pages needed to show `count` records, `per_page` at a time.
pub fn total_pages(count: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page as u64)
}

/// Cuts one 1-based page out of `items`. Page 0 is read as page 1; pages
/// past the end come back empty.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> Page<T> {
    let page = page.max(1);
    let total = items.len() as u64;
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages: total_pages(total, per_page),
    }
}
