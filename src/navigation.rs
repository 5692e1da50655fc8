//! Query-string navigation for listing pages.
//!
//! Pagination, filter and search controls do not re-render anything
//! themselves. Each one rewrites the current page URL's query string and
//! navigates to the result, so the server renders the new state from
//! `page`, `orderBy`, `featured` and `q`. This module computes those target
//! URLs.
//!
//! Any filter or search change resets `page` to 1. Keys the controls do not
//! own are left alone, in their original order.

use reqwest::Url;

pub const PAGE: &str = "page";
pub const ORDER_BY: &str = "orderBy";
pub const FEATURED: &str = "featured";
pub const SEARCH: &str = "q";

/// A user interaction on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A pagination button was clicked.
    Paginate(u32),
    /// The order select changed; empty clears the ordering.
    OrderChanged(String),
    /// The featured checkbox was toggled.
    FeaturedToggled(bool),
    /// The search form was submitted with this raw input.
    SearchSubmitted(String),
    /// "Clear filters" was clicked.
    ClearFilters,
}

/// The URL to navigate to after `event` on the page at `current`.
pub fn navigate(current: &Url, event: &UiEvent) -> Url {
    match event {
        UiEvent::Paginate(page) => goto_page(current, *page),
        UiEvent::OrderChanged(value) => update_filter(current, ORDER_BY, Some(value.as_str())),
        UiEvent::FeaturedToggled(true) => update_filter(current, FEATURED, Some("true")),
        UiEvent::FeaturedToggled(false) => update_filter(current, FEATURED, None),
        UiEvent::SearchSubmitted(input) => apply_search(current, input),
        UiEvent::ClearFilters => clear_filters(current),
    }
}

pub fn goto_page(current: &Url, page: u32) -> Url {
    let mut pairs = query_pairs(current);
    set(&mut pairs, PAGE, &page.to_string());
    with_query(current, &pairs)
}

/// Sets `key` to `value`, or removes it when `value` is `None` or empty,
/// then resets to the first page.
pub fn update_filter(current: &Url, key: &str, value: Option<&str>) -> Url {
    let mut pairs = query_pairs(current);
    match value {
        Some(v) if !v.is_empty() => set(&mut pairs, key, v),
        _ => pairs.retain(|(k, _)| k.as_str() != key),
    }
    set(&mut pairs, PAGE, "1");
    with_query(current, &pairs)
}

/// Applies a search box submission: trimmed input becomes `q`, blank input
/// removes it.
pub fn apply_search(current: &Url, input: &str) -> Url {
    update_filter(current, SEARCH, Some(input.trim()))
}

pub fn clear_filters(current: &Url) -> Url {
    let mut url = current.clone();
    url.set_query(None);
    url
}

fn query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// Replaces the first occurrence in place and drops duplicates, or appends.
fn set(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(k, v)| {
        if k.as_str() != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *v = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn with_query(current: &Url, pairs: &[(String, String)]) -> Url {
    let mut url = current.clone();
    if pairs.is_empty() {
        url.set_query(None);
        return url;
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}
