//! # Actress Catalog
//!
//! Typed access to a remote catalog of actress profiles, plus the small
//! HTTP surface and navigation logic a listing site needs on top of it.
//!
//! The catalog itself lives behind a single PHP endpoint that dispatches on
//! an `action` query parameter and answers with a
//! `{success, data, count?, error?}` envelope. This crate never writes to
//! it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  PHP API     │◀──│  ApiClient   │◀──│   Catalog    │
//! │ (external)   │   │ (reqwest)    │   │ server/client│
//! └──────────────┘   └──────────────┘   │  pagination  │
//!                                       └──────┬───────┘
//!                          ┌───────────────────┤
//!                          ▼                   ▼
//!                     ┌──────────┐       ┌──────────┐
//!                     │   CLI    │       │   HTTP   │
//!                     │(catalog) │       │  (axum)  │
//!                     └──────────┘       └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Profile, envelope and page types |
//! | [`client`] | Remote API client and the `ProfileSource` trait |
//! | [`listing`] | Local sort, filter and pagination |
//! | [`catalog`] | Browse a page in server or client mode |
//! | [`server`] | Search and listing HTTP routes |
//! | [`navigation`] | Query-string rewriting for listing controls |
//! | [`logging`] | Tracing subscriber setup |
//! | [`commands`] | CLI output |

pub mod catalog;
pub mod client;
pub mod commands;
pub mod config;
pub mod listing;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod server;
