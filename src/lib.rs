//! Courtside - basketball league data client
//!
//! The data-acquisition and caching core of a terminal basketball dashboard:
//! live scores, standings, league leaders, box scores, rosters, player
//! profiles, and game logs, fetched from remote statistics endpoints behind
//! a two-tier cache (in-memory TTL plus on-disk offline fallback), soft rate
//! limiting, and bounded retry with backoff. Fetch operations never fail to
//! their caller; when every path is exhausted they return a neutral empty
//! value and record a short user-facing message readable via
//! [`api::ApiClient::last_error`]. A presentation layer renders whatever
//! comes back.

pub mod api;
pub mod cache;
pub mod data;
pub mod summary;
