//! Per-tab layouts.

pub mod alerts;
pub mod watchlist;
