//! Asset recovery and transparency portal for the Anti-Corruption Commission.
//!
//! Public endpoints cover recovered-property auctions, expressions of interest,
//! corruption reporting, published case/news/resource content and the recovery
//! dashboard. Staff endpoints sit behind bearer-token authentication under
//! `/api/admin`.

pub mod accounts;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod memory;
pub mod overview;
pub mod properties;
pub mod rate_limit;
pub mod reports;
pub mod seed;
pub mod settings;
pub mod shared;
pub mod statistics;
pub mod subscriptions;
pub mod telemetry;
#[cfg(test)]
pub(crate) mod testing;
pub mod uploads;

pub use app::Portal;
