//! Trading journal analytics core.
//!
//! Raw, loosely-typed trade records come in from an injected [`store::TradeStore`];
//! the [`schema`] layer resolves field aliases and normalizes each record into a
//! canonical [`models::Trade`]; [`filter`], [`analytics`] and [`export`] are pure
//! functions over the resulting snapshot. [`journal::Journal`] ties the pipeline
//! together for the presentation layer.

pub mod analytics;
pub mod error;
pub mod export;
pub mod filter;
pub mod journal;
pub mod models;
pub mod schema;
pub mod store;

pub use analytics::{calc_stats, group_by_period, PeriodSummary, Stats, WinRatePolicy};
pub use error::CoreError;
pub use filter::apply_filters;
pub use journal::Journal;
pub use models::{Outcome, Trade, TradeFilters};
pub use schema::{AliasTable, Normalizer};
pub use store::{InMemoryStore, TradeStore};
