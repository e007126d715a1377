use std::sync::Arc;

use chrono::Utc;

use crate::analytics::{best_and_worst, calc_stats, group_by_period, PeriodSummary, Stats, WinRatePolicy};
use crate::error::CoreError;
use crate::export::{to_csv, EXPORT_COLUMNS};
use crate::filter::apply_filters;
use crate::models::{Trade, TradeFilters, UNKNOWN_PERIOD};
use crate::schema::{AliasTable, Normalizer};
use crate::store::TradeStore;

/// Facade over the analytics core: holds the injected store, the current
/// immutable trade snapshot, and the normalization/aggregation policies.
/// A refresh replaces the snapshot wholesale; every read view is a pure
/// function over it.
pub struct Journal {
    store: Option<Arc<dyn TradeStore>>,
    normalizer: Normalizer,
    policy: WinRatePolicy,
    trades: Vec<Trade>,
}

impl Journal {
    pub fn new(store: Arc<dyn TradeStore>) -> Self {
        Self {
            store: Some(store),
            normalizer: Normalizer::default(),
            policy: WinRatePolicy::default(),
            trades: Vec::new(),
        }
    }

    /// A journal with no store configured. Read views work over the empty
    /// snapshot; `refresh` reports `SourceUnavailable`.
    pub fn detached() -> Self {
        Self {
            store: None,
            normalizer: Normalizer::default(),
            policy: WinRatePolicy::default(),
            trades: Vec::new(),
        }
    }

    pub fn with_alias_table(mut self, table: AliasTable) -> Self {
        self.normalizer = Normalizer::new(table);
        self
    }

    pub fn with_policy(mut self, policy: WinRatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch all raw records, normalize them, and swap in the new snapshot.
    /// On fetch failure the previous snapshot is kept and the error is
    /// surfaced; the core never retries on its own.
    pub async fn refresh(&mut self) -> Result<usize, CoreError> {
        let store = self.store.as_ref().ok_or(CoreError::SourceUnavailable)?;
        let raw = store.fetch_all().await?;
        let trades = self.normalizer.normalize_batch(&raw);
        log::info!(
            "Refreshed journal from {}: {} trades",
            store.store_name(),
            trades.len()
        );
        self.trades = trades;
        Ok(self.trades.len())
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn filtered(&self, filters: &TradeFilters) -> Vec<Trade> {
        apply_filters(&self.trades, filters)
    }

    pub fn stats(&self, filters: &TradeFilters) -> Stats {
        calc_stats(&self.filtered(filters), self.policy)
    }

    pub fn period_breakdown(&self, filters: &TradeFilters) -> Vec<PeriodSummary> {
        group_by_period(&self.filtered(filters), self.policy)
    }

    /// Best and worst known periods of the filtered snapshot, as owned rows.
    pub fn best_and_worst_periods(
        &self,
        filters: &TradeFilters,
    ) -> Option<(PeriodSummary, PeriodSummary)> {
        let rows = self.period_breakdown(filters);
        best_and_worst(&rows).map(|(b, w)| (b.clone(), w.clone()))
    }

    /// Serialize the filtered snapshot with the canonical column set.
    pub fn export_csv(&self, filters: &TradeFilters) -> Result<String, CoreError> {
        to_csv(&self.filtered(filters), &EXPORT_COLUMNS)
    }

    /// Write the filtered snapshot to `dir`, stamped with today's date.
    pub fn write_export(&self, dir: &std::path::Path, filters: &TradeFilters) -> Result<std::path::PathBuf, CoreError> {
        crate::export::write_export(
            dir,
            &self.filtered(filters),
            &EXPORT_COLUMNS,
            Utc::now().date_naive(),
        )
    }

    /// Distinct known period keys across the full snapshot, sorted, for
    /// populating a period filter control.
    pub fn period_options(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .trades
            .iter()
            .map(|t| t.period_key.clone())
            .filter(|k| k != UNKNOWN_PERIOD)
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Distinct pairs across the full snapshot, sorted.
    pub fn pair_options(&self) -> Vec<String> {
        let mut pairs: Vec<String> = self.trades.iter().map(|t| t.pair.clone()).collect();
        pairs.sort();
        pairs.dedup();
        pairs
    }
}
