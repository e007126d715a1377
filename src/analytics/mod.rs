pub mod periods;
pub mod stats;

pub use periods::{best_and_worst, group_by_period, PeriodSummary};
pub use stats::{calc_stats, Stats, WinRatePolicy};
