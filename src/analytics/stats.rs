use serde::{Deserialize, Serialize};

use crate::models::{Outcome, Trade};

/// Win-rate denominator policy. The journal's historical iterations
/// disagreed on whether breakevens dilute the win rate; both readings are
/// kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinRatePolicy {
    /// wins / (wins + losses) — decisiveness among closed directional
    /// trades. The default.
    #[default]
    ExcludeBreakevens,
    /// wins / (wins + losses + breakevens).
    IncludeBreakevens,
}

impl WinRatePolicy {
    pub fn win_rate(&self, wins: usize, losses: usize, breakevens: usize) -> f64 {
        let denom = match self {
            WinRatePolicy::ExcludeBreakevens => wins + losses,
            WinRatePolicy::IncludeBreakevens => wins + losses + breakevens,
        };
        if denom > 0 {
            (wins as f64 / denom as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Performance aggregates over one trade collection. Always recomputed in
/// full from the current snapshot; never updated incrementally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub win_rate: f64,
    pub net_profit: f64,
    /// Mean of the r-multiples actually present; `None` when no trade
    /// carries one (deliberately distinct from 0).
    pub avg_r: Option<f64>,
}

pub fn calc_stats(trades: &[Trade], policy: WinRatePolicy) -> Stats {
    let count = trades.len();
    let wins = trades.iter().filter(|t| t.result == Outcome::Win).count();
    let losses = trades.iter().filter(|t| t.result == Outcome::Loss).count();
    let breakevens = trades
        .iter()
        .filter(|t| t.result == Outcome::Breakeven)
        .count();

    let net_profit: f64 = trades.iter().filter_map(|t| t.profit).sum();

    let r_values: Vec<f64> = trades.iter().filter_map(|t| t.r_multiple).collect();
    let avg_r = if r_values.is_empty() {
        None
    } else {
        Some(r_values.iter().sum::<f64>() / r_values.len() as f64)
    };

    Stats {
        count,
        wins,
        losses,
        breakevens,
        win_rate: policy.win_rate(wins, losses, breakevens),
        net_profit,
        avg_r,
    }
}
