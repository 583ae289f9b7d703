//! Aggregate statistics over one simulated arc set.

use serde::{Deserialize, Serialize};

use trade_sim_core::TradeArc;

/// Aggregate scalars derived from a simulated arc set.
///
/// `min`/`max` range over every arc value and exist for normalization. The
/// `standard_*` totals cover USA-origin export arcs only; headline impact
/// figures are computed from them so that import and retaliation volume does
/// not dilute the direct tariff effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Sum of `base_total` over every arc.
    pub base_total: f64,
    /// Sum of simulated `value` over every arc.
    pub sim_total: f64,
    /// Smallest simulated arc value.
    pub min: f64,
    /// Largest simulated arc value.
    pub max: f64,
    /// Sum of `base_total` over USA-origin export arcs.
    pub standard_base_total: f64,
    /// Sum of simulated `value` over USA-origin export arcs.
    pub standard_sim_total: f64,
}

impl SimulationStats {
    /// Computes statistics over a simulated arc set.
    ///
    /// An empty arc set yields the all-zero statistics rather than infinite
    /// or NaN extrema.
    #[must_use]
    pub fn from_arcs(arcs: &[TradeArc]) -> Self {
        if arcs.is_empty() {
            return Self::empty();
        }

        let mut stats = Self {
            base_total: 0.0,
            sim_total: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            standard_base_total: 0.0,
            standard_sim_total: 0.0,
        };

        for arc in arcs {
            stats.base_total += arc.base_total;
            stats.sim_total += arc.value;
            stats.min = stats.min.min(arc.value);
            stats.max = stats.max.max(arc.value);
            if arc.is_us_export() {
                stats.standard_base_total += arc.base_total;
                stats.standard_sim_total += arc.value;
            }
        }

        stats
    }

    /// The statistics of an empty arc set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            base_total: 0.0,
            sim_total: 0.0,
            min: 0.0,
            max: 0.0,
            standard_base_total: 0.0,
            standard_sim_total: 0.0,
        }
    }
}

impl Default for SimulationStats {
    fn default() -> Self {
        Self::empty()
    }
}
