//! Headline impact percentages derived from simulation statistics.

use serde::{Deserialize, Serialize};

use trade_sim_core::SimulationConfig;

use crate::stats::SimulationStats;

/// Headline percentage metrics for one simulation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    /// Change of USA export volume against baseline, in percent.
    pub trade_pct_change: f64,
    /// Estimated GDP impact, in percent.
    pub gdp_pct_impact: f64,
}

/// Derives headline metrics from the standard (USA-export) totals.
#[derive(Debug, Clone, Copy)]
pub struct ImpactCalculator {
    config: SimulationConfig,
}

impl ImpactCalculator {
    /// Creates a calculator with the given response constants.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Computes the headline percentages.
    ///
    /// Without retaliation the trade change is the plain relative change of
    /// the standard totals. Under retaliation a negative change is amplified
    /// and then bounded by a saturating curve:
    ///
    /// ```text
    /// raw = impact × multiplier
    /// raw < 0  =>  raw = −floor × (1 − e^(rate × raw))
    /// ```
    ///
    /// so the reported change approaches but never passes `−floor × 100`
    /// percent however bad the raw impact gets. A zero standard baseline
    /// reports zero change rather than dividing by zero.
    #[must_use]
    pub fn calculate(&self, stats: &SimulationStats, retaliation: bool) -> ImpactMetrics {
        let standard_impact = if stats.standard_base_total > 0.0 {
            (stats.standard_sim_total - stats.standard_base_total) / stats.standard_base_total
        } else {
            0.0
        };

        let trade_fraction = if retaliation {
            let raw = standard_impact * self.config.retaliation_multiplier;
            if raw < 0.0 {
                -self.config.retaliation_floor
                    * (1.0 - (self.config.retaliation_curve_rate * raw).exp())
            } else {
                raw
            }
        } else {
            standard_impact
        };

        let trade_pct_change = trade_fraction * 100.0;
        let gdp_pct_impact =
            trade_pct_change * self.config.trade_to_gdp_ratio * self.config.gdp_impact_factor;

        ImpactMetrics {
            trade_pct_change,
            gdp_pct_impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(standard_base: f64, standard_sim: f64) -> SimulationStats {
        SimulationStats {
            base_total: standard_base,
            sim_total: standard_sim,
            min: standard_sim,
            max: standard_sim,
            standard_base_total: standard_base,
            standard_sim_total: standard_sim,
        }
    }

    fn calculator() -> ImpactCalculator {
        ImpactCalculator::new(SimulationConfig::default())
    }

    #[test]
    fn plain_change_without_retaliation() {
        let metrics = calculator().calculate(&stats(1_000.0, 850.0), false);
        assert!((metrics.trade_pct_change - -15.0).abs() < 1e-9);
        // -15 × 0.27 × 0.75
        assert!((metrics.gdp_pct_impact - -3.0375).abs() < 1e-9);
    }

    #[test]
    fn zero_baseline_reports_zero_change() {
        for retaliation in [false, true] {
            let metrics = calculator().calculate(&stats(0.0, 0.0), retaliation);
            assert!((metrics.trade_pct_change - 0.0).abs() < f64::EPSILON);
            assert!((metrics.gdp_pct_impact - 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn retaliation_amplifies_a_mild_change() {
        // impact -0.10, raw -0.165: -0.8 × (1 - e^-0.297) ≈ -0.20556
        let metrics = calculator().calculate(&stats(1_000.0, 900.0), true);
        assert!(
            (metrics.trade_pct_change - -20.5565).abs() < 1e-3,
            "change was {}",
            metrics.trade_pct_change
        );
    }

    #[test]
    fn deep_losses_saturate_below_the_floor() {
        // impact -1.0, raw -1.65: -0.8 × (1 - e^-2.97) ≈ -0.75896
        let metrics = calculator().calculate(&stats(1_000.0, 0.0), true);
        assert!(
            (metrics.trade_pct_change - -75.8957).abs() < 1e-3,
            "change was {}",
            metrics.trade_pct_change
        );
    }

    #[test]
    fn trade_change_never_passes_the_floor() {
        // Simulated totals far below any real run still stay above -80%.
        for sim in [-1_000.0, -100.0, -10.0, 0.0] {
            let metrics = calculator().calculate(&stats(1.0, sim), true);
            assert!(
                metrics.trade_pct_change >= -80.0,
                "change {} passed the floor for sim {sim}",
                metrics.trade_pct_change
            );
            assert!(metrics.trade_pct_change < 0.0);
        }
    }

    #[test]
    fn positive_changes_skip_the_saturating_curve() {
        // impact +0.10, raw +0.165 passes straight through.
        let metrics = calculator().calculate(&stats(1_000.0, 1_100.0), true);
        assert!((metrics.trade_pct_change - 16.5).abs() < 1e-9);
    }

    #[test]
    fn gdp_impact_scales_the_trade_change() {
        let metrics = calculator().calculate(&stats(1_000.0, 800.0), false);
        let expected = metrics.trade_pct_change * 0.27 * 0.75;
        assert!((metrics.gdp_pct_impact - expected).abs() < 1e-12);
    }
}
