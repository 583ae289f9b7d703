//! Tariff response simulation over the baseline arc set.
//!
//! Every parameter change rebuilds the full simulated arc set from the
//! baseline; nothing is patched incrementally. Export arcs always react to
//! the tariff, import arcs only when retaliation is enabled.

use serde::{Deserialize, Serialize};
use tracing::info;

use trade_sim_core::{
    FlowDirection, SimulationConfig, SimulationParams, TradeArc, USA_ISO3,
};

use crate::baseline::Baseline;
use crate::elasticity::ElasticityProfiles;
use crate::stats::SimulationStats;

/// One complete simulation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// The parameters the pass was computed with.
    pub params: SimulationParams,
    /// Simulated arcs, same order and keys as the baseline.
    pub arcs: Vec<TradeArc>,
    /// Aggregate statistics over the simulated arcs.
    pub stats: SimulationStats,
}

/// Applies the tariff response model to a baseline arc set.
///
/// The simulator is pure: `simulate` never mutates the baseline or the
/// profiles, and identical inputs produce identical runs.
#[derive(Debug, Clone, Copy)]
pub struct TariffSimulator {
    config: SimulationConfig,
}

impl TariffSimulator {
    /// Creates a simulator with the given response constants.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Recomputes every arc's value for the given tariff rate and
    /// retaliation flag.
    ///
    /// Per export arc:
    ///
    /// ```text
    /// value = base_total × (1+τ)^(−elasticity) × (1 − min(damping_rate×τ, damping_cap))
    /// ```
    ///
    /// The trailing damping factor never removes more than `damping_cap` of
    /// the volume however high τ goes. Per import arc the decay term applies
    /// only under retaliation; otherwise the arc stays at baseline.
    #[must_use]
    pub fn simulate(
        &self,
        baseline: &Baseline,
        profiles: &ElasticityProfiles,
        params: SimulationParams,
    ) -> SimulationRun {
        let arcs: Vec<TradeArc> = baseline
            .arcs()
            .iter()
            .map(|arc| self.simulate_arc(arc, profiles, params))
            .collect();
        let stats = SimulationStats::from_arcs(&arcs);

        info!(
            tariff_rate = params.tariff_rate,
            retaliation = params.retaliation,
            arcs = arcs.len(),
            "simulated arc set"
        );

        SimulationRun {
            params,
            arcs,
            stats,
        }
    }

    fn simulate_arc(
        &self,
        arc: &TradeArc,
        profiles: &ElasticityProfiles,
        params: SimulationParams,
    ) -> TradeArc {
        let elasticity = self.resolve_elasticity(arc, profiles);
        let decay = (1.0 + params.tariff_rate).powf(-elasticity);

        let value = match arc.direction {
            FlowDirection::Export => {
                let damping =
                    1.0 - (self.config.damping_rate * params.tariff_rate).min(self.config.damping_cap);
                arc.base_total * decay * damping
            }
            FlowDirection::Import if params.retaliation => arc.base_total * decay,
            FlowDirection::Import => arc.base_total,
        };

        TradeArc {
            elasticity: Some(elasticity),
            value,
            ..arc.clone()
        }
    }

    /// Resolution order: country profile when positive, then the arc's own
    /// weighted coefficient when positive, then the configured default.
    /// Export arcs from reporters other than the USA have no profile and go
    /// straight to the arc coefficient.
    fn resolve_elasticity(&self, arc: &TradeArc, profiles: &ElasticityProfiles) -> f64 {
        let profile = match arc.direction {
            FlowDirection::Export if arc.reporter == USA_ISO3 => {
                Some(profiles.get(&arc.partner).export)
            }
            FlowDirection::Export => None,
            // Import arcs store the goods origin as reporter.
            FlowDirection::Import => Some(profiles.get(&arc.reporter).import),
        };

        if let Some(elasticity) = profile {
            if elasticity > 0.0 {
                return elasticity;
            }
        }
        match arc.elasticity {
            Some(elasticity) if elasticity > 0.0 => elasticity,
            _ => self.config.default_elasticity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_sim_core::{EnrichedFlow, FlowRecord, GeoPoint};

    fn enriched(reporter: &str, partner: &str, direction: FlowDirection, value: f64) -> EnrichedFlow {
        EnrichedFlow {
            record: FlowRecord::new(reporter, partner, direction, value),
            start: GeoPoint::new(0.0, 0.0),
            end: GeoPoint::new(10.0, 10.0),
        }
    }

    fn enriched_with_tau(
        reporter: &str,
        partner: &str,
        direction: FlowDirection,
        value: f64,
        tau: f64,
    ) -> EnrichedFlow {
        let mut flow = enriched(reporter, partner, direction, value);
        flow.record.elasticity = Some(tau);
        flow
    }

    fn simulator() -> TariffSimulator {
        TariffSimulator::new(SimulationConfig::default())
    }

    fn params(tariff_rate: f64, retaliation: bool) -> SimulationParams {
        SimulationParams::new(tariff_rate, retaliation).unwrap()
    }

    // ============================================
    // Zero-Tariff Identity Tests
    // ============================================

    #[test]
    fn zero_tariff_reproduces_the_baseline() {
        let flows = vec![
            enriched("USA", "CHN", FlowDirection::Export, 1_000.0),
            enriched("USA", "CHN", FlowDirection::Import, 500.0),
        ];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);

        for retaliation in [false, true] {
            let run = simulator().simulate(&baseline, &profiles, params(0.0, retaliation));
            for arc in &run.arcs {
                assert!(
                    (arc.value - arc.base_total).abs() < 1e-9,
                    "arc {}->{} moved at zero tariff",
                    arc.reporter,
                    arc.partner
                );
            }
        }
    }

    // ============================================
    // Export Decay Tests
    // ============================================

    #[test]
    fn export_decay_matches_the_response_formula() {
        // No coefficient anywhere, so the default elasticity of 1.5 applies.
        let flows = vec![enriched("USA", "CHN", FlowDirection::Export, 1_000.0)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);
        let sim = simulator();

        let half = sim.simulate(&baseline, &profiles, params(0.5, false)).arcs[0].value;
        let full = sim.simulate(&baseline, &profiles, params(1.0, false)).arcs[0].value;

        // 1000 × 1.5^-1.5 × 0.925 and 1000 × 2^-1.5 × 0.85
        assert!((half - 503.506).abs() < 1e-3, "half was {half}");
        assert!((full - 300.520).abs() < 1e-3, "full was {full}");
    }

    #[test]
    fn export_value_decreases_as_the_tariff_rises() {
        let flows = vec![enriched("USA", "CHN", FlowDirection::Export, 1_000.0)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);
        let sim = simulator();

        let mut previous = f64::INFINITY;
        for rate in [0.0, 0.25, 0.5, 0.75, 1.0, 1.5] {
            let value = sim.simulate(&baseline, &profiles, params(rate, false)).arcs[0].value;
            assert!(value < previous, "value {value} did not fall at rate {rate}");
            previous = value;
        }
    }

    #[test]
    fn damping_never_removes_more_than_the_cap() {
        let flows = vec![enriched("USA", "CHN", FlowDirection::Export, 1_000.0)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);

        // At τ=3 the raw damping term 0.15×3 = 0.45 exceeds the 0.3 cap:
        // 1000 × 4^-1.5 × 0.7 = 87.5
        let run = simulator().simulate(&baseline, &profiles, params(3.0, false));
        assert!((run.arcs[0].value - 87.5).abs() < 1e-9, "value was {}", run.arcs[0].value);
    }

    // ============================================
    // Import Gating Tests
    // ============================================

    #[test]
    fn imports_stay_at_baseline_without_retaliation() {
        let flows = vec![enriched_with_tau("USA", "CHN", FlowDirection::Import, 500.0, 1.5)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);
        let sim = simulator();

        for rate in [0.0, 0.3, 1.0, 1.5] {
            let run = sim.simulate(&baseline, &profiles, params(rate, false));
            assert!(
                (run.arcs[0].value - 500.0).abs() < 1e-9,
                "import moved at rate {rate}"
            );
        }
    }

    #[test]
    fn retaliation_applies_the_decay_to_imports() {
        let flows = vec![enriched_with_tau("USA", "CHN", FlowDirection::Import, 500.0, 1.5)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);

        // 500 × 1.3^-1.5, no damping factor on imports
        let run = simulator().simulate(&baseline, &profiles, params(0.3, true));
        let expected = 500.0 * 1.3_f64.powf(-1.5);
        assert!(
            (run.arcs[0].value - expected).abs() < 1e-9,
            "value was {}",
            run.arcs[0].value
        );
        assert!(run.arcs[0].value > 337.0 && run.arcs[0].value < 337.7);
    }

    // ============================================
    // Elasticity Resolution Tests
    // ============================================

    #[test]
    fn country_profile_wins_over_the_arc_coefficient() {
        // Baseline arc carries no coefficient; the profile set does.
        let baseline = Baseline::from_flows(&[enriched("USA", "CHN", FlowDirection::Export, 1_000.0)]);
        let profiles = ElasticityProfiles::from_flows(&[enriched_with_tau(
            "USA",
            "CHN",
            FlowDirection::Export,
            1_000.0,
            2.0,
        )]);

        let run = simulator().simulate(&baseline, &profiles, params(0.5, false));
        let expected = 1_000.0 * 1.5_f64.powf(-2.0) * 0.925;
        assert!((run.arcs[0].value - expected).abs() < 1e-9);
        assert_eq!(run.arcs[0].elasticity, Some(2.0));
    }

    #[test]
    fn zero_profile_falls_through_to_the_arc_coefficient() {
        let baseline = Baseline::from_flows(&[enriched_with_tau(
            "USA",
            "CHN",
            FlowDirection::Export,
            1_000.0,
            2.0,
        )]);
        // CHN is profiled, but no coefficient-bearing row contributed.
        let profiles = ElasticityProfiles::from_flows(&[enriched(
            "USA",
            "CHN",
            FlowDirection::Export,
            1_000.0,
        )]);

        let run = simulator().simulate(&baseline, &profiles, params(0.5, false));
        assert_eq!(run.arcs[0].elasticity, Some(2.0));
    }

    #[test]
    fn default_applies_when_nothing_else_is_available() {
        let baseline = Baseline::from_flows(&[enriched("USA", "CHN", FlowDirection::Export, 1_000.0)]);
        let profiles = ElasticityProfiles::from_flows(&[]);

        let run = simulator().simulate(&baseline, &profiles, params(0.5, false));
        assert_eq!(run.arcs[0].elasticity, Some(1.5));
    }

    #[test]
    fn foreign_export_arcs_skip_the_country_profile() {
        let baseline = Baseline::from_flows(&[enriched_with_tau(
            "CAN",
            "MEX",
            FlowDirection::Export,
            1_000.0,
            2.0,
        )]);
        // MEX has a strong profile from USA flows; the CAN arc must not use it.
        let profiles = ElasticityProfiles::from_flows(&[enriched_with_tau(
            "USA",
            "MEX",
            FlowDirection::Export,
            1_000.0,
            3.0,
        )]);

        let run = simulator().simulate(&baseline, &profiles, params(0.5, false));
        assert_eq!(run.arcs[0].elasticity, Some(2.0));
    }

    #[test]
    fn import_arcs_look_up_the_profile_by_goods_origin() {
        // Post-swap the arc reads CHN -> USA; the CHN import profile applies.
        let baseline = Baseline::from_flows(&[enriched("USA", "CHN", FlowDirection::Import, 500.0)]);
        let profiles = ElasticityProfiles::from_flows(&[enriched_with_tau(
            "USA",
            "CHN",
            FlowDirection::Import,
            500.0,
            2.5,
        )]);

        let run = simulator().simulate(&baseline, &profiles, params(0.3, true));
        assert_eq!(run.arcs[0].elasticity, Some(2.5));
    }

    // ============================================
    // Purity Tests
    // ============================================

    #[test]
    fn simulation_leaves_the_baseline_untouched() {
        let flows = vec![enriched("USA", "CHN", FlowDirection::Export, 1_000.0)];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);
        let before = baseline.clone();

        let _ = simulator().simulate(&baseline, &profiles, params(1.0, true));
        assert_eq!(baseline, before);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let flows = vec![
            enriched_with_tau("USA", "CHN", FlowDirection::Export, 1_000.0, 2.0),
            enriched_with_tau("USA", "DEU", FlowDirection::Import, 400.0, 1.2),
        ];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);
        let sim = simulator();

        let first = sim.simulate(&baseline, &profiles, params(0.8, true));
        let second = sim.simulate(&baseline, &profiles, params(0.8, true));
        assert_eq!(first, second);
    }

    #[test]
    fn run_stats_separate_standard_from_overall_totals() {
        let flows = vec![
            enriched("USA", "CHN", FlowDirection::Export, 1_000.0),
            enriched("USA", "CHN", FlowDirection::Import, 500.0),
        ];
        let baseline = Baseline::from_flows(&flows);
        let profiles = ElasticityProfiles::from_flows(&flows);

        let run = simulator().simulate(&baseline, &profiles, params(0.5, false));
        assert!((run.stats.standard_base_total - 1_000.0).abs() < 1e-9);
        assert!((run.stats.base_total - 1_500.0).abs() < 1e-9);
        // The untaxed import arc keeps the overall sim total above the standard one.
        assert!(run.stats.sim_total > run.stats.standard_sim_total);
    }
}
