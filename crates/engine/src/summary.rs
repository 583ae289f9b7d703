//! Reporting summaries: partner volume ranking and per-country breakdowns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use trade_sim_core::{FlowDirection, FlowRecord, TradeArc, USA_ISO3};

use crate::elasticity::{CountryElasticityProfile, ElasticityProfiles};

/// One entry of the USA partner ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerVolume {
    /// Partner country (ISO3).
    pub country: String,
    /// Total flow volume with the USA, both directions.
    pub volume: f64,
    /// Share of the summed partner volume, in percent.
    pub share_pct: f64,
}

/// Ranks every USA trading partner by total flow volume, descending.
///
/// Counts each row where the USA is on either side toward the other country.
/// Ties rank alphabetically.
#[must_use]
pub fn partner_volumes(flows: &[FlowRecord]) -> Vec<PartnerVolume> {
    let mut volumes: HashMap<String, f64> = HashMap::new();

    for record in flows {
        let other = if record.reporter == USA_ISO3 {
            record.partner.as_str()
        } else if record.partner == USA_ISO3 {
            record.reporter.as_str()
        } else {
            continue;
        };
        if other.is_empty() || other == USA_ISO3 {
            continue;
        }
        *volumes.entry(other.to_string()).or_insert(0.0) += record.value;
    }

    let total: f64 = volumes.values().sum();
    let mut ranked: Vec<PartnerVolume> = volumes
        .into_iter()
        .map(|(country, volume)| PartnerVolume {
            country,
            volume,
            share_pct: if total > 0.0 { volume / total * 100.0 } else { 0.0 },
        })
        .collect();
    ranked.sort_by(|a, b| b.volume.total_cmp(&a.volume).then_with(|| a.country.cmp(&b.country)));

    ranked
}

/// Simulated-arc breakdown for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    /// The country (ISO3).
    pub iso3: String,
    /// Elasticity profile: the country's own when profiled, otherwise
    /// derived from its arcs' coefficients.
    pub elasticity: CountryElasticityProfile,
    /// Baseline total over the country's export arcs.
    pub export_base_total: f64,
    /// Simulated total over the country's export arcs.
    pub export_sim_total: f64,
    /// Export change in percent, 0 when there is no export baseline.
    pub export_change_pct: f64,
    /// Baseline total over the country's import arcs.
    pub import_base_total: f64,
    /// Simulated total over the country's import arcs.
    pub import_sim_total: f64,
    /// Import change in percent, 0 when there is no import baseline.
    pub import_change_pct: f64,
    /// Every simulated arc touching the country, in input order.
    pub arcs: Vec<TradeArc>,
}

/// Collects the simulated arcs touching `iso3` and summarizes them.
#[must_use]
pub fn country_detail(
    iso3: &str,
    arcs: &[TradeArc],
    profiles: &ElasticityProfiles,
) -> CountryDetail {
    let touching: Vec<TradeArc> = arcs
        .iter()
        .filter(|arc| arc.reporter == iso3 || arc.partner == iso3)
        .cloned()
        .collect();

    let elasticity = if profiles.contains(iso3) {
        profiles.get(iso3)
    } else {
        // Unprofiled countries (the USA included) fall back to their arcs.
        CountryElasticityProfile {
            export: weighted_arc_elasticity(
                touching.iter().filter(|a| a.direction == FlowDirection::Export),
            ),
            import: weighted_arc_elasticity(
                touching.iter().filter(|a| a.direction == FlowDirection::Import),
            ),
            total: weighted_arc_elasticity(touching.iter()),
        }
    };

    let mut export_base_total = 0.0;
    let mut export_sim_total = 0.0;
    let mut import_base_total = 0.0;
    let mut import_sim_total = 0.0;
    for arc in &touching {
        match arc.direction {
            FlowDirection::Export => {
                export_base_total += arc.base_total;
                export_sim_total += arc.value;
            }
            FlowDirection::Import => {
                import_base_total += arc.base_total;
                import_sim_total += arc.value;
            }
        }
    }

    CountryDetail {
        iso3: iso3.to_string(),
        elasticity,
        export_base_total,
        export_sim_total,
        export_change_pct: pct_change(export_sim_total, export_base_total),
        import_base_total,
        import_sim_total,
        import_change_pct: pct_change(import_sim_total, import_base_total),
        arcs: touching,
    }
}

fn pct_change(sim: f64, base: f64) -> f64 {
    if base > 0.0 {
        (sim - base) / base * 100.0
    } else {
        0.0
    }
}

fn weighted_arc_elasticity<'a>(arcs: impl Iterator<Item = &'a TradeArc>) -> f64 {
    let mut weight = 0.0;
    let mut weighted_sum = 0.0;
    for arc in arcs {
        let Some(elasticity) = arc.elasticity else {
            continue;
        };
        weight += arc.base_total;
        weighted_sum += elasticity.abs() * arc.base_total;
    }
    if weight > 0.0 {
        weighted_sum / weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_sim_core::{EnrichedFlow, GeoPoint};

    fn record(reporter: &str, partner: &str, direction: FlowDirection, value: f64) -> FlowRecord {
        FlowRecord::new(reporter, partner, direction, value)
    }

    fn arc(
        reporter: &str,
        partner: &str,
        direction: FlowDirection,
        base: f64,
        value: f64,
        elasticity: Option<f64>,
    ) -> TradeArc {
        TradeArc {
            reporter: reporter.to_string(),
            partner: partner.to_string(),
            direction,
            start: GeoPoint::new(0.0, 0.0),
            end: GeoPoint::new(10.0, 10.0),
            elasticity,
            base_total: base,
            value,
        }
    }

    // ============================================
    // Partner Volume Tests
    // ============================================

    #[test]
    fn volumes_sum_both_directions_for_each_partner() {
        let flows = vec![
            record("USA", "CHN", FlowDirection::Export, 100.0),
            record("USA", "CHN", FlowDirection::Import, 200.0),
            record("CAN", "USA", FlowDirection::Export, 50.0),
        ];
        let ranked = partner_volumes(&flows);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].country, "CHN");
        assert!((ranked[0].volume - 300.0).abs() < 1e-9);
        assert!((ranked[1].volume - 50.0).abs() < 1e-9);
    }

    #[test]
    fn shares_sum_to_one_hundred_percent() {
        let flows = vec![
            record("USA", "CHN", FlowDirection::Export, 300.0),
            record("USA", "CAN", FlowDirection::Export, 100.0),
        ];
        let ranked = partner_volumes(&flows);

        let share_sum: f64 = ranked.iter().map(|entry| entry.share_pct).sum();
        assert!((share_sum - 100.0).abs() < 1e-9, "shares summed to {share_sum}");
        assert!((ranked[0].share_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn rows_not_touching_the_usa_are_ignored() {
        let flows = vec![
            record("CAN", "MEX", FlowDirection::Export, 999.0),
            record("USA", "CHN", FlowDirection::Export, 100.0),
        ];
        let ranked = partner_volumes(&flows);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].country, "CHN");
    }

    #[test]
    fn equal_volumes_rank_alphabetically() {
        let flows = vec![
            record("USA", "DEU", FlowDirection::Export, 100.0),
            record("USA", "CAN", FlowDirection::Export, 100.0),
        ];
        let ranked = partner_volumes(&flows);

        assert_eq!(ranked[0].country, "CAN");
        assert_eq!(ranked[1].country, "DEU");
    }

    #[test]
    fn no_flows_means_no_ranking() {
        assert!(partner_volumes(&[]).is_empty());
    }

    // ============================================
    // Country Detail Tests
    // ============================================

    #[test]
    fn detail_collects_only_touching_arcs() {
        let arcs = vec![
            arc("USA", "CHN", FlowDirection::Export, 1_000.0, 800.0, None),
            arc("CHN", "USA", FlowDirection::Import, 500.0, 450.0, None),
            arc("USA", "DEU", FlowDirection::Export, 700.0, 600.0, None),
        ];
        let detail = country_detail("CHN", &arcs, &ElasticityProfiles::default());

        assert_eq!(detail.arcs.len(), 2);
    }

    #[test]
    fn detail_splits_totals_by_direction() {
        let arcs = vec![
            arc("USA", "CHN", FlowDirection::Export, 1_000.0, 800.0, None),
            arc("CHN", "USA", FlowDirection::Import, 500.0, 450.0, None),
        ];
        let detail = country_detail("CHN", &arcs, &ElasticityProfiles::default());

        assert!((detail.export_change_pct - -20.0).abs() < 1e-9);
        assert!((detail.import_change_pct - -10.0).abs() < 1e-9);
    }

    #[test]
    fn missing_direction_reports_zero_change() {
        let arcs = vec![arc("USA", "CHN", FlowDirection::Export, 1_000.0, 800.0, None)];
        let detail = country_detail("CHN", &arcs, &ElasticityProfiles::default());

        assert!((detail.import_base_total - 0.0).abs() < f64::EPSILON);
        assert!((detail.import_change_pct - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn profiled_countries_use_their_profile() {
        let flows = vec![EnrichedFlow {
            record: record("USA", "CHN", FlowDirection::Export, 100.0).with_elasticity(2.0),
            start: GeoPoint::new(0.0, 0.0),
            end: GeoPoint::new(10.0, 10.0),
        }];
        let profiles = ElasticityProfiles::from_flows(&flows);
        let arcs = vec![arc("USA", "CHN", FlowDirection::Export, 100.0, 80.0, Some(9.9))];

        let detail = country_detail("CHN", &arcs, &profiles);
        assert!((detail.elasticity.export - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unprofiled_countries_derive_elasticity_from_their_arcs() {
        let arcs = vec![
            arc("USA", "CHN", FlowDirection::Export, 1_000.0, 800.0, Some(2.0)),
            arc("CHN", "USA", FlowDirection::Import, 500.0, 450.0, Some(1.0)),
        ];
        let detail = country_detail("USA", &arcs, &ElasticityProfiles::default());

        assert!((detail.elasticity.export - 2.0).abs() < 1e-9);
        assert!((detail.elasticity.import - 1.0).abs() < 1e-9);
        // Overall figure weights across both directions: 2500 / 1500.
        assert!((detail.elasticity.total - 5.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn arcs_without_a_coefficient_are_left_out_of_the_fallback() {
        let arcs = vec![
            arc("USA", "CHN", FlowDirection::Export, 1_000.0, 800.0, Some(2.0)),
            arc("USA", "DEU", FlowDirection::Export, 9_000.0, 8_000.0, None),
        ];
        let detail = country_detail("USA", &arcs, &ElasticityProfiles::default());

        assert!((detail.elasticity.export - 2.0).abs() < 1e-9);
    }
}
