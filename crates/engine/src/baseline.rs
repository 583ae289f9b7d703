//! Baseline aggregation of enriched flows into directional country-pair arcs.
//!
//! Export rows from every reporter are aggregated as-is. Import rows are only
//! aggregated when the USA reported them, and the stored reporter/partner are
//! swapped so that downstream consumers always see the arc running from the
//! goods origin to the goods destination. Export and import arcs between the
//! same country pair never merge.

use std::collections::HashMap;

use tracing::info;

use trade_sim_core::{ArcKey, EnrichedFlow, FlowDirection, GeoPoint, TradeArc, USA_ISO3};

/// The pre-tariff arc set, ordered by arc key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    arcs: Vec<TradeArc>,
}

struct ArcAccumulator {
    start: GeoPoint,
    end: GeoPoint,
    base_total: f64,
    weighted_elasticity: f64,
    elasticity_weight: f64,
}

impl ArcAccumulator {
    fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            base_total: 0.0,
            weighted_elasticity: 0.0,
            elasticity_weight: 0.0,
        }
    }

    fn add(&mut self, value: f64, elasticity: Option<f64>) {
        self.base_total += value;
        if let Some(elasticity) = elasticity {
            self.weighted_elasticity += elasticity.abs() * value;
            self.elasticity_weight += value;
        }
    }

    /// Volume-weighted magnitude of the contributing coefficients, absent
    /// when no contributing row carried one.
    fn elasticity(&self) -> Option<f64> {
        if self.elasticity_weight > 0.0 {
            Some(self.weighted_elasticity / self.elasticity_weight)
        } else {
            None
        }
    }
}

impl Baseline {
    /// Aggregates enriched flows into one arc per (reporter, partner,
    /// direction) key, with `value` initialized to `base_total`.
    ///
    /// Import rows not reported by the USA are skipped; the feed's non-USA
    /// import reporting is redundant with the corresponding export rows.
    #[must_use]
    pub fn from_flows(flows: &[EnrichedFlow]) -> Self {
        let mut buckets: HashMap<ArcKey, ArcAccumulator> = HashMap::new();
        let mut skipped = 0usize;

        for flow in flows {
            let record = &flow.record;
            let key = match record.direction {
                FlowDirection::Export => ArcKey::new(
                    record.reporter.clone(),
                    record.partner.clone(),
                    FlowDirection::Export,
                ),
                FlowDirection::Import => {
                    if !record.is_usa_reported() {
                        skipped += 1;
                        continue;
                    }
                    // Swapped: the partner ships the goods.
                    ArcKey::new(
                        record.partner.clone(),
                        record.reporter.clone(),
                        FlowDirection::Import,
                    )
                }
            };

            buckets
                .entry(key)
                .or_insert_with(|| ArcAccumulator::new(flow.start, flow.end))
                .add(record.value, record.elasticity);
        }

        let mut arcs: Vec<TradeArc> = buckets
            .into_iter()
            .map(|(key, acc)| TradeArc {
                reporter: key.reporter,
                partner: key.partner,
                direction: key.direction,
                start: acc.start,
                end: acc.end,
                elasticity: acc.elasticity(),
                base_total: acc.base_total,
                value: acc.base_total,
            })
            .collect();
        arcs.sort_by(|a, b| {
            (&a.reporter, &a.partner, a.direction).cmp(&(&b.reporter, &b.partner, b.direction))
        });

        info!(
            flows = flows.len(),
            arcs = arcs.len(),
            skipped_imports = skipped,
            "aggregated baseline arcs"
        );

        Self { arcs }
    }

    /// The aggregated arcs, sorted by (reporter, partner, direction).
    #[must_use]
    pub fn arcs(&self) -> &[TradeArc] {
        &self.arcs
    }

    /// Number of distinct arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Returns true when no flow survived aggregation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Sum of `base_total` over every arc.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.arcs.iter().map(|arc| arc.base_total).sum()
    }
}
