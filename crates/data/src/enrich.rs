//! Coordinate enrichment of parsed flow records.
//!
//! Enrichment resolves both countries of a record against a
//! [`CentroidTable`] and orients the endpoints in the physical direction of
//! goods movement: export rows run reporter to partner, import rows run
//! partner to reporter. Records with an unresolvable country are dropped
//! silently; that is data-quality filtering, not a failure.

use tracing::debug;

use trade_sim_core::{EnrichedFlow, FlowDirection, FlowRecord};

use crate::centroids::CentroidTable;

/// Attaches coordinates to flow records and tags goods direction.
pub struct FlowRecordEnricher<'a> {
    centroids: &'a CentroidTable,
}

impl<'a> FlowRecordEnricher<'a> {
    /// Creates an enricher over the given centroid table.
    #[must_use]
    pub fn new(centroids: &'a CentroidTable) -> Self {
        Self { centroids }
    }

    /// Enriches records, consuming them. Records whose reporter or partner
    /// has no centroid are excluded from the result.
    #[must_use]
    pub fn enrich(&self, records: Vec<FlowRecord>) -> Vec<EnrichedFlow> {
        let total = records.len();
        let mut flows = Vec::with_capacity(total);

        for record in records {
            let (Some(reporter_point), Some(partner_point)) = (
                self.centroids.get(&record.reporter),
                self.centroids.get(&record.partner),
            ) else {
                continue;
            };

            let (start, end) = match record.direction {
                FlowDirection::Export => (reporter_point, partner_point),
                FlowDirection::Import => (partner_point, reporter_point),
            };

            flows.push(EnrichedFlow { record, start, end });
        }

        let dropped = total - flows.len();
        if dropped > 0 {
            debug!(
                dropped,
                kept = flows.len(),
                "dropped flows without resolvable centroids"
            );
        }

        flows
    }
}
