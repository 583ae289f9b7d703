//! Directional country-pair arcs, the aggregation unit of the simulation.

use serde::{Deserialize, Serialize};

use crate::flow::{FlowDirection, USA_ISO3};
use crate::geo::GeoPoint;

/// Composite key identifying one directional country-pair arc.
///
/// `reporter` is the goods origin and `partner` the goods destination, after
/// the import swap applied during aggregation. Export and import arcs between
/// the same two countries are distinct keys and must never merge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArcKey {
    /// Goods-origin country (ISO3).
    pub reporter: String,
    /// Goods-destination country (ISO3).
    pub partner: String,
    /// Flow direction the contributing rows were reported under.
    pub direction: FlowDirection,
}

impl ArcKey {
    /// Creates a key from origin, destination, and direction.
    #[must_use]
    pub fn new(
        reporter: impl Into<String>,
        partner: impl Into<String>,
        direction: FlowDirection,
    ) -> Self {
        Self {
            reporter: reporter.into(),
            partner: partner.into(),
            direction,
        }
    }
}

/// Aggregated trade between one directional country pair.
///
/// `base_total` is the unconditional sum of the contributing rows' values.
/// `value` is the current simulated total: equal to `base_total` on a fresh
/// baseline, recomputed from it on every simulation pass, and never persisted
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeArc {
    /// Goods-origin country (ISO3).
    pub reporter: String,
    /// Goods-destination country (ISO3).
    pub partner: String,
    /// Direction the contributing rows were reported under.
    pub direction: FlowDirection,
    /// Coordinate of the goods origin.
    pub start: GeoPoint,
    /// Coordinate of the goods destination.
    pub end: GeoPoint,
    /// Elasticity magnitude associated with the arc. On a fresh baseline this
    /// is the volume-weighted mean of the contributing rows' |coefficients|
    /// (absent when no row carried one); simulated arcs carry the magnitude
    /// the simulator actually applied.
    pub elasticity: Option<f64>,
    /// Pre-tariff total of the contributing rows' values.
    pub base_total: f64,
    /// Current simulated total.
    pub value: f64,
}

impl TradeArc {
    /// Returns the aggregation key for this arc.
    #[must_use]
    pub fn key(&self) -> ArcKey {
        ArcKey::new(self.reporter.clone(), self.partner.clone(), self.direction)
    }

    /// Returns true for USA-origin export arcs, the subset headline impact
    /// figures are computed over.
    #[must_use]
    pub fn is_us_export(&self) -> bool {
        self.direction == FlowDirection::Export && self.reporter == USA_ISO3
    }

    /// Percentage change of the simulated value against the baseline.
    /// A zero baseline reports 0 rather than dividing by zero.
    #[must_use]
    pub fn change_pct(&self) -> f64 {
        if self.base_total <= 0.0 {
            return 0.0;
        }
        (self.value - self.base_total) / self.base_total * 100.0
    }
}
