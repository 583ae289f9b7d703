//! Trade flow records as parsed from the bilateral trade feed.
//!
//! A [`FlowRecord`] is one row of the feed: a reporter/partner country pair,
//! a flow direction, a traded value, and an optional elasticity coefficient.
//! Enrichment resolves both endpoints to coordinates and produces an
//! [`EnrichedFlow`]; records whose endpoints cannot be resolved are dropped.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// ISO3 code of the reporting country in the feed's accounting convention.
///
/// Every import row in the feed is reported by this country, and headline
/// impact figures are computed over its outbound exports.
pub const USA_ISO3: &str = "USA";

/// Direction of a bilateral trade flow from the reporter's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Goods leaving the reporter (feed code `X`).
    #[serde(rename = "X")]
    Export,
    /// Goods entering the reporter (feed code `M`).
    #[serde(rename = "M")]
    Import,
}

impl FlowDirection {
    /// Returns the single-letter feed code for this direction.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Export => "X",
            Self::Import => "M",
        }
    }

    /// Returns true for import flows.
    #[must_use]
    pub const fn is_import(self) -> bool {
        matches!(self, Self::Import)
    }

    /// Parses a feed flow code. Codes other than `X`/`M` (re-exports,
    /// re-imports) have no place in the simulation and yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "X" => Some(Self::Export),
            "M" => Some(Self::Import),
            _ => None,
        }
    }
}

/// One parsed row of the trade-flow feed.
///
/// `value` is the traded amount in current USD. `elasticity` is the feed's
/// demand-sensitivity coefficient (`tau_mean`); its sign carries no meaning
/// and consumers always take the absolute value. The remaining fields are
/// descriptive columns carried through for reporting when the feed provides
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Reporting country (ISO3).
    pub reporter: String,
    /// Partner country (ISO3).
    pub partner: String,
    /// Flow direction as reported.
    pub direction: FlowDirection,
    /// Traded value, non-negative USD.
    pub value: f64,
    /// Demand elasticity coefficient, when the feed has one for this row.
    pub elasticity: Option<f64>,
    /// Reference year.
    #[serde(default)]
    pub year: Option<i32>,
    /// HS2 commodity chapter.
    #[serde(default)]
    pub commodity: Option<u32>,
    /// Most-favoured-nation tariff rate already applied to the row.
    #[serde(default)]
    pub mfn_rate: Option<f64>,
    /// Human-readable partner country name.
    #[serde(default)]
    pub partner_name: Option<String>,
}

impl FlowRecord {
    /// Creates a record with the four fields every row must have.
    #[must_use]
    pub fn new(
        reporter: impl Into<String>,
        partner: impl Into<String>,
        direction: FlowDirection,
        value: f64,
    ) -> Self {
        Self {
            reporter: reporter.into(),
            partner: partner.into(),
            direction,
            value,
            elasticity: None,
            year: None,
            commodity: None,
            mfn_rate: None,
            partner_name: None,
        }
    }

    /// Sets the elasticity coefficient.
    #[must_use]
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = Some(elasticity);
        self
    }

    /// Sets the human-readable partner name.
    #[must_use]
    pub fn with_partner_name(mut self, name: impl Into<String>) -> Self {
        self.partner_name = Some(name.into());
        self
    }

    /// Returns true when this row was reported by the USA.
    #[must_use]
    pub fn is_usa_reported(&self) -> bool {
        self.reporter == USA_ISO3
    }
}

/// A flow record with both endpoints resolved to coordinates.
///
/// `start` is always the goods origin and `end` the goods destination:
/// for import rows the reporter receives the goods, so enrichment swaps the
/// endpoints relative to the reporter/partner accounting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFlow {
    /// The underlying feed row.
    pub record: FlowRecord,
    /// Coordinate of the goods origin.
    pub start: GeoPoint,
    /// Coordinate of the goods destination.
    pub end: GeoPoint,
}

impl EnrichedFlow {
    /// Returns the flow direction of the underlying record.
    #[must_use]
    pub fn direction(&self) -> FlowDirection {
        self.record.direction
    }

    /// Returns the traded value of the underlying record.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.record.value
    }
}
