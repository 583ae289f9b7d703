//! Volume-weighted elasticity profiles per trading partner.
//!
//! Each non-USA partner gets one profile with a directional figure for
//! USA-outbound exports and USA-inbound imports plus their average. Profiles
//! depend only on the enriched flow set and are computed once per data load,
//! never per simulation pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use trade_sim_core::{EnrichedFlow, FlowDirection, USA_ISO3};

/// Weighted elasticity magnitudes for one partner country.
///
/// A direction with no contributing flows reports 0; consumers treat 0 as
/// "unavailable" and fall back to flow-level coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryElasticityProfile {
    /// Over exports from the USA to this country.
    pub export: f64,
    /// Over imports into the USA from this country.
    pub import: f64,
    /// Average of the two directional figures.
    pub total: f64,
}

impl CountryElasticityProfile {
    /// The profile of a country with no contributing flows.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            export: 0.0,
            import: 0.0,
            total: 0.0,
        }
    }
}

/// Elasticity profiles for every partner country seen in the flow set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticityProfiles {
    profiles: HashMap<String, CountryElasticityProfile>,
}

#[derive(Default)]
struct DirectionalAccumulator {
    weight: f64,
    weighted_sum: f64,
}

impl DirectionalAccumulator {
    fn add(&mut self, elasticity: f64, value: f64) {
        self.weight += value;
        self.weighted_sum += elasticity.abs() * value;
    }

    fn magnitude(&self) -> f64 {
        if self.weight > 0.0 {
            self.weighted_sum / self.weight
        } else {
            0.0
        }
    }
}

#[derive(Default)]
struct ProfileAccumulator {
    export: DirectionalAccumulator,
    import: DirectionalAccumulator,
}

impl ElasticityProfiles {
    /// Computes a profile for every non-USA partner in the flow set.
    ///
    /// Weights are the rows' trade values:
    ///
    /// ```text
    /// elasticity = Σ(|coefficient| × value) / Σ(value)
    /// ```
    ///
    /// computed separately per direction over USA-reported rows. Rows without
    /// a coefficient contribute to neither sum. Partners seen only through
    /// foreign reporters still get a (zero) profile.
    #[must_use]
    pub fn from_flows(flows: &[EnrichedFlow]) -> Self {
        let mut accumulators: HashMap<String, ProfileAccumulator> = HashMap::new();

        for flow in flows {
            let record = &flow.record;
            if record.partner.is_empty() || record.partner == USA_ISO3 {
                continue;
            }
            let entry = accumulators.entry(record.partner.clone()).or_default();
            if !record.is_usa_reported() {
                continue;
            }
            let Some(elasticity) = record.elasticity else {
                continue;
            };
            match record.direction {
                FlowDirection::Export => entry.export.add(elasticity, record.value),
                FlowDirection::Import => entry.import.add(elasticity, record.value),
            }
        }

        let profiles: HashMap<String, CountryElasticityProfile> = accumulators
            .into_iter()
            .map(|(country, acc)| {
                let export = acc.export.magnitude();
                let import = acc.import.magnitude();
                let profile = CountryElasticityProfile {
                    export,
                    import,
                    total: (export + import) / 2.0,
                };
                (country, profile)
            })
            .collect();

        debug!(countries = profiles.len(), "computed elasticity profiles");

        Self { profiles }
    }

    /// Looks up a country's profile, falling back to the zero profile for
    /// countries absent from the flow set.
    #[must_use]
    pub fn get(&self, iso3: &str) -> CountryElasticityProfile {
        self.profiles.get(iso3).copied().unwrap_or_else(CountryElasticityProfile::zero)
    }

    /// Returns true when the flow set contained this partner.
    #[must_use]
    pub fn contains(&self, iso3: &str) -> bool {
        self.profiles.contains_key(iso3)
    }

    /// Number of profiled countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true when no country was profiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterates over (country, profile) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryElasticityProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }
}
