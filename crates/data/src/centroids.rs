//! Country centroid lookup.
//!
//! A [`CentroidTable`] maps ISO3 country codes to coordinates. The on-disk
//! format is a JSON object of `[longitude, latitude]` pairs, matching the
//! feed's companion table. A builtin table covering the major US trading
//! partners serves tests and runs without a table file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use trade_sim_core::GeoPoint;

use crate::error::{DataError, Result};

/// Approximate country centroids as (ISO3, latitude, longitude).
const BUILTIN: &[(&str, f64, f64)] = &[
    ("USA", 39.83, -98.58),
    ("CHN", 35.86, 104.20),
    ("CAN", 56.13, -106.35),
    ("MEX", 23.63, -102.55),
    ("JPN", 36.20, 138.25),
    ("DEU", 51.17, 10.45),
    ("GBR", 55.38, -3.44),
    ("KOR", 35.91, 127.77),
    ("FRA", 46.23, 2.21),
    ("IND", 20.59, 78.96),
    ("ITA", 41.87, 12.57),
    ("BRA", -14.24, -51.93),
    ("TWN", 23.70, 120.96),
    ("VNM", 14.06, 108.28),
    ("NLD", 52.13, 5.29),
    ("IRL", 53.41, -8.24),
    ("CHE", 46.82, 8.23),
    ("MYS", 4.21, 101.98),
    ("SGP", 1.35, 103.82),
    ("THA", 15.87, 100.99),
    ("AUS", -25.27, 133.78),
    ("ESP", 40.46, -3.75),
    ("BEL", 50.50, 4.47),
    ("SAU", 23.89, 45.08),
    ("RUS", 61.52, 105.32),
    ("IDN", -0.79, 113.92),
    ("TUR", 38.96, 35.24),
    ("POL", 51.92, 19.15),
    ("SWE", 60.13, 18.64),
    ("ARG", -38.42, -63.62),
];

/// ISO3-keyed coordinate lookup for flow enrichment.
#[derive(Debug, Clone, Default)]
pub struct CentroidTable {
    entries: HashMap<String, GeoPoint>,
}

impl CentroidTable {
    /// Builds the table from a JSON object of `[longitude, latitude]` pairs.
    ///
    /// # Errors
    /// Returns an error if the string is not such an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, [f64; 2]> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(iso3, [lng, lat])| (iso3, GeoPoint::new(lat, lng)))
            .collect();
        Ok(Self { entries })
    }

    /// Loads the table from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataError::read(path, source))?;
        Self::from_json_str(&json)
    }

    /// Returns the builtin table of major US trading partners.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|&(iso3, lat, lng)| (iso3.to_string(), GeoPoint::new(lat, lng)))
            .collect()
    }

    /// Looks up a country's centroid.
    #[must_use]
    pub fn get(&self, iso3: &str) -> Option<GeoPoint> {
        self.entries.get(iso3).copied()
    }

    /// Number of countries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, GeoPoint)> for CentroidTable {
    fn from_iter<T: IntoIterator<Item = (S, GeoPoint)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(iso3, point)| (iso3.into(), point))
                .collect(),
        }
    }
}
