//! Flow feed ingestion.
//!
//! The production feed is a wide CSV (forty-odd columns of UN Comtrade
//! bookkeeping); only the columns named in [`RawRow`] are consumed and the
//! rest are ignored. Rows with flow codes other than `X`/`M` (re-exports,
//! re-imports) are filtered out rather than rejected.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use trade_sim_core::{FlowDirection, FlowRecord};

use crate::error::{DataError, Result};

/// The feed columns the simulation consumes.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "reporterISO3")]
    reporter: String,
    #[serde(rename = "partnerISO")]
    partner: String,
    #[serde(rename = "flowCode")]
    flow_code: String,
    #[serde(rename = "primaryValue")]
    value: f64,
    #[serde(rename = "tau_mean", default)]
    elasticity: Option<f64>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(rename = "cmdCode", default)]
    commodity: Option<u32>,
    #[serde(rename = "mfnRate", default)]
    mfn_rate: Option<f64>,
    #[serde(rename = "partnerDesc", default)]
    partner_name: Option<String>,
}

/// Loads flow records from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be opened or a row fails to parse.
pub fn load_flows(path: impl AsRef<Path>) -> Result<Vec<FlowRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::read(path, source))?;
    let records = read_flows(file)?;
    info!(path = %path.display(), flows = records.len(), "loaded flow feed");
    Ok(records)
}

/// Parses flow records from any CSV reader.
///
/// # Errors
/// Returns an error if a row fails to parse or carries a negative or
/// non-finite traded value.
pub fn read_flows<R: Read>(reader: R) -> Result<Vec<FlowRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        // 1-based feed line number, counting the header line.
        let line = index + 2;
        let raw = row.map_err(|source| DataError::MalformedRow { row: line, source })?;

        if !raw.value.is_finite() || raw.value < 0.0 {
            return Err(DataError::InvalidValue {
                row: line,
                value: raw.value,
            });
        }

        let Some(direction) = FlowDirection::from_code(&raw.flow_code) else {
            skipped += 1;
            continue;
        };

        records.push(FlowRecord {
            reporter: raw.reporter,
            partner: raw.partner,
            direction,
            value: raw.value,
            elasticity: raw.elasticity.filter(|e| e.is_finite()),
            year: raw.year,
            commodity: raw.commodity,
            mfn_rate: raw.mfn_rate,
            partner_name: raw.partner_name,
        });
    }

    if skipped > 0 {
        debug!(skipped, "dropped rows with non-simulated flow codes");
    }

    Ok(records)
}
