//! Input data loading for the trade tariff simulator.
//!
//! This crate provides:
//! - CSV ingestion of the bilateral flow feed
//! - The ISO3-keyed country centroid table
//! - Coordinate enrichment of parsed flow records

pub mod centroids;
pub mod enrich;
pub mod error;
pub mod flows;

pub use centroids::CentroidTable;
pub use enrich::FlowRecordEnricher;
pub use error::DataError;
pub use flows::{load_flows, read_flows};
