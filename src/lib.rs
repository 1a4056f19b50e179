//! SegmentLens: explore a precomputed customer segmentation table
//!
//! This library loads an RFM (Recency, Frequency, Monetary) table in which every
//! customer already carries a segment label, then summarizes it per segment and
//! answers single-customer lookups.

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod error;
pub mod lookup;
pub mod report;
pub mod schema;
pub mod stats;
pub mod viz;

// Re-export public items for easier access
pub use aggregate::{counts_by_segment, describe_segment, means_by_segment, segment_labels};
pub use catalog::{SegmentCatalog, FALLBACK_DESCRIPTION};
pub use cli::Args;
pub use data::{load_segment_table, CustomerRecord, SegmentTable};
pub use error::SegmentError;
pub use lookup::{find_by_id, CustomerMatch};
pub use schema::{IdPolicy, SchemaMapping};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
