//! Per-segment aggregation: counts, feature means and descriptive statistics

use crate::catalog::SegmentCatalog;
use crate::data::{SegmentTable, FREQUENCY, LABEL, MONETARY, RECENCY};
use crate::error::SegmentError;
use crate::stats::FeatureStats;
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

const COUNT: &str = "Count";

/// Number of customers carrying one label.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCount {
    pub label: String,
    pub count: usize,
}

/// Mean RFM values of one segment, rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMeans {
    pub label: String,
    pub recency: f64,
    pub frequency: f64,
    pub monetary_value: f64,
}

impl SegmentMeans {
    pub fn features(&self) -> [f64; 3] {
        [self.recency, self.frequency, self.monetary_value]
    }
}

/// Drill-down view of a single segment.
#[derive(Debug, Clone)]
pub struct SegmentDescription {
    pub label: String,
    pub description: &'static str,
    pub count: usize,
    pub recency: FeatureStats,
    pub frequency: FeatureStats,
    pub monetary_value: FeatureStats,
    /// Table rows belonging to the segment, in table order.
    pub rows: Vec<usize>,
}

impl SegmentDescription {
    /// Feature statistics in Recency, Frequency, Monetary order.
    pub fn features(&self) -> [&FeatureStats; 3] {
        [&self.recency, &self.frequency, &self.monetary_value]
    }
}

/// Customer counts per label, largest first.
///
/// Labels with equal counts keep the order in which they first appear in the
/// table.
pub fn counts_by_segment(table: &SegmentTable) -> crate::Result<Vec<SegmentCount>> {
    let counts = table
        .analysis_frame()?
        .lazy()
        .group_by_stable([col(LABEL)])
        .agg([len().alias(COUNT)])
        .sort(
            [COUNT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let labels = counts.column(LABEL)?.str()?;
    let sizes = counts.column(COUNT)?.cast(&DataType::UInt64)?;
    let sizes = sizes.u64()?;

    let result: Vec<SegmentCount> = labels
        .into_iter()
        .zip(sizes.into_iter())
        .map(|(label, count)| SegmentCount {
            label: label.unwrap_or_default().to_string(),
            count: count.unwrap_or_default() as usize,
        })
        .collect();

    debug!(segments = result.len(), "computed segment counts");
    Ok(result)
}

/// Mean Recency, Frequency and MonetaryValue per label, ascending by label.
pub fn means_by_segment(table: &SegmentTable) -> crate::Result<Vec<SegmentMeans>> {
    let means = table
        .analysis_frame()?
        .lazy()
        .group_by([col(LABEL)])
        .agg([
            col(RECENCY).mean().round(2),
            col(FREQUENCY).mean().round(2),
            col(MONETARY).mean().round(2),
        ])
        .sort([LABEL], SortMultipleOptions::default())
        .collect()?;

    let labels = means.column(LABEL)?.str()?;
    let recency = means.column(RECENCY)?.f64()?;
    let frequency = means.column(FREQUENCY)?.f64()?;
    let monetary = means.column(MONETARY)?.f64()?;

    let mut result = Vec::with_capacity(means.height());
    for row in 0..means.height() {
        result.push(SegmentMeans {
            label: labels.get(row).unwrap_or_default().to_string(),
            recency: recency.get(row).unwrap_or_default(),
            frequency: frequency.get(row).unwrap_or_default(),
            monetary_value: monetary.get(row).unwrap_or_default(),
        });
    }
    Ok(result)
}

/// Count and descriptive statistics of every feature for one label.
///
/// A label with no customers yields `SegmentNotFound`.
pub fn describe_segment(
    table: &SegmentTable,
    catalog: &SegmentCatalog,
    label: &str,
) -> Result<SegmentDescription, SegmentError> {
    let rows: Vec<usize> = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record.cluster_label == label)
        .map(|(row, _)| row)
        .collect();

    let not_found = || SegmentError::SegmentNotFound(label.to_string());
    let features = table.feature_matrix(&rows).map_err(|_| not_found())?;

    let recency = FeatureStats::describe(features.column(0)).ok_or_else(not_found)?;
    let frequency = FeatureStats::describe(features.column(1)).ok_or_else(not_found)?;
    let monetary_value = FeatureStats::describe(features.column(2)).ok_or_else(not_found)?;

    Ok(SegmentDescription {
        label: label.to_string(),
        description: catalog.describe(label),
        count: rows.len(),
        recency,
        frequency,
        monetary_value,
        rows,
    })
}

/// Distinct labels present in the table, sorted.
pub fn segment_labels(table: &SegmentTable) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|record| record.cluster_label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
