//! Column mapping and identifier comparison policy for the segment table

use crate::error::SegmentError;

/// How a free-text identifier is compared against stored identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Compare the trimmed input with the stored text as-is.
    Exact,
    /// Parse both sides as numbers and compare them rendered with one decimal
    /// place, so `12345` matches a stored `12345.0`.
    #[default]
    Decimal,
}

impl IdPolicy {
    /// Normalize user input into a comparison key.
    ///
    /// Under `Decimal`, input that does not parse as a finite number is
    /// rejected with `InvalidInput`.
    pub fn normalize_input(&self, raw: &str) -> Result<String, SegmentError> {
        let trimmed = raw.trim();
        match self {
            IdPolicy::Exact => Ok(trimmed.to_string()),
            IdPolicy::Decimal => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(format!("{:.1}", value)),
                _ => Err(SegmentError::InvalidInput(raw.to_string())),
            },
        }
    }

    /// Normalize a stored identifier cell into a comparison key.
    ///
    /// Stored values that are not numeric keep their trimmed text under
    /// `Decimal` so they can still be reported, but no numeric input will
    /// ever equal them.
    pub fn normalize_stored(&self, stored: &str) -> String {
        let trimmed = stored.trim();
        match self {
            IdPolicy::Exact => trimmed.to_string(),
            IdPolicy::Decimal => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => format!("{:.1}", value),
                _ => trimmed.to_string(),
            },
        }
    }
}

/// Names of the columns the aggregator and lookup read.
///
/// `id_columns` lists identifier header candidates in priority order; the
/// first one present in the file is used.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMapping {
    pub id_columns: Vec<String>,
    pub label_column: String,
    pub recency_column: String,
    pub frequency_column: String,
    pub monetary_column: String,
    pub id_policy: IdPolicy,
}

impl Default for SchemaMapping {
    fn default() -> Self {
        Self {
            id_columns: vec!["CustomerID".to_string(), "Customer ID".to_string()],
            label_column: "ClusterLabel".to_string(),
            recency_column: "Recency".to_string(),
            frequency_column: "Frequency".to_string(),
            monetary_column: "MonetaryValue".to_string(),
            id_policy: IdPolicy::default(),
        }
    }
}

impl SchemaMapping {
    /// Feature column names in Recency, Frequency, Monetary order.
    pub fn feature_columns(&self) -> [&str; 3] {
        [
            self.recency_column.as_str(),
            self.frequency_column.as_str(),
            self.monetary_column.as_str(),
        ]
    }

    /// Pick the first identifier candidate for which `present` returns true.
    pub fn resolve_id_column<F>(&self, present: F) -> Result<&str, SegmentError>
    where
        F: Fn(&str) -> bool,
    {
        self.id_columns
            .iter()
            .map(String::as_str)
            .find(|name| present(name))
            .ok_or_else(|| SegmentError::NoIdColumn(self.id_columns.clone()))
    }
}
