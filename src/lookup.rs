//! Single-customer lookup by identifier

use crate::catalog::SegmentCatalog;
use crate::data::{CustomerRecord, SegmentTable};
use crate::error::SegmentError;
use tracing::debug;

/// Rows whose identifier matched a lookup, in table order.
#[derive(Debug, Clone)]
pub struct CustomerMatch<'a> {
    /// Normalized form of the query.
    pub key: String,
    pub rows: Vec<usize>,
    records: Vec<&'a CustomerRecord>,
}

impl<'a> CustomerMatch<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The first matching record, used for the segment summary.
    pub fn primary(&self) -> Option<&'a CustomerRecord> {
        self.records.first().copied()
    }

    /// `(label, description)` of the first match.
    pub fn segment(&self, catalog: &SegmentCatalog) -> Option<(&'a str, &'static str)> {
        self.primary().map(|record| {
            let label = record.cluster_label.as_str();
            (label, catalog.describe(label))
        })
    }
}

/// Find every record whose identifier equals `raw` under the table's
/// identifier policy.
///
/// No match is an empty result, not an error. Input the policy cannot parse
/// fails with `InvalidInput`.
pub fn find_by_id<'a>(table: &'a SegmentTable, raw: &str) -> Result<CustomerMatch<'a>, SegmentError> {
    let policy = table.schema().id_policy;
    let key = policy.normalize_input(raw)?;

    let mut rows = Vec::new();
    let mut records = Vec::new();
    for (row, record) in table.records().iter().enumerate() {
        let Some(stored) = record.customer_id.as_deref() else {
            continue;
        };
        if policy.normalize_stored(stored) == key {
            rows.push(row);
            records.push(record);
        }
    }

    debug!(key = %key, policy = ?policy, matches = rows.len(), "customer lookup");
    Ok(CustomerMatch { key, rows, records })
}
