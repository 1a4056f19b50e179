//! Plain-text panels printed by the command-line tool

use crate::aggregate::{self, SegmentCount, SegmentDescription, SegmentMeans};
use crate::catalog::SegmentCatalog;
use crate::data::SegmentTable;
use crate::error::SegmentError;
use crate::lookup::find_by_id;
use crate::stats::STAT_HEADERS;
use polars::prelude::*;
use std::fmt::Write;
use tracing::warn;

/// Notice shown when a lookup matches nothing or its input is rejected.
pub const NOT_FOUND_NOTICE: &str = "CustomerID not found.";

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {} ===", title);
}

/// Segment distribution table followed by every catalog description.
pub fn overview_report(counts: &[SegmentCount], catalog: &SegmentCatalog) -> String {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let mut out = String::new();

    header(&mut out, "Customer Segment Distribution");
    let _ = writeln!(out, "  {:<12} | {:>8} | {:>7}", "Segment", "Count", "Share");
    let _ = writeln!(out, "  {:-<12}-|-{:->8}-|-{:->7}", "", "", "");
    for segment in counts {
        let percentage = if total > 0 {
            segment.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let _ = writeln!(
            out,
            "  {:<12} | {:>8} | {:>6.1}%",
            segment.label, segment.count, percentage
        );
    }
    let _ = writeln!(out, "  Total customers: {}", total);

    let _ = writeln!(out, "\nSegment Descriptions:");
    for (label, description) in catalog.entries() {
        let _ = writeln!(out, "  - {}: {}", label, description);
    }
    out
}

/// Feature means per segment, headed by the table's feature column names.
pub fn means_report(means: &[SegmentMeans], feature_names: [&str; 3]) -> String {
    let mut out = String::new();

    header(&mut out, "RFM Feature Means by Segment");
    let _ = writeln!(
        out,
        "  {:<12} | {:>10} | {:>10} | {:>14}",
        "Segment", feature_names[0], feature_names[1], feature_names[2]
    );
    let _ = writeln!(out, "  {:-<12}-|-{:->10}-|-{:->10}-|-{:->14}", "", "", "", "");
    for segment in means {
        let _ = writeln!(
            out,
            "  {:<12} | {:>10.2} | {:>10.2} | {:>14.2}",
            segment.label, segment.recency, segment.frequency, segment.monetary_value
        );
    }
    out
}

/// Sorted labels a user can drill into.
pub fn segment_list_report(labels: &[String], catalog: &SegmentCatalog) -> String {
    let mut out = String::new();

    header(&mut out, "Available Segments");
    for label in labels {
        let _ = writeln!(out, "  - {}: {}", label, catalog.describe(label));
    }
    out
}

/// Description, customer count and transposed describe table of one segment.
pub fn segment_report(description: &SegmentDescription, feature_names: [&str; 3]) -> String {
    let mut out = String::new();

    header(&mut out, &format!("Segment {}", description.label));
    let _ = writeln!(out, "Description: {}", description.description);
    let _ = writeln!(out, "Number of customers: {}", description.count);
    let _ = writeln!(out, "\nRFM Statistics:");

    let _ = write!(out, "  {:<14}", "");
    for name in STAT_HEADERS {
        let _ = write!(out, " {:>12}", name);
    }
    let _ = writeln!(out);

    for (name, stats) in feature_names.iter().zip(description.features()) {
        let _ = write!(out, "  {:<14}", name);
        for (column, value) in stats.as_row().iter().enumerate() {
            if column == 0 {
                let _ = write!(out, " {:>12}", stats.count);
            } else {
                let _ = write!(out, " {:>12.2}", value);
            }
        }
        let _ = writeln!(out);
    }
    out
}

/// Every row and column of `frame` as an aligned text table.
///
/// Empty cells render blank.
pub fn rows_report(frame: &DataFrame) -> crate::Result<String> {
    let mut columns: Vec<(String, Vec<String>)> = Vec::with_capacity(frame.width());
    for series in frame.get_columns() {
        let text = series.cast(&DataType::String)?;
        let cells: Vec<String> = text
            .str()?
            .into_iter()
            .map(|cell| cell.unwrap_or_default().to_string())
            .collect();
        columns.push((series.name().to_string(), cells));
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|(name, cells)| {
            cells
                .iter()
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    write_row(&mut out, &names, &widths);
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rules: Vec<&str> = rules.iter().map(String::as_str).collect();
    write_row(&mut out, &rules, &widths);

    for row in 0..frame.height() {
        let cells: Vec<&str> = columns.iter().map(|(_, cells)| cells[row].as_str()).collect();
        write_row(&mut out, &cells, &widths);
    }
    Ok(out)
}

fn write_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "  {}", line.join(" | ").trim_end());
}

/// Segment drill-down panel, or the label list when no label is given.
///
/// A label with no customers yields a notice rather than an error.
pub fn segment_view(
    table: &SegmentTable,
    catalog: &SegmentCatalog,
    label: Option<&str>,
    sample: usize,
) -> crate::Result<String> {
    let Some(label) = label else {
        let labels = aggregate::segment_labels(table);
        return Ok(segment_list_report(&labels, catalog));
    };

    match aggregate::describe_segment(table, catalog, label) {
        Ok(description) => {
            let mut out = segment_report(&description, table.schema().feature_columns());
            let shown = sample.min(description.rows.len());
            let _ = writeln!(out, "\nSample Customers:");
            out.push_str(&rows_report(&table.rows(&description.rows[..shown])?)?);
            Ok(out)
        }
        Err(SegmentError::SegmentNotFound(label)) => {
            warn!(label = %label, "segment has no customers");
            Ok(format!("No customers found in segment {}.\n", label))
        }
        Err(err) => Err(err.into()),
    }
}

/// Lookup panel: every matching row, then the first match's segment.
///
/// No match and input rejected by the identifier policy both yield
/// [`NOT_FOUND_NOTICE`].
pub fn lookup_view(table: &SegmentTable, catalog: &SegmentCatalog, id: &str) -> crate::Result<String> {
    let found = match find_by_id(table, id) {
        Ok(found) => found,
        Err(SegmentError::InvalidInput(input)) => {
            warn!(input = %input, "identifier rejected by lookup policy");
            return Ok(format!("{}\n", NOT_FOUND_NOTICE));
        }
        Err(err) => return Err(err.into()),
    };

    let Some((label, description)) = found.segment(catalog) else {
        return Ok(format!("{}\n", NOT_FOUND_NOTICE));
    };

    let mut out = String::from("Customer Details:\n");
    out.push_str(&rows_report(&table.rows(&found.rows)?)?);
    let _ = writeln!(out, "{}", lookup_summary(label, description));
    Ok(out)
}

/// One-line segment summary for a looked-up customer.
pub fn lookup_summary(label: &str, description: &str) -> String {
    format!("Segment: {} - {}", label, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::FeatureStats;
    use ndarray::array;
    use crate::schema::{IdPolicy, SchemaMapping};

    fn lookup_table(policy: IdPolicy) -> SegmentTable {
        let mut ids = vec!["777.0"; 12];
        ids.push("12.0");
        let recency: Vec<String> = (100..113).map(|r| r.to_string()).collect();
        let frequency = vec!["2"; 13];
        let monetary = vec!["50.5"; 13];
        let mut labels = vec!["UPSELL"; 12];
        labels.push("VIP");

        let frame = df!(
            "CustomerID" => ids,
            "Recency" => recency,
            "Frequency" => frequency,
            "MonetaryValue" => monetary,
            "ClusterLabel" => labels
        )
        .unwrap();
        let schema = SchemaMapping {
            id_policy: policy,
            ..SchemaMapping::default()
        };
        SegmentTable::from_frame(frame, schema).unwrap()
    }

    #[test]
    fn test_overview_report() {
        let counts = vec![
            SegmentCount { label: "UPSELL".to_string(), count: 3 },
            SegmentCount { label: "DELIGHT".to_string(), count: 1 },
        ];
        let report = overview_report(&counts, &SegmentCatalog::new());

        assert!(report.contains("UPSELL"));
        assert!(report.contains("75.0%"));
        assert!(report.contains("Total customers: 4"));
        assert!(report.contains("- PAMPER: High spenders, infrequent."));
        assert!(report.find("UPSELL").unwrap() < report.find("DELIGHT").unwrap());
    }

    #[test]
    fn test_means_report() {
        let means = vec![SegmentMeans {
            label: "REWARD".to_string(),
            recency: 4.5,
            frequency: 21.0,
            monetary_value: 8123.456,
        }];
        let report = means_report(&means, ["Recency", "Frequency", "MonetaryValue"]);
        assert!(report.contains("REWARD"));
        assert!(report.contains("8123.46"));
    }

    #[test]
    fn test_segment_report() {
        let stats = FeatureStats::describe(array![1.0, 2.0, 3.0].view()).unwrap();
        let description = SegmentDescription {
            label: "NURTURE".to_string(),
            description: "Recent but low-value customers. Nurture for growth.",
            count: 3,
            recency: stats,
            frequency: stats,
            monetary_value: stats,
            rows: vec![0, 1, 2],
        };
        let report = segment_report(&description, ["Days", "Orders", "Spend"]);

        assert!(report.contains("Number of customers: 3"));
        assert!(report.contains("25%"));
        assert!(report.contains("Spend"));
        assert!(!report.contains("MonetaryValue"));
        assert!(report.contains("Description: Recent but low-value customers."));
    }

    #[test]
    fn test_lookup_summary() {
        assert_eq!(
            lookup_summary("VIP", "No description available."),
            "Segment: VIP - No description available."
        );
    }

    #[test]
    fn test_rows_report_shows_every_row() {
        let table = lookup_table(IdPolicy::Decimal);
        let report = rows_report(table.frame()).unwrap();

        assert!(report.contains("CustomerID"));
        for recency in 100..113 {
            assert!(report.contains(&format!("| {} ", recency)), "missing row {}", recency);
        }
        assert!(!report.contains('…'));
        assert_eq!(report.lines().count(), 15);
    }

    #[test]
    fn test_lookup_view_lists_all_matches() {
        let table = lookup_table(IdPolicy::Decimal);
        let view = lookup_view(&table, &SegmentCatalog::new(), "777").unwrap();

        assert!(view.starts_with("Customer Details:"));
        for recency in 100..112 {
            assert!(view.contains(&format!("| {} ", recency)), "missing row {}", recency);
        }
        assert!(!view.contains("| 112 "));
        assert!(view.ends_with("Segment: UPSELL - Frequent buyers, low spend. Upsell opportunities.\n"));
    }

    #[test]
    fn test_lookup_view_notices() {
        let table = lookup_table(IdPolicy::Decimal);
        let catalog = SegmentCatalog::new();

        let missing = lookup_view(&table, &catalog, "99999").unwrap();
        assert_eq!(missing, "CustomerID not found.\n");

        let rejected = lookup_view(&table, &catalog, "abc").unwrap();
        assert_eq!(rejected, "CustomerID not found.\n");

        let unknown = lookup_view(&table, &catalog, "12").unwrap();
        assert!(unknown.contains("Segment: VIP - No description available."));
    }

    #[test]
    fn test_segment_view() {
        let table = lookup_table(IdPolicy::Decimal);
        let catalog = SegmentCatalog::new();

        let listing = segment_view(&table, &catalog, None, 10).unwrap();
        assert!(listing.contains("- UPSELL: Frequent buyers"));
        assert!(listing.contains("- VIP: No description available."));

        let details = segment_view(&table, &catalog, Some("UPSELL"), 11).unwrap();
        assert!(details.contains("Number of customers: 12"));
        assert!(details.contains("Sample Customers:"));
        assert!(details.contains("| 110 "));
        assert!(!details.contains("| 111 "));

        let missing = segment_view(&table, &catalog, Some("PAMPER"), 10).unwrap();
        assert_eq!(missing, "No customers found in segment PAMPER.\n");
    }
}
