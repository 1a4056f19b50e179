//! Loading, typing and exporting the labeled segment table using Polars

use crate::error::SegmentError;
use crate::schema::SchemaMapping;
use ndarray::Array2;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Column names of the typed frame used for group-by queries.
pub const LABEL: &str = "ClusterLabel";
pub const RECENCY: &str = "Recency";
pub const FREQUENCY: &str = "Frequency";
pub const MONETARY: &str = "MonetaryValue";

/// One customer row, typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    /// Identifier cell as stored; `None` for an empty cell.
    pub customer_id: Option<String>,
    pub recency: f64,
    pub frequency: f64,
    pub monetary_value: f64,
    pub cluster_label: String,
}

impl CustomerRecord {
    pub fn features(&self) -> [f64; 3] {
        [self.recency, self.frequency, self.monetary_value]
    }
}

/// Immutable snapshot of a loaded segment table.
///
/// `frame` keeps every source column as text, exactly as read, so display and
/// export are verbatim. `records` is the typed view the aggregations run on;
/// `records[i]` describes row `i` of `frame`.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    frame: DataFrame,
    records: Vec<CustomerRecord>,
    schema: SchemaMapping,
    id_column: String,
}

impl SegmentTable {
    /// Type-check a raw frame against `schema`.
    pub fn from_frame(frame: DataFrame, schema: SchemaMapping) -> crate::Result<Self> {
        if frame.height() == 0 {
            return Err(SegmentError::EmptyDataset.into());
        }

        let id_column = schema
            .resolve_id_column(|name| frame.column(name).is_ok())?
            .to_string();
        debug!(id_column = %id_column, policy = ?schema.id_policy, "resolved identifier column");

        let ids = text_column(&frame, &id_column)?;
        let labels = text_column(&frame, &schema.label_column)?;
        let recency = text_column(&frame, &schema.recency_column)?;
        let frequency = text_column(&frame, &schema.frequency_column)?;
        let monetary = text_column(&frame, &schema.monetary_column)?;

        let mut records = Vec::with_capacity(frame.height());
        for row in 0..frame.height() {
            let cluster_label = match labels[row].as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => label.to_string(),
                other => {
                    return Err(SegmentError::InvalidValue {
                        column: schema.label_column.clone(),
                        row: row + 1,
                        value: other.unwrap_or_default().to_string(),
                    }
                    .into())
                }
            };

            records.push(CustomerRecord {
                customer_id: ids[row].clone(),
                recency: parse_feature(&schema.recency_column, row, recency[row].as_deref(), false)?,
                frequency: parse_feature(
                    &schema.frequency_column,
                    row,
                    frequency[row].as_deref(),
                    true,
                )?,
                monetary_value: parse_feature(
                    &schema.monetary_column,
                    row,
                    monetary[row].as_deref(),
                    false,
                )?,
                cluster_label,
            });
        }

        Ok(Self {
            frame,
            records,
            schema,
            id_column,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn schema(&self) -> &SchemaMapping {
        &self.schema
    }

    /// The identifier header actually found in the file.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw RFM values for the given rows as an `(n, 3)` matrix.
    pub fn feature_matrix(&self, rows: &[usize]) -> crate::Result<Array2<f64>> {
        let mut raw_data = Vec::with_capacity(rows.len() * 3);
        for &row in rows {
            raw_data.extend_from_slice(&self.records[row].features());
        }
        Ok(Array2::from_shape_vec((rows.len(), 3), raw_data)?)
    }

    /// Label plus the three features, typed, for Polars group-by queries.
    pub fn analysis_frame(&self) -> crate::Result<DataFrame> {
        let labels: Vec<&str> = self
            .records
            .iter()
            .map(|r| r.cluster_label.as_str())
            .collect();
        let recency: Vec<f64> = self.records.iter().map(|r| r.recency).collect();
        let frequency: Vec<f64> = self.records.iter().map(|r| r.frequency).collect();
        let monetary: Vec<f64> = self.records.iter().map(|r| r.monetary_value).collect();

        Ok(df!(
            LABEL => labels,
            RECENCY => recency,
            FREQUENCY => frequency,
            MONETARY => monetary
        )?)
    }

    /// Source rows at the given indices, all columns, in table order.
    pub fn rows(&self, rows: &[usize]) -> crate::Result<DataFrame> {
        let mut selected = vec![false; self.frame.height()];
        for &row in rows {
            selected[row] = true;
        }
        let mask: BooleanChunked = selected.into_iter().collect();
        Ok(self.frame.filter(&mask)?)
    }

    /// Serialize the full table as CSV, header included, no filtering.
    pub fn export_csv<W: Write>(&self, writer: W) -> crate::Result<()> {
        let mut frame = self.frame.clone();
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let file = File::create(path.as_ref())?;
        self.export_csv(file)?;
        info!(path = %path.as_ref().display(), rows = self.len(), "exported segment table");
        Ok(())
    }
}

/// Load a labeled segment table from a delimited text file.
///
/// Every column is read as text; RFM columns are then parsed and validated.
/// A missing file, a missing column or an invalid feature value is an error.
pub fn load_segment_table(path: impl AsRef<Path>, schema: &SchemaMapping) -> crate::Result<SegmentTable> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let start = Instant::now();

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.clone()))?
        .finish()?;

    let table = SegmentTable::from_frame(frame, schema.clone())?;
    info!(
        path = %path.display(),
        rows = table.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded segment table"
    );
    Ok(table)
}

fn text_column(frame: &DataFrame, name: &str) -> crate::Result<Vec<Option<String>>> {
    let series = frame
        .column(name)
        .map_err(|_| SegmentError::MissingColumn(name.to_string()))?;
    let series = series.cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect())
}

fn parse_feature(column: &str, row: usize, cell: Option<&str>, integral: bool) -> Result<f64, SegmentError> {
    let text = cell.unwrap_or_default().trim();
    let invalid = || SegmentError::InvalidValue {
        column: column.to_string(),
        row: row + 1,
        value: text.to_string(),
    };

    let value: f64 = text.parse().map_err(|_| invalid())?;
    if !value.is_finite() || (integral && value.fract() != 0.0) {
        return Err(invalid());
    }
    if value < 0.0 {
        return Err(SegmentError::NegativeValue {
            column: column.to_string(),
            row: row + 1,
            value,
        });
    }
    Ok(value)
}
