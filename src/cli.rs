//! Command-line interface definitions and argument parsing

use crate::schema::{IdPolicy, SchemaMapping};
use clap::{Parser, Subcommand, ValueEnum};

/// Default source table and export file name.
pub const DEFAULT_TABLE: &str = "customer_clusters.csv";

/// Explore a precomputed RFM customer segmentation table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the labeled segmentation CSV file
    #[arg(short, long, global = true, default_value = DEFAULT_TABLE)]
    pub input: String,

    /// Identifier column candidates, tried in order
    #[arg(long = "id-column", global = true, default_values_t = ["CustomerID".to_string(), "Customer ID".to_string()])]
    pub id_columns: Vec<String>,

    /// How lookup input is compared against stored identifiers
    #[arg(long, global = true, value_enum, default_value_t = IdPolicyArg::Decimal)]
    pub id_policy: IdPolicyArg,

    /// Segment label column
    #[arg(long, global = true, default_value = "ClusterLabel")]
    pub label_column: String,

    /// Recency column
    #[arg(long, global = true, default_value = "Recency")]
    pub recency_column: String,

    /// Frequency column
    #[arg(long, global = true, default_value = "Frequency")]
    pub frequency_column: String,

    /// Monetary value column
    #[arg(long, global = true, default_value = "MonetaryValue")]
    pub monetary_column: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Customers per segment with segment descriptions
    Overview {
        /// Also save a bar chart PNG to this path
        #[arg(long)]
        chart: Option<String>,
    },
    /// Mean Recency, Frequency and MonetaryValue per segment
    Means {
        /// Also save per-feature bar charts PNG to this path
        #[arg(long)]
        chart: Option<String>,
    },
    /// Statistics and sample customers for one segment; lists segments if none given
    Segment {
        /// Segment label, e.g. DELIGHT
        label: Option<String>,

        /// Number of sample customers to show
        #[arg(long, default_value = "10")]
        sample: usize,
    },
    /// Find a customer by identifier
    Lookup {
        /// Customer identifier
        id: String,
    },
    /// Write the full segmentation table to a CSV file
    Export {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        output: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicyArg {
    /// Plain string comparison
    Exact,
    /// Numeric comparison at one decimal place (12345 matches 12345.0)
    Decimal,
}

impl From<IdPolicyArg> for IdPolicy {
    fn from(arg: IdPolicyArg) -> Self {
        match arg {
            IdPolicyArg::Exact => IdPolicy::Exact,
            IdPolicyArg::Decimal => IdPolicy::Decimal,
        }
    }
}

impl Args {
    /// Column mapping and identifier policy selected on the command line
    pub fn schema(&self) -> crate::Result<SchemaMapping> {
        if self.id_columns.is_empty() {
            anyhow::bail!("At least one identifier column must be given");
        }

        Ok(SchemaMapping {
            id_columns: self.id_columns.clone(),
            label_column: self.label_column.clone(),
            recency_column: self.recency_column.clone(),
            frequency_column: self.frequency_column.clone(),
            monetary_column: self.monetary_column.clone(),
            id_policy: self.id_policy.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["segmentlens", "overview"]);
        assert_eq!(args.input, DEFAULT_TABLE);
        assert_eq!(args.command, Command::Overview { chart: None });

        let schema = args.schema().unwrap();
        assert_eq!(schema, SchemaMapping::default());
    }

    #[test]
    fn test_schema_overrides() {
        let args = Args::parse_from([
            "segmentlens",
            "lookup",
            "17850",
            "--id-column",
            "Customer ID",
            "--id-policy",
            "exact",
            "--label-column",
            "Segment",
        ]);

        assert_eq!(args.command, Command::Lookup { id: "17850".to_string() });
        let schema = args.schema().unwrap();
        assert_eq!(schema.id_columns, vec!["Customer ID".to_string()]);
        assert_eq!(schema.id_policy, IdPolicy::Exact);
        assert_eq!(schema.label_column, "Segment");
    }

    #[test]
    fn test_segment_and_export_arguments() {
        let args = Args::parse_from(["segmentlens", "-i", "data.csv", "segment", "DELIGHT", "--sample", "3"]);
        assert_eq!(args.input, "data.csv");
        assert_eq!(
            args.command,
            Command::Segment {
                label: Some("DELIGHT".to_string()),
                sample: 3
            }
        );

        let args = Args::parse_from(["segmentlens", "export", "-o", "out.csv"]);
        assert_eq!(args.command, Command::Export { output: "out.csv".to_string() });
    }
}
