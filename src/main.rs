//! SegmentLens: command-line views over a labeled RFM segmentation table
//!
//! Each invocation loads the table once, runs one view and exits.

use anyhow::{Context, Result};
use clap::Parser;
use segmentlens::cli::Command;
use segmentlens::{aggregate, load_segment_table, report, viz, Args, SegmentCatalog, SegmentTable};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_tracing(args.verbose);

    let schema = args.schema()?;
    let table = load_segment_table(&args.input, &schema)
        .with_context(|| format!("failed to load segment table from {}", args.input))?;
    let catalog = SegmentCatalog::new();

    if args.verbose {
        println!("Loaded {} customers from {}\n", table.len(), args.input);
    }

    match &args.command {
        Command::Overview { chart } => run_overview(&table, &catalog, chart.as_deref()),
        Command::Means { chart } => run_means(&table, chart.as_deref()),
        Command::Segment { label, sample } => {
            print!("{}", report::segment_view(&table, &catalog, label.as_deref(), *sample)?);
            Ok(())
        }
        Command::Lookup { id } => {
            print!("{}", report::lookup_view(&table, &catalog, id)?);
            Ok(())
        }
        Command::Export { output } => run_export(&table, output),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_overview(table: &SegmentTable, catalog: &SegmentCatalog, chart: Option<&str>) -> Result<()> {
    let counts = aggregate::counts_by_segment(table)?;
    print!("{}", report::overview_report(&counts, catalog));

    if let Some(path) = chart {
        viz::create_distribution_chart(&counts, path)?;
        println!("\nChart saved to: {}", path);
    }
    Ok(())
}

fn run_means(table: &SegmentTable, chart: Option<&str>) -> Result<()> {
    let means = aggregate::means_by_segment(table)?;
    let feature_names = table.schema().feature_columns();
    print!("{}", report::means_report(&means, feature_names));

    if let Some(path) = chart {
        viz::create_means_chart(&means, feature_names, path)?;
        println!("\nChart saved to: {}", path);
    }
    Ok(())
}

fn run_export(table: &SegmentTable, output: &str) -> Result<()> {
    table
        .export_to_path(output)
        .with_context(|| format!("failed to export segment table to {}", output))?;
    println!("✓ Exported {} customers to: {}", table.len(), output);
    Ok(())
}
