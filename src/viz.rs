//! Bar charts of segment counts and feature means using Plotters

use crate::aggregate::{SegmentCount, SegmentMeans};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

/// Qualitative palette, one colour per segment, cycled if there are more.
const SEGMENT_COLORS: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

/// Draw one bar per segment with its value printed above the bar.
fn draw_bar_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
    value_label: impl Fn(f64) -> String,
) -> crate::Result<()> {
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..y_max)?;

    let label_of = |x: &SegmentValue<usize>| match x {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Segment")
        .y_desc(y_desc)
        .x_label_formatter(&label_of)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (i, &value) in values.iter().enumerate() {
        let color = &SEGMENT_COLORS[i % SEGMENT_COLORS.len()];

        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        chart.draw_series(std::iter::once(bar))?;

        let mut outline = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
            BLACK.stroke_width(1),
        );
        outline.set_margin(0, 0, 8, 8);
        chart.draw_series(std::iter::once(outline))?;

        chart.draw_series(std::iter::once(Text::new(
            value_label(value),
            (SegmentValue::CenterOf(i), value + y_max * 0.02),
            ("sans-serif", 13),
        )))?;
    }

    Ok(())
}

/// Bar chart of customers per segment, in the order given.
pub fn create_distribution_chart(counts: &[SegmentCount], output_path: &str) -> crate::Result<()> {
    if counts.is_empty() {
        anyhow::bail!("No segments to plot");
    }

    let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();
    let values: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_bar_panel(
        &root,
        "Number of Customers per Segment",
        "Number of Customers",
        &labels,
        &values,
        |v| format!("{}", v as u64),
    )?;
    root.present()?;

    info!(path = output_path, "segment distribution chart saved");
    Ok(())
}

/// Three side-by-side bar charts, one per RFM feature, titled with
/// `feature_names`.
pub fn create_means_chart(
    means: &[SegmentMeans],
    feature_names: [&str; 3],
    output_path: &str,
) -> crate::Result<()> {
    if means.is_empty() {
        anyhow::bail!("No segments to plot");
    }

    let labels: Vec<String> = means.iter().map(|m| m.label.clone()).collect();

    let root = BitMapBackend::new(output_path, (1800, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 3));

    for (feature, panel) in panels.iter().enumerate() {
        let values: Vec<f64> = means.iter().map(|m| m.features()[feature]).collect();
        let name = feature_names[feature];
        draw_bar_panel(
            panel,
            &format!("{} by Segment", name),
            &format!("Mean {}", name),
            &labels,
            &values,
            |v| format!("{:.1}", v),
        )?;
    }
    root.present()?;

    info!(path = output_path, "segment means chart saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn sample_counts() -> Vec<SegmentCount> {
        vec![
            SegmentCount { label: "UPSELL".to_string(), count: 5 },
            SegmentCount { label: "DELIGHT".to_string(), count: 3 },
            SegmentCount { label: "RE-ENGAGE".to_string(), count: 2 },
        ]
    }

    fn sample_means() -> Vec<SegmentMeans> {
        vec![
            SegmentMeans {
                label: "DELIGHT".to_string(),
                recency: 12.5,
                frequency: 14.0,
                monetary_value: 6021.33,
            },
            SegmentMeans {
                label: "UPSELL".to_string(),
                recency: 40.0,
                frequency: 9.2,
                monetary_value: 310.9,
            },
        ]
    }

    #[test]
    fn test_create_distribution_chart() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("distribution.png");
        let output_str = output_path.to_str().unwrap();

        let result = create_distribution_chart(&sample_counts(), output_str);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_create_means_chart() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("means.png");
        let output_str = output_path.to_str().unwrap();

        let result = create_means_chart(&sample_means(), ["Recency", "Frequency", "MonetaryValue"], output_str);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("empty.png");
        let output_str = output_path.to_str().unwrap();

        assert!(create_distribution_chart(&[], output_str).is_err());
        assert!(create_means_chart(&[], ["R", "F", "M"], output_str).is_err());
    }
}
