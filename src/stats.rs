//! Descriptive statistics over a single numeric feature

use ndarray::ArrayView1;

/// Summary of one feature within one segment.
///
/// `std` is the sample standard deviation and is `NaN` for a single value.
/// Quartiles interpolate linearly between the closest ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl FeatureStats {
    /// Describe `values`; `None` when there are no values.
    pub fn describe(values: ArrayView1<f64>) -> Option<Self> {
        let count = values.len();
        if count == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        Some(FeatureStats {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Values in describe order: count, mean, std, min, 25%, 50%, 75%, max.
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Column headers matching [`FeatureStats::as_row`].
pub const STAT_HEADERS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Linear-interpolated quantile of already sorted, non-empty data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_describe_matches_dataframe_convention() {
        let values = array![4.0, 1.0, 3.0, 2.0];
        let stats = FeatureStats::describe(values.view()).unwrap();

        assert_eq!(stats.count, 4);
        assert!(close(stats.mean, 2.5));
        assert!(close(stats.std, (5.0f64 / 3.0).sqrt()));
        assert!(close(stats.min, 1.0));
        assert!(close(stats.q25, 1.75));
        assert!(close(stats.median, 2.5));
        assert!(close(stats.q75, 3.25));
        assert!(close(stats.max, 4.0));
    }

    #[test]
    fn test_single_value() {
        let values = array![7.5];
        let stats = FeatureStats::describe(values.view()).unwrap();
        assert_eq!(stats.count, 1);
        assert!(stats.std.is_nan());
        assert!(close(stats.q25, 7.5));
        assert!(close(stats.q75, 7.5));
    }

    #[test]
    fn test_empty_values() {
        let values: ndarray::Array1<f64> = array![];
        assert!(FeatureStats::describe(values.view()).is_none());
    }
}
