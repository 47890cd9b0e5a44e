use std::fmt::{self, Display, Write};

use crate::{
    features::{FeatureRow, FEATURE_COLUMNS},
    freq::RatingFreqTable,
};

/// Descriptive statistics of a numeric feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
}

impl FeatureStats {
    /// Computes the statistics, `None` if there are no values.
    pub fn calculate(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let len = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / len;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;

        Some(Self {
            min,
            max,
            mean,
            variance,
        })
    }
}

impl Display for FeatureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Min value = {}", self.min)?;
        writeln!(f, "Max value = {}", self.max)?;
        writeln!(f, "Mean value = {}", self.mean)?;
        write!(f, "Variance value = {}", self.variance)
    }
}

/// Renders the statistics report of the derived feature table.
pub fn report(
    rows: &[FeatureRow],
    ratings: &RatingFreqTable,
    high_frequency_classes: &[(&str, usize)],
) -> String {
    const RULE: &str = "--------------------------";

    let mut report = String::new();
    let mut feature = |name: &str, stats: Option<FeatureStats>| {
        if let Some(stats) = stats {
            // writing into a string can't fail
            let _ = writeln!(report, "Feature: {}\n{}\n{}\n{}\n", name, RULE, stats, RULE);
        }
    };
    for (column, name) in FEATURE_COLUMNS.iter().enumerate() {
        feature(
            name,
            FeatureStats::calculate(rows.iter().map(|row| row.feature(column))),
        );
    }
    feature(
        "UserLike",
        FeatureStats::calculate(rows.iter().map(|row| row.user_like as f64)),
    );

    let _ = writeln!(report, "Feature: UserLike frequencies\n{}", RULE);
    for (rating, count) in ratings.iter() {
        let _ = writeln!(report, "{} = {}", rating, count);
    }
    let _ = writeln!(report, "{}\n", RULE);

    let _ = writeln!(report, "Feature: Classes high frequencies\n{}", RULE);
    for (token, count) in high_frequency_classes {
        let _ = writeln!(report, "{} = {}", token, count);
    }
    let _ = writeln!(report, "{}", RULE);

    report
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;

    #[test]
    fn test_calculate() {
        let stats = FeatureStats::calculate(vec![1., 2., 3., 6.]).unwrap();

        assert_approx_eq!(f64, stats.min, 1.);
        assert_approx_eq!(f64, stats.max, 6.);
        assert_approx_eq!(f64, stats.mean, 3.);
        assert_approx_eq!(f64, stats.variance, 3.5);
    }

    #[test]
    fn test_calculate_without_values() {
        assert!(FeatureStats::calculate(Vec::new()).is_none());
    }

    #[test]
    fn test_display() {
        let stats = FeatureStats {
            min: 0.,
            max: 2.5,
            mean: 1.,
            variance: 0.5,
        };

        assert_eq!(
            stats.to_string(),
            "Min value = 0\nMax value = 2.5\nMean value = 1\nVariance value = 0.5",
        );
    }
}
