use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::{data::Record, estimator::ConditionalFreq};

/// Names of the columns of the [`design_matrix()`], in order.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "Relevant",
    "MouseMs",
    "Readability",
    "Novelty",
    "PageMs",
    "Authority",
    "ConditionalFreq",
    "MeanConditionalFreq",
];

/// A record augmented with its derived features.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureRow {
    #[serde(rename = "LogId")]
    pub log_id: Option<String>,
    #[serde(rename = "UserId")]
    pub user_id: Option<String>,
    #[serde(rename = "RssId")]
    pub rss_id: Option<String>,
    /// The cleaned classes, pipe delimited.
    #[serde(rename = "Classes")]
    pub classes: String,
    #[serde(rename = "Relevant")]
    pub relevant: f64,
    #[serde(rename = "MouseMs")]
    pub mouse_ms: f64,
    #[serde(rename = "Readability")]
    pub readability: f64,
    #[serde(rename = "Novelty")]
    pub novelty: f64,
    #[serde(rename = "PageMs")]
    pub page_ms: f64,
    #[serde(rename = "Authority")]
    pub authority: f64,
    #[serde(rename = "UserLike")]
    pub user_like: u8,
    #[serde(rename = "ConditionalFreq")]
    pub conditional_freq: f64,
    #[serde(rename = "MeanConditionalFreq")]
    pub mean_conditional_freq: f64,
    /// `1` if the user like is above the like threshold, `0` otherwise.
    #[serde(rename = "UserLikeBinary")]
    pub user_like_binary: u8,
}

impl FeatureRow {
    pub fn new(record: &Record, freq: ConditionalFreq, like_threshold: u8) -> Self {
        let signals = &record.signals;
        let user_like = record.user_like.value();
        Self {
            log_id: signals.log_id.clone(),
            user_id: signals.user_id.clone(),
            rss_id: signals.rss_id.clone(),
            classes: record.joined_classes(),
            relevant: signals.relevant,
            mouse_ms: signals.mouse_ms,
            readability: signals.readability,
            novelty: signals.novelty,
            page_ms: signals.page_ms,
            authority: signals.authority,
            user_like,
            conditional_freq: freq.product,
            mean_conditional_freq: freq.mean,
            user_like_binary: (user_like > like_threshold) as u8,
        }
    }

    /// The value of the `column`th of the [`FEATURE_COLUMNS`].
    pub(crate) fn feature(&self, column: usize) -> f64 {
        match column {
            0 => self.relevant,
            1 => self.mouse_ms,
            2 => self.readability,
            3 => self.novelty,
            4 => self.page_ms,
            5 => self.authority,
            6 => self.conditional_freq,
            7 => self.mean_conditional_freq,
            _ => unreachable!("feature column out of bounds"),
        }
    }
}

/// The cleaned records with their derived features, in record order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureTable(Vec<FeatureRow>);

impl FeatureTable {
    /// Combines the records with their conditional frequencies.
    ///
    /// # Panics
    /// Panics if the number of records and frequencies differ.
    pub fn new(records: &[Record], freqs: &[ConditionalFreq], like_threshold: u8) -> Self {
        assert_eq!(records.len(), freqs.len());
        Self(
            records
                .iter()
                .zip(freqs)
                .map(|(record, freq)| FeatureRow::new(record, *freq, like_threshold))
                .collect(),
        )
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits the rows into a training half and a test half.
    ///
    /// The rows are not shuffled, the first `len / 2` rows are used for training.
    pub fn split_halves(&self) -> (&[FeatureRow], &[FeatureRow]) {
        self.0.split_at(self.0.len() / 2)
    }
}

/// The features of the rows as `rows x FEATURE_COLUMNS` matrix.
pub fn design_matrix(rows: &[FeatureRow]) -> Array2<f64> {
    Array2::from_shape_fn((rows.len(), FEATURE_COLUMNS.len()), |(row, column)| {
        rows[row].feature(column)
    })
}

/// The user likes of the rows.
pub fn targets(rows: &[FeatureRow]) -> Array1<f64> {
    rows.iter().map(|row| row.user_like as f64).collect()
}

/// The binarized user likes of the rows.
pub fn binary_targets(rows: &[FeatureRow]) -> Array1<f64> {
    rows.iter().map(|row| row.user_like_binary as f64).collect()
}
