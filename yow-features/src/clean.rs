//! Cleaning of the raw user study export.
//!
//! Records without classes or without a positive user like are dropped, blank
//! dwell times become `0` and invalid scores are imputed with the minimum valid
//! score of their column.

use std::convert::TryFrom;

use log::{debug, info};

use crate::{
    data::{CleanRecord, Rating, RawRecord, Signals},
    error::Error,
};

/// The class string the export uses for "no class at all".
const EMPTY_CLASSES: &str = "|";

/// Minimum valid values per column, computed over the whole raw table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Imputation {
    novelty: Option<f64>,
    relevant: Option<f64>,
    readability: Option<f64>,
    authority: Option<f64>,
}

impl Imputation {
    pub(crate) fn from_records(raw: &[RawRecord]) -> Self {
        Self {
            novelty: min_valid(raw.iter().map(|r| r.novelty), |v| v.trunc() > 0.),
            relevant: min_valid(raw.iter().map(|r| r.relevant), |v| v.trunc() > 0.),
            readability: min_valid(raw.iter().map(|r| r.readability), |v| v.trunc() != -1.),
            authority: min_valid(raw.iter().map(|r| r.authority), |v| v.trunc() != -1.),
        }
    }

    fn signals(&self, record: &RawRecord) -> Result<Signals, Error> {
        Ok(Signals {
            relevant: impute(record.relevant, &[-1., 0.], self.relevant, "Relevant")?,
            mouse_ms: record.mouse_ms.filter(|v| !v.is_nan()).unwrap_or_default(),
            readability: impute(record.readability, &[-1.], self.readability, "Readability")?,
            novelty: impute(record.novelty, &[-1., 0.], self.novelty, "Novelty")?,
            page_ms: record.page_ms.filter(|v| !v.is_nan()).unwrap_or_default(),
            authority: impute(record.authority, &[-1.], self.authority, "Authority")?,
            log_id: record.log_id.clone(),
            rss_id: record.rss_id.clone(),
            user_id: record.user_id.clone(),
        })
    }
}

/// Cleans the raw records.
///
/// # Errors
/// Fails if a user like is larger than 5 or if a column needs imputation but has no valid value.
pub fn clean_records(raw: Vec<RawRecord>) -> Result<Vec<CleanRecord>, Error> {
    let imputation = Imputation::from_records(&raw);
    debug!("Imputation values: {:?}", imputation);

    let nr_raw = raw.len();
    let mut nr_without_classes = 0;
    let mut nr_without_like = 0;
    let mut cleaned = Vec::with_capacity(nr_raw);
    for record in raw {
        let classes = match &record.classes {
            Some(classes) if classes != EMPTY_CLASSES => classes.clone(),
            _ => {
                nr_without_classes += 1;
                continue;
            }
        };
        let user_like = match record.user_like {
            Some(like) if like > 0. => Rating::try_from(like as i64)?,
            _ => {
                nr_without_like += 1;
                continue;
            }
        };
        let signals = imputation.signals(&record)?;
        cleaned.push(CleanRecord {
            classes,
            user_like,
            signals,
        });
    }

    info!(
        "Cleaned {} of {} records ({} without classes, {} without user like).",
        cleaned.len(),
        nr_raw,
        nr_without_classes,
        nr_without_like,
    );
    Ok(cleaned)
}

/// The minimum of the non-blank values satisfying `is_valid`.
fn min_valid(
    values: impl Iterator<Item = Option<f64>>,
    is_valid: impl Fn(f64) -> bool,
) -> Option<f64> {
    values
        .flatten()
        .filter(|v| !v.is_nan() && is_valid(*v))
        .fold(None, |min, v| Some(min.map_or(v, |min: f64| min.min(v))))
}

fn impute(
    value: Option<f64>,
    invalid: &[f64],
    min: Option<f64>,
    column: &'static str,
) -> Result<f64, Error> {
    match value {
        Some(v) if !v.is_nan() && !invalid.contains(&v) => Ok(v),
        _ => min.ok_or(Error::MissingImputationValue(column)),
    }
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::tests::raw_record;

    #[test]
    fn test_imputation_uses_minimum_valid_values() {
        let mut a = raw_record("a", 3.);
        a.novelty = Some(0.5);
        a.relevant = Some(2.);
        a.readability = Some(-1.);
        a.authority = Some(7.);
        let mut b = raw_record("b", 4.);
        b.novelty = Some(1.5);
        b.relevant = Some(-1.);
        b.readability = Some(0.);
        b.authority = Some(-1.);

        let imputation = Imputation::from_records(&[a, b]);

        // 0.5 truncates to 0 and is not a valid novelty
        assert_eq!(imputation.novelty, Some(1.5));
        assert_eq!(imputation.relevant, Some(2.));
        assert_eq!(imputation.readability, Some(0.));
        assert_eq!(imputation.authority, Some(7.));
    }

    #[test]
    fn test_clean_records_imputes_and_zero_fills() {
        let mut valid = raw_record("a|b", 5.);
        valid.novelty = Some(3.);
        valid.relevant = Some(4.);
        valid.readability = Some(10.);
        valid.authority = Some(2.);
        valid.mouse_ms = Some(120.);
        let mut blank = raw_record("a", 2.);
        blank.novelty = Some(0.);
        blank.relevant = None;
        blank.readability = Some(-1.);
        blank.authority = None;
        blank.mouse_ms = None;
        blank.page_ms = None;

        let cleaned = clean_records(vec![valid, blank]).unwrap();

        assert_eq!(cleaned.len(), 2);
        let signals = &cleaned[1].signals;
        assert_approx_eq!(f64, signals.novelty, 3.);
        assert_approx_eq!(f64, signals.relevant, 4.);
        assert_approx_eq!(f64, signals.readability, 10.);
        assert_approx_eq!(f64, signals.authority, 2.);
        assert_approx_eq!(f64, signals.mouse_ms, 0.);
        assert_approx_eq!(f64, signals.page_ms, 0.);
        assert_approx_eq!(f64, cleaned[0].signals.mouse_ms, 120.);
    }

    #[test]
    fn test_clean_records_drops_unusable_records() {
        let mut no_classes = raw_record("", 3.);
        no_classes.classes = None;
        let records = vec![
            no_classes,
            raw_record("|", 3.),
            raw_record("a", 0.),
            raw_record("a", -1.),
            raw_record("a", 4.),
        ];

        let cleaned = clean_records(records).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].classes, "a");
        assert_eq!(cleaned[0].user_like.value(), 4);
    }

    #[test]
    fn test_clean_records_rejects_too_large_like() {
        let result = clean_records(vec![raw_record("a", 6.)]);
        assert_eq!(result, Err(Error::InvalidRating(6)));
    }

    #[test]
    fn test_clean_records_fails_without_imputation_value() {
        let mut record = raw_record("a", 3.);
        record.novelty = Some(-1.);

        let result = clean_records(vec![record]);

        assert_eq!(result, Err(Error::MissingImputationValue("Novelty")));
    }
}
