//! Class conditional likelihood of the classes of a record given its rating.
//!
//! For a record `e` the conditional frequency is the naive product
//! ```text
//!  ∏   joint[token][e.user_like] / rating[e.user_like]
//! token
//! ```
//! over the tokens of `e`, assuming independent tokens given the rating. It is neither
//! normalized nor smoothed, a single zero count zeroes the whole product.

use std::str::FromStr;

use displaydoc::Display;
use log::warn;
use thiserror::Error;

#[cfg(feature = "multithreaded")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::{
    data::{Rating, Record},
    error::Error,
    freq::{JointFreqTable, RatingFreqTable},
};

/// Treatment of tokens which are not part of the joint frequency table.
///
/// This can only happen if the table was built from another snapshot of the data than the one
/// being scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownTokenPolicy {
    /// The token contributes a zero factor, same as a zero count.
    Zero,
    /// The token fails the estimation.
    Fail,
}

/// Unknown policy {0:?}, expected `zero` or `fail`
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub struct ParsePolicyError(String);

impl FromStr for UnknownTokenPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "fail" => Ok(Self::Fail),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

/// Derived features of a single record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConditionalFreq {
    /// Product of the per token likelihoods.
    pub product: f64,
    /// Arithmetic mean of the per token likelihoods.
    pub mean: f64,
}

/// Estimates conditional frequencies from two complete frequency tables.
#[derive(Clone, Copy, Debug)]
pub struct Estimator<'a> {
    joint: &'a JointFreqTable,
    ratings: &'a RatingFreqTable,
    policy: UnknownTokenPolicy,
}

impl<'a> Estimator<'a> {
    pub fn new(
        joint: &'a JointFreqTable,
        ratings: &'a RatingFreqTable,
        policy: UnknownTokenPolicy,
    ) -> Self {
        Self {
            joint,
            ratings,
            policy,
        }
    }

    /// Likelihood of the token given the rating.
    fn factor(&self, token: &str, rating: Rating) -> Result<f64, Error> {
        let denom = self.ratings.count(rating)?;
        let numer = match (self.joint.count(token, rating), self.policy) {
            (Some(count), _) => count,
            (None, UnknownTokenPolicy::Zero) => {
                warn!(
                    "Token {:?} is missing from the joint frequency table, the table was built from different data.",
                    token,
                );
                0
            }
            (None, UnknownTokenPolicy::Fail) => return Err(Error::UnknownToken(token.to_owned())),
        };

        Ok(numer as f64 / denom as f64)
    }

    /// Estimates the conditional frequencies of the `idx`th record.
    ///
    /// # Errors
    /// Fails if the record has no tokens, if its rating was never observed or if a token is
    /// unknown and the policy is [`UnknownTokenPolicy::Fail`].
    pub fn estimate(&self, idx: usize, record: &Record) -> Result<ConditionalFreq, Error> {
        if record.classes.is_empty() {
            return Err(Error::EmptyTokenSequence(idx));
        }

        let mut product = 1.;
        let mut sum = 0.;
        for token in &record.classes {
            let factor = self.factor(token, record.user_like)?;
            product *= factor;
            sum += factor;
        }

        Ok(ConditionalFreq {
            product,
            mean: sum / record.classes.len() as f64,
        })
    }

    /// Estimates the conditional frequencies of all records, in order.
    pub fn estimate_all(&self, records: &[Record]) -> Result<Vec<ConditionalFreq>, Error> {
        #[cfg(not(feature = "multithreaded"))]
        let records = records.iter().enumerate();
        #[cfg(feature = "multithreaded")]
        let records = records.into_par_iter().enumerate();

        records
            .map(|(idx, record)| self.estimate(idx, record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::tests::{rating, record};

    fn tables(records: &[Record]) -> (JointFreqTable, RatingFreqTable) {
        (
            JointFreqTable::build(records).unwrap(),
            RatingFreqTable::build(records),
        )
    }

    #[test]
    fn test_estimate_product_of_likelihoods() {
        let records = vec![
            record(&["sports", "usa"], 5),
            record(&["sports"], 3),
            record(&["usa"], 5),
        ];
        let (joint, ratings) = tables(&records);
        let estimator = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Zero);

        let freqs = estimator.estimate_all(&records).unwrap();

        assert_approx_eq!(f64, freqs[0].product, 0.5);
        assert_approx_eq!(f64, freqs[0].mean, 0.75);
        assert_approx_eq!(f64, freqs[1].product, 1.);
        assert_approx_eq!(f64, freqs[2].product, 1.);
        assert_approx_eq!(f64, freqs[2].mean, 1.);
    }

    #[test]
    fn test_zero_count_zeroes_product() {
        let (joint, ratings) = tables(&[record(&["a", "b"], 2), record(&["b"], 4)]);
        let estimator = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Zero);

        // "a" was never rated 4
        let freq = estimator.estimate(0, &record(&["b", "a"], 4)).unwrap();

        assert_eq!(freq.product, 0.);
        assert_approx_eq!(f64, freq.mean, 0.5);
    }

    #[test]
    fn test_unknown_token_policies() {
        let (joint, ratings) = tables(&[record(&["a"], 2)]);
        let scored = record(&["a", "z"], 2);

        let zero = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Zero);
        assert_eq!(zero.estimate(0, &scored).unwrap().product, 0.);

        let fail = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Fail);
        assert_eq!(
            fail.estimate(0, &scored),
            Err(Error::UnknownToken("z".to_owned())),
        );
    }

    #[test]
    fn test_missing_rating_bucket_fails() {
        let (joint, ratings) = tables(&[record(&["a"], 2)]);
        let estimator = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Zero);

        assert_eq!(
            estimator.estimate(7, &record(&["a"], 1)),
            Err(Error::MissingRatingBucket(rating(1))),
        );
    }

    #[test]
    fn test_empty_token_sequence_fails() {
        let (joint, ratings) = tables(&[record(&["a"], 2)]);
        let estimator = Estimator::new(&joint, &ratings, UnknownTokenPolicy::Zero);

        assert_eq!(
            estimator.estimate_all(&[record(&["a"], 2), record(&[], 2)]),
            Err(Error::EmptyTokenSequence(1)),
        );
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("zero".parse::<UnknownTokenPolicy>(), Ok(UnknownTokenPolicy::Zero));
        assert_eq!("fail".parse::<UnknownTokenPolicy>(), Ok(UnknownTokenPolicy::Fail));
        assert_eq!(
            "skip".parse::<UnknownTokenPolicy>(),
            Err(ParsePolicyError("skip".to_owned())),
        );
    }
}
