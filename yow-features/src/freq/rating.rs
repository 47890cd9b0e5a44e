use serde::{Deserialize, Serialize};

use crate::{
    data::{Rating, Record, NUM_RATINGS},
    error::Error,
};

/// Number of records per rating, the denominator of the conditional frequencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingFreqTable([u32; NUM_RATINGS]);

impl RatingFreqTable {
    pub fn build(records: &[Record]) -> Self {
        let mut counts = [0; NUM_RATINGS];
        for record in records {
            counts[record.user_like.index()] += 1;
        }
        Self(counts)
    }

    /// The number of records with the rating.
    ///
    /// # Errors
    /// Fails if no record has the rating, the count can't be used as denominator then.
    pub fn count(&self, rating: Rating) -> Result<u32, Error> {
        match self.0[rating.index()] {
            0 => Err(Error::MissingRatingBucket(rating)),
            count => Ok(count),
        }
    }

    /// The total number of records.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Iterates over all ratings and their counts, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (Rating, u32)> + '_ {
        Rating::all().map(move |rating| (rating, self.0[rating.index()]))
    }
}
