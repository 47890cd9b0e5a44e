pub(crate) mod record;

use std::convert::TryFrom;

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use self::record::{CleanRecord, RawRecord, Record, Signals};

/// The number of distinct user like values.
pub const NUM_RATINGS: usize = 5;

/// An explicit user like, from 1 (disliked) to 5 (liked).
#[derive(
    Clone, Copy, Debug, Display, Into, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// All ratings in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (1..=NUM_RATINGS as u8).map(Rating)
    }

    /// The slot of this rating in a count vector.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=NUM_RATINGS as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(Error::InvalidRating(value))
        }
    }
}

/// A normalized topic label of a record.
pub type Token = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        assert_eq!(Rating::try_from(1_i64).unwrap().index(), 0);
        assert_eq!(Rating::try_from(5_i64).unwrap().index(), 4);
        assert_eq!(Rating::try_from(0_i64), Err(Error::InvalidRating(0)));
        assert_eq!(Rating::try_from(6_i64), Err(Error::InvalidRating(6)));
        assert_eq!(Rating::all().map(Rating::value).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }
}
