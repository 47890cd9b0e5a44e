use std::{collections::BTreeMap, iter::FromIterator};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    data::{Rating, Record, Token, NUM_RATINGS},
    error::Error,
};

/// Per rating counts of the records containing a token, indexed by [`Rating::index()`].
pub type RatingCounts = [u32; NUM_RATINGS];

/// Maps each token to the number of records containing it, per rating.
///
/// A token is counted once per record, no matter how often it occurs in it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointFreqTable(BTreeMap<Token, RatingCounts>);

impl JointFreqTable {
    /// Builds the table in a single pass over the records.
    ///
    /// # Errors
    /// Fails if a record has no tokens, which the rare class filter rules out.
    pub fn build(records: &[Record]) -> Result<Self, Error> {
        let mut table = BTreeMap::<Token, RatingCounts>::new();
        for (idx, record) in records.iter().enumerate() {
            if record.classes.is_empty() {
                return Err(Error::EmptyTokenSequence(idx));
            }
            for token in record.classes.iter().unique() {
                table.entry(token.clone()).or_default()[record.user_like.index()] += 1;
            }
        }
        debug!(
            "Built joint frequency table with {} tokens from {} records.",
            table.len(),
            records.len(),
        );

        Ok(Self(table))
    }

    /// The counts of the token, if it is part of the table.
    pub fn get(&self, token: &str) -> Option<&RatingCounts> {
        self.0.get(token)
    }

    /// The number of records containing the token with the given rating.
    pub fn count(&self, token: &str, rating: Rating) -> Option<u32> {
        self.get(token).map(|counts| counts[rating.index()])
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the tokens and their counts in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RatingCounts)> {
        self.0.iter().map(|(token, counts)| (token.as_str(), counts))
    }
}

impl FromIterator<(Token, RatingCounts)> for JointFreqTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Token, RatingCounts)>,
    {
        Self(iter.into_iter().collect())
    }
}
