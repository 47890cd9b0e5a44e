use std::io;

use displaydoc::Display;
use thiserror::Error;

use crate::data::Rating;

/// Errors of the feature derivation pipeline.
///
/// All of them are fatal to a batch run, the frequency tables are a single shared snapshot.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum Error {
    /// The class string of record {record} can't be tokenized: {raw:?}
    MalformedLabel { record: usize, raw: String },
    /// No record with rating {0} was observed, the rating frequency can't be used as denominator
    MissingRatingBucket(Rating),
    /// The token {0:?} is not part of the joint frequency table
    UnknownToken(String),
    /// Record {0} has no class tokens left at the estimation stage
    EmptyTokenSequence(usize),
    /// Invalid user like {0}, expected a value from 1 to 5
    InvalidRating(i64),
    /// The column {0} needs imputation but has no valid value to impute from
    MissingImputationValue(&'static str),
}

/// Persisting a joint frequency table failed.
#[derive(Debug, Error)]
pub enum StoringTableFailed {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    SerializationFailed(#[from] bincode::Error),

    #[error(transparent)]
    JsonFailed(#[from] serde_json::Error),
}

/// Loading a persisted joint frequency table failed.
#[derive(Debug, Error)]
pub enum LoadingTableFailed {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    DeserializationFailed(#[from] bincode::Error),

    #[error(transparent)]
    JsonFailed(#[from] serde_json::Error),
}
