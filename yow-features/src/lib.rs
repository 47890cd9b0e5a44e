//! Satisfaction features of the YOW user study.
//!
//! Derives a class conditional likelihood feature from the topic classes and explicit user likes
//! of logged document visits, next to the implicit signals (dwell times, scores) of each visit.

mod classes;
mod clean;
mod config;
mod data;
mod error;
mod estimator;
mod features;
mod freq;
mod pipeline;
mod stats;

#[cfg(test)]
mod tests;

pub use crate::{
    classes::{
        canonical,
        filter_rare_classes,
        normalize,
        normalize_records,
        tokenize,
        tokenize_records,
        ClassFrequencies,
        FilterOutcome,
        DELIMITER,
    },
    clean::clean_records,
    config::{Config, ConfigError},
    data::{CleanRecord, Rating, RawRecord, Record, Signals, Token, NUM_RATINGS},
    error::{Error, LoadingTableFailed, StoringTableFailed},
    estimator::{ConditionalFreq, Estimator, ParsePolicyError, UnknownTokenPolicy},
    features::{
        binary_targets,
        design_matrix,
        targets,
        FeatureRow,
        FeatureTable,
        FEATURE_COLUMNS,
    },
    freq::{JointFreqTable, RatingCounts, RatingFreqTable},
    pipeline::{Pipeline, PipelineOutput, Prepared},
    stats::FeatureStats,
};
