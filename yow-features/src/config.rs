use displaydoc::Display;
use thiserror::Error;

use crate::{data::NUM_RATINGS, estimator::UnknownTokenPolicy};

/// The configuration of the feature pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    high_frequency_threshold: usize,
    like_threshold: u8,
    unknown_token_policy: UnknownTokenPolicy,
}

/// Potential errors of the pipeline configuration.
#[derive(Copy, Clone, Debug, Display, Error, PartialEq)]
pub enum ConfigError {
    /// Invalid like threshold {0}, expected value from 1 to 4
    LikeThreshold(u8),
}

impl Config {
    /// Classes occurring more often than this are reported as high frequency classes.
    pub fn high_frequency_threshold(&self) -> usize {
        self.high_frequency_threshold
    }

    /// Sets the high frequency threshold.
    pub fn with_high_frequency_threshold(self, high_frequency_threshold: usize) -> Self {
        Self {
            high_frequency_threshold,
            ..self
        }
    }

    /// User likes above this threshold are binarized as liked.
    pub fn like_threshold(&self) -> u8 {
        self.like_threshold
    }

    /// Sets the like threshold.
    ///
    /// # Errors
    /// Fails if the threshold doesn't split the ratings into two non-empty groups.
    pub fn with_like_threshold(self, like_threshold: u8) -> Result<Self, ConfigError> {
        if (1..NUM_RATINGS as u8).contains(&like_threshold) {
            Ok(Self {
                like_threshold,
                ..self
            })
        } else {
            Err(ConfigError::LikeThreshold(like_threshold))
        }
    }

    /// How tokens missing from the joint frequency table are treated.
    pub fn unknown_token_policy(&self) -> UnknownTokenPolicy {
        self.unknown_token_policy
    }

    /// Sets the unknown token policy.
    pub fn with_unknown_token_policy(self, unknown_token_policy: UnknownTokenPolicy) -> Self {
        Self {
            unknown_token_policy,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            high_frequency_threshold: 125,
            like_threshold: 3,
            unknown_token_policy: UnknownTokenPolicy::Zero,
        }
    }
}
