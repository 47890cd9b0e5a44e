//! Cleaning of the topic classes of the records.
//!
//! The stages must run in order: tokenization, normalization, rare class filtering.

mod filter;
mod normalizer;
mod tokenizer;

pub use self::{
    filter::{filter_rare_classes, ClassFrequencies, FilterOutcome},
    normalizer::{canonical, normalize, normalize_records},
    tokenizer::{tokenize, tokenize_records, DELIMITER},
};
