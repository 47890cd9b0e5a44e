use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::data::{Record, Token};

/// Corpus wide frequencies of the classes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassFrequencies(HashMap<Token, usize>);

impl ClassFrequencies {
    /// Counts every occurrence of every token.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Self {
        Self(tokens.into_iter().cloned().counts())
    }

    /// Counts every occurrence of every token of all records.
    pub fn from_records(records: &[Record]) -> Self {
        Self::from_tokens(records.iter().flat_map(|record| &record.classes))
    }

    /// The number of occurrences of the token.
    pub fn get(&self, token: &str) -> usize {
        self.0.get(token).copied().unwrap_or_default()
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens which occur exactly once.
    pub fn singletons(&self) -> HashSet<&str> {
        self.0
            .iter()
            .filter_map(|(token, &count)| (count == 1).then(|| token.as_str()))
            .collect()
    }

    /// Tokens which occur more than `threshold` times, most frequent first.
    ///
    /// This is for reporting only, frequent tokens are never removed.
    pub fn high_frequency(&self, threshold: usize) -> Vec<(&str, usize)> {
        self.0
            .iter()
            .filter(|(_, &count)| count > threshold)
            .map(|(token, &count)| (token.as_str(), count))
            .sorted_by(|(t1, c1), (t2, c2)| c2.cmp(c1).then_with(|| t1.cmp(t2)))
            .collect()
    }
}

/// Records which survived the rare class filter.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterOutcome {
    pub records: Vec<Record>,
    /// Number of removed token occurrences, empty tokens included.
    pub removed_tokens: usize,
    /// Number of records without any token left.
    pub dropped_records: usize,
}

/// Removes singleton and empty tokens and drops records without any token left.
///
/// The `frequencies` must be computed on the normalized classes of `records`.
pub fn filter_rare_classes(records: Vec<Record>, frequencies: &ClassFrequencies) -> FilterOutcome {
    let singletons = frequencies.singletons();
    let mut removed_tokens = 0;
    let nr_records = records.len();

    let records = records
        .into_iter()
        .filter_map(|mut record| {
            let before = record.classes.len();
            record
                .classes
                .retain(|token| !token.is_empty() && !singletons.contains(token.as_str()));
            removed_tokens += before - record.classes.len();
            (!record.classes.is_empty()).then(|| record)
        })
        .collect_vec();

    FilterOutcome {
        dropped_records: nr_records - records.len(),
        records,
        removed_tokens,
    }
}
