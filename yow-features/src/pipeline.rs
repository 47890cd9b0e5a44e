use log::{debug, info};

use crate::{
    classes::{filter_rare_classes, normalize_records, tokenize_records, ClassFrequencies},
    clean::clean_records,
    config::Config,
    data::{RawRecord, Record},
    error::Error,
    estimator::Estimator,
    features::FeatureTable,
    freq::{JointFreqTable, RatingFreqTable},
    stats,
};

/// Records whose classes went through all cleaning stages.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    /// Records with at least one normalized, non-singleton token each.
    pub records: Vec<Record>,
    /// Frequencies of the normalized classes, before filtering.
    pub frequencies: ClassFrequencies,
    /// Number of removed token occurrences.
    pub removed_tokens: usize,
    /// Number of records without any token left after filtering.
    pub dropped_records: usize,
}

/// Everything a pipeline run derived from one snapshot of the data.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutput {
    pub prepared: Prepared,
    pub joint: JointFreqTable,
    pub ratings: RatingFreqTable,
    pub features: FeatureTable,
}

/// The batch pipeline deriving the conditional frequency features.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cleans the raw records and their classes.
    ///
    /// Runs cleaning, tokenization, normalization and rare class filtering in that order. The
    /// singletons are determined on the normalized classes.
    pub fn prepare(&self, raw: Vec<RawRecord>) -> Result<Prepared, Error> {
        let cleaned = clean_records(raw)?;

        let (mut records, tokens) = tokenize_records(cleaned)?;
        debug!(
            "Tokenized {} records into {} distinct raw classes.",
            records.len(),
            ClassFrequencies::from_tokens(&tokens).len(),
        );

        normalize_records(&mut records);
        let frequencies = ClassFrequencies::from_records(&records);
        debug!("Normalized into {} distinct classes.", frequencies.len());

        let outcome = filter_rare_classes(records, &frequencies);
        info!(
            "Removed {} rare or empty classes, dropped {} records without classes, {} records left.",
            outcome.removed_tokens,
            outcome.dropped_records,
            outcome.records.len(),
        );

        Ok(Prepared {
            records: outcome.records,
            frequencies,
            removed_tokens: outcome.removed_tokens,
            dropped_records: outcome.dropped_records,
        })
    }

    /// Derives the features of the records from complete frequency tables.
    ///
    /// The tables may stem from another snapshot of the data, tokens missing from the joint table
    /// are treated according to the configured [`UnknownTokenPolicy`].
    ///
    /// [`UnknownTokenPolicy`]: crate::estimator::UnknownTokenPolicy
    pub fn score(
        &self,
        records: &[Record],
        joint: &JointFreqTable,
        ratings: &RatingFreqTable,
    ) -> Result<FeatureTable, Error> {
        let estimator = Estimator::new(joint, ratings, self.config.unknown_token_policy());
        let freqs = estimator.estimate_all(records)?;

        Ok(FeatureTable::new(
            records,
            &freqs,
            self.config.like_threshold(),
        ))
    }

    /// Runs the whole pipeline on one snapshot of the data.
    ///
    /// Both frequency tables are completely built before any feature is estimated.
    pub fn run(&self, raw: Vec<RawRecord>) -> Result<PipelineOutput, Error> {
        let prepared = self.prepare(raw)?;

        let joint = JointFreqTable::build(&prepared.records)?;
        let ratings = RatingFreqTable::build(&prepared.records);
        let features = self.score(&prepared.records, &joint, &ratings)?;
        info!(
            "Derived features of {} records from {} classes.",
            features.len(),
            joint.len(),
        );

        Ok(PipelineOutput {
            prepared,
            joint,
            ratings,
            features,
        })
    }

    /// Renders the statistics report of a pipeline run.
    pub fn report(&self, output: &PipelineOutput) -> String {
        let high_frequency = output
            .prepared
            .frequencies
            .high_frequency(self.config.high_frequency_threshold());
        stats::report(output.features.rows(), &output.ratings, &high_frequency)
    }
}

#[cfg(test)]
mod tests {
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::{
        estimator::UnknownTokenPolicy,
        tests::{raw_record, rating, record},
    };

    #[test]
    fn test_run_end_to_end() {
        let raw = vec![
            raw_record("Sports|USA", 5.),
            raw_record("sports", 3.),
            raw_record("|us", 5.),
        ];

        let output = Pipeline::default().run(raw).unwrap();

        assert_eq!(output.joint.get("sports"), Some(&[0, 0, 1, 0, 1]));
        assert_eq!(output.joint.get("usa"), Some(&[0, 0, 0, 0, 2]));
        assert_eq!(output.ratings.count(rating(3)), Ok(1));
        assert_eq!(output.ratings.count(rating(5)), Ok(2));
        let rows = output.features.rows();
        assert_eq!(rows.len(), 3);
        assert_approx_eq!(f64, rows[0].conditional_freq, 0.5);
        assert_approx_eq!(f64, rows[1].conditional_freq, 1.);
        assert_approx_eq!(f64, rows[2].conditional_freq, 1.);
        assert_eq!(rows[2].classes, "usa");
    }

    #[test]
    fn test_run_drops_records_with_singleton_classes_only() {
        let raw = vec![
            raw_record("a", 1.),
            raw_record("a", 2.),
            raw_record("b", 3.),
        ];

        let output = Pipeline::default().run(raw).unwrap();

        assert_eq!(output.prepared.records.len(), 2);
        assert_eq!(output.prepared.dropped_records, 1);
        assert!(output.joint.get("b").is_none());
        assert_eq!(output.ratings.total(), 2);
    }

    #[test]
    fn test_singletons_are_determined_after_normalization() {
        // "us" and "united states" are singletons before normalization only
        let raw = vec![
            raw_record("us|news", 4.),
            raw_record("united states|news", 4.),
        ];

        let prepared = Pipeline::default().prepare(raw).unwrap();

        assert_eq!(prepared.records[0].classes, ["usa", "news"]);
        assert_eq!(prepared.records[1].classes, ["usa", "news"]);
        assert_eq!(prepared.removed_tokens, 0);
    }

    #[test]
    fn test_score_with_tables_of_other_data() {
        let train = vec![record(&["a"], 2), record(&["a", "b"], 2)];
        let joint = JointFreqTable::build(&train).unwrap();
        let ratings = RatingFreqTable::build(&train);
        let serve = vec![record(&["a", "c"], 2)];

        let zero = Pipeline::default().score(&serve, &joint, &ratings).unwrap();
        assert_eq!(zero.rows()[0].conditional_freq, 0.);

        let config = Config::default().with_unknown_token_policy(UnknownTokenPolicy::Fail);
        assert_eq!(
            Pipeline::new(config).score(&serve, &joint, &ratings),
            Err(Error::UnknownToken("c".to_owned())),
        );
    }

    #[test]
    fn test_report_contains_all_sections() {
        let raw = vec![
            raw_record("a|b", 1.),
            raw_record("a|b", 2.),
            raw_record("a", 2.),
        ];
        let pipeline = Pipeline::new(Config::default().with_high_frequency_threshold(2));
        let output = pipeline.run(raw).unwrap();

        let report = pipeline.report(&output);

        assert!(report.contains("Feature: ConditionalFreq"));
        assert!(report.contains("Feature: MeanConditionalFreq"));
        assert!(report.contains("Feature: UserLike\n"));
        assert!(report.contains("2 = 2"));
        assert!(report.contains("a = 3"));
        assert!(!report.contains("b = 2"));
    }
}
