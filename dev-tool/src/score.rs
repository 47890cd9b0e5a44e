use std::{
    fs::File,
    io::{stdout, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Error};
use log::info;
use structopt::StructOpt;
use yow_features::{JointFreqTable, Pipeline, RatingFreqTable};

use crate::{
    exit_code::NO_ERROR,
    utils::{check_file, load_raw_records, progress_spin_until_done, write_features, ConfigArgs},
};

/// Scores a user study export with a persisted joint frequency table.
///
/// The rating frequencies are counted on the scored export itself.
#[derive(StructOpt, Debug)]
pub struct ScoreCmd {
    /// A `.bin` joint frequency table stored by the run command.
    #[structopt(short, long)]
    table: PathBuf,

    /// The user study export to score.
    #[structopt(short, long)]
    input: PathBuf,

    /// The csv file to write the features into, defaults to stdout.
    #[structopt(short, long)]
    output: Option<PathBuf>,

    #[structopt(flatten)]
    config: ConfigArgs,
}

impl ScoreCmd {
    pub fn run(self) -> Result<i32, Error> {
        let ScoreCmd {
            table,
            input,
            output,
            config,
        } = self;

        check_file(&table)?;
        check_file(&input)?;
        let pipeline = Pipeline::new(config.config()?);

        let joint = JointFreqTable::deserialize_from_file(&table)
            .with_context(|| format!("Loading table from {} failed.", table.display()))?;
        let raw = progress_spin_until_done("Loading records", || load_raw_records(&input))
            .with_context(|| format!("Loading records from {} failed.", input.display()))?;
        let prepared = pipeline.prepare(raw)?;
        let ratings = RatingFreqTable::build(&prepared.records);
        let features = pipeline
            .score(&prepared.records, &joint, &ratings)
            .context("Scoring the records failed.")?;
        info!("Scored {} records.", features.len());

        let written = if let Some(output) = output {
            let file = File::create(&output)?;
            write_features(BufWriter::new(file), features.rows())
        } else {
            write_features(stdout(), features.rows())
        };
        written.context("Writing the features failed.")?;

        Ok(NO_ERROR)
    }
}
