use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use log::info;
use structopt::StructOpt;
use yow_features::{Pipeline, PipelineOutput};

use crate::{
    exit_code::NO_ERROR,
    utils::{
        check_dir,
        check_file,
        find_data_dir,
        load_raw_records,
        progress_spin_until_done,
        write_features,
        ConfigArgs,
    },
};

/// Runs the feature pipeline and stores its outputs.
#[derive(StructOpt, Debug)]
pub struct RunCmd {
    /// The directory with the user study data.
    #[structopt(long)]
    data_dir: Option<PathBuf>,

    /// The user study export, relative to the data dir.
    #[structopt(short, long, default_value = "userstudy.csv")]
    input: PathBuf,

    /// The directory to write the outputs into, defaults to the data dir.
    #[structopt(short, long)]
    out_dir: Option<PathBuf>,

    #[structopt(flatten)]
    config: ConfigArgs,
}

impl RunCmd {
    const FEATURES_FILE: &'static str = "features.csv";
    const JOINT_FREQ_FILE: &'static str = "joint_freq.bin";
    const JOINT_FREQ_JSON_FILE: &'static str = "joint_freq.json";
    const REPORT_FILE: &'static str = "featuresInfo.txt";

    pub fn run(self) -> Result<i32, Error> {
        let RunCmd {
            data_dir,
            input,
            out_dir,
            config,
        } = self;

        let data_dir = data_dir.map_or_else(find_data_dir, Ok)?;
        check_dir(&data_dir)?;
        let input = data_dir.join(input);
        check_file(&input)?;
        let out_dir = out_dir.unwrap_or(data_dir);
        let pipeline = Pipeline::new(config.config()?);

        let raw = progress_spin_until_done("Loading records", || load_raw_records(&input))
            .with_context(|| format!("Loading records from {} failed.", input.display()))?;
        let output = progress_spin_until_done("Running pipeline", || pipeline.run(raw))
            .context("Running the feature pipeline failed.")?;

        store_outputs(&pipeline, &output, &out_dir)?;
        info!("Stored the outputs in {}.", out_dir.display());

        Ok(NO_ERROR)
    }
}

fn store_outputs(
    pipeline: &Pipeline,
    output: &PipelineOutput,
    out_dir: &Path,
) -> Result<(), Error> {
    fs::create_dir_all(out_dir).context("Creating the output dir failed.")?;

    let file = File::create(out_dir.join(RunCmd::FEATURES_FILE))?;
    write_features(BufWriter::new(file), output.features.rows())
        .context("Writing the features failed.")?;
    output
        .joint
        .serialize_into_file(out_dir.join(RunCmd::JOINT_FREQ_FILE))
        .context("Storing the joint frequency table failed.")?;
    output
        .joint
        .write_json_file(out_dir.join(RunCmd::JOINT_FREQ_JSON_FILE), true)
        .context("Exporting the joint frequency table failed.")?;
    fs::write(out_dir.join(RunCmd::REPORT_FILE), pipeline.report(output))
        .context("Writing the features report failed.")?;

    Ok(())
}
