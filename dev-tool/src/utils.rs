use std::{
    env::current_dir,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Error};
use indicatif::{ProgressBar, ProgressStyle};
use structopt::StructOpt;
use yow_features::{Config, FeatureRow, RawRecord, UnknownTokenPolicy};

pub(crate) fn progress_spin_until_done<R>(msg: &'static str, func: impl FnOnce() -> R) -> R {
    let progress_bar = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_bar().template("{msg}: {elapsed:>10} {spinner:.green}"));
    progress_bar.set_message(msg);
    progress_bar.enable_steady_tick(100);
    let res = func();
    progress_bar.finish();
    res
}

/// Options of the feature pipeline.
#[derive(StructOpt, Debug)]
pub struct ConfigArgs {
    /// User likes above this threshold count as liked.
    #[structopt(long, default_value = "3")]
    like_threshold: u8,

    /// Classes with at least this many occurrences are listed in the report.
    #[structopt(long, default_value = "125")]
    high_frequency_threshold: usize,

    /// Treatment of classes missing from the joint frequency table (zero or fail).
    #[structopt(long, default_value = "zero")]
    unknown_token: UnknownTokenPolicy,
}

impl ConfigArgs {
    pub fn config(&self) -> Result<Config, Error> {
        Config::default()
            .with_high_frequency_threshold(self.high_frequency_threshold)
            .with_unknown_token_policy(self.unknown_token)
            .with_like_threshold(self.like_threshold)
            .map_err(Into::into)
    }
}

pub(crate) fn check_dir(dir: &Path) -> Result<(), Error> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(anyhow!("Data Dir is not a dir: {}", dir.display()))
    }
}

pub(crate) fn check_file(path: &Path) -> Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        Err(anyhow!("Input File is not a file: {}", path.display()))
    }
}

pub(crate) fn find_data_dir() -> Result<PathBuf, Error> {
    let current_dir = current_dir()?;
    let mut base_dir: &Path = &current_dir;
    let mut data_dir = base_dir.join("data");
    if data_dir.exists() {
        return Ok(data_dir);
    }
    while let Some(parent) = base_dir.parent() {
        base_dir = parent;
        data_dir = base_dir.join("data");
        if data_dir.exists() {
            return Ok(data_dir);
        }
        if base_dir.join(".git").exists() {
            break;
        }
    }

    Err(anyhow!(
        "No Data Dir found in {} or dirs up to {}",
        current_dir.display(),
        base_dir.display()
    ))
}

/// Loads the records of a user study export csv file.
pub(crate) fn load_raw_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .map(|record| record.map_err(Into::into))
        .collect()
}

/// Writes the feature rows as csv with a header row.
pub(crate) fn write_features(writer: impl Write, rows: &[FeatureRow]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(Into::into)
}
