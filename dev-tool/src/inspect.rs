use std::{collections::HashSet, path::PathBuf};

use anyhow::Error;
use itertools::Itertools;
use log::debug;
use structopt::StructOpt;
use yow_features::{JointFreqTable, LoadingTableFailed, Rating};

use crate::exit_code::{NON_FATAL_ERROR, NO_ERROR};

/// Inspects a `.bin` joint frequency table.
#[derive(StructOpt, Debug)]
pub struct InspectCmd {
    /// If set only print the classes in the filter.
    ///
    /// This accepts comma separated lists. Additionally
    /// to including the option multiple times.
    #[structopt(short, long)]
    filter: Option<Vec<String>>,

    /// Prints the table as json object.
    #[structopt(short, long)]
    json: bool,

    /// Path to a `.bin` joint frequency table.
    table: PathBuf,
}

impl InspectCmd {
    pub fn run(self) -> Result<i32, Error> {
        self.run_(JointFreqTable::deserialize_from_file)
    }

    fn run_(
        self,
        load_table: impl FnOnce(PathBuf) -> Result<JointFreqTable, LoadingTableFailed>,
    ) -> Result<i32, Error> {
        let Self {
            filter,
            json,
            table,
        } = self;

        let filter = filter.map(parse_filter);

        debug!("Loading JointFreqTable.");
        let table = load_table(table)?;
        debug!("Loaded {} classes.", table.len());

        let selected = table
            .iter()
            .filter(|(token, _)| {
                filter
                    .as_ref()
                    .map_or(true, |filter| filter.contains(*token))
            })
            .map(|(token, counts)| (token.to_owned(), *counts))
            .collect::<JointFreqTable>();

        if json {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        } else {
            println!("Ratings: {}", Rating::all().join(", "));
            for (token, counts) in selected.iter() {
                println!("{}: {}", token, counts.iter().join(", "));
            }
        }

        let missing = filter
            .iter()
            .flatten()
            .filter(|token| selected.get(token).is_none())
            .sorted()
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(NO_ERROR)
        } else {
            eprintln!("Missing classes:\n - {}", missing.iter().join("\n - "));
            Ok(NON_FATAL_ERROR)
        }
    }
}

fn parse_filter(filter: Vec<String>) -> HashSet<String> {
    filter
        .iter()
        .flat_map(|names| {
            names
                .split(',')
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty())
        })
        .collect::<HashSet<_>>()
}
