use std::process::exit;

use anyhow::Error;
use structopt::StructOpt;

use crate::{
    exit_code::FATAL_ERROR,
    inspect::InspectCmd,
    run::RunCmd,
    score::ScoreCmd,
};

mod exit_code;
mod inspect;
mod run;
mod score;
mod utils;

/// Tooling to derive the satisfaction features of the YOW user study.
#[derive(StructOpt, Debug)]
enum CommandArgs {
    /// Runs the feature pipeline on a user study export.
    Run(RunCmd),
    /// Scores a user study export with a persisted joint frequency table.
    Score(ScoreCmd),
    /// Inspects a persisted joint frequency table.
    Inspect(InspectCmd),
}

impl CommandArgs {
    fn run(self) -> Result<i32, Error> {
        match self {
            CommandArgs::Run(cmd) => cmd.run(),
            CommandArgs::Score(cmd) => cmd.run(),
            CommandArgs::Inspect(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::init();

    let exit_code = match CommandArgs::from_args().run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{:?}", error);
            FATAL_ERROR
        }
    };

    exit(exit_code);
}
