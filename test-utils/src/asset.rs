//! The single source of truth for all data paths.

use std::{
    env::var_os,
    io::{Error, ErrorKind, Result},
    path::{Path, PathBuf},
};

pub const DATA_DIR: &str = "data";

/// Resolves the path to the requested data relative to the workspace directory.
pub fn resolve_path(path: &[impl AsRef<Path>]) -> Result<PathBuf> {
    let manifest = var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing CARGO_MANIFEST_DIR"))?;
    let workspace = PathBuf::from(manifest)
        .parent()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing cargo workspace dir"))?
        .to_path_buf();

    path.iter()
        .fold(workspace, |path, component| path.join(component))
        .canonicalize()
}

/// Resolves the path to the sample of the user study logs.
pub fn user_study_sample() -> Result<PathBuf> {
    resolve_path(&[DATA_DIR, "userstudy_sample.csv"])
}
