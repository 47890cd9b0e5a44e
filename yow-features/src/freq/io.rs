//! Persistence of the joint frequency table.
//!
//! The binary format is a bincode map from token to five fixed width counts, the
//! json format a `{"token": [c1, c2, c3, c4, c5]}` object.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use bincode::Options;

use super::JointFreqTable;
use crate::error::{LoadingTableFailed, StoringTableFailed};

impl JointFreqTable {
    fn setup_bincode() -> impl bincode::Options {
        // we explicitly set some default options to
        // convey exactly which options we use.
        bincode::DefaultOptions::new()
            .with_little_endian()
            .with_fixint_encoding()
            .reject_trailing_bytes()
    }

    /// Serializes the table into a file, preferably using the `.bin` file ending.
    pub fn serialize_into_file(&self, file: impl AsRef<Path>) -> Result<(), StoringTableFailed> {
        let mut writer = BufWriter::new(File::create(file)?);
        self.serialize_into(&mut writer)?;
        writer.flush().map_err(Into::into)
    }

    /// Serializes the table into the given writer.
    pub fn serialize_into(&self, writer: impl Write) -> Result<(), StoringTableFailed> {
        Self::setup_bincode()
            .serialize_into(writer, self)
            .map_err(Into::into)
    }

    /// Deserializes a table from the given file.
    pub fn deserialize_from_file(file: impl AsRef<Path>) -> Result<Self, LoadingTableFailed> {
        Self::deserialize_from(BufReader::new(File::open(file)?))
    }

    /// Deserializes a table from the given (preferably buffered) reader.
    pub fn deserialize_from(reader: impl Read) -> Result<Self, LoadingTableFailed> {
        Self::setup_bincode()
            .deserialize_from(reader)
            .map_err(Into::into)
    }

    /// Writes the table as json object into a file.
    pub fn write_json_file(
        &self,
        file: impl AsRef<Path>,
        pretty: bool,
    ) -> Result<(), StoringTableFailed> {
        let mut writer = BufWriter::new(File::create(file)?);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.flush().map_err(Into::into)
    }

    /// Reads a table from a json object.
    pub fn read_json(reader: impl Read) -> Result<Self, LoadingTableFailed> {
        serde_json::from_reader(reader).map_err(Into::into)
    }

    /// Reads a table from a json file.
    pub fn read_json_file(file: impl AsRef<Path>) -> Result<Self, LoadingTableFailed> {
        Self::read_json(BufReader::new(File::open(file)?))
    }
}
