//! Frequency tables of the cleaned records.
//!
//! Both tables are read-only snapshots of one cleaned dataset and must be rebuilt whenever the
//! cleaning changes.

mod io;
mod joint;
mod rating;

pub use self::{
    joint::{JointFreqTable, RatingCounts},
    rating::RatingFreqTable,
};
