use serde::Deserialize;

use super::{Rating, Token};

/// A row of the raw user study export.
///
/// Blank cells deserialize to `None`, columns not listed here are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Pipe delimited topic classes of the visited document.
    #[serde(rename = "Classes")]
    pub classes: Option<String>,
    /// Explicit rating of the document.
    #[serde(rename = "UserLike")]
    pub user_like: Option<f64>,
    /// Time the mouse hovered over the document.
    #[serde(rename = "MouseMs")]
    pub mouse_ms: Option<f64>,
    /// Time the document page was visited.
    #[serde(rename = "PageMs")]
    pub page_ms: Option<f64>,
    #[serde(rename = "Readability")]
    pub readability: Option<f64>,
    #[serde(rename = "Novelty")]
    pub novelty: Option<f64>,
    #[serde(rename = "Authority")]
    pub authority: Option<f64>,
    #[serde(rename = "Relevant")]
    pub relevant: Option<f64>,
    #[serde(rename = "LogId")]
    pub log_id: Option<String>,
    #[serde(rename = "RssId")]
    pub rss_id: Option<String>,
    #[serde(rename = "UserId")]
    pub user_id: Option<String>,
}

/// Implicit signals and identifiers which are passed through the pipeline unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signals {
    pub relevant: f64,
    pub mouse_ms: f64,
    pub readability: f64,
    pub novelty: f64,
    pub page_ms: f64,
    pub authority: f64,
    pub log_id: Option<String>,
    pub rss_id: Option<String>,
    pub user_id: Option<String>,
}

/// A record after cleaning, its classes are not yet tokenized.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanRecord {
    pub classes: String,
    pub user_like: Rating,
    pub signals: Signals,
}

/// A record with tokenized classes.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub classes: Vec<Token>,
    pub user_like: Rating,
    pub signals: Signals,
}

impl Record {
    /// The classes joined back into their pipe delimited form.
    pub fn joined_classes(&self) -> String {
        self.classes.join("|")
    }
}
