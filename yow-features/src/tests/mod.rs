//! Fixtures shared by the unit tests.

use std::convert::TryFrom;

use crate::data::{CleanRecord, Rating, RawRecord, Record, Signals};

pub(crate) fn rating(value: u8) -> Rating {
    Rating::try_from(value as i64).unwrap()
}

/// Signals which never need imputation.
pub(crate) fn signals() -> Signals {
    Signals {
        relevant: 1.,
        mouse_ms: 0.,
        readability: 1.,
        novelty: 1.,
        page_ms: 0.,
        authority: 1.,
        log_id: None,
        rss_id: None,
        user_id: None,
    }
}

pub(crate) fn raw_record(classes: &str, user_like: f64) -> RawRecord {
    let signals = signals();
    RawRecord {
        classes: Some(classes.to_owned()),
        user_like: Some(user_like),
        mouse_ms: Some(signals.mouse_ms),
        page_ms: Some(signals.page_ms),
        readability: Some(signals.readability),
        novelty: Some(signals.novelty),
        authority: Some(signals.authority),
        relevant: Some(signals.relevant),
        log_id: None,
        rss_id: None,
        user_id: None,
    }
}

pub(crate) fn clean_record(classes: &str, user_like: u8) -> CleanRecord {
    CleanRecord {
        classes: classes.to_owned(),
        user_like: rating(user_like),
        signals: signals(),
    }
}

pub(crate) fn record(classes: &[&str], user_like: u8) -> Record {
    Record {
        classes: classes.iter().map(|&token| token.to_owned()).collect(),
        user_like: rating(user_like),
        signals: signals(),
    }
}
