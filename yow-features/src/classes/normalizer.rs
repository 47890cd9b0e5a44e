use crate::data::{Record, Token};

/// The canonical form of a synonymous class, if there is one.
pub fn canonical(token: &str) -> Option<&'static str> {
    match token {
        "united states" | "us" => Some("usa"),
        "world response to iraq war" => Some("iraq war"),
        "us news" | "very short and simple news" => Some("news"),
        "fresh outlook on war" => Some("war"),
        _ => None,
    }
}

/// Replaces a synonymous class by its canonical form.
pub fn normalize(token: Token) -> Token {
    canonical(&token).map_or(token, ToOwned::to_owned)
}

/// Normalizes the classes of all records in place.
pub fn normalize_records(records: &mut [Record]) {
    for token in records.iter_mut().flat_map(|record| record.classes.iter_mut()) {
        if let Some(canonical) = canonical(token) {
            *token = canonical.to_owned();
        }
    }
}
