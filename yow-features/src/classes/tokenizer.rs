use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    data::{CleanRecord, Record, Token},
    error::Error,
};

/// The delimiter between classes of a record.
pub const DELIMITER: char = '|';

lazy_static! {
    /// ASCII punctuation except the delimiter and both slashes.
    static ref PUNCTUATION: Regex = Regex::new(r##"[!"#$%&'()*+,\-.:;<=>?@\[\]^_`{}~]"##).unwrap();
}

/// Splits the raw class string of the `record`th record into tokens.
///
/// Punctuation other than `|`, `/` and `\` is stripped, the result is lower-cased and a single
/// leading delimiter is removed. Empty tokens are kept, they are removed by the rare class filter.
///
/// # Errors
/// Fails if the raw string is empty or consists of whitespace only.
pub fn tokenize(record: usize, raw: &str) -> Result<Vec<Token>, Error> {
    if raw.trim().is_empty() {
        return Err(Error::MalformedLabel {
            record,
            raw: raw.to_owned(),
        });
    }

    let cleaned = PUNCTUATION.replace_all(raw, "").to_lowercase();
    let cleaned = cleaned.strip_prefix(DELIMITER).unwrap_or(&cleaned);
    Ok(cleaned.split(DELIMITER).map(ToOwned::to_owned).collect())
}

/// Tokenizes the classes of all records.
///
/// Returns the tokenized records and the flattened multiset of all their tokens.
pub fn tokenize_records(records: Vec<CleanRecord>) -> Result<(Vec<Record>, Vec<Token>), Error> {
    let records = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let CleanRecord {
                classes,
                user_like,
                signals,
            } = record;
            tokenize(idx, &classes).map(|classes| Record {
                classes,
                user_like,
                signals,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let tokens = records
        .iter()
        .flat_map(|record| record.classes.iter().cloned())
        .collect();

    Ok((records, tokens))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::clean_record;

    #[rstest(
        raw,
        expected,
        case("Sports|USA", &["sports", "usa"]),
        case("|Iraq War|U.S.", &["iraq war", "us"]),
        case("news/politics|a\\b", &["news/politics", "a\\b"]),
        case("world's (best)!|x", &["worlds best", "x"]),
        case("a||b", &["a", "", "b"]),
        case("||a", &["", "a"]),
        case("|", &[""]),
        case("!!!", &[""])
    )]
    fn test_tokenize(raw: &str, expected: &[&str]) {
        assert_eq!(tokenize(0, raw).unwrap(), expected);
    }

    #[rstest(raw, case(""), case("   "))]
    fn test_tokenize_rejects_blank(raw: &str) {
        assert_eq!(
            tokenize(3, raw),
            Err(Error::MalformedLabel {
                record: 3,
                raw: raw.to_owned(),
            }),
        );
    }

    #[test]
    fn test_tokenize_is_idempotent_on_tokens() {
        let tokens = tokenize(0, "|Fresh Outlook on War|Sports/Tennis|us news").unwrap();
        let retokenized = tokenize(0, &tokens.join("|")).unwrap();
        assert_eq!(retokenized, tokens);
    }

    #[test]
    fn test_tokenize_records_flattens_all_tokens() {
        let records = vec![clean_record("a|B", 1), clean_record("b", 2)];

        let (records, tokens) = tokenize_records(records).unwrap();

        assert_eq!(records[0].classes, ["a", "b"]);
        assert_eq!(records[1].classes, ["b"]);
        assert_eq!(tokens, ["a", "b", "b"]);
    }

    #[test]
    fn test_tokenize_records_reports_record_index() {
        let records = vec![clean_record("a", 1), clean_record(" ", 2)];

        let error = tokenize_records(records).unwrap_err();

        assert_eq!(
            error,
            Error::MalformedLabel {
                record: 1,
                raw: " ".to_owned(),
            },
        );
    }
}
