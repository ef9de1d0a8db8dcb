mod natural;

use chrono::prelude::*;
use thiserror::Error;

pub use natural::{DateOrder, NaturalLanguageParser, ParserSettings};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Unable to interpret `{0}` as a date or time")]
    Unparseable(String),
}

/// Something that can turn free text into an instant relative to `now`
pub trait DateInterpreter {
    fn interpret(&self, input: &str, now: DateTime<Local>)
        -> Result<DateTime<Local>, ResolutionError>;
}

/// Prefixes tried, in order, when the interpreter lands in the past.
/// A bare `friday` can resolve to the friday of this week.
const FUTURE_PREFIXES: [&str; 3] = ["in ", "on ", "next "];

#[derive(Debug, Clone, Copy)]
enum StrictFormat {
    Rfc3339,
    DateTimeSeconds,
    DateTimeMinutes,
    Date,
    Rfc1123,
    Rfc1123Numeric,
}

const STRICT_FORMATS: [StrictFormat; 6] = [
    StrictFormat::Rfc3339,
    StrictFormat::DateTimeSeconds,
    StrictFormat::DateTimeMinutes,
    StrictFormat::Date,
    StrictFormat::Rfc1123,
    StrictFormat::Rfc1123Numeric,
];

impl StrictFormat {
    /// Formats without an offset are read as local wall clock time
    fn parse(self, input: &str) -> Option<DateTime<Local>> {
        match self {
            Self::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|date| date.with_timezone(&Local)),
            Self::DateTimeSeconds => NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
                .ok()
                .and_then(localize),
            Self::DateTimeMinutes => NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
                .ok()
                .and_then(localize),
            Self::Date => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .and_then(localize),
            // Mon, 02 Jan 2006 15:04:05 MST
            Self::Rfc1123 => DateTime::parse_from_rfc2822(input)
                .ok()
                .map(|date| date.with_timezone(&Local)),
            Self::Rfc1123Numeric => DateTime::parse_from_str(input, "%a, %d %b %Y %H:%M:%S %z")
                .ok()
                .map(|date| date.with_timezone(&Local)),
        }
    }
}

/// Places a wall clock time in the local time zone. Ambiguous times (DST fold)
/// pick the earliest instant, non existing ones (DST gap) give `None`.
fn localize(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

fn parse_strict(input: &str) -> Option<DateTime<Local>> {
    STRICT_FORMATS
        .iter()
        .find_map(|format| format.parse(input))
}

/// Resolves free text like `2026-01-01 12:00`, `in 5 min` or `friday` into
/// an instant in the local time zone.
///
/// Absolute dates are trusted as given. Natural language results that do not lie
/// after `now` are retried with the `in `, `on ` and `next ` prefixes, and if none
/// of them points into the future the first result is returned anyway.
pub fn resolve(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>, ResolutionError> {
    resolve_with(&NaturalLanguageParser::default(), input, now)
}

pub fn resolve_with<P: DateInterpreter + ?Sized>(
    parser: &P,
    input: &str,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, ResolutionError> {
    let input = input.trim();
    if let Some(date) = parse_strict(input) {
        return Ok(date);
    }

    let date = parser.interpret(input, now)?.with_timezone(&Local);
    if date > now {
        return Ok(date);
    }

    let retried = FUTURE_PREFIXES.iter().find_map(|prefix| {
        parser
            .interpret(&format!("{}{}", prefix, input), now)
            .ok()
            .filter(|retry| *retry > now)
    });

    Ok(retried.unwrap_or(date).with_timezone(&Local))
}
