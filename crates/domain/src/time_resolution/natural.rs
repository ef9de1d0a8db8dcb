use super::{DateInterpreter, ResolutionError};
use chrono::prelude::*;
use chrono_english::{parse_date_string, Dialect};

/// In which order the parts of a numeric date like `05/04/2026` are written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateOrder {
    DMY,
    MDY,
}

impl DateOrder {
    fn dialect(self) -> Dialect {
        match self {
            Self::DMY => Dialect::Uk,
            Self::MDY => Dialect::Us,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserSettings {
    pub date_order: DateOrder,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DMY,
        }
    }
}

/// Interprets informal english time expressions like `in 5 minutes`,
/// `friday 8pm` or `25/12/2026`
#[derive(Debug, Clone, Default)]
pub struct NaturalLanguageParser {
    pub settings: ParserSettings,
}

impl NaturalLanguageParser {
    pub fn new(settings: ParserSettings) -> Self {
        Self { settings }
    }
}

/// Spells out unit abbreviations, e.g. `5 min` -> `5 minutes`
fn unit(word: &str) -> Option<&'static str> {
    let unit = match word {
        "s" | "sec" | "secs" | "second" | "seconds" => "seconds",
        "m" | "min" | "mins" | "minute" | "minutes" => "minutes",
        "h" | "hr" | "hrs" | "hour" | "hours" => "hours",
        "d" | "day" | "days" => "days",
        "w" | "wk" | "wks" | "week" | "weeks" => "weeks",
        "mo" | "month" | "months" => "months",
        "y" | "yr" | "yrs" | "year" | "years" => "years",
        _ => return None,
    };
    Some(unit)
}

fn is_period(word: &str) -> bool {
    matches!(word, "weeks" | "months" | "years")
}

/// Lower cases, drops trailing punctuation and rewrites the few phrasings
/// people use for reminders that the date grammar does not know. A bare
/// duration like `5 min` points into the future.
fn normalize(input: &str) -> String {
    let text = input
        .trim()
        .trim_end_matches(|c| matches!(c, '.' | '!' | '?'))
        .to_lowercase();
    let raw = text.split_whitespace().collect::<Vec<_>>();

    let mut words = Vec::with_capacity(raw.len() + 1);
    for (i, word) in raw.iter().enumerate() {
        let next_is_unit = raw.get(i + 1).map_or(false, |next| unit(next).is_some());
        words.push(match *word {
            // `an hour`, `in a day`
            "a" | "an" if next_is_unit => "1",
            word => unit(word).unwrap_or(word),
        });
    }

    let words = match words.as_slice() {
        ["next", period] if is_period(period) => vec!["in", "1", *period],
        ["last", period] if is_period(period) => vec!["1", *period, "ago"],
        [amount, period, ..]
            if amount.parse::<u32>().is_ok()
                && unit(period).is_some()
                && words.last() != Some(&"ago") =>
        {
            std::iter::once("in").chain(words.iter().copied()).collect()
        }
        _ => words.clone(),
    };
    words.join(" ")
}

impl DateInterpreter for NaturalLanguageParser {
    fn interpret(
        &self,
        input: &str,
        now: DateTime<Local>,
    ) -> Result<DateTime<Local>, ResolutionError> {
        let text = normalize(input);
        if text.is_empty() {
            return Err(ResolutionError::Unparseable(input.to_string()));
        }
        parse_date_string(&text, now, self.settings.date_order.dialect())
            .map_err(|_| ResolutionError::Unparseable(input.to_string()))
    }
}
