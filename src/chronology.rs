use crate::entry::{ChronologyHint, ContentEntry};
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;

lazy_static! {
    // en dash, em dash, hyphen
    static ref RANGE_SEPARATOR_REGEX: Regex = Regex::new(r"[\x{2013}\x{2014}-]").unwrap();
    static ref MONTH_YEAR_REGEX: Regex = Regex::new(r"\b([a-z]+)\s+(20\d{2})\b").unwrap();
    static ref BARE_YEAR_REGEX: Regex = Regex::new(r"\b(20\d{2})\b").unwrap();
}

/// Comparable position of an entry on the timeline.
///
/// Field order is the comparison order: ongoing entries are newest, then
/// year, then month (0 when unknown), then `rank` which breaks ties inside
/// a period (intra-year order, day of month, or authoring index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ChronologyKey {
    pub ongoing: bool,
    pub year: i32,
    pub month: u32,
    pub rank: i64,
}

impl ChronologyKey {
    pub const ONGOING: ChronologyKey = ChronologyKey {
        ongoing: true,
        year: i32::MAX,
        month: 12,
        rank: 0,
    };

    /// Lowest-priority key, used for text that carries no date.
    pub const UNKNOWN: ChronologyKey = ChronologyKey {
        ongoing: false,
        year: 0,
        month: 0,
        rank: 0,
    };

    pub fn is_unknown(&self) -> bool {
        *self == ChronologyKey::UNKNOWN
    }

    /// Calendar year when one is known and the entry has ended.
    pub fn known_year(&self) -> Option<i32> {
        if self.ongoing || self.year == 0 {
            None
        } else {
            Some(self.year)
        }
    }
}

/// Month name (full or common abbreviation, lowercase) to 1-12.
pub fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse a free-text range label such as "May 2025 – Aug 2025" or
/// "Jan 2025 - Present" into a key built from its end marker.
///
/// Never fails: text without a recognisable year yields
/// [`ChronologyKey::UNKNOWN`].
pub fn parse_timeframe(timeframe: &str) -> ChronologyKey {
    let tf = timeframe.trim();
    let end = RANGE_SEPARATOR_REGEX
        .split(tf)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .last()
        .unwrap_or(tf)
        .to_lowercase();

    if end.contains("present") || end.contains("current") {
        return ChronologyKey::ONGOING;
    }

    if let Some(caps) = MONTH_YEAR_REGEX.captures(&end) {
        if let Ok(year) = caps[2].parse::<i32>() {
            return ChronologyKey {
                ongoing: false,
                year,
                month: month_number(&caps[1]).unwrap_or(0),
                rank: 0,
            };
        }
    }

    if let Some(caps) = BARE_YEAR_REGEX.captures(&end) {
        if let Ok(year) = caps[1].parse::<i32>() {
            return ChronologyKey {
                ongoing: false,
                year,
                month: 0,
                rank: 0,
            };
        }
    }

    trace!("no date in timeframe {:?}", timeframe);
    ChronologyKey::UNKNOWN
}

/// First 20xx year mentioned anywhere in a timeframe, i.e. its start year
/// for ranges such as "Sep 2023 – Present".
pub fn first_year(timeframe: &str) -> Option<i32> {
    BARE_YEAR_REGEX
        .captures(timeframe)
        .and_then(|caps| caps[1].parse::<i32>().ok())
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Derive the ordering key of an entry.
///
/// A structured hint wins over the timeframe text; a date hint that does
/// not parse falls back to the text.
pub fn resolve(entry: &ContentEntry) -> ChronologyKey {
    match &entry.chronology {
        Some(ChronologyHint::Year { year, order }) => ChronologyKey {
            ongoing: false,
            year: *year,
            month: 0,
            rank: order.unwrap_or(0),
        },
        Some(ChronologyHint::Date { start, end }) => {
            let date = end.as_deref().unwrap_or(start.as_str());
            match parse_iso_date(date) {
                Some(date) => ChronologyKey {
                    ongoing: false,
                    year: date.year(),
                    month: date.month(),
                    rank: i64::from(date.day()),
                },
                None => parse_timeframe(&entry.timeframe),
            }
        }
        Some(ChronologyHint::Index { index }) => ChronologyKey {
            rank: *index,
            ..ChronologyKey::UNKNOWN
        },
        None => parse_timeframe(&entry.timeframe),
    }
}

/// Newest first, then title and id ascending.
pub fn compare_newest_first(
    a_key: &ChronologyKey,
    a: &ContentEntry,
    b_key: &ChronologyKey,
    b: &ContentEntry,
) -> Ordering {
    b_key
        .cmp(a_key)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

/// Order entries newest to oldest without touching the input.
pub fn order_newest_first<'a, I>(entries: I) -> Vec<&'a ContentEntry>
where
    I: IntoIterator<Item = &'a ContentEntry>,
{
    let mut keyed: Vec<(ChronologyKey, &ContentEntry)> =
        entries.into_iter().map(|e| (resolve(e), e)).collect();
    keyed.sort_by(|(a_key, a), (b_key, b)| compare_newest_first(a_key, a, b_key, b));
    keyed.into_iter().map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_table_covers_abbreviations() {
        assert_eq!(month_number("sept"), Some(9));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("december"), Some(12));
        assert_eq!(month_number("fall"), None);
    }

    #[test]
    fn trailing_separator_uses_last_filled_segment() {
        let key = parse_timeframe("Jan 2025 \u{2013} ");
        assert_eq!((key.year, key.month), (2025, 1));
    }

    #[test]
    fn unknown_month_word_keeps_the_year() {
        let key = parse_timeframe("Fall 2024");
        assert_eq!((key.year, key.month), (2024, 0));
    }

    #[test]
    fn first_year_reads_the_start_of_a_range() {
        assert_eq!(first_year("Sep 2023 \u{2013} Present"), Some(2023));
        assert_eq!(first_year("Jan 2023 - Mar 2024"), Some(2023));
        assert_eq!(first_year("TBD"), None);
    }

    #[test]
    fn short_range_takes_end_month() {
        let key = parse_timeframe("May\u{2013}Aug 2025");
        assert_eq!((key.year, key.month), (2025, 8));
    }
}
