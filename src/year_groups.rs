use crate::chronology::{ChronologyKey, compare_newest_first, first_year, resolve};
use crate::entry::{ChronologyHint, ContentEntry};
use std::collections::BTreeMap;

/// Entries that share a calendar year, newest first.
#[derive(Debug, Clone)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub entries: Vec<&'a ContentEntry>,
}

/// Entries bucketed by year, newest year first.
///
/// An entry belongs to its structured year when it has one, else to the
/// first year its timeframe mentions (so a range counts toward the year it
/// started). Entries with no year at all are placed in the default year,
/// whose group always exists even when empty.
#[derive(Debug, Clone)]
pub struct YearGroups<'a> {
    groups: Vec<YearGroup<'a>>,
    default_year: i32,
}

fn group_year(entry: &ContentEntry, key: &ChronologyKey) -> Option<i32> {
    match &entry.chronology {
        Some(ChronologyHint::Year { year, .. }) => Some(*year),
        _ => first_year(&entry.timeframe).or_else(|| key.known_year()),
    }
}

impl<'a> YearGroups<'a> {
    pub fn build<I>(entries: I, default_year: i32) -> Self
    where
        I: IntoIterator<Item = &'a ContentEntry>,
    {
        let mut buckets: BTreeMap<i32, Vec<(ChronologyKey, &'a ContentEntry)>> = BTreeMap::new();
        buckets.entry(default_year).or_default();

        for entry in entries {
            let key = resolve(entry);
            let year = group_year(entry, &key).unwrap_or(default_year);
            buckets.entry(year).or_default().push((key, entry));
        }

        let groups = buckets
            .into_iter()
            .rev()
            .map(|(year, mut keyed)| {
                keyed.sort_by(|(a_key, a), (b_key, b)| compare_newest_first(a_key, a, b_key, b));
                YearGroup {
                    year,
                    entries: keyed.into_iter().map(|(_, e)| e).collect(),
                }
            })
            .collect();

        YearGroups {
            groups,
            default_year,
        }
    }

    pub fn groups(&self) -> &[YearGroup<'a>] {
        &self.groups
    }

    pub fn years(&self) -> Vec<i32> {
        self.groups.iter().map(|g| g.year).collect()
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn group(&self, year: i32) -> &[&'a ContentEntry] {
        self.position(year)
            .map(|pos| self.groups[pos].entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.entries.is_empty())
    }

    fn position(&self, year: i32) -> Option<usize> {
        self.groups.iter().position(|g| g.year == year)
    }

    /// The default year when it has entries, else the newest non-empty year.
    pub fn initial_year(&self) -> i32 {
        if !self.group(self.default_year).is_empty() {
            return self.default_year;
        }
        self.groups
            .iter()
            .find(|g| !g.entries.is_empty())
            .map(|g| g.year)
            .unwrap_or(self.default_year)
    }
}

/// Position of the slide shown on a year-grouped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCursor {
    year: i32,
    index: usize,
}

impl YearCursor {
    pub fn new(groups: &YearGroups<'_>) -> Self {
        YearCursor {
            year: groups.initial_year(),
            index: 0,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current<'a>(&self, groups: &YearGroups<'a>) -> Option<&'a ContentEntry> {
        groups.group(self.year).get(self.index).copied()
    }

    /// Switch year; lands on that year's newest entry.
    pub fn select_year(&mut self, year: i32) {
        self.year = year;
        self.index = 0;
    }

    /// One step older: next entry in the year, else the newest entry of the
    /// next older year that has any. Returns false at the oldest entry.
    pub fn next(&mut self, groups: &YearGroups<'_>) -> bool {
        if self.index + 1 < groups.group(self.year).len() {
            self.index += 1;
            return true;
        }
        let Some(pos) = groups.position(self.year) else {
            return false;
        };
        match groups.groups()[pos + 1..].iter().find(|g| !g.entries.is_empty()) {
            Some(older) => {
                self.select_year(older.year);
                true
            }
            None => false,
        }
    }

    /// One step newer: previous entry in the year, else the oldest entry of
    /// the next newer year that has any. Returns false at the newest entry.
    pub fn prev(&mut self, groups: &YearGroups<'_>) -> bool {
        if self.index > 0 {
            self.index -= 1;
            return true;
        }
        let Some(pos) = groups.position(self.year) else {
            return false;
        };
        match groups.groups()[..pos].iter().rev().find(|g| !g.entries.is_empty()) {
            Some(newer) => {
                self.year = newer.year;
                self.index = newer.entries.len() - 1;
                true
            }
            None => false,
        }
    }
}
