use portfolio::config::RotatorConfig;
use portfolio::entry::{ChronologyHint, ContentEntry, Section};
use portfolio::rotator::Rotator;
use portfolio::year_groups::{YearCursor, YearGroups};

fn project(title: &str, timeframe: &str) -> ContentEntry {
    ContentEntry::new(Section::Projects, title, timeframe)
}

fn in_year(title: &str, year: i32, order: i64) -> ContentEntry {
    project(title, "").with_chronology(ChronologyHint::Year {
        year,
        order: Some(order),
    })
}

fn walk(
    groups: &YearGroups<'_>,
    cursor: &mut YearCursor,
    step: fn(&mut YearCursor, &YearGroups<'_>) -> bool,
) -> Vec<(i32, String)> {
    let mut seen = Vec::new();
    loop {
        if let Some(entry) = cursor.current(groups) {
            seen.push((cursor.year(), entry.title.clone()));
        }
        if !step(cursor, groups) {
            return seen;
        }
    }
}

fn sample() -> Vec<ContentEntry> {
    vec![
        in_year("GT Market Place", 2025, 1),
        in_year("Sign Sync", 2025, 2),
        project("Stock Prediction", "Jan 2023 \u{2013} May 2023"),
        project("Undated", "TBD"),
        project("Ongoing Thing", "2024 \u{2013} Present"),
    ]
}

#[test]
fn groups_run_newest_year_first() {
    let entries = sample();
    let groups = YearGroups::build(&entries, 2026);

    assert_eq!(groups.years(), vec![2026, 2025, 2024, 2023]);
    let titles = |year: i32| {
        groups
            .group(year)
            .iter()
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>()
    };
    assert_eq!(titles(2026), vec!["Undated"]);
    assert_eq!(titles(2025), vec!["Sign Sync", "GT Market Place"]);
    assert_eq!(titles(2024), vec!["Ongoing Thing"]);
    assert_eq!(titles(2023), vec!["Stock Prediction"]);
    assert!(groups.group(2022).is_empty());
    assert_eq!(groups.initial_year(), 2026);
}

#[test]
fn cursor_crosses_years_in_both_directions() {
    let entries = sample();
    let groups = YearGroups::build(&entries, 2026);
    let mut cursor = YearCursor::new(&groups);

    let older = walk(&groups, &mut cursor, YearCursor::next);
    let expected: Vec<(i32, String)> = vec![
        (2026, "Undated"),
        (2025, "Sign Sync"),
        (2025, "GT Market Place"),
        (2024, "Ongoing Thing"),
        (2023, "Stock Prediction"),
    ]
    .into_iter()
    .map(|(y, t)| (y, t.to_string()))
    .collect();
    assert_eq!(older, expected);

    let newer = walk(&groups, &mut cursor, YearCursor::prev);
    let mut reversed = expected.clone();
    reversed.reverse();
    assert_eq!(newer, reversed);
    assert_eq!((cursor.year(), cursor.index()), (2026, 0));
}

#[test]
fn ranges_count_toward_their_start_year() {
    let entries = vec![
        project("Span", "Jan 2023 \u{2013} Mar 2024"),
        project("Ongoing", "Sep 2023 \u{2013} Present"),
        in_year("Pinned", 2025, 1),
    ];
    let groups = YearGroups::build(&entries, 2026);

    assert_eq!(groups.years(), vec![2026, 2025, 2023]);
    assert!(groups.group(2026).is_empty());
    assert!(groups.group(2024).is_empty());
    let in_2023: Vec<&str> = groups
        .group(2023)
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(in_2023, vec!["Ongoing", "Span"]);
    assert_eq!(groups.initial_year(), 2025);
}

#[test]
fn structured_year_beats_timeframe_year() {
    let entries = vec![project("Moved", "Sep 2021 \u{2013} Present").with_chronology(
        ChronologyHint::Year {
            year: 2026,
            order: Some(1),
        },
    )];
    let groups = YearGroups::build(&entries, 2026);
    assert_eq!(groups.years(), vec![2026]);
    assert_eq!(groups.group(2026)[0].title, "Moved");
}

#[test]
fn empty_default_year_is_skipped() {
    let entries = vec![
        in_year("Recent", 2025, 1),
        project("Old", "Mar 2022"),
    ];
    let groups = YearGroups::build(&entries, 2026);
    assert_eq!(groups.years(), vec![2026, 2025, 2022]);
    assert_eq!(groups.initial_year(), 2025);

    let mut cursor = YearCursor::new(&groups);
    assert_eq!(cursor.current(&groups).unwrap().title, "Recent");
    assert!(!cursor.prev(&groups));
    assert!(cursor.next(&groups));
    assert_eq!((cursor.year(), cursor.index()), (2022, 0));
    assert!(!cursor.next(&groups));

    cursor.select_year(2026);
    assert!(cursor.current(&groups).is_none());
    assert!(cursor.next(&groups));
    assert_eq!(cursor.year(), 2025);
}

#[test]
fn no_entries_means_no_navigation() {
    let entries: Vec<ContentEntry> = Vec::new();
    let groups = YearGroups::build(&entries, 2026);
    assert!(groups.is_empty());
    assert_eq!(groups.years(), vec![2026]);

    let mut cursor = YearCursor::new(&groups);
    assert!(cursor.current(&groups).is_none());
    assert!(!cursor.next(&groups));
    assert!(!cursor.prev(&groups));
}

#[test]
fn rotator_follows_configured_interval() {
    let config = RotatorConfig {
        interval_ms: 3_000,
        autoplay: true,
    };
    let mut rotator = Rotator::new(3, &config, 1_000);
    assert!(!rotator.tick(3_999));
    assert!(rotator.tick(4_000));
    assert!(rotator.tick(7_000));
    assert!(rotator.tick(10_000));
    assert_eq!(rotator.active(), 0);

    let paused = Rotator::new(3, &RotatorConfig { autoplay: false, ..config }, 0);
    assert!(!paused.is_playing());
}
