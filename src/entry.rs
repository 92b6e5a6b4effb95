use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref NON_SLUG_REGEX: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN_REGEX: Regex = Regex::new(r"-+").unwrap();
}

/// Site sections. Every entry belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Internships,
    Research,
    Projects,
    Leadership,
    Awards,
    Skills,
    Interests,
}

impl Section {
    /// Sections in navigation order.
    pub const ALL: [Section; 7] = [
        Section::Internships,
        Section::Research,
        Section::Projects,
        Section::Leadership,
        Section::Awards,
        Section::Skills,
        Section::Interests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Internships => "internships",
            Section::Research => "research",
            Section::Projects => "projects",
            Section::Leadership => "leadership",
            Section::Awards => "awards",
            Section::Skills => "skills",
            Section::Interests => "interests",
        }
    }

    pub fn from_strng(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Section::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured ordering hint attached to an entry.
///
/// Pick one kind per entry. When absent the free-text timeframe is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChronologyHint {
    /// Calendar year plus optional position inside the year (higher = newer).
    Year {
        year: i32,
        #[serde(default)]
        order: Option<i64>,
    },
    /// ISO `YYYY-MM-DD` dates.
    Date {
        start: String,
        #[serde(default)]
        end: Option<String>,
    },
    /// Authoring index, lower = earlier.
    Index { index: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Details,
    Repo,
    Demo,
    Paper,
    Download,
    Website,
    External,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub kind: Option<LinkKind>,
    #[serde(default)]
    pub open_in_new_tab: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Entry as authored. `slug`, `id` and `details_href` may be left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub section: Section,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<ContentLink>,
    #[serde(default)]
    pub image: Option<ContentImage>,
    #[serde(default)]
    pub chronology: Option<ChronologyHint>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub details_href: Option<String>,
}

/// One content record (internship, project, ...). Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub section: Section,
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub timeframe: String,
    pub tags: Vec<String>,
    pub links: Vec<ContentLink>,
    pub image: Option<ContentImage>,
    pub chronology: Option<ChronologyHint>,
    pub details: Option<String>,
    pub details_href: String,
}

impl ContentEntry {
    /// Minimal entry with every optional field empty.
    pub fn new(section: Section, title: &str, timeframe: &str) -> Self {
        ContentEntry::from_raw(RawEntry {
            section,
            title: title.to_string(),
            description: String::new(),
            timeframe: timeframe.to_string(),
            tags: Vec::new(),
            links: Vec::new(),
            image: None,
            chronology: None,
            details: None,
            slug: None,
            id: None,
            details_href: None,
        })
    }

    pub fn with_chronology(mut self, hint: ChronologyHint) -> Self {
        self.chronology = Some(hint);
        self
    }

    /// Fill in derived identifiers: slug from the title, id from
    /// section and slug, details route from both.
    pub fn from_raw(raw: RawEntry) -> Self {
        let slug = raw.slug.unwrap_or_else(|| slugify(&raw.title));
        let id = raw
            .id
            .unwrap_or_else(|| format!("{}-{}", raw.section.as_str(), slug));
        let details_href = raw
            .details_href
            .unwrap_or_else(|| format!("/{}/{}", raw.section.as_str(), slug));

        ContentEntry {
            section: raw.section,
            id,
            slug,
            title: raw.title,
            description: raw.description,
            timeframe: raw.timeframe,
            tags: raw.tags,
            links: raw.links,
            image: raw.image,
            chronology: raw.chronology,
            details: raw.details,
            details_href,
        }
    }
}

/// Slug used for anchors and detail routes.
///
/// `@` reads as "at" and `&` as "and"; anything that is not a word
/// character, whitespace or hyphen is dropped.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let replaced = lowered.trim().replace('@', " at ").replace('&', " and ");
    let stripped = NON_SLUG_REGEX.replace_all(&replaced, "");
    let hyphenated = WHITESPACE_REGEX.replace_all(stripped.trim(), "-");
    HYPHEN_RUN_REGEX.replace_all(&hyphenated, "-").into_owned()
}

pub fn is_external_href(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("mailto:")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub label: String,
    pub href: String,
    pub external: bool,
}

/// The one or two links a card renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLinks {
    pub primary: CardLink,
    pub secondary: Option<CardLink>,
}

impl CardLinks {
    /// Primary is always the internal details page; secondary is the first
    /// external link that is not itself a details link.
    pub fn for_entry(entry: &ContentEntry) -> Self {
        let secondary = entry
            .links
            .iter()
            .find(|l| {
                !l.href.is_empty()
                    && l.kind != Some(LinkKind::Details)
                    && is_external_href(&l.href)
            })
            .map(|l| CardLink {
                label: if l.label.is_empty() {
                    "Link".to_string()
                } else {
                    l.label.clone()
                },
                href: l.href.clone(),
                external: true,
            });

        CardLinks {
            primary: CardLink {
                label: "View details".to_string(),
                href: entry.details_href.clone(),
                external: false,
            },
            secondary,
        }
    }
}

/// Card-ready projection of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardModel {
    pub title: String,
    pub description: String,
    pub timeframe: String,
    pub tags: Vec<String>,
    pub links: CardLinks,
    pub image: Option<ContentImage>,
}

impl From<&ContentEntry> for CardModel {
    fn from(entry: &ContentEntry) -> Self {
        CardModel {
            title: entry.title.clone(),
            description: entry.description.clone(),
            timeframe: entry.timeframe.clone(),
            tags: entry.tags.clone(),
            links: CardLinks::for_entry(entry),
            image: entry.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_matches_authored_slugs() {
        assert_eq!(slugify("AI4Science @ GT"), "ai4science-at-gt");
        assert_eq!(slugify("STEM Atlanta Women, Inc."), "stem-atlanta-women-inc");
        assert_eq!(slugify("  R&D -- Lab  "), "r-and-d-lab");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn from_raw_derives_identifiers() {
        let entry = ContentEntry::new(Section::Projects, "Sign Sync", "2024");
        assert_eq!(entry.slug, "sign-sync");
        assert_eq!(entry.id, "projects-sign-sync");
        assert_eq!(entry.details_href, "/projects/sign-sync");
    }

    #[test]
    fn card_links_skip_details_and_internal_links() {
        let mut entry = ContentEntry::new(Section::Projects, "GT Market Place", "2025");
        entry.links = vec![
            ContentLink {
                label: "Details".to_string(),
                href: "https://example.com/details".to_string(),
                kind: Some(LinkKind::Details),
                open_in_new_tab: None,
            },
            ContentLink {
                label: "Notes".to_string(),
                href: "/projects/notes".to_string(),
                kind: None,
                open_in_new_tab: None,
            },
            ContentLink {
                label: "GitHub".to_string(),
                href: "https://github.com/example".to_string(),
                kind: Some(LinkKind::Repo),
                open_in_new_tab: Some(true),
            },
        ];

        let links = CardLinks::for_entry(&entry);
        assert_eq!(links.primary.href, "/projects/gt-market-place");
        assert!(!links.primary.external);
        let secondary = links.secondary.expect("external repo link");
        assert_eq!(secondary.label, "GitHub");
        assert!(secondary.external);
    }

    #[test]
    fn section_names_round_trip_through_strings() {
        for section in Section::ALL {
            assert_eq!(Section::from_strng(section.as_str()), Some(section));
        }
        assert_eq!(Section::from_strng(" Projects "), Some(Section::Projects));
        assert_eq!(Section::from_strng("blog"), None);
    }
}
