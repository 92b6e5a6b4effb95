use crate::chronology::order_newest_first;
use crate::config::Settings;
use crate::entry::{ContentEntry, RawEntry, Section};
use crate::year_groups::YearGroups;
use log::info;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid content document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported content format: {0}")]
    UnsupportedFormat(String),
    #[error("content file has no extension")]
    MissingExtension,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDocument {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

/// Every entry of the site plus its settings, in authored order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    settings: Settings,
    entries: Vec<ContentEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<ContentEntry>, settings: Settings) -> Self {
        Catalog {
            settings: settings.normalized(),
            entries,
        }
    }

    /// Parse a content document.
    ///
    /// # Arguments
    /// * `json` - Document with an optional `settings` block and an `entries` array
    ///
    /// # Returns
    /// * `Result<Catalog, ContentError>` - The catalog, or the parse error
    ///
    /// # Examples
    /// ```
    /// use portfolio::catalog::Catalog;
    /// use portfolio::entry::Section;
    ///
    /// let catalog = Catalog::from_json_str(
    ///     r#"{ "entries": [{ "section": "projects", "title": "Sign Sync", "timeframe": "2024" }] }"#,
    /// ).unwrap();
    /// assert_eq!(catalog.slugs(Section::Projects), vec!["sign-sync"]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let doc: ContentDocument = serde_json::from_str(json)?;
        let entries = doc.entries.into_iter().map(ContentEntry::from_raw).collect();
        Ok(Catalog::new(entries, doc.settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn all(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one section in authored order.
    pub fn entries(&self, section: Section) -> Vec<&ContentEntry> {
        self.entries.iter().filter(|e| e.section == section).collect()
    }

    /// Entries of one section, newest first.
    pub fn ordered(&self, section: Section) -> Vec<&ContentEntry> {
        order_newest_first(self.entries.iter().filter(|e| e.section == section))
    }

    pub fn entry_by_slug(&self, section: Section, slug: &str) -> Option<&ContentEntry> {
        self.entries
            .iter()
            .find(|e| e.section == section && e.slug == slug)
    }

    pub fn slugs(&self, section: Section) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.section == section)
            .map(|e| e.slug.as_str())
            .collect()
    }

    /// Sections that have at least one entry, in navigation order.
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.entries.iter().any(|e| e.section == *s))
            .collect()
    }

    /// Year-grouped view of a section. Undated entries go to
    /// `settings.default_year`, or `fallback_year` when that is unset.
    pub fn year_groups(&self, section: Section, fallback_year: i32) -> YearGroups<'_> {
        let default_year = self.settings.default_year.unwrap_or(fallback_year);
        YearGroups::build(
            self.entries.iter().filter(|e| e.section == section),
            default_year,
        )
    }
}

/// Load a content document from disk
///
/// The format is picked from the file extension; only JSON is understood.
/// Environment overrides are applied to the settings.
///
/// # Examples
/// ```no_run
/// use portfolio::catalog::load_catalog;
///
/// match load_catalog("content/site.json") {
///     Ok(catalog) => println!("Loaded {} entries", catalog.len()),
///     Err(e) => eprintln!("Error loading content: {}", e),
/// }
/// ```
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, ContentError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("json") => {}
        Some(ext) => return Err(ContentError::UnsupportedFormat(ext.to_string())),
        None => return Err(ContentError::MissingExtension),
    }

    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json_str(&text)?;
    let settings = catalog.settings.clone().apply_env();

    info!(
        "loaded {} entries across {} sections from {}",
        catalog.len(),
        catalog.sections().len(),
        path.display()
    );
    Ok(Catalog { settings, ..catalog })
}
