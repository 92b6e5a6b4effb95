use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable overriding [`Settings::base_path`].
pub const BASE_PATH_ENV: &str = "PORTFOLIO_BASE_PATH";

/// What manual next/prev do at the ends of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Stop at the first/last item.
    Clamp,
    /// Step around to the other end.
    #[default]
    Wrap,
}

/// Timing and navigation knobs of the scroll-sync controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    pub autoplay_interval_ms: u64,
    /// Lock held after an animated seek before scroll observation resumes.
    pub smooth_settle_ms: u64,
    /// Lock held after an instant seek.
    pub instant_settle_ms: u64,
    pub manual_boundary: Boundary,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            autoplay_interval_ms: 10_000,
            smooth_settle_ms: 500,
            instant_settle_ms: 0,
            manual_boundary: Boundary::Wrap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotatorConfig {
    pub interval_ms: u64,
    pub autoplay: bool,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        RotatorConfig {
            interval_ms: 7_000,
            autoplay: true,
        }
    }
}

/// Site-wide settings, read from the `settings` block of a content document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Prefix for internal routes when the site is not served from `/`.
    pub base_path: String,
    /// Year that undated projects are grouped under.
    pub default_year: Option<i32>,
    pub sync: SyncConfig,
    pub rotator: RotatorConfig,
}

impl Settings {
    /// Apply environment overrides and normalise the base path.
    pub fn apply_env(mut self) -> Self {
        if let Ok(base_path) = env::var(BASE_PATH_ENV) {
            self.base_path = base_path;
        }
        self.normalized()
    }

    pub fn normalized(mut self) -> Self {
        self.base_path = normalize_base_path(&self.base_path);
        self
    }

    pub fn with_base_path(&self, href: &str) -> String {
        with_base_path(&self.base_path, href)
    }
}

/// Leading slash, no trailing slash, and "/" collapses to "".
pub fn normalize_base_path(raw: &str) -> String {
    let mut bp = raw.trim().to_string();
    if bp.is_empty() {
        return bp;
    }
    if !bp.starts_with('/') {
        bp.insert(0, '/');
    }
    if bp != "/" && bp.ends_with('/') {
        bp.pop();
    }
    if bp == "/" { String::new() } else { bp }
}

/// Prefix a relative href with the base path. Absolute URLs pass through.
pub fn with_base_path(base_path: &str, href: &str) -> String {
    if href.is_empty() || href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if href.starts_with('/') {
        format!("{}{}", base_path, href)
    } else {
        format!("{}/{}", base_path, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_normalisation() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("site"), "/site");
        assert_eq!(normalize_base_path(" /site/ "), "/site");
    }

    #[test]
    fn base_path_prefixing() {
        assert_eq!(with_base_path("/site", "/files/cv.pdf"), "/site/files/cv.pdf");
        assert_eq!(with_base_path("/site", "files/cv.pdf"), "/site/files/cv.pdf");
        assert_eq!(with_base_path("", "/projects"), "/projects");
        assert_eq!(
            with_base_path("/site", "https://github.com/x"),
            "https://github.com/x"
        );
    }

    #[test]
    fn settings_fill_defaults_from_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{ "sync": { "autoplayIntervalMs": 4000 } }"#).unwrap();
        assert_eq!(settings.sync.autoplay_interval_ms, 4000);
        assert_eq!(settings.sync.smooth_settle_ms, 500);
        assert_eq!(settings.sync.manual_boundary, Boundary::Wrap);
        assert_eq!(settings.rotator.interval_ms, 7000);
    }
}
