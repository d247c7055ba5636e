//! Application icon representation.
//!
//! Icons travel over the wire as plain strings (either a keyword such as `search` or an image URL)
//! but are held as an [`AppIcon`] everywhere else so renderers never sniff raw strings.

use std::fmt;

use serde::{Deserialize, Serialize};

const REMOTE_PREFIXES: [&str; 4] = ["http://", "https://", "/", "data:"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Icon reference stored on an application entry.
pub enum AppIcon {
    /// Built-in glyph selected by keyword (`search`, `monitor`, `github`, ...).
    Named(String),
    /// Image loaded from a URL (uploaded blob or external image).
    Remote(String),
}

impl AppIcon {
    /// Classifies a raw icon string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if REMOTE_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(keyword) => keyword,
            Self::Remote(url) => url,
        }
    }

    /// Returns the URL for remote icons.
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url),
            Self::Named(_) => None,
        }
    }

    /// Returns `true` when no keyword or URL is present.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for AppIcon {
    fn default() -> Self {
        Self::Named(String::new())
    }
}

impl From<String> for AppIcon {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for AppIcon {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<AppIcon> for String {
    fn from(icon: AppIcon) -> Self {
        match icon {
            AppIcon::Named(keyword) => keyword,
            AppIcon::Remote(url) => url,
        }
    }
}

impl fmt::Display for AppIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keywords_are_named_and_keep_their_case() {
        assert_eq!(AppIcon::parse("search"), AppIcon::Named("search".to_string()));
        assert_eq!(AppIcon::parse(" GitHub "), AppIcon::Named("GitHub".to_string()));

        let icon: AppIcon = serde_json::from_str("\"GitHub\"").expect("deserialize icon");
        assert_eq!(
            serde_json::to_string(&icon).expect("serialize icon"),
            "\"GitHub\""
        );
    }

    #[test]
    fn urls_and_paths_are_remote() {
        for raw in [
            "https://cdn.example.com/icon.png",
            "http://localhost/icon.svg",
            "/api/blobs/abc-icon.png",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(AppIcon::parse(raw), AppIcon::Remote(raw.to_string()));
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let icon = AppIcon::Remote("https://x.test/a.png".to_string());
        let json = serde_json::to_string(&icon).expect("serialize icon");
        assert_eq!(json, "\"https://x.test/a.png\"");

        let named: AppIcon = serde_json::from_str("\"monitor\"").expect("deserialize icon");
        assert_eq!(named, AppIcon::Named("monitor".to_string()));
    }
}
