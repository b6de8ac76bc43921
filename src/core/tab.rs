//! Tab snapshot types plus the scope and format selectors.
//!
//! The wire identifiers (`this_tab`, `title_and_url`, ...) match the ones the
//! extension UI sends, so these enums deserialize straight out of a request.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of a single browser tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TabRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub window_id: Option<i64>,
}

impl TabRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            window_id: None,
        }
    }

    /// Synthetic separator entry inserted between window groups.
    ///
    /// Only produced by the `AllTabsByWindow` scope; recognizable by its
    /// empty url.
    pub fn window_separator(window_id: i64) -> Self {
        Self {
            title: format!("------- Window {} -------", window_id),
            url: String::new(),
            window_id: Some(window_id),
        }
    }
}

/// Which set of open tabs a copy operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    ThisTab,
    WindowTabs,
    AllTabs,
    AllTabsByWindow,
}

impl Default for Scope {
    fn default() -> Self {
        Scope::ThisTab
    }
}

/// Textual encoding applied to the selected tabs.
///
/// `Unknown` is the explicit fallback case: any identifier the extension
/// sends that we do not recognize lands here and renders exactly like
/// `TitleAndUrl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Url,
    Title,
    TitleUrl,
    TitleAndUrl,
    Markdown,
    #[serde(rename = "bbcode")]
    BbCode,
    Csv,
    Json,
    Html,
    HtmlTable,
    #[serde(other)]
    Unknown,
}

impl Default for Format {
    fn default() -> Self {
        Format::TitleAndUrl
    }
}
