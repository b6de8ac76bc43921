//! Scope resolution: turning a scope selector into an ordered tab list.
//!
//! The browser is reached through the `TabQuery` trait. In production the
//! extension ships a snapshot of its windows inside each request and
//! `SessionSnapshot` answers the queries from that; tests plug in their own
//! fakes.

use crate::core::error::CopyError;
use crate::core::tab::{Scope, TabRecord};
use serde::Deserialize;

/// One window's worth of tabs, in the browser's native order.
#[derive(Debug, Clone)]
pub struct WindowGroup {
    pub id: i64,
    pub tabs: Vec<TabRecord>,
}

/// Capability to enumerate open tabs and windows.
pub trait TabQuery {
    /// The single active tab of the focused window, if any.
    fn active_tab(&self) -> Option<TabRecord>;

    /// All tabs of the focused window.
    fn current_window_tabs(&self) -> Vec<TabRecord>;

    /// All tabs across all windows.
    fn all_tabs(&self) -> Vec<TabRecord>;

    /// Windows in the browser's native order, each with its tabs.
    fn windows(&self) -> Vec<WindowGroup>;
}

/// Resolve a scope into the ordered tab list to format.
///
/// `AllTabsByWindow` prefixes every window group except the first with a
/// synthetic separator record, so the separator only ever appears when at
/// least two non-empty windows exist. A scope that matches nothing yields
/// `CopyError::EmptyResult` so the caller can report "nothing to copy"
/// instead of silently copying an empty string.
pub fn resolve(scope: Scope, query: &dyn TabQuery) -> Result<Vec<TabRecord>, CopyError> {
    let tabs = match scope {
        Scope::ThisTab => query.active_tab().into_iter().collect(),
        Scope::WindowTabs => query.current_window_tabs(),
        Scope::AllTabs => query.all_tabs(),
        Scope::AllTabsByWindow => {
            let mut out = Vec::new();
            for group in query.windows() {
                if group.tabs.is_empty() {
                    continue;
                }
                if !out.is_empty() {
                    out.push(TabRecord::window_separator(group.id));
                }
                out.extend(group.tabs);
            }
            out
        }
    };

    if tabs.is_empty() {
        return Err(CopyError::EmptyResult);
    }
    Ok(tabs)
}

/// One tab as shipped inside a request snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct TabSnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub active: bool,
}

/// One window as shipped inside a request snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSnapshot {
    pub id: i64,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub tabs: Vec<TabSnapshot>,
}

/// Snapshot of the browser session attached to a copy request.
///
/// The host process cannot query the browser itself, so every request
/// carries the window list as the extension saw it at click time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub windows: Vec<WindowSnapshot>,
}

impl SessionSnapshot {
    fn focused_window(&self) -> Option<&WindowSnapshot> {
        self.windows
            .iter()
            .find(|window| window.focused)
            .or_else(|| self.windows.first())
    }

    fn record(window: &WindowSnapshot, tab: &TabSnapshot) -> TabRecord {
        TabRecord {
            title: tab.title.clone(),
            url: tab.url.clone(),
            window_id: Some(window.id),
        }
    }
}

impl TabQuery for SessionSnapshot {
    fn active_tab(&self) -> Option<TabRecord> {
        let window = self.focused_window()?;
        window
            .tabs
            .iter()
            .find(|tab| tab.active)
            .map(|tab| Self::record(window, tab))
    }

    fn current_window_tabs(&self) -> Vec<TabRecord> {
        match self.focused_window() {
            Some(window) => window
                .tabs
                .iter()
                .map(|tab| Self::record(window, tab))
                .collect(),
            None => Vec::new(),
        }
    }

    fn all_tabs(&self) -> Vec<TabRecord> {
        self.windows
            .iter()
            .flat_map(|window| window.tabs.iter().map(|tab| Self::record(window, tab)))
            .collect()
    }

    fn windows(&self) -> Vec<WindowGroup> {
        self.windows
            .iter()
            .map(|window| WindowGroup {
                id: window.id,
                tabs: window
                    .tabs
                    .iter()
                    .map(|tab| Self::record(window, tab))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(title: &str, url: &str, active: bool) -> TabSnapshot {
        TabSnapshot {
            title: title.to_string(),
            url: url.to_string(),
            active,
        }
    }

    fn session() -> SessionSnapshot {
        SessionSnapshot {
            windows: vec![
                WindowSnapshot {
                    id: 1,
                    focused: false,
                    tabs: vec![
                        tab("W1A", "https://a.example/", false),
                        tab("W1B", "https://b.example/", true),
                    ],
                },
                WindowSnapshot {
                    id: 2,
                    focused: true,
                    tabs: vec![tab("W2A", "https://c.example/", true)],
                },
            ],
        }
    }

    #[test]
    fn test_this_tab_picks_active_of_focused_window() {
        let tabs = resolve(Scope::ThisTab, &session()).unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "W2A");
        assert_eq!(tabs[0].window_id, Some(2));
    }

    #[test]
    fn test_window_tabs_uses_focused_window() {
        let tabs = resolve(Scope::WindowTabs, &session()).unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "W2A");
    }

    #[test]
    fn test_all_tabs_preserves_native_order() {
        let tabs = resolve(Scope::AllTabs, &session()).unwrap();
        let titles: Vec<&str> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["W1A", "W1B", "W2A"]);
    }

    #[test]
    fn test_by_window_inserts_separator_between_groups() {
        let tabs = resolve(Scope::AllTabsByWindow, &session()).unwrap();
        let titles: Vec<&str> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["W1A", "W1B", "------- Window 2 -------", "W2A"]
        );
        assert!(tabs[2].url.is_empty());
    }

    #[test]
    fn test_by_window_single_window_has_no_separator() {
        let mut session = session();
        session.windows.remove(0);
        let tabs = resolve(Scope::AllTabsByWindow, &session).unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].title, "W2A");
    }

    #[test]
    fn test_by_window_skips_empty_windows() {
        let mut session = session();
        session.windows.insert(
            0,
            WindowSnapshot {
                id: 9,
                focused: false,
                tabs: Vec::new(),
            },
        );
        let tabs = resolve(Scope::AllTabsByWindow, &session).unwrap();
        let titles: Vec<&str> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["W1A", "W1B", "------- Window 2 -------", "W2A"]
        );
    }

    #[test]
    fn test_empty_session_is_empty_result() {
        let empty = SessionSnapshot::default();
        for scope in [
            Scope::ThisTab,
            Scope::WindowTabs,
            Scope::AllTabs,
            Scope::AllTabsByWindow,
        ] {
            match resolve(scope, &empty) {
                Err(CopyError::EmptyResult) => {}
                other => panic!("expected EmptyResult for {:?}, got {:?}", scope, other),
            }
        }
    }

    #[test]
    fn test_no_active_tab_is_empty_result() {
        let session = SessionSnapshot {
            windows: vec![WindowSnapshot {
                id: 1,
                focused: true,
                tabs: vec![tab("W1A", "https://a.example/", false)],
            }],
        };
        assert!(matches!(
            resolve(Scope::ThisTab, &session),
            Err(CopyError::EmptyResult)
        ));
    }

    #[test]
    fn test_fallback_to_first_window_when_none_focused() {
        let mut session = session();
        for window in &mut session.windows {
            window.focused = false;
        }
        let tabs = resolve(Scope::WindowTabs, &session).unwrap();
        assert_eq!(tabs[0].title, "W1A");
    }
}
