//! Tab list rendering.
//!
//! Pure functions that turn an ordered list of tab records into one of the
//! supported text encodings. Rendering never mutates its input and an empty
//! tab list always renders as an empty string, whatever the format.

use crate::core::tab::{Format, TabRecord};
use serde::Serialize;

#[derive(Serialize)]
struct JsonTab<'a> {
    title: &'a str,
    url: &'a str,
}

/// Render tabs into the requested format.
///
/// `Format::Unknown` renders exactly like `Format::TitleAndUrl`; callers
/// that pass an unrecognized identifier get the default encoding rather
/// than an error.
pub fn render(tabs: &[TabRecord], format: Format) -> String {
    if tabs.is_empty() {
        return String::new();
    }

    match format {
        Format::Url => join_lines(tabs, |tab| tab.url.clone()),
        Format::Title => join_lines(tabs, |tab| tab.title.clone()),
        Format::TitleUrl => join_lines(tabs, |tab| format!("{}: {}", tab.title, tab.url)),
        Format::TitleAndUrl | Format::Unknown => tabs
            .iter()
            .map(|tab| format!("{}\n{}", tab.title, tab.url))
            .collect::<Vec<_>>()
            .join("\n\n"),
        Format::Markdown => join_lines(tabs, |tab| format!("[{}]({})", tab.title, tab.url)),
        Format::BbCode => join_lines(tabs, |tab| format!("[url={}]{}[/url]", tab.url, tab.title)),
        Format::Csv => render_csv(tabs),
        Format::Json => render_json(tabs),
        Format::Html => tabs
            .iter()
            .map(|tab| format!("<a href=\"{}\">{}</a>", tab.url, escape_html(&tab.title)))
            .collect::<Vec<_>>()
            .join("<br>\n"),
        Format::HtmlTable => render_html_table(tabs),
    }
}

fn join_lines(tabs: &[TabRecord], render_one: impl Fn(&TabRecord) -> String) -> String {
    tabs.iter().map(render_one).collect::<Vec<_>>().join("\n")
}

/// Escape `& < > " '` to their named entities.
///
/// Applied to titles only; urls are emitted verbatim in every format.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn render_csv(tabs: &[TabRecord]) -> String {
    let mut out = String::from("Title,URL\n");
    let rows: Vec<String> = tabs
        .iter()
        .map(|tab| {
            // Embedded double quotes in titles are doubled per RFC 4180.
            format!("\"{}\",\"{}\"", tab.title.replace('"', "\"\""), tab.url)
        })
        .collect();
    out.push_str(&rows.join("\n"));
    out
}

fn render_json(tabs: &[TabRecord]) -> String {
    let entries: Vec<JsonTab> = tabs
        .iter()
        .map(|tab| JsonTab {
            title: &tab.title,
            url: &tab.url,
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_default()
}

fn render_html_table(tabs: &[TabRecord]) -> String {
    let rows: Vec<String> = tabs
        .iter()
        .map(|tab| {
            format!(
                "    <tr>\n      <td>{}</td>\n      <td><a href=\"{}\">{}</a></td>\n    </tr>",
                escape_html(&tab.title),
                tab.url,
                tab.url
            )
        })
        .collect();

    format!(
        "<table>\n  <thead>\n    <tr>\n      <th>Title</th>\n      <th>URL</th>\n    </tr>\n  </thead>\n  <tbody>\n{}\n  </tbody>\n</table>",
        rows.join("\n")
    )
}
