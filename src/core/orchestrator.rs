//! Copy orchestration.
//!
//! Combines scope resolution, formatting, and the clipboard sink chain, and
//! routes user-visible feedback through the `FeedbackSink` collaborator.
//! The orchestrator never touches UI state itself, which keeps it testable
//! with hand-rolled fakes.

use crate::core::error::CopyError;
use crate::core::formatter;
use crate::core::scope::{self, TabQuery};
use crate::core::tab::{Format, Scope};
use crate::utils::clipboard::ClipboardSink;
use tracing::{debug, warn};

/// Transient success/error/info indicator.
///
/// Implementations own the auto-clear behavior (the badge resets itself
/// after a fixed duration); callers just report the outcome once.
pub trait FeedbackSink: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Structured result of a completed copy.
#[derive(Debug, Clone)]
pub struct CopySummary {
    /// Number of real tabs copied, window separators excluded.
    pub tab_count: usize,
    pub text: String,
}

pub struct CopyOrchestrator {
    sinks: Vec<Box<dyn ClipboardSink>>,
}

impl CopyOrchestrator {
    pub fn new(sinks: Vec<Box<dyn ClipboardSink>>) -> Self {
        Self { sinks }
    }

    /// Resolve, render, and copy tabs for the given scope and format.
    ///
    /// An empty scope surfaces as informational feedback ("nothing to
    /// copy"), a failed clipboard write as error feedback. Either way the
    /// failure is terminal for this invocation; there is no retry.
    pub fn copy(
        &self,
        scope: Scope,
        format: Format,
        query: &dyn TabQuery,
        feedback: &dyn FeedbackSink,
    ) -> Result<CopySummary, CopyError> {
        let tabs = match scope::resolve(scope, query) {
            Ok(tabs) => tabs,
            Err(err) => {
                feedback.info("Nothing to copy");
                return Err(err);
            }
        };

        let tab_count = tabs.iter().filter(|tab| !tab.url.is_empty()).count();
        let text = formatter::render(&tabs, format);
        debug!(?scope, ?format, tab_count, bytes = text.len(), "rendered tabs");

        match self.write(&text) {
            Ok(()) => {
                feedback.success(&copied_message(tab_count));
                Ok(CopySummary { tab_count, text })
            }
            Err(err) => {
                feedback.error("Copy failed");
                Err(err)
            }
        }
    }

    /// Copy pre-rendered text (the extracted-page-content path).
    pub fn copy_text(&self, text: &str, feedback: &dyn FeedbackSink) -> Result<(), CopyError> {
        match self.write(text) {
            Ok(()) => {
                feedback.success("Copied");
                Ok(())
            }
            Err(err) => {
                feedback.error("Copy failed");
                Err(err)
            }
        }
    }

    /// Try each sink in order; the first success wins.
    fn write(&self, text: &str) -> Result<(), CopyError> {
        let mut last_error = String::from("no clipboard sink available");
        for sink in &self.sinks {
            match sink.write(text) {
                Ok(()) => {
                    debug!(sink = sink.name(), "clipboard write ok");
                    return Ok(());
                }
                Err(err) => {
                    warn!(sink = sink.name(), error = %err, "clipboard sink failed");
                    last_error = format!("{}: {}", sink.name(), err);
                }
            }
        }
        Err(CopyError::SinkFailure(last_error))
    }
}

fn copied_message(tab_count: usize) -> String {
    if tab_count == 1 {
        "Copied 1 tab".to_string()
    } else {
        format!("Copied {} tabs", tab_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scope::{SessionSnapshot, TabSnapshot, WindowSnapshot};
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    struct FakeSink {
        name: &'static str,
        fail: bool,
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl FakeSink {
        fn ok(name: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let writes = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    name,
                    fail: false,
                    writes: Arc::clone(&writes),
                },
                writes,
            )
        }

        fn failing(name: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let writes = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    name,
                    fail: true,
                    writes: Arc::clone(&writes),
                },
                writes,
            )
        }
    }

    impl ClipboardSink for FakeSink {
        fn name(&self) -> &'static str {
            self.name
        }

        fn write(&self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                return Err(anyhow!("refused"));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FeedbackRecorder {
        events: Mutex<Vec<String>>,
    }

    impl FeedbackRecorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl FeedbackSink for FeedbackRecorder {
        fn success(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("success:{}", message));
        }

        fn error(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("error:{}", message));
        }

        fn info(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("info:{}", message));
        }
    }

    fn session() -> SessionSnapshot {
        SessionSnapshot {
            windows: vec![WindowSnapshot {
                id: 1,
                focused: true,
                tabs: vec![TabSnapshot {
                    title: "Rust".to_string(),
                    url: "https://rust-lang.org/".to_string(),
                    active: true,
                }],
            }],
        }
    }

    #[test]
    fn test_copy_writes_rendered_text_and_reports_success() {
        let (sink, writes) = FakeSink::ok("fake");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(sink)]);
        let feedback = FeedbackRecorder::default();

        let summary = orchestrator
            .copy(Scope::ThisTab, Format::Markdown, &session(), &feedback)
            .unwrap();

        assert_eq!(summary.tab_count, 1);
        assert_eq!(summary.text, "[Rust](https://rust-lang.org/)");
        assert_eq!(
            writes.lock().unwrap().as_slice(),
            &["[Rust](https://rust-lang.org/)".to_string()]
        );
        assert_eq!(feedback.events(), vec!["success:Copied 1 tab".to_string()]);
    }

    #[test]
    fn test_first_successful_sink_wins() {
        let (failing, failing_writes) = FakeSink::failing("first");
        let (working, working_writes) = FakeSink::ok("second");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(failing), Box::new(working)]);
        let feedback = FeedbackRecorder::default();

        orchestrator
            .copy(Scope::ThisTab, Format::Url, &session(), &feedback)
            .unwrap();

        assert!(failing_writes.lock().unwrap().is_empty());
        assert_eq!(working_writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_all_sinks_failing_is_sink_failure_with_error_feedback() {
        let (sink, _) = FakeSink::failing("only");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(sink)]);
        let feedback = FeedbackRecorder::default();

        let result = orchestrator.copy(Scope::ThisTab, Format::Url, &session(), &feedback);
        assert!(matches!(result, Err(CopyError::SinkFailure(_))));
        assert_eq!(feedback.events(), vec!["error:Copy failed".to_string()]);
    }

    #[test]
    fn test_empty_scope_is_info_not_error() {
        let (sink, writes) = FakeSink::ok("fake");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(sink)]);
        let feedback = FeedbackRecorder::default();

        let result = orchestrator.copy(
            Scope::AllTabs,
            Format::Url,
            &SessionSnapshot::default(),
            &feedback,
        );
        assert!(matches!(result, Err(CopyError::EmptyResult)));
        assert_eq!(feedback.events(), vec!["info:Nothing to copy".to_string()]);
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_separator_excluded_from_tab_count() {
        let (sink, _) = FakeSink::ok("fake");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(sink)]);
        let feedback = FeedbackRecorder::default();

        let mut session = session();
        session.windows.push(WindowSnapshot {
            id: 2,
            focused: false,
            tabs: vec![TabSnapshot {
                title: "Docs".to_string(),
                url: "https://docs.rs/".to_string(),
                active: false,
            }],
        });

        let summary = orchestrator
            .copy(Scope::AllTabsByWindow, Format::Title, &session, &feedback)
            .unwrap();
        // Two real tabs plus one separator line in the text.
        assert_eq!(summary.tab_count, 2);
        assert!(summary.text.contains("------- Window 2 -------"));
    }

    #[test]
    fn test_copy_text_reports_success() {
        let (sink, writes) = FakeSink::ok("fake");
        let orchestrator = CopyOrchestrator::new(vec![Box::new(sink)]);
        let feedback = FeedbackRecorder::default();

        orchestrator
            .copy_text("extracted article", &feedback)
            .unwrap();
        assert_eq!(
            writes.lock().unwrap().as_slice(),
            &["extracted article".to_string()]
        );
        assert_eq!(feedback.events(), vec!["success:Copied".to_string()]);
    }
}
