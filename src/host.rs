//! Native-messaging host: request dispatch and badge feedback.
//!
//! One thread reads frames from stdin and dispatches them; a writer thread
//! owns stdout and serializes every outgoing frame from an mpsc channel, so
//! badge timers and replies never interleave mid-frame. All failures are
//! converted to a reply plus transient feedback here; nothing propagates as
//! a panic.

use crate::config::{Config, ConfigManager};
use crate::core::gesture::{Gesture, GestureClassifier};
use crate::core::orchestrator::{CopyOrchestrator, FeedbackSink};
use crate::core::scope::SessionSnapshot;
use crate::core::tab::{Format, Scope};
use crate::protocol::{self, GestureAction, Request, Response};
use crate::utils::clipboard;
use crate::utils::handoff::HandoffSlot;
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Badge feedback over the outgoing message channel.
///
/// Every indicator schedules its own clear after the configured duration; a
/// newer indicator bumps the generation counter, which restarts the clear
/// window instead of letting the older timer wipe the fresh badge.
struct BadgeFeedback {
    outbox: Mutex<Sender<Response>>,
    generation: Arc<AtomicU64>,
    clear_after: Duration,
}

impl BadgeFeedback {
    fn new(outbox: Sender<Response>, clear_after: Duration) -> Self {
        Self {
            outbox: Mutex::new(outbox),
            generation: Arc::new(AtomicU64::new(0)),
            clear_after,
        }
    }

    fn show(&self, text: &str, color: &str) {
        let sender = self
            .outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = sender.send(Response::Badge {
            text: text.to_string(),
            color: color.to_string(),
        });

        let guard = Arc::clone(&self.generation);
        let clear_after = self.clear_after;
        thread::spawn(move || {
            thread::sleep(clear_after);
            if guard.load(Ordering::SeqCst) == generation {
                let _ = sender.send(Response::Badge {
                    text: String::new(),
                    color: String::new(),
                });
            }
        });
    }
}

impl FeedbackSink for BadgeFeedback {
    fn success(&self, message: &str) {
        debug!(message = %message, "feedback: success");
        self.show("✓", "#4CAF50");
    }

    fn error(&self, message: &str) {
        warn!(message = %message, "feedback: error");
        self.show("✗", "#F44336");
    }

    fn info(&self, message: &str) {
        info!(message = %message, "feedback: info");
        self.show("i", "#2196F3");
    }
}

pub struct Host {
    config: Config,
    orchestrator: CopyOrchestrator,
    classifier: Arc<GestureClassifier>,
    handoff: Arc<HandoffSlot>,
    feedback: BadgeFeedback,
    outbox: Sender<Response>,
}

impl Host {
    pub fn new(config: Config, orchestrator: CopyOrchestrator, outbox: Sender<Response>) -> Self {
        let classifier = Arc::new(GestureClassifier::new(
            config.click_threshold(),
            config.idle_reset(),
        ));
        let feedback = BadgeFeedback::new(outbox.clone(), config.badge_clear());
        Self {
            config,
            orchestrator,
            classifier,
            handoff: Arc::new(HandoffSlot::new()),
            feedback,
            outbox,
        }
    }

    pub fn handle(&self, request: Request) {
        match request {
            Request::CopyTabs {
                scope,
                format,
                session,
            } => self.handle_copy_tabs(scope, format, &session),
            Request::IconClick { session } => self.handle_icon_click(&session),
            Request::PageContent {
                title,
                url,
                content,
            } => self.handle_page_content(&title, &url, &content),
            Request::ExtractionFailed { error } => self.handle_extraction_failed(&error),
            Request::FetchPayload => self.handle_fetch_payload(),
            Request::CopyOk => {
                self.feedback.success("Copied");
                self.send(Response::CopyResult {
                    success: true,
                    tab_count: None,
                    error: None,
                });
            }
            Request::CopyFailed { error } => {
                warn!(error = %error, "page-side copy failed");
                self.feedback.error("Copy failed");
                self.send(Response::CopyResult {
                    success: false,
                    tab_count: None,
                    error: Some(error),
                });
            }
        }
    }

    fn handle_copy_tabs(&self, scope: Scope, format: Format, session: &SessionSnapshot) {
        match self
            .orchestrator
            .copy(scope, format, session, &self.feedback)
        {
            Ok(summary) => {
                // Parked for the popup fallback copy path.
                self.handoff.store(summary.text);
                self.send(Response::CopyResult {
                    success: true,
                    tab_count: Some(summary.tab_count),
                    error: None,
                });
            }
            Err(err) => self.send(Response::CopyResult {
                success: false,
                tab_count: None,
                error: Some(err.to_string()),
            }),
        }
    }

    /// Icon activations fire their action as soon as they are classified.
    ///
    /// A single click copies right here; double and triple only tell the
    /// extension what to do next, because extraction and the advanced popup
    /// live on the browser side. The lower-order action of a burst has
    /// already fired by the time the higher-order one is classified.
    fn handle_icon_click(&self, session: &SessionSnapshot) {
        let classified = self.classifier.classify(Instant::now());
        self.schedule_idle_reset(classified.idle_token);

        let action = match classified.gesture {
            Gesture::Single => {
                match self.orchestrator.copy(
                    self.config.default_scope,
                    self.config.default_format,
                    session,
                    &self.feedback,
                ) {
                    Ok(summary) => self.handoff.store(summary.text),
                    Err(err) => debug!(error = %err, "single-click copy failed"),
                }
                GestureAction::Copied
            }
            Gesture::Double => GestureAction::ExtractContent,
            Gesture::Triple => GestureAction::OpenAdvancedPopup,
        };

        self.send(Response::Gesture {
            gesture: classified.gesture,
            action,
        });
    }

    fn schedule_idle_reset(&self, idle_token: u64) {
        let classifier = Arc::clone(&self.classifier);
        let idle = self.classifier.idle_reset();
        thread::spawn(move || {
            thread::sleep(idle);
            classifier.reset_if_stale(idle_token);
        });
    }

    fn handle_page_content(&self, title: &str, url: &str, content: &str) {
        let text = format!("Title: {}\nSource: {}\n\n{}", title, url, content);
        match self.orchestrator.copy_text(&text, &self.feedback) {
            Ok(()) => self.send(Response::CopyResult {
                success: true,
                tab_count: None,
                error: None,
            }),
            Err(err) => self.send(Response::CopyResult {
                success: false,
                tab_count: None,
                error: Some(err.to_string()),
            }),
        }
    }

    fn handle_extraction_failed(&self, reason: &str) {
        warn!(reason = %reason, "content extraction failed");
        self.feedback.error("Extraction failed");
        self.send(Response::CopyResult {
            success: false,
            tab_count: None,
            error: Some(format!("content extraction failed: {}", reason)),
        });
    }

    fn handle_fetch_payload(&self) {
        self.send(Response::Payload {
            text: self.handoff.take(),
        });
    }

    pub fn send(&self, response: Response) {
        if self.outbox.send(response).is_err() {
            error!("writer thread is gone, dropping response");
        }
    }
}

/// Wire the host to stdin/stdout and run until the browser closes the pipe.
pub fn run(config: Config) -> Result<()> {
    let (sender, receiver) = mpsc::channel::<Response>();

    let writer = thread::spawn(move || {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for response in receiver {
            if let Err(err) = protocol::write_message(&mut out, &response) {
                error!(error = %err, "failed to write frame");
                break;
            }
        }
    });

    let orchestrator = CopyOrchestrator::new(clipboard::default_sinks());
    let host = Host::new(config, orchestrator, sender);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    while let Some(frame) = protocol::read_frame(&mut input)? {
        match protocol::parse_request(&frame) {
            Ok(request) => {
                debug!(?request, "dispatching request");
                host.handle(request);
            }
            Err(err) => {
                warn!(error = %err, "bad request frame");
                host.send(Response::Error {
                    error: err.to_string(),
                });
            }
        }
    }

    info!("stdin closed, shutting down");
    drop(host);
    let _ = writer.join();
    Ok(())
}

/// Load the configuration the same way the binary does, seeding the file
/// with defaults on first run.
pub fn load_config() -> Config {
    let manager = ConfigManager::new();
    let config = manager.load();
    if !manager.get_config_file_path().exists() {
        if let Err(err) = manager.save(&config) {
            warn!(error = %err, "could not write default config");
        }
    }
    debug!(path = %manager.get_config_file_path().display(), "configuration loaded");
    config
}
