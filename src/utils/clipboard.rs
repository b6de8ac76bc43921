//! Clipboard sinks.
//!
//! Two kinds of sink implement one interface: the arboard-backed native sink
//! and external command-line tools piped through stdin. The orchestrator
//! tries them in order and the first success wins, mirroring the native-API /
//! fallback split the extension uses on the browser side.

use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};

/// Capability to place a string on the system clipboard.
pub trait ClipboardSink: Send + Sync {
    fn name(&self) -> &'static str;
    fn write(&self, text: &str) -> Result<()>;
}

/// Native clipboard via the arboard crate.
pub struct ArboardSink;

impl ClipboardSink for ArboardSink {
    fn name(&self) -> &'static str {
        "arboard"
    }

    fn write(&self, text: &str) -> Result<()> {
        // arboard wants a fresh Clipboard instance per operation
        let mut clipboard = Clipboard::new().context("failed to initialize clipboard")?;
        clipboard
            .set_text(text)
            .context("failed to set clipboard text")?;
        Ok(())
    }
}

/// External clipboard tool fed through stdin (pbcopy, wl-copy, xclip, xsel).
///
/// Covers hosts where arboard cannot reach a display server, e.g. Wayland
/// setups without the X11 bridge.
pub struct CommandSink {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandSink {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl ClipboardSink for CommandSink {
    fn name(&self) -> &'static str {
        self.program
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("failed to pipe text to {}", self.program))?;
        }

        let status = child
            .wait()
            .with_context(|| format!("failed to wait for {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// The sink chain for the current platform, in preference order.
pub fn default_sinks() -> Vec<Box<dyn ClipboardSink>> {
    #[allow(unused_mut)]
    let mut sinks: Vec<Box<dyn ClipboardSink>> = vec![Box::new(ArboardSink)];

    #[cfg(target_os = "macos")]
    sinks.push(Box::new(CommandSink::new("pbcopy", &[])));

    #[cfg(target_os = "linux")]
    {
        sinks.push(Box::new(CommandSink::new("wl-copy", &[])));
        sinks.push(Box::new(CommandSink::new(
            "xclip",
            &["-selection", "clipboard"],
        )));
        sinks.push(Box::new(CommandSink::new(
            "xsel",
            &["--clipboard", "--input"],
        )));
    }

    #[cfg(target_os = "windows")]
    sinks.push(Box::new(CommandSink::new("clip", &[])));

    sinks
}
