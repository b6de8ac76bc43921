//! Native-messaging wire protocol.
//!
//! Chrome's native messaging framing: a 4-byte little-endian length prefix
//! followed by that many bytes of UTF-8 JSON. Stdout carries only frames;
//! all logging goes to stderr.

use crate::core::gesture::Gesture;
use crate::core::scope::SessionSnapshot;
use crate::core::tab::{Format, Scope};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read, Write};

/// Upper bound for a single frame in either direction. Chrome rejects
/// host-to-browser messages above 1 MiB, so we enforce the same cap both
/// ways rather than discover it at the browser boundary.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Message from the extension to the host.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Copy tabs selected by `scope`, rendered as `format`.
    CopyTabs {
        scope: Scope,
        #[serde(default)]
        format: Format,
        #[serde(default)]
        session: SessionSnapshot,
    },
    /// Toolbar icon activation. The host timestamps on receipt; the
    /// extension's clock is not trusted.
    IconClick {
        #[serde(default)]
        session: SessionSnapshot,
    },
    /// Extracted article content handed over for a clipboard write.
    PageContent {
        #[serde(default)]
        title: String,
        #[serde(default)]
        url: String,
        #[serde(default)]
        content: String,
    },
    /// The readability pass on the page failed.
    ExtractionFailed {
        #[serde(default)]
        error: String,
    },
    /// Popup fallback path: fetch the last rendered payload.
    FetchPayload,
    /// Page-side copy notifications (the DOM fallback reporting back).
    #[serde(rename = "copy_success")]
    CopyOk,
    #[serde(rename = "copy_error")]
    CopyFailed {
        #[serde(default)]
        error: String,
    },
}

/// Message from the host to the extension.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    CopyResult {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        tab_count: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Gesture classification plus the follow-up the extension should run.
    Gesture {
        gesture: Gesture,
        action: GestureAction,
    },
    Payload {
        text: Option<String>,
    },
    /// Toolbar badge update; empty text clears the badge.
    Badge {
        text: String,
        color: String,
    },
    Error {
        error: String,
    },
}

/// What the extension does after a classified gesture.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GestureAction {
    /// The host already copied the active tab; nothing left to do.
    Copied,
    /// Run the readability extraction and send the content back.
    ExtractContent,
    /// Open the advanced popup window.
    OpenAdvancedPopup,
}

/// Read one length-prefixed frame. `Ok(None)` means the peer closed the
/// stream cleanly.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err).context("failed to read frame length"),
    }

    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_FRAME_BYTES {
        bail!("frame of {} bytes exceeds the {} byte cap", len, MAX_FRAME_BYTES);
    }

    let mut frame = vec![0u8; len];
    reader
        .read_exact(&mut frame)
        .context("failed to read frame body")?;
    Ok(Some(frame))
}

/// Serialize and write one frame.
pub fn write_message<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let body = serde_json::to_vec(response).context("failed to serialize response")?;
    if body.len() > MAX_FRAME_BYTES {
        bail!(
            "response of {} bytes exceeds the {} byte cap",
            body.len(),
            MAX_FRAME_BYTES
        );
    }

    writer.write_all(&(body.len() as u32).to_le_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Parse a frame body into a request.
pub fn parse_request(frame: &[u8]) -> Result<Request> {
    serde_json::from_slice(frame).context("failed to parse request")
}
