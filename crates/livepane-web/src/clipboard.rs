#![forbid(unsafe_code)]

//! Clipboard writes with a legacy fallback.
//!
//! The primary path is the asynchronous clipboard API; when that is missing
//! or refuses the write, the text is copied through a temporary selection.
//! Neither outcome touches session or URL state.

use livepane_core::logging::TARGET_CLIPBOARD;

/// Why a clipboard write did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The host has no such clipboard path.
    Unsupported,
    /// The host refused the write (permissions, focus, ...).
    Rejected(String),
}

impl core::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported => f.write_str("clipboard unavailable"),
            Self::Rejected(reason) => write!(f, "clipboard write rejected: {reason}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// A place text can be copied to.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Result of a copy action, used to decide whether to show the "copied!"
/// confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedViaFallback,
    /// Both paths failed. The user sees no confirmation and nothing else.
    Failed,
}

impl CopyOutcome {
    #[must_use]
    pub const fn is_copied(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Copy `text` through `primary`, then `fallback` if the first write fails.
pub fn copy_with_fallback(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> CopyOutcome {
    let primary_error = match primary.write_text(text) {
        Ok(()) => {
            livepane_core::debug!(target: TARGET_CLIPBOARD, len = text.len(), "copied");
            return CopyOutcome::Copied;
        }
        Err(error) => error,
    };
    match fallback.write_text(text) {
        Ok(()) => {
            livepane_core::debug!(
                target: TARGET_CLIPBOARD,
                len = text.len(),
                primary_error = %primary_error,
                "copied via selection fallback"
            );
            CopyOutcome::CopiedViaFallback
        }
        Err(error) => {
            livepane_core::warn!(
                target: TARGET_CLIPBOARD,
                primary_error = %primary_error,
                fallback_error = %error,
                "copy failed"
            );
            CopyOutcome::Failed
        }
    }
}

/// In-memory clipboard that can be told to fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub failure: Option<ClipboardError>,
}

impl MemoryClipboard {
    #[must_use]
    pub const fn unsupported() -> Self {
        Self {
            contents: None,
            failure: Some(ClipboardError::Unsupported),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}
