#![forbid(unsafe_code)]

//! Session ⇄ URL path synchronization.
//!
//! # Path grammar
//!
//! ```text
//! path      = "/" [ marker "/" ] fields
//! fields    = token                                   ; all content empty
//!           | token "|" token "|" token "|" token "|" token
//!             ; active-set, markup, style, script, custom
//! ```
//!
//! Each `token` is [`codec::encode`] of the field text; the active-set field
//! is the comma-joined ascending id list before encoding.
//!
//! # Invariants
//!
//! 1. A session whose panes are all empty encodes to exactly one field with
//!    no trailing separator.
//! 2. `decode_path(&encode_path(s)).session == s` for every session whose
//!    active-set is non-empty.
//! 3. [`UrlSynchronizer::encode_path`] never carries the embed marker; only
//!    [`UrlSynchronizer::location_path`] does, and only when embedded.
//!
//! # Failure Modes
//!
//! Decoding never fails as a whole. A malformed content field is treated as
//! empty and reported in [`DecodedPath::dropped`]; an active-set field that
//! is malformed, empty, or names no known pane is replaced by the configured
//! default layout.

use std::borrow::Cow;

use livepane_core::codec::{self, DecodeError};
use livepane_core::logging::TARGET_URL;
use livepane_core::{ActiveSet, EditorPane, Session};

use crate::config::PlaygroundConfig;
use crate::surface::HistorySink;

/// Separator between path fields.
pub const FIELD_SEPARATOR: char = '|';

/// Percent-escaped forms of [`FIELD_SEPARATOR`] that browsers produce.
const ESCAPED_SEPARATORS: [&str; 2] = ["%7C", "%7c"];

/// Which path field a decode problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathField {
    ActiveSet,
    Content(EditorPane),
}

impl core::fmt::Display for PathField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ActiveSet => f.write_str("active_set"),
            Self::Content(pane) => write!(f, "{pane}"),
        }
    }
}

/// A field that was present in the path but could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedField {
    pub field: PathField,
    pub error: DecodeError,
}

/// Result of decoding a URL path at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    /// Initial session, embedded flag included.
    pub session: Session,
    /// Whether the active-set came from the configured default rather than
    /// from the path.
    pub default_layout: bool,
    /// Fields that were present but malformed, in path order.
    pub dropped: Vec<DroppedField>,
    /// Segments past the custom field, ignored.
    pub extra_segments: usize,
}

/// Derives the URL path from a session and back.
///
/// Holds the last path handed to the history sink so repeated syncs of an
/// unchanged session do not rewrite history.
#[derive(Debug, Clone)]
pub struct UrlSynchronizer {
    embed_marker: String,
    default_active: ActiveSet,
    last_written: Option<String>,
}

impl UrlSynchronizer {
    #[must_use]
    pub fn new(embed_marker: impl Into<String>, default_active: ActiveSet) -> Self {
        Self {
            embed_marker: embed_marker.into(),
            default_active,
            last_written: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        Self::new(config.embed_marker.clone(), config.default_active())
    }

    #[must_use]
    pub fn embed_marker(&self) -> &str {
        &self.embed_marker
    }

    /// Path most recently written by [`sync`](Self::sync).
    #[must_use]
    pub fn last_written(&self) -> Option<&str> {
        self.last_written.as_deref()
    }

    /// Canonical path for a session, without the embed marker.
    ///
    /// This is the form used for share links and the embed snippet.
    #[must_use]
    pub fn encode_path(&self, session: &Session) -> String {
        let fields = encode_fields(session);
        let mut path = String::with_capacity(fields.len() + 1);
        path.push('/');
        path.push_str(&fields);
        path
    }

    /// Path to show in the address bar: the canonical path, behind the embed
    /// marker when the session is embedded.
    #[must_use]
    pub fn location_path(&self, session: &Session) -> String {
        let canonical = self.encode_path(session);
        if session.is_embedded() {
            format!("/{}{canonical}", self.embed_marker)
        } else {
            canonical
        }
    }

    /// Write the session's location path to `history` if it differs from the
    /// last one written. Returns `true` if history was replaced.
    pub fn sync(&mut self, session: &Session, history: &mut dyn HistorySink) -> bool {
        let path = self.location_path(session);
        if self.last_written.as_deref() == Some(path.as_str()) {
            return false;
        }
        livepane_core::debug!(
            target: TARGET_URL,
            path_len = path.len(),
            embedded = session.is_embedded(),
            "replacing history state"
        );
        history.replace_state(&path);
        self.last_written = Some(path);
        true
    }

    /// Decode a URL path (`location.pathname`) into an initial session.
    ///
    /// A leading `/` is optional. The separator may appear literally or
    /// percent-escaped, and each segment is percent-decoded before the token
    /// decoder sees it.
    #[must_use]
    pub fn decode_path(&self, path: &str) -> DecodedPath {
        let path = path.strip_prefix('/').unwrap_or(path);
        let (embedded, rest) = self.strip_embed_marker(path);
        let normalized = normalize_separators(rest);
        let mut segments = normalized.split(FIELD_SEPARATOR);

        let mut dropped = Vec::new();
        let (active, default_layout) = match segments.next() {
            Some(segment) if !segment.is_empty() => self.decode_active(segment, &mut dropped),
            _ => (self.default_active, true),
        };

        let mut session = Session::new(active);
        session.set_embedded(embedded);

        for pane in EditorPane::ALL {
            let Some(segment) = segments.next() else {
                break;
            };
            if segment.is_empty() {
                continue;
            }
            match codec::decode(&codec::unescape_segment(segment)) {
                Ok(text) => {
                    session.set_content(pane, text);
                }
                Err(error) => {
                    livepane_core::warn!(
                        target: TARGET_URL,
                        field = %pane,
                        error = %error,
                        "dropping malformed content field"
                    );
                    dropped.push(DroppedField {
                        field: PathField::Content(pane),
                        error,
                    });
                }
            }
        }

        let extra_segments = segments.count();
        if extra_segments > 0 {
            livepane_core::debug!(
                target: TARGET_URL,
                extra_segments,
                "ignoring segments past the custom field"
            );
        }

        DecodedPath {
            session,
            default_layout,
            dropped,
            extra_segments,
        }
    }

    fn strip_embed_marker<'a>(&self, path: &'a str) -> (bool, &'a str) {
        match path.strip_prefix(self.embed_marker.as_str()) {
            Some("") => (true, ""),
            Some(rest) => match rest.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, path),
            },
            None => (false, path),
        }
    }

    fn decode_active(&self, segment: &str, dropped: &mut Vec<DroppedField>) -> (ActiveSet, bool) {
        let unescaped = codec::unescape_segment(segment);
        let parsed = match codec::decode(&unescaped) {
            Ok(text) => ActiveSet::parse(&text),
            // Not a token; a bare id list is still usable.
            Err(error) => ActiveSet::parse(&unescaped).or_else(|| {
                dropped.push(DroppedField {
                    field: PathField::ActiveSet,
                    error,
                });
                None
            }),
        };
        match parsed {
            Some(active) => (active, false),
            None => {
                livepane_core::warn!(
                    target: TARGET_URL,
                    segment,
                    fallback = %self.default_active,
                    "unusable active-set field, using default layout"
                );
                (self.default_active, true)
            }
        }
    }
}

impl Default for UrlSynchronizer {
    fn default() -> Self {
        Self::from_config(&PlaygroundConfig::default())
    }
}

/// The field string of a session (the path without its leading `/`).
#[must_use]
pub fn encode_fields(session: &Session) -> String {
    let mut out = codec::encode(&session.active().serialize());
    if session.is_empty() {
        return out;
    }
    for (_, text) in session.contents() {
        out.push(FIELD_SEPARATOR);
        out.push_str(&codec::encode(text));
    }
    out
}

fn normalize_separators(path: &str) -> Cow<'_, str> {
    if !ESCAPED_SEPARATORS.iter().any(|escaped| path.contains(escaped)) {
        return Cow::Borrowed(path);
    }
    let mut owned = path.to_owned();
    for escaped in ESCAPED_SEPARATORS {
        owned = owned.replace(escaped, "|");
    }
    Cow::Owned(owned)
}
