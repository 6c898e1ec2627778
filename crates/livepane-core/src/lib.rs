#![forbid(unsafe_code)]

//! Core: pane identifiers, active-set, session state, and the URL token codec.
//!
//! # Role in livepane
//! `livepane-core` is the leaf layer. It owns the closed set of pane roles,
//! the custom-language catalog, the active-set that records which panes are
//! visible, the [`Session`](session::Session) record, and the reversible
//! text-to-token codec used to persist a session in a URL path.
//!
//! # How it fits in the system
//! `livepane-layout` turns an [`ActiveSet`](active_set::ActiveSet) into grid
//! geometry, and `livepane-web` drives a session from host events, encoding
//! it with [`codec`] on every change. Nothing here performs I/O.

pub mod active_set;
pub mod codec;
pub mod logging;
pub mod pane;
pub mod session;

pub use active_set::ActiveSet;
pub use codec::DecodeError;
pub use pane::{CustomLanguage, EditorPane, PaneId, PaneIdError, PaneRole};
pub use session::Session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
