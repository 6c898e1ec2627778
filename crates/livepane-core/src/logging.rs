#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature enabled the standard `tracing` macros are
//! re-exported here so downstream crates log through one path. Every event
//! emitted by livepane uses a `livepane.<area>` target:
//!
//! | Target               | Emitted by                         |
//! |----------------------|------------------------------------|
//! | `livepane.url`       | URL decode / sync                  |
//! | `livepane.layout`    | activation changes                 |
//! | `livepane.preview`   | composite document rebuilds        |
//! | `livepane.clipboard` | copy actions and fallback outcomes |
//!
//! Without the feature this module only exposes the target names.

/// Target for URL synchronizer events.
pub const TARGET_URL: &str = "livepane.url";
/// Target for layout activation events.
pub const TARGET_LAYOUT: &str = "livepane.layout";
/// Target for preview recomposition events.
pub const TARGET_PREVIEW: &str = "livepane.preview";
/// Target for clipboard events.
pub const TARGET_CLIPBOARD: &str = "livepane.clipboard";

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};
