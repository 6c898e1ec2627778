#![forbid(unsafe_code)]

//! `livepane-web` is the host-driven runtime of the playground.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes editor changes,
//!   layout clicks and time; the runtime answers with a location to write,
//!   a document to render and a layout to apply.
//! - **Deterministic time**: the script debounce runs against a clock the
//!   host advances explicitly, so every schedule is reproducible in tests.
//! - **No browser bindings**: collaborators are traits in [`surface`] and
//!   [`clipboard`]. `livepane-wasm` binds them to the DOM.

pub mod clipboard;
pub mod compositor;
pub mod config;
pub mod debounce;
pub mod playground;
pub mod share;
pub mod surface;
pub mod url_sync;

pub use clipboard::{Clipboard, ClipboardError, CopyOutcome, copy_with_fallback};
pub use compositor::{DocumentTemplate, PreviewCompositor, Slot, TemplateError};
pub use config::{PlaygroundConfig, PlaygroundConfigError};
pub use debounce::{DebouncedTask, HostClock};
pub use playground::{
    EventInbox, InboxSender, Playground, PlaygroundEvent, PlaygroundOutputs, StepOutcome,
};
pub use share::{Controls, CopyTarget, TooltipPlacement};
pub use surface::{EditorSurface, HistorySink, RenderSurface};
pub use url_sync::{DecodedPath, DroppedField, PathField, UrlSynchronizer};
