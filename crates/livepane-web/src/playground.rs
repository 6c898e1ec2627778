#![forbid(unsafe_code)]

//! The playground state owner.
//!
//! [`Playground`] holds the one live [`Session`] together with the layout
//! engine, URL synchronizer, compositor and the debounced script task. The
//! host pushes [`PlaygroundEvent`]s and calls [`Playground::step`]; results
//! accumulate in [`PlaygroundOutputs`] until the host takes them.
//!
//! Editor widgets that report changes from another thread send through an
//! [`EventInbox`]; the owning thread drains it before stepping, so the
//! session is only ever touched from one place.
//!
//! # Invariants
//!
//! 1. After every content or layout event that changes the session, the
//!    pending location equals `UrlSynchronizer::location_path(session)`.
//! 2. Markup and style edits reach the preview in the same step. Script
//!    edits reach it once the clock has advanced past the debounce delay
//!    with no further script edit.
//! 3. Custom-pane edits never change the preview.

use core::time::Duration;
use std::collections::VecDeque;
use std::sync::mpsc;

use livepane_core::logging::{TARGET_CLIPBOARD, TARGET_LAYOUT, TARGET_URL};
use livepane_core::{EditorPane, PaneId, Session};
use livepane_layout::{Activation, LayoutEngine, LayoutPlan};
use serde::Serialize;

use crate::clipboard::{Clipboard, CopyOutcome, copy_with_fallback};
use crate::compositor::{DocumentTemplate, PreviewCompositor};
use crate::config::PlaygroundConfig;
use crate::debounce::{DebouncedTask, HostClock};
use crate::share::{self, Controls, CopyTarget};
use crate::surface::{HistorySink, RenderSurface};
use crate::url_sync::{DroppedField, UrlSynchronizer};

/// One host notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundEvent {
    /// An editor's text changed.
    ContentChanged { pane: EditorPane, text: String },
    /// A layout toggle was clicked.
    TogglePane(PaneId),
    /// The custom-language selector changed; `None` is the "none" choice.
    SelectCustom(Option<PaneId>),
    /// Host time moved forward.
    AdvanceTime(Duration),
}

/// What one [`Playground::step`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub events_processed: usize,
    pub url_changed: bool,
    pub preview_changed: bool,
    pub layout_changed: bool,
}

impl StepOutcome {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.url_changed || self.preview_changed || self.layout_changed)
    }
}

/// Work for the host accumulated since the last [`Playground::take_outputs`].
///
/// Only the latest location and document are kept; intermediate values are
/// superseded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaygroundOutputs {
    /// Path to hand to `history.replaceState`.
    pub location: Option<String>,
    /// Document to render in the preview frame.
    pub document: Option<String>,
    /// New layout to apply.
    pub layout: Option<LayoutPlan>,
    /// Editor language tags to (re)set, in order.
    pub languages: Vec<(EditorPane, &'static str)>,
}

impl PlaygroundOutputs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.document.is_none()
            && self.layout.is_none()
            && self.languages.is_empty()
    }

    /// Forward the pending location and document to host surfaces.
    pub fn present(&self, history: &mut dyn HistorySink, frame: &mut dyn RenderSurface) {
        self.present_location(history);
        self.present_document(frame);
    }

    /// Write the pending location only. Returns `true` if there was one.
    pub fn present_location(&self, history: &mut dyn HistorySink) -> bool {
        let Some(path) = &self.location else {
            return false;
        };
        history.replace_state(path);
        true
    }

    /// Render the pending document only. Returns `true` if there was one.
    pub fn present_document(&self, frame: &mut dyn RenderSurface) -> bool {
        let Some(document) = &self.document else {
            return false;
        };
        frame.render(document);
        true
    }
}

impl HistorySink for PlaygroundOutputs {
    fn replace_state(&mut self, path: &str) {
        self.location = Some(path.to_owned());
    }
}

impl RenderSurface for PlaygroundOutputs {
    fn render(&mut self, document: &str) {
        self.document = Some(document.to_owned());
    }
}

/// Cross-thread event channel for editor change notifications.
#[derive(Debug)]
pub struct EventInbox {
    tx: mpsc::Sender<PlaygroundEvent>,
    rx: mpsc::Receiver<PlaygroundEvent>,
}

/// Sending half of an [`EventInbox`]; clone one per worker.
#[derive(Debug, Clone)]
pub struct InboxSender {
    tx: mpsc::Sender<PlaygroundEvent>,
}

impl InboxSender {
    /// Queue `event`. Returns `false` if the inbox is gone.
    pub fn send(&self, event: PlaygroundEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

impl EventInbox {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    #[must_use]
    pub fn sender(&self) -> InboxSender {
        InboxSender {
            tx: self.tx.clone(),
        }
    }

    /// Events received so far, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = PlaygroundEvent> + '_ {
        self.rx.try_iter()
    }
}

impl Default for EventInbox {
    fn default() -> Self {
        Self::new()
    }
}

/// The live playground.
#[derive(Debug)]
pub struct Playground {
    config: PlaygroundConfig,
    session: Session,
    layout: LayoutEngine,
    url: UrlSynchronizer,
    compositor: PreviewCompositor,
    script_task: DebouncedTask,
    clock: HostClock,
    queue: VecDeque<PlaygroundEvent>,
    outputs: PlaygroundOutputs,
    dropped: Vec<DroppedField>,
}

impl Playground {
    /// Start a playground from the page path (`location.pathname`).
    ///
    /// The initial outputs carry the canonical location, the first composite
    /// document, the layout, and a language tag for every editor.
    #[must_use]
    pub fn load(path: &str, config: PlaygroundConfig) -> Self {
        let url = UrlSynchronizer::from_config(&config);
        let decoded = url.decode_path(path);
        let session = decoded.session;

        livepane_core::info!(
            target: TARGET_URL,
            active = %session.active(),
            embedded = session.is_embedded(),
            default_layout = decoded.default_layout,
            dropped = decoded.dropped.len(),
            "session loaded from path"
        );

        let mut playground = Self {
            layout: LayoutEngine::new(session.active()),
            compositor: PreviewCompositor::new(DocumentTemplate::standard(
                &config.preview_background,
            )),
            script_task: DebouncedTask::new(config.script_debounce()),
            url,
            config,
            session,
            clock: HostClock::new(),
            queue: VecDeque::new(),
            outputs: PlaygroundOutputs::default(),
            dropped: decoded.dropped,
        };

        playground.outputs.layout = Some(playground.layout.plan().clone());
        for pane in EditorPane::ALL {
            let tag = playground.session.language_tag(pane);
            playground.outputs.languages.push((pane, tag));
        }
        playground.recompose();
        playground.sync_url();
        playground
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: PlaygroundEvent) {
        self.queue.push_back(event);
    }

    /// Move everything waiting in `inbox` onto the queue. Returns the count.
    pub fn drain_inbox(&mut self, inbox: &EventInbox) -> usize {
        let before = self.queue.len();
        self.queue.extend(inbox.drain());
        self.queue.len() - before
    }

    /// Process all queued events, then fire the script task if due.
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        while let Some(event) = self.queue.pop_front() {
            outcome.events_processed += 1;
            self.handle(event, &mut outcome);
        }
        if self.script_task.poll(self.clock.now()) {
            outcome.preview_changed |= self.recompose();
        }
        outcome
    }

    fn handle(&mut self, event: PlaygroundEvent, outcome: &mut StepOutcome) {
        match event {
            PlaygroundEvent::ContentChanged { pane, text } => {
                if !self.session.set_content(pane, text) {
                    return;
                }
                match pane {
                    EditorPane::Script => self.script_task.schedule(self.clock.now()),
                    EditorPane::Markup | EditorPane::Style => {
                        // The immediate rebuild already carries the latest script.
                        self.script_task.cancel();
                        outcome.preview_changed |= self.recompose();
                    }
                    EditorPane::Custom => {}
                }
                outcome.url_changed |= self.sync_url();
            }
            PlaygroundEvent::TogglePane(id) => self.activate(Activation::Toggle(id), outcome),
            PlaygroundEvent::SelectCustom(choice) => {
                self.activate(Activation::SelectCustom(choice), outcome);
            }
            PlaygroundEvent::AdvanceTime(dt) => {
                self.clock.advance(dt);
                if self.script_task.poll(self.clock.now()) {
                    outcome.preview_changed |= self.recompose();
                }
            }
        }
    }

    fn activate(&mut self, activation: Activation, outcome: &mut StepOutcome) {
        let previous_custom = self.layout.active().custom_id();
        if !self.layout.activate(activation) {
            return;
        }
        let active = self.layout.active();
        self.session.set_active(active);
        livepane_core::debug!(
            target: TARGET_LAYOUT,
            ?activation,
            active = %active,
            "layout changed"
        );

        self.outputs.layout = Some(self.layout.plan().clone());
        if active.custom_id() != previous_custom {
            let tag = self.session.custom_language_tag();
            self.outputs.languages.push((EditorPane::Custom, tag));
        }
        outcome.layout_changed = true;
        outcome.url_changed |= self.sync_url();
    }

    fn recompose(&mut self) -> bool {
        match self.compositor.recompose(&self.session) {
            Some(document) => {
                self.outputs.render(document);
                true
            }
            None => false,
        }
    }

    fn sync_url(&mut self) -> bool {
        self.url.sync(&self.session, &mut self.outputs)
    }

    /// Host time, for hosts that read an absolute clock instead of sending
    /// [`PlaygroundEvent::AdvanceTime`]. Earlier instants are ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// [`set_time`](Self::set_time) from host milliseconds
    /// (`performance.now()`). Non-finite or negative values are ignored.
    pub fn set_time_ms(&mut self, now_ms: f64) {
        self.clock.set_ms(now_ms);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Take the accumulated host work, leaving it empty.
    pub fn take_outputs(&mut self) -> PlaygroundOutputs {
        core::mem::take(&mut self.outputs)
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn layout(&self) -> &LayoutPlan {
        self.layout.plan()
    }

    #[must_use]
    pub const fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    #[must_use]
    pub const fn controls(&self) -> Controls {
        Controls::for_embedded(self.session.is_embedded())
    }

    /// Path fields that were malformed at load.
    #[must_use]
    pub fn dropped_fields(&self) -> &[DroppedField] {
        &self.dropped
    }

    /// Whether a script edit is waiting for the debounce delay.
    #[must_use]
    pub const fn script_pending(&self) -> bool {
        self.script_task.is_pending()
    }

    /// The document currently in the preview.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.compositor.current()
    }

    /// The path currently in the address bar.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.url.last_written()
    }

    /// Canonical, marker-free path of the session.
    #[must_use]
    pub fn canonical_path(&self) -> String {
        self.url.encode_path(&self.session)
    }

    fn origin<'a>(&'a self, origin: Option<&'a str>) -> Option<&'a str> {
        origin.or(self.config.origin.as_deref())
    }

    /// Full share link. `origin` overrides the configured one.
    #[must_use]
    pub fn share_url(&self, origin: Option<&str>) -> Option<String> {
        let origin = self.origin(origin)?;
        Some(share::page_url(origin, &self.canonical_path()))
    }

    /// Full URL of the current page, embed marker included when embedded.
    #[must_use]
    pub fn open_in_new_tab_url(&self, origin: Option<&str>) -> Option<String> {
        let origin = self.origin(origin)?;
        Some(share::page_url(origin, &self.url.location_path(&self.session)))
    }

    /// Iframe snippet embedding the session.
    #[must_use]
    pub fn embed_snippet(&self, origin: Option<&str>) -> Option<String> {
        let origin = self.origin(origin)?;
        let src = share::embed_url(origin, self.url.embed_marker(), &self.canonical_path());
        Some(share::embed_snippet(
            &src,
            self.config.embed_frame_min_size_px,
        ))
    }

    /// Text a copy action would place on the clipboard.
    #[must_use]
    pub fn copy_text(&self, target: CopyTarget, origin: Option<&str>) -> Option<String> {
        match target {
            CopyTarget::Link => self.share_url(origin),
            CopyTarget::Embed => self.embed_snippet(origin),
            CopyTarget::Pane(pane) => Some(self.session.content(pane).to_owned()),
        }
    }

    /// Run a copy action through the clipboard fallback chain.
    pub fn copy(
        &self,
        target: CopyTarget,
        origin: Option<&str>,
        primary: &mut dyn Clipboard,
        fallback: &mut dyn Clipboard,
    ) -> CopyOutcome {
        match self.copy_text(target, origin) {
            Some(text) => copy_with_fallback(primary, fallback, &text),
            None => {
                livepane_core::warn!(
                    target: TARGET_CLIPBOARD,
                    ?target,
                    "no origin known, nothing copied"
                );
                CopyOutcome::Failed
            }
        }
    }
}
