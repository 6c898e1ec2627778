#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`Playground`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here: host values arrive
//! as labels, numbers and JSON strings and leave as JSON.

use core::time::Duration;

use livepane_core::{EditorPane, PaneId};
use livepane_web::{
    Controls, CopyOutcome, CopyTarget, Playground, PlaygroundConfig, PlaygroundEvent,
    PlaygroundOutputs, StepOutcome,
};
use serde_json::json;

/// Platform-independent playground runner.
pub struct RunnerCore {
    inner: Playground,
    logs: Vec<String>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl RunnerCore {
    /// Parse a host-provided JSON config, falling back to defaults.
    ///
    /// The second value is a log line describing why the fallback was taken.
    fn config_with_fallback(config_json: Option<&str>) -> (PlaygroundConfig, Option<String>) {
        let Some(json) = config_json.filter(|s| !s.trim().is_empty()) else {
            return (PlaygroundConfig::default(), None);
        };
        match PlaygroundConfig::from_json_str(json).and_then(PlaygroundConfig::validated) {
            Ok(config) => (config, None),
            Err(err) => (
                PlaygroundConfig::default(),
                Some(format!("playground_config_error: {err}; using defaults")),
            ),
        }
    }

    /// Load a playground from the page path.
    pub fn new(path: &str, config_json: Option<&str>) -> Self {
        let (config, config_log) = Self::config_with_fallback(config_json);
        let inner = Playground::load(path, config);
        let mut logs: Vec<String> = config_log.into_iter().collect();
        for dropped in inner.dropped_fields() {
            logs.push(format!(
                "url_field_dropped: {}: {}",
                dropped.field, dropped.error
            ));
        }
        Self { inner, logs }
    }

    /// Advance the clock by `dt_ms` milliseconds.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host input can be noisy (NaN/inf/negative spikes).
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let secs = (dt_ms / 1000.0).min(Duration::MAX.as_secs_f64());
        let dt = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.inner.push_event(PlaygroundEvent::AdvanceTime(dt));
    }

    /// Set the clock to absolute milliseconds (`performance.now()`).
    pub fn set_time_ms(&mut self, now_ms: f64) {
        self.inner.set_time_ms(now_ms);
    }

    /// Queue an editor change. Returns `false` for an unknown pane label.
    pub fn content_changed(&mut self, pane: &str, text: String) -> bool {
        let Some(pane) = EditorPane::from_label(pane) else {
            self.logs.push(format!("unknown_pane_label: {pane:?}"));
            return false;
        };
        self.inner
            .push_event(PlaygroundEvent::ContentChanged { pane, text });
        true
    }

    /// Queue a layout toggle. Returns `false` for an unknown id.
    pub fn toggle_pane(&mut self, id: u32) -> bool {
        match PaneId::new(id) {
            Ok(id) => {
                self.inner.push_event(PlaygroundEvent::TogglePane(id));
                true
            }
            Err(err) => {
                self.logs.push(format!("toggle_rejected: {err}"));
                false
            }
        }
    }

    /// Queue a custom-selector change. Negative values are the "none"
    /// choice.
    pub fn select_custom(&mut self, value: i32) -> bool {
        let choice = match u32::try_from(value) {
            Err(_) => None,
            Ok(raw) => match PaneId::new(raw) {
                Ok(id) if id.is_custom() => Some(id),
                Ok(id) => {
                    self.logs.push(format!("select_rejected: {id} is not a custom pane"));
                    return false;
                }
                Err(err) => {
                    self.logs.push(format!("select_rejected: {err}"));
                    return false;
                }
            },
        };
        self.inner.push_event(PlaygroundEvent::SelectCustom(choice));
        true
    }

    pub fn step(&mut self) -> StepOutcome {
        self.inner.step()
    }

    pub fn take_outputs(&mut self) -> PlaygroundOutputs {
        self.inner.take_outputs()
    }

    /// Take the pending outputs as a JSON string:
    /// `{location, document, layout, languages: [{pane, language}]}`.
    pub fn take_outputs_json(&mut self) -> String {
        outputs_to_json(&self.take_outputs())
    }

    /// Take accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// Current text of a pane, for populating editors at mount.
    pub fn content(&self, pane: &str) -> Option<String> {
        EditorPane::from_label(pane).map(|pane| self.inner.session().content(pane).to_owned())
    }

    /// Language tag for a pane under the current layout.
    pub fn language_tag(&self, pane: &str) -> Option<&'static str> {
        EditorPane::from_label(pane).map(|pane| self.inner.session().language_tag(pane))
    }

    pub fn controls(&self) -> Controls {
        self.inner.controls()
    }

    pub fn is_embedded(&self) -> bool {
        self.inner.session().is_embedded()
    }

    /// Text for a copy action. `target` is `"link"`, `"embed"` or a pane
    /// label.
    pub fn copy_text(&self, target: &str, origin: Option<&str>) -> Option<String> {
        self.inner.copy_text(copy_target_from_label(target)?, origin)
    }

    pub fn share_url(&self, origin: Option<&str>) -> Option<String> {
        self.inner.share_url(origin)
    }

    pub fn embed_snippet(&self, origin: Option<&str>) -> Option<String> {
        self.inner.embed_snippet(origin)
    }

    pub fn open_in_new_tab_url(&self, origin: Option<&str>) -> Option<String> {
        self.inner.open_in_new_tab_url(origin)
    }

    pub fn playground(&self) -> &Playground {
        &self.inner
    }

    pub fn playground_mut(&mut self) -> &mut Playground {
        &mut self.inner
    }
}

/// Parse a copy-target label.
pub fn copy_target_from_label(label: &str) -> Option<CopyTarget> {
    match label {
        "link" => Some(CopyTarget::Link),
        "embed" => Some(CopyTarget::Embed),
        other => EditorPane::from_label(other).map(CopyTarget::Pane),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn copy_outcome_label(outcome: CopyOutcome) -> &'static str {
    match outcome {
        CopyOutcome::Copied => "copied",
        CopyOutcome::CopiedViaFallback => "copied_via_fallback",
        CopyOutcome::Failed => "failed",
    }
}

pub fn outputs_to_json(outputs: &PlaygroundOutputs) -> String {
    let languages: Vec<_> = outputs
        .languages
        .iter()
        .map(|(pane, language)| json!({ "pane": pane, "language": language }))
        .collect();
    json!({
        "location": outputs.location,
        "document": outputs.document,
        "layout": outputs.layout,
        "custom_icon": outputs.layout.as_ref().and_then(|plan| plan.custom_icon()),
        "languages": languages,
    })
    .to_string()
}

pub fn step_outcome_to_json(outcome: StepOutcome) -> String {
    serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_owned())
}
