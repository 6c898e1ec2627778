#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the PlaygroundRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly
//! types and binds the runtime's collaborator traits to the DOM: history
//! replacement, the preview iframe's `srcdoc`, and the two clipboard paths.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use livepane_web::surface::{HistorySink, RenderSurface};
use livepane_web::{Clipboard, ClipboardError, Controls, copy_with_fallback};

use super::runner_core::{
    RunnerCore, copy_outcome_label, copy_target_from_label, outputs_to_json, step_outcome_to_json,
};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn json_to_js(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap_or(JsValue::NULL)
}

fn controls_to_js(controls: Controls) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "layoutToggles", JsValue::from_bool(controls.layout_toggles));
    set_js(&obj, "share", JsValue::from_bool(controls.share));
    set_js(&obj, "openInNewTab", JsValue::from_bool(controls.open_in_new_tab));
    obj.into()
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn page_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

/// `history.replaceState` on the current window.
struct BrowserHistory(web_sys::History);

impl HistorySink for BrowserHistory {
    fn replace_state(&mut self, path: &str) {
        if let Err(err) = self.0.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
            console_error(&format!("history.replaceState failed: {err:?}"));
        }
    }
}

/// Preview iframe, rendered through `srcdoc`.
struct FrameSurface(web_sys::Element);

impl RenderSurface for FrameSurface {
    fn render(&mut self, document: &str) {
        if let Err(err) = self.0.set_attribute("srcdoc", document) {
            console_error(&format!("preview srcdoc update failed: {err:?}"));
        }
    }
}

/// `navigator.clipboard.writeText`. The returned promise is not awaited;
/// a write that is issued counts as copied.
struct AsyncClipboard;

impl Clipboard for AsyncClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let global = js_sys::global();
        let navigator =
            Reflect::get(&global, &"navigator".into()).map_err(|_| ClipboardError::Unsupported)?;
        let clipboard =
            Reflect::get(&navigator, &"clipboard".into()).map_err(|_| ClipboardError::Unsupported)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unsupported);
        }
        let write = Reflect::get(&clipboard, &"writeText".into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(ClipboardError::Unsupported)?;
        write
            .call1(&clipboard, &JsValue::from_str(text))
            .map(|_| ())
            .map_err(|err| ClipboardError::Rejected(format!("{err:?}")))
    }
}

/// Temporary textarea plus `document.execCommand('copy')`.
struct SelectionCopy;

impl Clipboard for SelectionCopy {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(ClipboardError::Unsupported)?;
        let body = document.body().ok_or(ClipboardError::Unsupported)?;
        let area = document
            .create_element("textarea")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
            .ok_or(ClipboardError::Unsupported)?;
        area.set_value(text);
        let _ = area.set_attribute("style", "position: fixed; top: 0; left: 0;");
        body.append_child(&area)
            .map_err(|err| ClipboardError::Rejected(format!("{err:?}")))?;
        let _ = area.focus();
        area.select();

        let copied = document
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| ClipboardError::Unsupported)
            .and_then(|doc| {
                doc.exec_command("copy")
                    .map_err(|err| ClipboardError::Rejected(format!("{err:?}")))
            });
        area.remove();

        if copied? {
            Ok(())
        } else {
            Err(ClipboardError::Rejected(
                "execCommand('copy') returned false".to_owned(),
            ))
        }
    }
}

/// WASM playground runner.
///
/// Host-driven: JavaScript forwards editor changes and layout clicks, calls
/// `step()` and then `present()` to write the URL and preview.
#[wasm_bindgen]
pub struct PlaygroundRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PlaygroundRunner {
    /// Load from `window.location.pathname`. `config` is an optional JSON
    /// `PlaygroundConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(&page_path(), config.as_deref()),
        }
    }

    /// Load from an explicit path (tests, server-side previews).
    #[wasm_bindgen(js_name = fromPath)]
    pub fn from_path(path: &str, config: Option<String>) -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(path, config.as_deref()),
        }
    }

    /// Queue an editor change. `pane` is `"markup"`, `"style"`, `"script"` or
    /// `"custom"` (`"html"`, `"css"`, `"js"` also accepted).
    #[wasm_bindgen(js_name = contentChanged)]
    pub fn content_changed(&mut self, pane: &str, text: String) -> bool {
        self.inner.content_changed(pane, text)
    }

    #[wasm_bindgen(js_name = togglePane)]
    pub fn toggle_pane(&mut self, id: u32) -> bool {
        self.inner.toggle_pane(id)
    }

    /// Custom selector change; `-1` is the "none" option.
    #[wasm_bindgen(js_name = selectCustom)]
    pub fn select_custom(&mut self, value: i32) -> bool {
        self.inner.select_custom(value)
    }

    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, now_ms: f64) {
        self.inner.set_time_ms(now_ms);
    }

    /// Process queued events. Returns
    /// `{events_processed, url_changed, preview_changed, layout_changed}`.
    pub fn step(&mut self) -> JsValue {
        json_to_js(&step_outcome_to_json(self.inner.step()))
    }

    /// Write pending location and document to the page, returning the rest
    /// (`{layout, custom_icon, languages}`) for the host to apply.
    pub fn present(&mut self, frame: web_sys::Element) -> JsValue {
        let outputs = self.inner.take_outputs();
        outputs.present_document(&mut FrameSurface(frame));
        if outputs.location.is_some() {
            match web_sys::window().and_then(|window| window.history().ok()) {
                Some(history) => {
                    outputs.present_location(&mut BrowserHistory(history));
                }
                None => console_error("history unavailable; location not updated"),
            }
        }
        let remaining = livepane_web::PlaygroundOutputs {
            location: None,
            document: None,
            ..outputs
        };
        json_to_js(&outputs_to_json(&remaining))
    }

    /// All pending outputs as a plain object, for hosts that apply them
    /// themselves.
    #[wasm_bindgen(js_name = takeOutputs)]
    pub fn take_outputs(&mut self) -> JsValue {
        json_to_js(&self.inner.take_outputs_json())
    }

    pub fn content(&self, pane: &str) -> Option<String> {
        self.inner.content(pane)
    }

    #[wasm_bindgen(js_name = languageTag)]
    pub fn language_tag(&self, pane: &str) -> Option<String> {
        self.inner.language_tag(pane).map(str::to_owned)
    }

    pub fn controls(&self) -> JsValue {
        controls_to_js(self.inner.controls())
    }

    #[wasm_bindgen(js_name = isEmbedded)]
    pub fn is_embedded(&self) -> bool {
        self.inner.is_embedded()
    }

    /// Copy `"link"`, `"embed"` or a pane's text. Returns `"copied"`,
    /// `"copied_via_fallback"` or `"failed"`.
    pub fn copy(&self, target: &str) -> String {
        let origin = page_origin();
        let outcome = match copy_target_from_label(target) {
            Some(target) => self.inner.playground().copy(
                target,
                origin.as_deref(),
                &mut AsyncClipboard,
                &mut SelectionCopy,
            ),
            None => {
                console_error(&format!("unknown copy target {target:?}"));
                livepane_web::CopyOutcome::Failed
            }
        };
        copy_outcome_label(outcome).to_owned()
    }

    /// Copy arbitrary text through the same fallback chain.
    #[wasm_bindgen(js_name = copyText)]
    pub fn copy_text(&self, text: &str) -> String {
        copy_outcome_label(copy_with_fallback(&mut AsyncClipboard, &mut SelectionCopy, text))
            .to_owned()
    }

    #[wasm_bindgen(js_name = shareUrl)]
    pub fn share_url(&self) -> Option<String> {
        self.inner.share_url(page_origin().as_deref())
    }

    #[wasm_bindgen(js_name = embedSnippet)]
    pub fn embed_snippet(&self) -> Option<String> {
        self.inner.embed_snippet(page_origin().as_deref())
    }

    /// Open the current page in a new tab. Returns `false` if the browser
    /// blocked it.
    #[wasm_bindgen(js_name = openInNewTab)]
    pub fn open_in_new_tab(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let Some(url) = self.inner.open_in_new_tab_url(page_origin().as_deref()) else {
            return false;
        };
        matches!(window.open_with_url_and_target(&url, "_blank"), Ok(Some(_)))
    }

    /// Take accumulated log lines.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let arr = Array::new();
        for line in self.inner.take_logs() {
            arr.push(&JsValue::from_str(&line));
        }
        arr
    }
}
