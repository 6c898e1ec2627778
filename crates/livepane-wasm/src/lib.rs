#![forbid(unsafe_code)]

//! WASM runner for the livepane playground.
//!
//! This crate provides [`PlaygroundRunner`], a `wasm-bindgen`-exported struct
//! that wraps `livepane_web::Playground` and exposes it to JavaScript for
//! host-driven execution. Editor widgets stay on the JS side; the runner
//! owns the session, writes the URL and the preview, and reports layout
//! changes back as JSON.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PlaygroundRunner;

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use crate::runner_core::{
        RunnerCore, copy_outcome_label, copy_target_from_label, outputs_to_json,
    };
    use livepane_core::{EditorPane, codec};
    use livepane_web::{CopyOutcome, CopyTarget};
    use pretty_assertions::assert_eq;

    fn outputs_value(core: &mut RunnerCore) -> serde_json::Value {
        serde_json::from_str(&core.take_outputs_json()).expect("outputs json should parse")
    }

    #[test]
    fn startup_outputs_carry_location_document_and_languages() {
        let mut core = RunnerCore::new("/1%2C2%2C3%2C4|aGVsbG8=|", None);
        let value = outputs_value(&mut core);
        assert_eq!(
            value["location"],
            format!("/{}|aGVsbG8=|||", codec::encode("1,2,3,4"))
        );
        assert!(
            value["document"]
                .as_str()
                .is_some_and(|doc| doc.contains("hello"))
        );
        assert_eq!(value["layout"]["columns"], "split");
        assert_eq!(value["languages"][0]["pane"], "markup");
        assert_eq!(value["languages"][0]["language"], "html");
        assert_eq!(value["languages"][3]["language"], "plaintext");
        assert_eq!(core.content("markup").as_deref(), Some("hello"));
    }

    #[test]
    fn second_take_is_empty() {
        let mut core = RunnerCore::new("", None);
        let _ = core.take_outputs();
        let value = outputs_value(&mut core);
        assert!(value["location"].is_null());
        assert!(value["document"].is_null());
        assert!(value["layout"].is_null());
        assert_eq!(value["languages"], serde_json::json!([]));
    }

    #[test]
    fn rejected_inputs_are_logged() {
        let mut core = RunnerCore::new("", None);
        assert!(!core.content_changed("sass", "x".to_owned()));
        assert!(!core.toggle_pane(99));
        assert!(!core.select_custom(2));
        assert!(!core.select_custom(77));
        let logs = core.take_logs();
        assert_eq!(logs.len(), 4, "{logs:?}");
        assert!(logs[0].starts_with("unknown_pane_label"));
        assert!(logs[1].starts_with("toggle_rejected"));
        assert!(core.take_logs().is_empty());
    }

    #[test]
    fn custom_selection_switches_language() {
        let mut core = RunnerCore::new("", None);
        let _ = core.take_outputs();
        assert!(core.select_custom(12));
        let outcome = core.step();
        assert!(outcome.layout_changed);
        let value = outputs_value(&mut core);
        assert_eq!(value["custom_icon"], "/typescript.svg");
        assert_eq!(value["languages"][0]["pane"], "custom");
        assert_eq!(value["languages"][0]["language"], "typescript");
        assert_eq!(core.language_tag("custom"), Some("typescript"));

        assert!(core.select_custom(-1));
        core.step();
        assert_eq!(core.playground().session().active().serialize(), "1,2,3,4");
    }

    #[test]
    fn script_edits_wait_for_time() {
        let mut core = RunnerCore::new("", None);
        let _ = core.take_outputs();
        assert!(core.content_changed("js", "go()".to_owned()));
        assert!(!core.step().preview_changed);

        core.advance_time_ms(f64::NAN);
        core.advance_time_ms(-5.0);
        core.advance_time_ms(500.0);
        assert!(!core.step().preview_changed);
        core.set_time_ms(1000.0);
        assert!(core.step().preview_changed);
        let value = outputs_value(&mut core);
        assert!(
            value["document"]
                .as_str()
                .is_some_and(|doc| doc.contains("<script>go()</script>"))
        );
    }

    #[test]
    fn out_of_range_host_time_saturates() {
        let mut core = RunnerCore::new("", None);
        assert!(core.content_changed("script", "late()".to_owned()));
        core.step();
        core.set_time_ms(1e300);
        assert_eq!(core.playground().now(), Duration::MAX);
        assert!(core.step().preview_changed);
        core.set_time_ms(f64::INFINITY);
        assert_eq!(core.playground().now(), Duration::MAX);
    }

    #[test]
    fn invalid_config_falls_back_with_log() {
        let mut core = RunnerCore::new("", Some(r#"{"script_debounce_ms": 0}"#));
        assert_eq!(core.playground().config().script_debounce_ms, 1000);
        let logs = core.take_logs();
        assert!(logs[0].starts_with("playground_config_error"), "{logs:?}");

        let core = RunnerCore::new("", Some(r#"{"origin": "https://p.dev"}"#));
        assert_eq!(
            core.share_url(None),
            Some(format!("https://p.dev/{}", codec::encode("1,2,3,4")))
        );
    }

    #[test]
    fn dropped_url_fields_are_logged() {
        let mut core = RunnerCore::new(&format!("/{}|!!!", codec::encode("4")), None);
        let logs = core.take_logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("url_field_dropped: markup"));
    }

    #[test]
    fn embedded_runner_controls_and_texts() {
        let core = RunnerCore::new(&format!("/embed/{}", codec::encode("4")), None);
        assert!(core.is_embedded());
        assert!(!core.controls().share);
        assert!(core.controls().open_in_new_tab);

        let snippet = core.embed_snippet(Some("https://p.dev")).unwrap_or_default();
        assert!(snippet.starts_with(r#"<iframe src="https://p.dev/embed/"#));
        assert_eq!(
            core.open_in_new_tab_url(Some("https://p.dev")),
            Some(format!("https://p.dev/embed/{}", codec::encode("4")))
        );
        assert_eq!(core.copy_text("css", None), Some(String::new()));
        assert_eq!(core.copy_text("link", None), None);
    }

    #[test]
    fn labels() {
        assert_eq!(copy_target_from_label("link"), Some(CopyTarget::Link));
        assert_eq!(
            copy_target_from_label("html"),
            Some(CopyTarget::Pane(EditorPane::Markup))
        );
        assert_eq!(copy_target_from_label("preview"), None);
        assert_eq!(copy_outcome_label(CopyOutcome::CopiedViaFallback), "copied_via_fallback");
    }

    #[test]
    fn outputs_json_is_stable_for_empty_outputs() {
        let json = outputs_to_json(&livepane_web::PlaygroundOutputs::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["custom_icon"].is_null());
    }
}
