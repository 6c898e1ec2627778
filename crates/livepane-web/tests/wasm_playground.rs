#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use core::time::Duration;

use livepane_core::{EditorPane, PaneId, codec};
use livepane_web::surface::{MemoryFrame, MemoryHistory};
use livepane_web::{Playground, PlaygroundConfig, PlaygroundEvent};
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn load_edit_and_present_on_wasm() {
    let mut pg = Playground::load("", PlaygroundConfig::default());
    let mut history = MemoryHistory::default();
    let mut frame = MemoryFrame::default();
    pg.take_outputs().present(&mut history, &mut frame);
    assert_eq!(frame.renders.len(), 1);

    pg.push_event(PlaygroundEvent::ContentChanged {
        pane: EditorPane::Markup,
        text: "<b>wasm</b>".to_owned(),
    });
    let outcome = pg.step();
    assert!(outcome.url_changed);
    assert!(outcome.preview_changed);
    pg.take_outputs().present(&mut history, &mut frame);

    let expected = format!(
        "/{}|{}|||",
        codec::encode("1,2,3,4"),
        codec::encode("<b>wasm</b>")
    );
    assert_eq!(history.current(), Some(expected.as_str()));
    assert!(frame.current().is_some_and(|doc| doc.contains("<b>wasm</b>")));
}

#[wasm_bindgen_test]
fn script_debounce_is_host_clocked_on_wasm() {
    let mut pg = Playground::load("", PlaygroundConfig::default());
    let _ = pg.take_outputs();
    pg.push_event(PlaygroundEvent::ContentChanged {
        pane: EditorPane::Script,
        text: "run()".to_owned(),
    });
    assert!(!pg.step().preview_changed);
    assert!(pg.script_pending());

    pg.push_event(PlaygroundEvent::AdvanceTime(Duration::from_secs(1)));
    assert!(pg.step().preview_changed);
    assert!(!pg.script_pending());
}

#[wasm_bindgen_test]
fn custom_selection_on_wasm() {
    let mut pg = Playground::load("", PlaygroundConfig::default());
    pg.push_event(PlaygroundEvent::SelectCustom(PaneId::new(9).ok()));
    assert!(pg.step().layout_changed);
    assert_eq!(pg.session().language_tag(EditorPane::Custom), "json");
}
