//! Structured log events emitted while loading and driving a playground.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use livepane_core::{EditorPane, PaneId, codec};
use livepane_web::clipboard::MemoryClipboard;
use livepane_web::{CopyOutcome, CopyTarget, Playground, PlaygroundConfig, PlaygroundEvent};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    target: String,
    message: Option<String>,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: fields.get("message").cloned(),
            fields,
        });
    }
}

fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn messages<'a>(events: &'a [CapturedEvent], target: &str) -> Vec<&'a str> {
    events
        .iter()
        .filter(|e| e.target == target)
        .filter_map(|e| e.message.as_deref())
        .collect()
}

#[test]
fn load_logs_decode_summary_at_info() {
    let path = format!("/{}|aGVsbG8=", codec::encode("1,4"));
    let events = with_captured_events(|| {
        let _ = Playground::load(&path, PlaygroundConfig::default());
    });

    let loaded = events
        .iter()
        .find(|e| e.message.as_deref() == Some("session loaded from path"))
        .expect("startup event");
    assert_eq!(loaded.level, Level::INFO);
    assert_eq!(loaded.target, "livepane.url");
    assert_eq!(loaded.fields.get("active").map(String::as_str), Some("1,4"));
    assert_eq!(loaded.fields.get("dropped").map(String::as_str), Some("0"));
}

#[test]
fn malformed_field_is_warned_once() {
    let path = format!("/{}|!!!|{}", codec::encode("1,2,3,4"), codec::encode("p{}"));
    let events = with_captured_events(|| {
        let pg = Playground::load(&path, PlaygroundConfig::default());
        assert_eq!(pg.dropped_fields().len(), 1);
        assert_eq!(pg.session().content(EditorPane::Style), "p{}");
    });

    let warnings: Vec<_> = events.iter().filter(|e| e.level == Level::WARN).collect();
    assert_eq!(warnings.len(), 1, "{events:#?}");
    assert_eq!(
        warnings[0].message.as_deref(),
        Some("dropping malformed content field")
    );
    assert_eq!(
        warnings[0].fields.get("field").map(String::as_str),
        Some("markup")
    );
}

#[test]
fn unusable_layout_warns_with_fallback() {
    let path = format!("/{}", codec::encode("99"));
    let events = with_captured_events(|| {
        let _ = Playground::load(&path, PlaygroundConfig::default());
    });
    let warning = events
        .iter()
        .find(|e| e.level == Level::WARN)
        .expect("fallback warning");
    assert_eq!(warning.target, "livepane.url");
    assert_eq!(
        warning.fields.get("fallback").map(String::as_str),
        Some("1,2,3,4")
    );
}

#[test]
fn edits_and_toggles_log_at_debug() {
    let events = with_captured_events(|| {
        let mut pg = Playground::load("", PlaygroundConfig::default());
        pg.push_event(PlaygroundEvent::ContentChanged {
            pane: EditorPane::Markup,
            text: "<p>x</p>".to_owned(),
        });
        pg.push_event(PlaygroundEvent::TogglePane(PaneId::STYLE));
        pg.step();
    });

    assert!(
        messages(&events, "livepane.preview").contains(&"composite document rebuilt"),
        "{events:#?}"
    );
    assert!(messages(&events, "livepane.layout").contains(&"layout changed"));
    assert!(
        messages(&events, "livepane.url")
            .iter()
            .filter(|m| **m == "replacing history state")
            .count()
            >= 3
    );
    assert!(
        events
            .iter()
            .filter(|e| e.target.starts_with("livepane.") && e.message.is_some())
            .all(|e| e.level != Level::ERROR)
    );
}

#[test]
fn failed_copy_is_a_clipboard_warning() {
    let events = with_captured_events(|| {
        let pg = Playground::load("", PlaygroundConfig::default());
        let mut primary = MemoryClipboard::unsupported();
        let mut fallback = MemoryClipboard::unsupported();
        let outcome = pg.copy(
            CopyTarget::Pane(EditorPane::Markup),
            None,
            &mut primary,
            &mut fallback,
        );
        assert_eq!(outcome, CopyOutcome::Failed);
    });
    let warning = events
        .iter()
        .find(|e| e.target == "livepane.clipboard")
        .expect("clipboard event");
    assert_eq!(warning.level, Level::WARN);
    assert_eq!(
        warning.fields.get("fallback_error").map(String::as_str),
        Some("clipboard unavailable")
    );
}
