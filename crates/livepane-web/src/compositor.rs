#![forbid(unsafe_code)]

//! Preview document composition.
//!
//! The composite document is a fixed skeleton with three named slots:
//!
//! ```text
//! <!DOCTYPE html><html lang="en"><head> <style>{style}</style></head>
//! <body style="background-color: #333333;">{markup}<script>{script}</script></body></html>
//! ```
//!
//! The skeleton is split into literal and slot segments once, when the
//! template is built. Composition concatenates segments and never rescans
//! user text, so content that happens to contain a slot name is inserted
//! verbatim.
//!
//! User content is not escaped. A markup pane containing `</script>` or a
//! script pane containing `</script>` ends the block early; the document is
//! rendered in an isolated frame and this is accepted.

use livepane_core::logging::TARGET_PREVIEW;
use livepane_core::{EditorPane, Session};

/// One of the three live content slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Markup,
    Style,
    Script,
}

impl Slot {
    pub const ALL: [Self; 3] = [Self::Markup, Self::Style, Self::Script];

    /// Placeholder name used in template skeletons, e.g. `{markup}`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Style => "style",
            Self::Script => "script",
        }
    }

    #[must_use]
    pub const fn pane(self) -> EditorPane {
        match self {
            Self::Markup => EditorPane::Markup,
            Self::Style => EditorPane::Style,
            Self::Script => EditorPane::Script,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// Error when a skeleton does not contain each slot exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    MissingSlot(Slot),
    DuplicateSlot(Slot),
}

impl core::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSlot(slot) => write!(f, "template has no {{{}}} slot", slot.name()),
            Self::DuplicateSlot(slot) => {
                write!(f, "template has more than one {{{}}} slot", slot.name())
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// A document skeleton split into literal and slot segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    segments: Vec<Segment>,
    literal_len: usize,
}

impl DocumentTemplate {
    /// The stock playground document with the given body background color.
    #[must_use]
    pub fn standard(background: &str) -> Self {
        let segments = vec![
            Segment::Literal(r#"<!DOCTYPE html><html lang="en"><head> <style>"#.to_owned()),
            Segment::Slot(Slot::Style),
            Segment::Literal(format!(
                r#"</style></head><body style="background-color: {background};">"#
            )),
            Segment::Slot(Slot::Markup),
            Segment::Literal("<script>".to_owned()),
            Segment::Slot(Slot::Script),
            Segment::Literal("</script></body></html>".to_owned()),
        ];
        Self::from_segments(segments)
    }

    /// Parse a skeleton containing `{markup}`, `{style}` and `{script}`
    /// exactly once each. Any other text, braces included, is literal.
    pub fn parse(skeleton: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut seen = [false; 3];
        let mut rest = skeleton;

        while let Some((at, slot)) = next_slot(rest) {
            let index = slot as usize;
            if seen[index] {
                return Err(TemplateError::DuplicateSlot(slot));
            }
            seen[index] = true;
            if at > 0 {
                segments.push(Segment::Literal(rest[..at].to_owned()));
            }
            segments.push(Segment::Slot(slot));
            rest = &rest[at + slot.name().len() + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        if let Some(missing) = Slot::ALL.into_iter().find(|slot| !seen[*slot as usize]) {
            return Err(TemplateError::MissingSlot(missing));
        }
        Ok(Self::from_segments(segments))
    }

    fn from_segments(segments: Vec<Segment>) -> Self {
        let literal_len = segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Slot(_) => 0,
            })
            .sum();
        Self {
            segments,
            literal_len,
        }
    }

    /// Substitute slot values into the skeleton.
    #[must_use]
    pub fn render<'a>(&self, value: impl Fn(Slot) -> &'a str) -> String {
        let mut out = String::with_capacity(self.literal_len);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(value(*slot)),
            }
        }
        out
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::standard("#333333")
    }
}

fn next_slot(text: &str) -> Option<(usize, Slot)> {
    Slot::ALL
        .into_iter()
        .filter_map(|slot| {
            let placeholder = format!("{{{}}}", slot.name());
            text.find(&placeholder).map(|at| (at, slot))
        })
        .min_by_key(|(at, _)| *at)
}

/// Builds the composite preview document and remembers the last one so
/// hosts only re-render on change.
#[derive(Debug, Clone, Default)]
pub struct PreviewCompositor {
    template: DocumentTemplate,
    last: Option<String>,
}

impl PreviewCompositor {
    #[must_use]
    pub fn new(template: DocumentTemplate) -> Self {
        Self {
            template,
            last: None,
        }
    }

    /// Compose a document from the three live panes.
    #[must_use]
    pub fn compose(&self, markup: &str, style: &str, script: &str) -> String {
        self.template.render(|slot| match slot {
            Slot::Markup => markup,
            Slot::Style => style,
            Slot::Script => script,
        })
    }

    /// Compose from a session's live panes. The custom pane never reaches the
    /// preview.
    #[must_use]
    pub fn compose_session(&self, session: &Session) -> String {
        self.template.render(|slot| session.content(slot.pane()))
    }

    /// Recompose from `session`. Returns the document if it differs from the
    /// last one produced.
    pub fn recompose(&mut self, session: &Session) -> Option<&str> {
        let document = self.compose_session(session);
        if self.last.as_deref() == Some(document.as_str()) {
            return None;
        }
        livepane_core::debug!(
            target: TARGET_PREVIEW,
            document_len = document.len(),
            "composite document rebuilt"
        );
        self.last = Some(document);
        self.last.as_deref()
    }

    /// The last document produced by [`recompose`](Self::recompose).
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_document_layout() {
        let doc = PreviewCompositor::default().compose("<p>hi</p>", "p{color:red}", "go()");
        assert_eq!(
            doc,
            concat!(
                r#"<!DOCTYPE html><html lang="en"><head> <style>p{color:red}</style></head>"#,
                r#"<body style="background-color: #333333;"><p>hi</p><script>go()</script></body></html>"#
            )
        );
    }

    #[test]
    fn placeholders_in_content_are_not_substituted() {
        let template = DocumentTemplate::parse("<b>{markup}</b><i>{style}</i>{script}").unwrap();
        let compositor = PreviewCompositor::new(template);
        let doc = compositor.compose("{style}", "{script}", "HTML_EDITOR");
        assert_eq!(doc, "<b>{style}</b><i>{script}</i>HTML_EDITOR");
    }

    #[test]
    fn background_is_configurable() {
        let doc = PreviewCompositor::new(DocumentTemplate::standard("white")).compose("", "", "");
        assert!(doc.contains(r#"<body style="background-color: white;">"#));
    }

    #[test]
    fn parse_rejects_missing_and_duplicate_slots() {
        assert_eq!(
            DocumentTemplate::parse("{markup}{style}"),
            Err(TemplateError::MissingSlot(Slot::Script))
        );
        assert_eq!(
            DocumentTemplate::parse("{markup}{style}{script}{markup}"),
            Err(TemplateError::DuplicateSlot(Slot::Markup))
        );
    }

    #[test]
    fn parse_keeps_other_braces_literal() {
        let template = DocumentTemplate::parse("{x}{style}{{markup}}{script}").unwrap();
        let doc = template.render(|slot| slot.name());
        assert_eq!(doc, "{x}style{markup}script");
    }

    #[test]
    fn custom_pane_never_reaches_preview() {
        let mut session = Session::default();
        session.set_content(EditorPane::Custom, "SECRET");
        session.set_content(EditorPane::Markup, "hello");
        let doc = PreviewCompositor::default().compose_session(&session);
        assert!(doc.contains("hello"));
        assert!(!doc.contains("SECRET"));
    }

    #[test]
    fn recompose_reports_only_changes() {
        let mut compositor = PreviewCompositor::default();
        let mut session = Session::default();
        assert!(compositor.recompose(&session).is_some());
        assert!(compositor.recompose(&session).is_none());
        session.set_content(EditorPane::Style, "body{}");
        let doc = compositor.recompose(&session).map(str::to_owned);
        assert!(doc.is_some_and(|d| d.contains("body{}")));
        assert_eq!(compositor.current().map(|d| d.contains("body{}")), Some(true));
    }
}
