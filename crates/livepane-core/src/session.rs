#![forbid(unsafe_code)]

//! The live session record: active-set plus per-pane text.

use crate::active_set::ActiveSet;
use crate::pane::{EditorPane, PLAINTEXT};

/// One playground session.
///
/// Created once at load, mutated by every edit or layout toggle, and
/// abandoned on navigation. Owned by exactly one state holder; nothing here
/// is shared or synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    active: ActiveSet,
    contents: [String; 4],
    embedded: bool,
}

impl Session {
    /// A session with the given layout and empty content.
    #[must_use]
    pub fn new(active: ActiveSet) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn active(&self) -> ActiveSet {
        self.active
    }

    pub fn set_active(&mut self, active: ActiveSet) {
        self.active = active;
    }

    #[must_use]
    pub fn content(&self, pane: EditorPane) -> &str {
        &self.contents[pane.index()]
    }

    /// Replace a pane's content. Returns `true` if the text changed.
    pub fn set_content(&mut self, pane: EditorPane, text: impl Into<String>) -> bool {
        let text = text.into();
        let slot = &mut self.contents[pane.index()];
        if *slot == text {
            return false;
        }
        *slot = text;
        true
    }

    /// Whether every pane is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.iter().all(String::is_empty)
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn set_embedded(&mut self, embedded: bool) {
        self.embedded = embedded;
    }

    /// Language tag for the custom pane under the current layout.
    #[must_use]
    pub fn custom_language_tag(&self) -> &'static str {
        self.active
            .custom_language()
            .map_or(PLAINTEXT, |entry| entry.language)
    }

    /// Language tag for any editor pane under the current layout.
    #[must_use]
    pub fn language_tag(&self, pane: EditorPane) -> &'static str {
        match pane {
            EditorPane::Custom => self.custom_language_tag(),
            other => other.default_language(),
        }
    }

    /// Contents in URL field order.
    pub fn contents(&self) -> impl Iterator<Item = (EditorPane, &str)> {
        EditorPane::ALL
            .into_iter()
            .map(move |pane| (pane, self.content(pane)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_session_is_empty_with_all_standard_panes() {
        let session = Session::default();
        assert_eq!(session.active(), ActiveSet::DEFAULT);
        assert!(session.is_empty());
        assert!(!session.is_embedded());
        for pane in EditorPane::ALL {
            assert_eq!(session.content(pane), "");
        }
    }

    #[test]
    fn set_content_reports_changes() {
        let mut session = Session::default();
        assert!(session.set_content(EditorPane::Markup, "<p>hi</p>"));
        assert!(!session.set_content(EditorPane::Markup, "<p>hi</p>"));
        assert_eq!(session.content(EditorPane::Markup), "<p>hi</p>");
        assert!(!session.is_empty());
    }

    #[test]
    fn custom_only_content_is_not_empty() {
        let mut session = Session::default();
        session.set_content(EditorPane::Custom, "print(1)");
        assert!(!session.is_empty());
    }

    #[test]
    fn custom_language_follows_active_set() {
        let mut session = Session::default();
        assert_eq!(session.custom_language_tag(), "plaintext");
        session.set_active(ActiveSet::parse("12").unwrap());
        assert_eq!(session.language_tag(EditorPane::Custom), "typescript");
        assert_eq!(session.language_tag(EditorPane::Style), "css");
    }

    #[test]
    fn contents_iterates_in_field_order() {
        let mut session = Session::default();
        session.set_content(EditorPane::Script, "s");
        session.set_content(EditorPane::Markup, "m");
        let fields: Vec<_> = session.contents().map(|(_, text)| text).collect();
        assert_eq!(fields, vec!["m", "", "s", ""]);
    }
}
