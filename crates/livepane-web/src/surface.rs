#![forbid(unsafe_code)]

//! Collaborator seams between the playground runtime and its host.
//!
//! The runtime never touches a browser directly. A host (the wasm runner,
//! or a test) implements these traits over whatever it has: editor widgets,
//! an iframe, the history API.
//!
//! In-memory implementations are provided for native hosts and tests.

/// A text editor widget bound to one pane.
pub trait EditorSurface {
    /// Current text.
    fn value(&self) -> String;

    /// Replace the text without emitting a change event.
    fn set_value(&mut self, text: &str);

    /// Switch syntax highlighting to `tag` (`"html"`, `"python"`, ...).
    fn set_language(&mut self, tag: &str);
}

/// An isolated document renderer (the preview frame).
pub trait RenderSurface {
    /// Replace the rendered document.
    fn render(&mut self, document: &str);
}

/// The browser history entry for the current page.
pub trait HistorySink {
    /// Replace the current entry's path without adding a new entry.
    fn replace_state(&mut self, path: &str);
}

/// Editor that keeps its text and language in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEditor {
    pub text: String,
    pub language: String,
}

impl EditorSurface for MemoryEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn set_language(&mut self, tag: &str) {
        tag.clone_into(&mut self.language);
    }
}

/// Render target that records every document it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFrame {
    pub renders: Vec<String>,
}

impl MemoryFrame {
    /// The document currently shown.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.renders.last().map(String::as_str)
    }
}

impl RenderSurface for MemoryFrame {
    fn render(&mut self, document: &str) {
        self.renders.push(document.to_owned());
    }
}

/// History that records replaced paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    pub replaced: Vec<String>,
}

impl MemoryHistory {
    /// The path currently in the address bar.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.replaced.last().map(String::as_str)
    }
}

impl HistorySink for MemoryHistory {
    fn replace_state(&mut self, path: &str) {
        self.replaced.push(path.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_surfaces_record_latest() {
        let mut frame = MemoryFrame::default();
        assert_eq!(frame.current(), None);
        frame.render("<p>a</p>");
        frame.render("<p>b</p>");
        assert_eq!(frame.current(), Some("<p>b</p>"));

        let mut history = MemoryHistory::default();
        history.replace_state("/x");
        assert_eq!(history.current(), Some("/x"));

        let mut editor = MemoryEditor::default();
        editor.set_value("print(1)");
        editor.set_language("python");
        assert_eq!(editor.value(), "print(1)");
        assert_eq!(editor.language, "python");
    }
}
