#![forbid(unsafe_code)]

//! Share texts and the control policy.
//!
//! Share links and the embed snippet are built from the canonical path, so
//! a link copied from an embedded page opens the full editor and an embed
//! snippet never nests the marker twice.

use core::time::Duration;

use livepane_core::EditorPane;
use serde::Serialize;

/// How long the "copied!" confirmation stays visible.
pub const COPIED_TOOLTIP: Duration = Duration::from_millis(1000);

/// What a copy action copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pane", rename_all = "snake_case")]
pub enum CopyTarget {
    /// The page URL.
    Link,
    /// The iframe snippet.
    Embed,
    /// One pane's plain text.
    Pane(EditorPane),
}

impl CopyTarget {
    /// Where the confirmation tooltip sits relative to its button.
    #[must_use]
    pub const fn tooltip_placement(self) -> TooltipPlacement {
        match self {
            Self::Link | Self::Embed => TooltipPlacement::Top,
            Self::Pane(_) => TooltipPlacement::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipPlacement {
    Top,
    Bottom,
    Left,
    Right,
}

/// `origin` followed by `path`, tolerating a trailing `/` on the origin.
#[must_use]
pub fn page_url(origin: &str, path: &str) -> String {
    format!("{}{path}", origin.trim_end_matches('/'))
}

/// URL of the embedded view of `canonical_path`.
#[must_use]
pub fn embed_url(origin: &str, embed_marker: &str, canonical_path: &str) -> String {
    format!(
        "{}/{embed_marker}{canonical_path}",
        origin.trim_end_matches('/')
    )
}

/// HTML snippet that embeds `src` in another page.
#[must_use]
pub fn embed_snippet(src: &str, min_size_px: u32) -> String {
    format!(
        r#"<iframe src="{src}" style="width: 100%; min-width: {min_size_px}px; min-height: {min_size_px}px;" frameborder="0" allow="clipboard-write;" loading="lazy"></iframe>"#
    )
}

/// Which interactive controls the presentation layer should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// Layout dialog, per-pane toggles and the custom selector.
    pub layout_toggles: bool,
    /// Copy link and copy embed snippet.
    pub share: bool,
    pub open_in_new_tab: bool,
}

impl Controls {
    pub const FULL: Self = Self {
        layout_toggles: true,
        share: true,
        open_in_new_tab: true,
    };

    /// Embedded pages keep only "open in new tab".
    pub const EMBEDDED: Self = Self {
        layout_toggles: false,
        share: false,
        open_in_new_tab: true,
    };

    #[must_use]
    pub const fn for_embedded(embedded: bool) -> Self {
        if embedded { Self::EMBEDDED } else { Self::FULL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_url_joins_origin_and_path() {
        assert_eq!(page_url("https://p.dev", "/MSw0"), "https://p.dev/MSw0");
        assert_eq!(page_url("https://p.dev/", "/MSw0"), "https://p.dev/MSw0");
    }

    #[test]
    fn embed_snippet_format() {
        let src = embed_url("https://p.dev", "embed", "/NA==");
        assert_eq!(src, "https://p.dev/embed/NA==");
        assert_eq!(
            embed_snippet(&src, 500),
            concat!(
                r#"<iframe src="https://p.dev/embed/NA==" "#,
                r#"style="width: 100%; min-width: 500px; min-height: 500px;" "#,
                r#"frameborder="0" allow="clipboard-write;" loading="lazy"></iframe>"#
            )
        );
    }

    #[test]
    fn embedded_mode_keeps_only_open() {
        assert_eq!(Controls::for_embedded(false), Controls::FULL);
        let embedded = Controls::for_embedded(true);
        assert!(!embedded.layout_toggles);
        assert!(!embedded.share);
        assert!(embedded.open_in_new_tab);
    }

    #[test]
    fn tooltip_placement_by_target() {
        assert_eq!(CopyTarget::Link.tooltip_placement(), TooltipPlacement::Top);
        assert_eq!(
            CopyTarget::Pane(EditorPane::Style).tooltip_placement(),
            TooltipPlacement::Left
        );
    }
}
