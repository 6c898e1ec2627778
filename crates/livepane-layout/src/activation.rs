#![forbid(unsafe_code)]

//! Layout toggles and the custom-language selector.
//!
//! Two controls mutate the active-set:
//!
//! - a per-pane toggle for each standard pane, which flips that pane and
//!   leaves custom mode if it was active;
//! - the custom-language selector, which either enters custom mode (the set
//!   becomes the singleton custom id) or, on the "none" choice, restores all
//!   four standard panes.
//!
//! Flipping one standard pane never enters custom mode, and custom mode never
//! keeps a standard pane.

use livepane_core::{ActiveSet, PaneId};
use serde::Serialize;

/// One user action on the layout controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Activation {
    /// Flip one pane. A custom id here behaves like selecting it.
    Toggle(PaneId),
    /// Pick a custom language, or `None` for the "none" choice.
    SelectCustom(Option<PaneId>),
}

/// Apply `activation` to `active`, returning the new normalized set.
#[must_use]
pub fn apply(active: ActiveSet, activation: Activation) -> ActiveSet {
    match activation {
        Activation::Toggle(id) if id.is_custom() => select_custom(active, Some(id)),
        Activation::Toggle(id) => toggle_pane(active, id),
        Activation::SelectCustom(choice) => select_custom(active, choice),
    }
}

/// Flip a standard pane.
///
/// In custom mode no standard pane is on, so the result is the singleton of
/// the toggled pane.
#[must_use]
pub fn toggle_pane(active: ActiveSet, id: PaneId) -> ActiveSet {
    if id.is_custom() {
        return active;
    }
    active.with_standard(id, !active.contains(id))
}

/// Handle the custom-language selector.
#[must_use]
pub fn select_custom(active: ActiveSet, choice: Option<PaneId>) -> ActiveSet {
    match choice.and_then(PaneId::custom_language) {
        Some(language) => ActiveSet::custom(language),
        None if active.is_custom_mode() => ActiveSet::DEFAULT,
        None => active,
    }
}
