#![forbid(unsafe_code)]

//! Per-pane visibility.
//!
//! [`Visibility`] is the explicit shown/hidden value the presentation layer
//! reads for each pane; [`PaneVisibility`] holds one value per
//! [`PaneRole`].
//!
//! # Invariants
//!
//! 1. At most one custom pane exists, so the custom slot is a single value.
//! 2. `PaneVisibility::from_active(a)` shows exactly the roles whose ids are
//!    in `a` (custom counts when `a` is a custom singleton).
//!
//! # Failure Modes
//!
//! None; all operations are infallible.

use livepane_core::{ActiveSet, PaneId, PaneRole};
use serde::Serialize;

/// Whether a pane (or a divider group) is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    #[must_use]
    pub const fn from_bool(shown: bool) -> Self {
        if shown { Self::Shown } else { Self::Hidden }
    }

    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    #[must_use]
    pub const fn is_hidden(self) -> bool {
        !self.is_shown()
    }
}

impl core::fmt::Display for Visibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Shown => "shown",
            Self::Hidden => "hidden",
        })
    }
}

/// Visibility of every pane role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaneVisibility {
    pub markup: Visibility,
    pub style: Visibility,
    pub script: Visibility,
    pub preview: Visibility,
    pub custom: Visibility,
}

impl PaneVisibility {
    /// Everything hidden.
    pub const HIDDEN: Self = Self {
        markup: Visibility::Hidden,
        style: Visibility::Hidden,
        script: Visibility::Hidden,
        preview: Visibility::Hidden,
        custom: Visibility::Hidden,
    };

    #[must_use]
    pub fn from_active(active: ActiveSet) -> Self {
        Self {
            markup: Visibility::from_bool(active.contains(PaneId::MARKUP)),
            style: Visibility::from_bool(active.contains(PaneId::STYLE)),
            script: Visibility::from_bool(active.contains(PaneId::SCRIPT)),
            preview: Visibility::from_bool(active.has_preview()),
            custom: Visibility::from_bool(active.is_custom_mode()),
        }
    }

    #[must_use]
    pub const fn get(&self, role: PaneRole) -> Visibility {
        match role {
            PaneRole::Markup => self.markup,
            PaneRole::Style => self.style,
            PaneRole::Script => self.script,
            PaneRole::Preview => self.preview,
            PaneRole::Custom => self.custom,
        }
    }

    /// Shown roles in declaration order.
    pub fn shown(&self) -> impl Iterator<Item = PaneRole> + '_ {
        PaneRole::ALL
            .into_iter()
            .filter(move |&role| self.get(role).is_shown())
    }

    /// Number of shown panes.
    #[must_use]
    pub fn count_shown(&self) -> usize {
        self.shown().count()
    }
}

impl Default for PaneVisibility {
    fn default() -> Self {
        Self::from_active(ActiveSet::DEFAULT)
    }
}
