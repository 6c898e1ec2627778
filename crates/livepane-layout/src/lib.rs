#![forbid(unsafe_code)]

//! Layout engine: active-set in, grid geometry and pane visibility out.
//!
//! The grid has at most two columns: the editor column (markup, style,
//! script, or the custom pane, stacked in rows) and the preview column.
//!
//! | Active-set          | Columns                    | Editor rows | Row dividers |
//! |---------------------|----------------------------|-------------|--------------|
//! | `{4}`               | 1 (`100%`)                 | 1           | hidden       |
//! | `{1,4}`             | 2 (`49.5% 1% 49.5%`)       | 1           | shown        |
//! | `{1,2,3,4}`         | 2                          | 3           | shown        |
//! | `{1,2}`             | 1                          | 2           | shown        |
//! | `{7}` (custom)      | 1                          | 1           | shown        |
//!
//! [`plan`] is a pure function of the active-set and is idempotent:
//! `plan(plan(a).active) == plan(a)`.

pub mod activation;
pub mod tracks;
pub mod visibility;

use livepane_core::pane::CustomLanguage;
use livepane_core::{ActiveSet, PaneId, PaneRole};
use serde::Serialize;

pub use activation::{Activation, apply, select_custom, toggle_pane};
pub use tracks::{Track, TrackTemplate};
pub use visibility::{PaneVisibility, Visibility};

/// Column arrangement of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnLayout {
    /// One full-width column (preview alone, or editors without preview).
    Single,
    /// Editor column, drag handle, preview column.
    Split,
}

impl ColumnLayout {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Split => 2,
        }
    }

    #[must_use]
    pub fn template(self) -> TrackTemplate {
        TrackTemplate::equal(self.count())
    }
}

/// Geometry and visibility derived from one active-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// The normalized active-set this plan was computed from.
    pub active: ActiveSet,
    pub visibility: PaneVisibility,
    pub columns: ColumnLayout,
    /// Column tracks, e.g. `49.5% 1% 49.5%`.
    pub column_template: TrackTemplate,
    /// Rows of the editor column, 1 to 3.
    pub rows: usize,
    /// Row tracks of the editor column.
    pub row_template: TrackTemplate,
    /// Editor panes in row order, top to bottom.
    pub row_panes: Vec<PaneRole>,
    /// The editor column with its row drag handles. Hidden exactly when the
    /// preview is the only active pane.
    pub row_dividers: Visibility,
    /// Active custom-language entry, if in custom mode.
    pub custom: Option<CustomLanguage>,
}

impl LayoutPlan {
    /// Icon asset path for the custom pane badge.
    #[must_use]
    pub fn custom_icon(&self) -> Option<String> {
        self.custom.as_ref().map(CustomLanguage::icon_path)
    }
}

/// Compute the layout for an active-set.
#[must_use]
pub fn plan(active: ActiveSet) -> LayoutPlan {
    let others = active.others();
    let has_preview = active.has_preview();

    let columns = if has_preview && !others.is_empty() {
        ColumnLayout::Split
    } else {
        ColumnLayout::Single
    };
    let preview_alone = has_preview && others.is_empty();

    let rows = others.len().clamp(1, 3);
    let row_panes = others.iter().map(PaneId::role).collect();

    LayoutPlan {
        active,
        visibility: PaneVisibility::from_active(active),
        columns,
        column_template: columns.template(),
        rows,
        row_template: TrackTemplate::equal(rows),
        row_panes,
        row_dividers: Visibility::from_bool(!preview_alone),
        custom: active.custom_language().copied(),
    }
}

/// Owner of the current layout plan.
///
/// Every activation re-runs [`plan`]; the engine reports whether the
/// active-set actually changed so callers can skip redundant work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEngine {
    plan: LayoutPlan,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(active: ActiveSet) -> Self {
        Self {
            plan: plan(active),
        }
    }

    #[must_use]
    pub const fn plan(&self) -> &LayoutPlan {
        &self.plan
    }

    #[must_use]
    pub const fn active(&self) -> ActiveSet {
        self.plan.active
    }

    /// Apply one activation. Returns `true` if the active-set changed.
    pub fn activate(&mut self, activation: Activation) -> bool {
        self.reset(apply(self.plan.active, activation))
    }

    /// Flip a pane; see [`toggle_pane`].
    pub fn toggle(&mut self, id: PaneId) -> bool {
        self.activate(Activation::Toggle(id))
    }

    /// Handle the custom selector; see [`select_custom`].
    pub fn select_custom(&mut self, choice: Option<PaneId>) -> bool {
        self.activate(Activation::SelectCustom(choice))
    }

    /// Replace the active-set outright. Returns `true` if it changed.
    pub fn reset(&mut self, active: ActiveSet) -> bool {
        if active == self.plan.active {
            return false;
        }
        self.plan = plan(active);
        true
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(ActiveSet::DEFAULT)
    }
}
