#![forbid(unsafe_code)]

//! The set of visible panes.
//!
//! [`ActiveSet`] stores pane ids as a bitmask (bit `n` = id `n`), which makes
//! ordering a property of the ids themselves: iteration and the serialized
//! form are always ascending.
//!
//! # Invariants
//!
//! 1. A set is either a subset of the standard ids `{1,2,3,4}` or the
//!    singleton `{k}` for one custom-language id `k > 4`.
//! 2. Every constructor normalizes: a mix of standard and custom ids keeps
//!    only the lowest custom id, and several custom ids keep only the lowest.
//! 3. `ActiveSet::parse(&set.serialize())` reproduces `set` whenever `set`
//!    is non-empty.
//!
//! # Failure Modes
//!
//! [`ActiveSet::parse`] returns `None` when no known id is present; callers
//! substitute [`ActiveSet::DEFAULT`].

use serde::Serialize;

use crate::pane::{CustomLanguage, PaneId};

const STANDARD_MASK: u16 = 0b1_1110;

/// Ordered set of active pane ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ActiveSet {
    bits: u16,
}

impl ActiveSet {
    /// No pane visible.
    pub const EMPTY: Self = Self { bits: 0 };

    /// All four standard panes, used for an empty or unusable URL path.
    pub const DEFAULT: Self = Self {
        bits: STANDARD_MASK,
    };

    /// Build a normalized set from arbitrary known ids.
    pub fn from_ids(ids: impl IntoIterator<Item = PaneId>) -> Self {
        let mut bits = 0u16;
        for id in ids {
            bits |= 1u16 << id.get();
        }
        Self::normalize_bits(bits)
    }

    /// Singleton custom-language set.
    #[must_use]
    pub const fn custom(language: &CustomLanguage) -> Self {
        Self {
            bits: 1u16 << language.id,
        }
    }

    const fn normalize_bits(bits: u16) -> Self {
        let custom = bits & !STANDARD_MASK & !1;
        if custom == 0 {
            return Self { bits };
        }
        // Keep the lowest custom id only.
        Self {
            bits: custom & custom.wrapping_neg(),
        }
    }

    /// Parse a comma-joined list of decimal ids.
    ///
    /// Whitespace around items is ignored, as are unknown or non-numeric
    /// items. Returns `None` when nothing usable remains.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let set = Self::from_ids(
            text.split(',')
                .filter_map(|item| item.trim().parse::<u32>().ok())
                .filter_map(|raw| PaneId::new(raw).ok()),
        );
        (!set.is_empty()).then_some(set)
    }

    /// Parse, falling back to [`Self::DEFAULT`].
    #[must_use]
    pub fn parse_or_default(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::DEFAULT)
    }

    /// Comma-joined ascending ids, e.g. `"1,2,3,4"`.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for id in self.iter() {
            if !out.is_empty() {
                out.push(',');
            }
            out.push_str(&id.to_string());
        }
        out
    }

    #[must_use]
    pub const fn contains(&self, id: PaneId) -> bool {
        self.bits & (1u16 << id.get()) != 0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn has_preview(&self) -> bool {
        self.contains(PaneId::PREVIEW)
    }

    /// The set without the preview pane.
    #[must_use]
    pub const fn others(&self) -> Self {
        Self {
            bits: self.bits & !(1u16 << PaneId::PREVIEW.get()),
        }
    }

    /// The active custom-language id, if the set is a custom singleton.
    #[must_use]
    pub fn custom_id(&self) -> Option<PaneId> {
        self.iter().find(|id| id.is_custom())
    }

    /// Catalog entry of the active custom language.
    #[must_use]
    pub fn custom_language(&self) -> Option<&'static CustomLanguage> {
        self.custom_id().and_then(PaneId::custom_language)
    }

    #[must_use]
    pub fn is_custom_mode(&self) -> bool {
        self.custom_id().is_some()
    }

    /// This set with one standard id added or removed.
    ///
    /// A custom id, if present, is dropped: standard panes and custom mode
    /// never coexist.
    #[must_use]
    pub const fn with_standard(&self, id: PaneId, on: bool) -> Self {
        let standard = self.bits & STANDARD_MASK;
        let bit = 1u16 << id.get();
        let bits = if on { standard | bit } else { standard & !bit };
        Self {
            bits: bits & STANDARD_MASK,
        }
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PaneId> + '_ {
        let bits = self.bits;
        (1u32..16)
            .filter(move |n| bits & (1u16 << n) != 0)
            .filter_map(|n| PaneId::new(n).ok())
    }
}

impl Default for ActiveSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<ActiveSet> for String {
    fn from(set: ActiveSet) -> Self {
        set.serialize()
    }
}

impl core::fmt::Display for ActiveSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::CUSTOM_LANGUAGES;
    use pretty_assertions::assert_eq;

    fn id(raw: u32) -> PaneId {
        PaneId::new(raw).unwrap()
    }

    #[test]
    fn default_is_all_standard_panes() {
        assert_eq!(ActiveSet::DEFAULT.serialize(), "1,2,3,4");
        assert_eq!(ActiveSet::default(), ActiveSet::DEFAULT);
        assert_eq!(ActiveSet::DEFAULT.len(), 4);
    }

    #[test]
    fn serialize_is_ascending_regardless_of_input_order() {
        let set = ActiveSet::from_ids([id(4), id(1), id(3)]);
        assert_eq!(set.serialize(), "1,3,4");
        assert_eq!(ActiveSet::parse("3, 1,4").unwrap(), set);
    }

    #[test]
    fn parse_skips_unknown_items() {
        assert_eq!(ActiveSet::parse("1,99,x,2").unwrap().serialize(), "1,2");
        assert_eq!(ActiveSet::parse(""), None);
        assert_eq!(ActiveSet::parse("0,42"), None);
        assert_eq!(ActiveSet::parse_or_default("garbage"), ActiveSet::DEFAULT);
    }

    #[test]
    fn custom_id_wins_over_standard_ids() {
        let set = ActiveSet::parse("1,2,7").unwrap();
        assert_eq!(set.serialize(), "7");
        assert_eq!(set.custom_language().unwrap().name, "python");
        assert!(set.is_custom_mode());
    }

    #[test]
    fn lowest_custom_id_is_kept() {
        assert_eq!(ActiveSet::parse("12,9").unwrap().serialize(), "9");
    }

    #[test]
    fn custom_constructor_is_singleton() {
        for entry in &CUSTOM_LANGUAGES {
            let set = ActiveSet::custom(entry);
            assert_eq!(set.len(), 1);
            assert_eq!(set.custom_id(), Some(entry.pane_id()));
            assert!(!set.has_preview());
        }
    }

    #[test]
    fn others_removes_preview_only() {
        let set = ActiveSet::DEFAULT.others();
        assert_eq!(set.serialize(), "1,2,3");
        assert!(ActiveSet::parse("4").unwrap().others().is_empty());
    }

    #[test]
    fn with_standard_clears_custom() {
        let python = ActiveSet::parse("7").unwrap();
        let set = python.with_standard(PaneId::MARKUP, true);
        assert_eq!(set.serialize(), "1");
        assert!(!set.is_custom_mode());
    }

    #[test]
    fn with_standard_toggles_membership() {
        let set = ActiveSet::DEFAULT.with_standard(PaneId::STYLE, false);
        assert_eq!(set.serialize(), "1,3,4");
        assert_eq!(set.with_standard(PaneId::STYLE, true), ActiveSet::DEFAULT);
    }

    #[test]
    fn empty_set_serializes_to_empty_string() {
        assert_eq!(ActiveSet::EMPTY.serialize(), "");
        assert_eq!(ActiveSet::EMPTY.to_string(), "");
        assert!(ActiveSet::EMPTY.is_empty());
    }
}
