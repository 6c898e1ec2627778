#![forbid(unsafe_code)]

//! Grid track templates.
//!
//! Sizes are stored in tenths of a percent so the fixed splits
//! (`49.5 / 1 / 49.5`, `32.6 / 1 / 32.6 / 1 / 32.6`) are exact. A template
//! alternates pane tracks and 1%-wide gutter tracks that host the drag
//! handles.

use serde::Serialize;

/// Gutter width, in tenths of a percent.
pub const GUTTER_TENTHS: u16 = 10;

/// One grid track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tenths", rename_all = "snake_case")]
pub enum Track {
    /// A track holding a pane.
    Pane(u16),
    /// A drag-handle track between two panes.
    Gutter(u16),
}

impl Track {
    #[must_use]
    pub const fn tenths(self) -> u16 {
        match self {
            Self::Pane(t) | Self::Gutter(t) => t,
        }
    }

    #[must_use]
    pub const fn is_gutter(self) -> bool {
        matches!(self, Self::Gutter(_))
    }
}

impl core::fmt::Display for Track {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tenths = self.tenths();
        let (whole, frac) = (tenths / 10, tenths % 10);
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{frac}%")
        }
    }
}

/// An ordered list of tracks along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackTemplate {
    tracks: Vec<Track>,
}

impl TrackTemplate {
    /// `n` equal pane tracks separated by gutters.
    ///
    /// Supported pane counts are 1, 2 and 3; anything else is clamped into
    /// that range.
    #[must_use]
    pub fn equal(panes: usize) -> Self {
        let count = panes.clamp(1, 3);
        let pane = match count {
            1 => 1000,
            2 => 495,
            _ => 326,
        };
        let mut tracks = Vec::with_capacity(count * 2 - 1);
        for i in 0..count {
            if i > 0 {
                tracks.push(Track::Gutter(GUTTER_TENTHS));
            }
            tracks.push(Track::Pane(pane));
        }
        Self { tracks }
    }

    /// A single full-size track.
    #[must_use]
    pub fn full() -> Self {
        Self::equal(1)
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of pane tracks.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.tracks.iter().filter(|t| !t.is_gutter()).count()
    }

    /// Number of gutter tracks (drag handles).
    #[must_use]
    pub fn gutter_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_gutter()).count()
    }

    /// CSS `grid-template-*` value, e.g. `"49.5% 1% 49.5%"`.
    #[must_use]
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for TrackTemplate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, track) in self.tracks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{track}")?;
        }
        Ok(())
    }
}
