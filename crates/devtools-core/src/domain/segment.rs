//! Render segments — the unit of captured terminal output.
//!
//! A capture surface renders application objects into an ordered sequence of
//! [`Segment`]s. A segment is a run of text that shares one style; a styled
//! line of output is typically several segments followed by a `"\n"` segment.
//!
//! Segments are deliberately dumb data: they carry no layout information and
//! no knowledge of how they are encoded for transport. The wire
//! representation lives in [`crate::protocol::codec`].

use serde::{Deserialize, Serialize};

/// One run of captured text plus the style it was rendered with.
///
/// `style: None` means "the surface's default style" — the common case for
/// plain `Display` rendering, and cheaper on the wire than an explicit
/// default style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The text content of this run. May be empty and may contain newlines
    /// only as the dedicated `"\n"` line-break segments a surface emits.
    pub text: String,
    /// Style applied to the whole run, if any.
    pub style: Option<SegmentStyle>,
}

impl Segment {
    /// Creates an unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Creates a segment with an explicit style.
    pub fn styled(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Returns the dedicated line-break segment.
    pub fn line_break() -> Self {
        Self::plain("\n")
    }
}

/// Style attributes for a [`Segment`].
///
/// A small, flat model: a color name (as the server's styling engine
/// understands it, e.g. `"red"` or `"#ff8700"`) plus the three attribute
/// flags terminals agree on. Everything defaults to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStyle {
    /// Foreground color name or hex triplet; `None` inherits the default.
    pub color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl SegmentStyle {
    /// Returns a style with only the foreground color set.
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
