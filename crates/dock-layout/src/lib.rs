// Grid layout engine for the panel dock.
// A layout is an area matrix plus column/row tracks; the mutator derives a
// new gapless layout from a drop, the registry holds the named presets.

mod description;
mod mutate;
mod registry;
mod track;

use std::fmt;

pub use description::{GridGeometry, LayoutDescription};
pub use mutate::{mutate, split_columns, split_rows, RecipeTable, SplitRecipe, STANDARD_SPLIT_TARGETS};
pub use registry::{
    both_stacked_layout, default_layout, left_stacked_layout, right_stacked_layout,
    LayoutRegistry, DEFAULT_PRESET,
};
pub use track::{format_tracks, parse_track, parse_tracks, track_sizes, SizeVariables, Track};

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    Empty,
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    EmptyCell {
        row: usize,
        col: usize,
    },
    TrackCount {
        axis: &'static str,
        expected: usize,
        found: usize,
    },
    NonRectangular(String),
    InvalidTrack(String),
    UnknownPanel(String),
    MissingPanel(String),
    UnknownPreset(String),
    ReservedName(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no cells"),
            LayoutError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {} has {} cells, expected {}", row, found, expected),
            LayoutError::EmptyCell { row, col } => {
                write!(f, "cell ({}, {}) is not assigned to a panel", row, col)
            }
            LayoutError::TrackCount {
                axis,
                expected,
                found,
            } => write!(f, "{} has {} tracks, expected {}", axis, found, expected),
            LayoutError::NonRectangular(name) => {
                write!(f, "area '{}' does not form a rectangle", name)
            }
            LayoutError::InvalidTrack(text) => write!(f, "invalid track size '{}'", text),
            LayoutError::UnknownPanel(name) => write!(f, "unknown panel '{}'", name),
            LayoutError::MissingPanel(name) => write!(f, "panel '{}' is not placed", name),
            LayoutError::UnknownPreset(name) => write!(f, "unknown preset '{}'", name),
            LayoutError::ReservedName(name) => write!(f, "preset name '{}' is reserved", name),
        }
    }
}

impl std::error::Error for LayoutError {}

// ──────────────────────────────────────────────
// Trait: LayoutObserver
// ──────────────────────────────────────────────

/// Notified after a new layout has been committed.
pub trait LayoutObserver {
    fn layout_changed(&mut self, old: &LayoutDescription, new: &LayoutDescription);
}
