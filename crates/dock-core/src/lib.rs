use std::collections::HashMap;

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Borders are inclusive, so a point on a shared edge hits both rects.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel tolerance used when deciding whether two edges coincide.
pub const DEFAULT_EDGE_TOLERANCE: f32 = 1.0;

/// Returns true if two edge coordinates differ by at most `tolerance` pixels.
pub fn edges_touch(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Fractions that carve a rect into the five drop regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneThresholds {
    /// Width of each edge band, as a fraction of the relevant dimension.
    pub edge_fraction: f32,
    /// Size of the centered box, as a fraction of each dimension.
    pub center_fraction: f32,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            edge_fraction: 0.2,
            center_fraction: 0.6,
        }
    }
}

/// Classify `point` against `rect`.
///
/// Regions are checked in the order of [`DropZone::ALL`]: top, right, bottom,
/// left, center. At a corner the first matching edge wins, so top beats left
/// and right beats bottom. Returns `None` when the point is outside the rect
/// or falls between the edge bands and the center box.
pub fn region_of(point: Vec2, rect: Rect, thresholds: ZoneThresholds) -> Option<DropZone> {
    if !rect.contains(point) {
        return None;
    }

    let edge_w = rect.width * thresholds.edge_fraction;
    let edge_h = rect.height * thresholds.edge_fraction;
    let center_w = rect.width * thresholds.center_fraction;
    let center_h = rect.height * thresholds.center_fraction;
    let center_x = rect.x + (rect.width - center_w) / 2.0;
    let center_y = rect.y + (rect.height - center_h) / 2.0;

    DropZone::ALL.into_iter().find(|zone| match zone {
        DropZone::Top => point.y - rect.top() <= edge_h,
        DropZone::Right => rect.right() - point.x <= edge_w,
        DropZone::Bottom => rect.bottom() - point.y <= edge_h,
        DropZone::Left => point.x - rect.left() <= edge_w,
        DropZone::Center => {
            point.x >= center_x
                && point.x <= center_x + center_w
                && point.y >= center_y
                && point.y <= center_y + center_h
        }
    })
}

/// A point inside `rect` that [`region_of`] classifies as `zone`: the middle
/// of an edge band, or the rect's center.
pub fn zone_anchor(rect: Rect, zone: DropZone, thresholds: ZoneThresholds) -> Vec2 {
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;
    let band_w = rect.width * thresholds.edge_fraction / 2.0;
    let band_h = rect.height * thresholds.edge_fraction / 2.0;
    match zone {
        DropZone::Top => Vec2::new(cx, rect.top() + band_h),
        DropZone::Right => Vec2::new(rect.right() - band_w, cy),
        DropZone::Bottom => Vec2::new(cx, rect.bottom() - band_h),
        DropZone::Left => Vec2::new(rect.left() + band_w, cy),
        DropZone::Center => Vec2::new(cx, cy),
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type PanelId = String;

/// A half-open span of grid cells: rows `row_start..row_end`, columns
/// `col_start..col_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridArea {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl GridArea {
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn col_span(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        row >= self.row_start && row < self.row_end && col >= self.col_start && col < self.col_end
    }
}

// ──────────────────────────────────────────────
// Drop zones
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropZone {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl DropZone {
    /// Evaluation order used by [`region_of`].
    pub const ALL: [DropZone; 5] = [
        DropZone::Top,
        DropZone::Right,
        DropZone::Bottom,
        DropZone::Left,
        DropZone::Center,
    ];

    pub fn is_edge(self) -> bool {
        self != DropZone::Center
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DropZone::Top => "top",
            DropZone::Right => "right",
            DropZone::Bottom => "bottom",
            DropZone::Left => "left",
            DropZone::Center => "center",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        DropZone::ALL.into_iter().find(|zone| zone.as_str() == name)
    }
}

/// Which edges of the dragged panel currently touch the target's opposite edge.
/// Each flag names the drop zone that would be redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjacencyResult {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl AdjacencyResult {
    /// Whether an edge drop into `zone` would recreate an existing border.
    /// Center is never redundant.
    pub fn blocks(&self, zone: DropZone) -> bool {
        match zone {
            DropZone::Top => self.top,
            DropZone::Right => self.right,
            DropZone::Bottom => self.bottom,
            DropZone::Left => self.left,
            DropZone::Center => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDecision {
    pub target: PanelId,
    pub zone: DropZone,
    pub valid: bool,
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { position: Vec2 },
    KeyDown { key: Key },
    /// A sibling resize controller claimed the pointer.
    ResizeStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Grabbing,
    NoDrop,
    ColResize,
    RowResize,
}

// ──────────────────────────────────────────────
// Trait: RectSource
// ──────────────────────────────────────────────

/// Live bounding rectangles by panel id. Lookups of unknown ids return `None`.
pub trait RectSource {
    fn rect_of(&self, id: &str) -> Option<Rect>;
}

impl RectSource for [(PanelId, Rect)] {
    fn rect_of(&self, id: &str) -> Option<Rect> {
        self.iter().find(|(pid, _)| pid == id).map(|(_, r)| *r)
    }
}

impl RectSource for Vec<(PanelId, Rect)> {
    fn rect_of(&self, id: &str) -> Option<Rect> {
        self.as_slice().rect_of(id)
    }
}

impl RectSource for HashMap<PanelId, Rect> {
    fn rect_of(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

// ──────────────────────────────────────────────
// Trait: PanelElement
// ──────────────────────────────────────────────

/// The on-screen element behind a panel. The engine only needs its bounds,
/// the bounds of its draggable header, and a way to assign its grid area.
pub trait PanelElement {
    fn bounds(&self) -> Rect;
    fn header_bounds(&self) -> Rect;
    fn set_grid_area(&mut self, area: Option<GridArea>);
}

// ──────────────────────────────────────────────
// Trait: GridSurface
// ──────────────────────────────────────────────

/// The container the grid template is committed to.
pub trait GridSurface {
    /// `areas` holds one whitespace-separated row per entry.
    fn set_template(&mut self, areas: &[String], columns: &str, rows: &str);
    /// The container box the grid is laid out in.
    fn bounds(&self) -> Rect;
    /// Publish a size variable (`--outliner-width` etc.) used by `var()` tracks.
    fn set_variable(&mut self, _name: &str, _px: f32) {}
    fn set_cursor(&mut self, _cursor: CursorIcon) {}
}

// ──────────────────────────────────────────────
// Trait: KeyValueStore
// ──────────────────────────────────────────────

/// Durable string storage. Implementations log their own I/O failures.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> bool;
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
