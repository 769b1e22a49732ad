// Layout mutator: turns a drop (dragged, target, zone) into a new layout.
//
// Center drops swap labels. Edge drops look up a split recipe keyed by
// (target, zone); a missing recipe means the drop is unsupported and the
// caller keeps the current layout.

use std::collections::HashMap;

use dock_core::{DropZone, PanelId};

use crate::description::LayoutDescription;
use crate::track::{merge_tracks, split_track, Track};

/// Panels that the standard recipe table knows how to split.
pub const STANDARD_SPLIT_TARGETS: [&str; 4] = ["outliner", "preview", "properties", "timeline"];

/// A split transformation. Receives the current layout, the dragged panel,
/// the target panel and the edge zone; returns `None` if no gapless layout
/// can be produced.
pub type SplitRecipe = fn(&LayoutDescription, &str, &str, DropZone) -> Option<LayoutDescription>;

// ──────────────────────────────────────────────
// RecipeTable
// ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecipeTable {
    recipes: HashMap<(PanelId, DropZone), SplitRecipe>,
}

impl RecipeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`for_targets`](Self::for_targets) over [`STANDARD_SPLIT_TARGETS`].
    pub fn standard() -> Self {
        Self::for_targets(&STANDARD_SPLIT_TARGETS[..])
    }

    /// Row splits for top/bottom and column splits for left/right on every
    /// panel in `targets`.
    pub fn for_targets<S: AsRef<str>>(targets: &[S]) -> Self {
        let mut table = Self::new();
        for target in targets.iter().map(AsRef::as_ref) {
            table.insert(target, DropZone::Top, split_rows);
            table.insert(target, DropZone::Bottom, split_rows);
            table.insert(target, DropZone::Left, split_columns);
            table.insert(target, DropZone::Right, split_columns);
        }
        table
    }

    /// Register a recipe. Center is always a swap and cannot be overridden.
    pub fn insert(&mut self, target: &str, zone: DropZone, recipe: SplitRecipe) {
        if zone == DropZone::Center {
            return;
        }
        self.recipes.insert((target.to_string(), zone), recipe);
    }

    pub fn get(&self, target: &str, zone: DropZone) -> Option<SplitRecipe> {
        self.recipes.get(&(target.to_string(), zone)).copied()
    }

    pub fn supports(&self, target: &str, zone: DropZone) -> bool {
        zone == DropZone::Center || self.get(target, zone).is_some()
    }
}

/// Compute the layout that results from dropping `dragged` into `zone` of
/// `target`. Returns `None` for an invalid input layout, same-panel drops,
/// panels missing from the layout, and edge zones without a recipe. `layout`
/// itself is never touched.
pub fn mutate(
    table: &RecipeTable,
    layout: &LayoutDescription,
    dragged: &str,
    target: &str,
    zone: DropZone,
) -> Option<LayoutDescription> {
    if let Err(e) = layout.validate() {
        log::debug!("refusing to mutate an invalid layout: {}", e);
        return None;
    }
    if dragged == target || !layout.contains(dragged) || !layout.contains(target) {
        return None;
    }

    if zone == DropZone::Center {
        return layout.swapped(dragged, target);
    }

    let Some(recipe) = table.get(target, zone) else {
        log::debug!("no split recipe for {} on {}", zone.as_str(), target);
        return None;
    };

    let result = recipe(layout, dragged, target, zone)?;
    if result.validate().is_err() || layout.names().iter().any(|n| !result.contains(n)) {
        log::debug!("split of {} produced an invalid layout", target);
        return None;
    }
    Some(result)
}

// ──────────────────────────────────────────────
// Standard recipes
// ──────────────────────────────────────────────

/// Split the target's rows: the dragged panel lands above or below it and
/// every panel sharing the target's row grows to cover the new row.
pub fn split_rows(
    layout: &LayoutDescription,
    dragged: &str,
    target: &str,
    zone: DropZone,
) -> Option<LayoutDescription> {
    let before = match zone {
        DropZone::Top => true,
        DropZone::Bottom => false,
        _ => return None,
    };
    let mut grid = Grid::from_layout(layout);
    grid.vacate(dragged)?;
    grid.compact();
    grid.insert_beside(dragged, target, before)?;
    grid.compact();
    Some(grid.into_layout())
}

/// Column counterpart of [`split_rows`], run on the transposed grid.
pub fn split_columns(
    layout: &LayoutDescription,
    dragged: &str,
    target: &str,
    zone: DropZone,
) -> Option<LayoutDescription> {
    let before = match zone {
        DropZone::Left => true,
        DropZone::Right => false,
        _ => return None,
    };
    let mut grid = Grid::from_layout(layout).transposed();
    grid.vacate(dragged)?;
    grid.compact();
    grid.insert_beside(dragged, target, before)?;
    grid.compact();
    Some(grid.transposed().into_layout())
}

// ──────────────────────────────────────────────
// Grid: mutable working copy
// ──────────────────────────────────────────────

/// Working copy of a layout. Operations are written for rows; column
/// operations transpose first.
struct Grid {
    cells: Vec<Vec<String>>,
    rows: Vec<Track>,
    cols: Vec<Track>,
}

#[derive(Clone, Copy)]
struct Span {
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
}

impl Grid {
    fn from_layout(layout: &LayoutDescription) -> Self {
        Self {
            cells: layout.areas.clone(),
            rows: layout.rows.clone(),
            cols: layout.columns.clone(),
        }
    }

    fn into_layout(self) -> LayoutDescription {
        LayoutDescription {
            areas: self.cells,
            columns: self.cols,
            rows: self.rows,
        }
    }

    fn transposed(self) -> Self {
        let n_rows = self.cells.len();
        let n_cols = self.cells.first().map_or(0, Vec::len);
        let cells = (0..n_cols)
            .map(|c| (0..n_rows).map(|r| self.cells[r][c].clone()).collect())
            .collect();
        Self {
            cells,
            rows: self.cols,
            cols: self.rows,
        }
    }

    fn n_rows(&self) -> usize {
        self.cells.len()
    }

    fn n_cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    fn span_of(&self, name: &str) -> Option<Span> {
        let mut span: Option<Span> = None;
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell != name {
                    continue;
                }
                span = Some(match span {
                    None => Span {
                        row_start: r,
                        row_end: r + 1,
                        col_start: c,
                        col_end: c + 1,
                    },
                    Some(s) => Span {
                        row_start: s.row_start.min(r),
                        row_end: s.row_end.max(r + 1),
                        col_start: s.col_start.min(c),
                        col_end: s.col_end.max(c + 1),
                    },
                });
            }
        }
        span
    }

    fn fill(&mut self, span: Span, name: &str) {
        for r in span.row_start..span.row_end {
            for c in span.col_start..span.col_end {
                self.cells[r][c] = name.to_string();
            }
        }
    }

    /// Remove `name` from the grid without leaving unnamed cells. A panel
    /// spanning full rows (or full columns) takes its tracks with it;
    /// otherwise a neighbour sharing its whole edge absorbs its cells.
    fn vacate(&mut self, name: &str) -> Option<()> {
        let span = self.span_of(name)?;

        if span.col_start == 0 && span.col_end == self.n_cols() {
            if span.row_end - span.row_start == self.n_rows() {
                return None;
            }
            self.cells.drain(span.row_start..span.row_end);
            self.rows.drain(span.row_start..span.row_end);
            return Some(());
        }

        if span.row_start == 0 && span.row_end == self.n_rows() {
            for row in &mut self.cells {
                row.drain(span.col_start..span.col_end);
            }
            self.cols.drain(span.col_start..span.col_end);
            return Some(());
        }

        let absorber = self.absorber_for(name, span)?;
        self.fill(span, &absorber);
        Some(())
    }

    /// The neighbour whose edge exactly matches one side of `span`, checked
    /// right, left, below, above.
    fn absorber_for(&self, name: &str, span: Span) -> Option<String> {
        let mut candidates: Vec<(String, bool)> = Vec::new();
        if span.col_end < self.n_cols() {
            candidates.push((self.cells[span.row_start][span.col_end].clone(), true));
        }
        if span.col_start > 0 {
            candidates.push((self.cells[span.row_start][span.col_start - 1].clone(), true));
        }
        if span.row_end < self.n_rows() {
            candidates.push((self.cells[span.row_end][span.col_start].clone(), false));
        }
        if span.row_start > 0 {
            candidates.push((self.cells[span.row_start - 1][span.col_start].clone(), false));
        }

        candidates.into_iter().find_map(|(candidate, horizontal)| {
            if candidate == name {
                return None;
            }
            let other = self.span_of(&candidate)?;
            let aligned = if horizontal {
                other.row_start == span.row_start && other.row_end == span.row_end
            } else {
                other.col_start == span.col_start && other.col_end == span.col_end
            };
            aligned.then_some(candidate)
        })
    }

    /// Place `dragged` directly above (`before`) or below the target. A
    /// target spanning several rows gives up half of them; a single-row
    /// target gets a duplicated row carrying the dragged panel over the
    /// target's columns, and the target's row track is split between the two.
    fn insert_beside(&mut self, dragged: &str, target: &str, before: bool) -> Option<()> {
        let span = self.span_of(target)?;
        let height = span.row_end - span.row_start;

        if height >= 2 {
            let half = height / 2;
            let rows = if before {
                span.row_start..span.row_start + half
            } else {
                span.row_end - half..span.row_end
            };
            self.fill(
                Span {
                    row_start: rows.start,
                    row_end: rows.end,
                    ..span
                },
                dragged,
            );
            return Some(());
        }

        let source_row = span.row_start;
        let (first, second) = split_track(&self.rows[source_row]);
        let new_row = if before { source_row } else { source_row + 1 };

        self.cells.insert(new_row, self.cells[source_row].clone());
        self.rows[source_row] = if before { second.clone() } else { first.clone() };
        self.rows.insert(new_row, if before { first } else { second });

        for c in span.col_start..span.col_end {
            self.cells[new_row][c] = dragged.to_string();
        }
        Some(())
    }

    /// Merge adjacent identical rows, then adjacent identical columns.
    fn compact(&mut self) {
        let mut r = 1;
        while r < self.cells.len() {
            if self.cells[r] == self.cells[r - 1] {
                self.cells.remove(r);
                let removed = self.rows.remove(r);
                self.rows[r - 1] = merge_tracks(&self.rows[r - 1], &removed);
            } else {
                r += 1;
            }
        }

        let mut c = 1;
        while c < self.n_cols() {
            if self.cells.iter().all(|row| row[c] == row[c - 1]) {
                for row in &mut self.cells {
                    row.remove(c);
                }
                let removed = self.cols.remove(c);
                self.cols[c - 1] = merge_tracks(&self.cols[c - 1], &removed);
            } else {
                c += 1;
            }
        }
    }
}
