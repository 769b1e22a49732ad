use dock_core::{GridArea, PanelId, Rect, Vec2};

use crate::track::{format_tracks, parse_tracks, track_sizes, SizeVariables, Track};
use crate::LayoutError;

// ──────────────────────────────────────────────
// LayoutDescription
// ──────────────────────────────────────────────

/// A 2-D grid arrangement: an area matrix naming the panel in every cell,
/// plus one size track per column and per row.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDescription {
    pub areas: Vec<Vec<String>>,
    pub columns: Vec<Track>,
    pub rows: Vec<Track>,
}

impl LayoutDescription {
    /// Build from whitespace-separated area rows without validating.
    pub fn from_rows(rows_text: &[&str], columns: Vec<Track>, rows: Vec<Track>) -> Self {
        let areas = rows_text
            .iter()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();
        Self {
            areas,
            columns,
            rows,
        }
    }

    /// Parse the textual template form and validate it.
    pub fn from_template(
        areas: &[String],
        columns: &str,
        rows: &str,
    ) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = areas.iter().map(|s| s.trim_matches('"')).collect();
        let layout = Self::from_rows(&lines, parse_tracks(columns)?, parse_tracks(rows)?);
        layout.validate()?;
        Ok(layout)
    }

    pub fn row_count(&self) -> usize {
        self.areas.len()
    }

    pub fn col_count(&self) -> usize {
        self.areas.first().map_or(0, Vec::len)
    }

    pub fn name_at(&self, row: usize, col: usize) -> Option<&str> {
        self.areas.get(row)?.get(col).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.areas.iter().flatten().any(|n| n == name)
    }

    /// Area names in row-major order of first appearance.
    pub fn names(&self) -> Vec<PanelId> {
        let mut out: Vec<PanelId> = Vec::new();
        for name in self.areas.iter().flatten() {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        out
    }

    /// Bounding span of every cell carrying `name`.
    pub fn area_of(&self, name: &str) -> Option<GridArea> {
        let mut span: Option<GridArea> = None;
        for (r, row) in self.areas.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell != name {
                    continue;
                }
                span = Some(match span {
                    None => GridArea::new(r, r + 1, c, c + 1),
                    Some(a) => GridArea::new(
                        a.row_start.min(r),
                        a.row_end.max(r + 1),
                        a.col_start.min(c),
                        a.col_end.max(c + 1),
                    ),
                });
            }
        }
        span
    }

    /// Check the zero-gap invariant and the track counts.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let cols = self.col_count();
        if self.areas.is_empty() || cols == 0 {
            return Err(LayoutError::Empty);
        }
        for (r, row) in self.areas.iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() || cell == "." {
                    return Err(LayoutError::EmptyCell { row: r, col: c });
                }
            }
        }
        if self.columns.len() != cols {
            return Err(LayoutError::TrackCount {
                axis: "columns",
                expected: cols,
                found: self.columns.len(),
            });
        }
        if self.rows.len() != self.areas.len() {
            return Err(LayoutError::TrackCount {
                axis: "rows",
                expected: self.areas.len(),
                found: self.rows.len(),
            });
        }
        for name in self.names() {
            let Some(area) = self.area_of(&name) else {
                continue;
            };
            for r in area.row_start..area.row_end {
                for c in area.col_start..area.col_end {
                    if self.areas[r][c] != name {
                        return Err(LayoutError::NonRectangular(name));
                    }
                }
            }
        }
        Ok(())
    }

    /// A copy with the labels of `a` and `b` exchanged. Tracks are untouched.
    pub fn swapped(&self, a: &str, b: &str) -> Option<Self> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let mut out = self.clone();
        for cell in out.areas.iter_mut().flatten() {
            if cell == a {
                *cell = b.to_string();
            } else if cell == b {
                *cell = a.to_string();
            }
        }
        Some(out)
    }

    // ── Template text ───────────────────────────

    /// One whitespace-separated line per row.
    pub fn area_lines(&self) -> Vec<String> {
        self.areas.iter().map(|row| row.join(" ")).collect()
    }

    /// The `grid-template-areas` value: every row quoted.
    pub fn areas_template(&self) -> String {
        self.area_lines()
            .iter()
            .map(|line| format!("\"{}\"", line))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn columns_template(&self) -> String {
        format_tracks(&self.columns)
    }

    pub fn rows_template(&self) -> String {
        format_tracks(&self.rows)
    }

    // ── Geometry ────────────────────────────────

    /// Rect of every area inside `bounds`, in [`names`](Self::names) order.
    pub fn compute_rects(&self, bounds: Rect, vars: &SizeVariables) -> Vec<(PanelId, Rect)> {
        let geometry = GridGeometry::compute(self, bounds, vars);
        self.names()
            .into_iter()
            .filter_map(|name| {
                let area = self.area_of(&name)?;
                Some((name, geometry.area_rect(area)?))
            })
            .collect()
    }
}

// ──────────────────────────────────────────────
// GridGeometry: tracks resolved to pixel lines
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    /// `col_count + 1` vertical grid lines.
    pub col_lines: Vec<f32>,
    /// `row_count + 1` horizontal grid lines.
    pub row_lines: Vec<f32>,
}

impl GridGeometry {
    pub fn compute(layout: &LayoutDescription, bounds: Rect, vars: &SizeVariables) -> Self {
        Self {
            col_lines: lines(bounds.x, &track_sizes(&layout.columns, bounds.width, vars)),
            row_lines: lines(bounds.y, &track_sizes(&layout.rows, bounds.height, vars)),
        }
    }

    pub fn area_rect(&self, area: GridArea) -> Option<Rect> {
        let x0 = *self.col_lines.get(area.col_start)?;
        let x1 = *self.col_lines.get(area.col_end)?;
        let y0 = *self.row_lines.get(area.row_start)?;
        let y1 = *self.row_lines.get(area.row_end)?;
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Grid cell `(row, col)` under `point`.
    pub fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        let col = self
            .col_lines
            .windows(2)
            .position(|w| point.x >= w[0] && point.x < w[1])?;
        let row = self
            .row_lines
            .windows(2)
            .position(|w| point.y >= w[0] && point.y < w[1])?;
        Some((row, col))
    }
}

fn lines(origin: f32, sizes: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(sizes.len() + 1);
    let mut pos = origin;
    out.push(pos);
    for size in sizes {
        pos += size;
        out.push(pos);
    }
    out
}
