use dock_core::{CursorIcon, Rect, Vec2};
use dock_layout::{GridGeometry, LayoutDescription, SizeVariables, Track};

use crate::arbiter::{GestureArbiter, GestureKind, GestureToken};

// ──────────────────────────────────────────────
// Resize handles
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A draggable border that drives one size variable.
///
/// Handles are not tied to panels. A handle is live while some column (X) or
/// row (Y) track of the active layout is `var(<variable>)`; its grip then
/// sits on that track's border with the rest of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    pub id: &'static str,
    pub variable: &'static str,
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ResizeHandle {
    const fn width(id: &'static str, variable: &'static str, default: f32) -> Self {
        Self {
            id,
            variable,
            axis: Axis::X,
            min: 200.0,
            max: 500.0,
            default,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn cursor(&self) -> CursorIcon {
        match self.axis {
            Axis::X => CursorIcon::ColResize,
            Axis::Y => CursorIcon::RowResize,
        }
    }

    /// Place this handle on `layout`. Returns `None` when no track of the
    /// handle's axis uses its variable, or the track has no border with a
    /// different panel.
    ///
    /// The grip sits on the track's trailing grid line, or on its leading
    /// line when the track is the last one; in that case the handle is
    /// inverted and the variable grows as the pointer moves left or up.
    pub fn place(&self, layout: &LayoutDescription, geometry: &GridGeometry, thickness: f32) -> Option<Grip> {
        let tracks = match self.axis {
            Axis::X => &layout.columns,
            Axis::Y => &layout.rows,
        };
        let index = tracks
            .iter()
            .position(|t| matches!(t, Track::Var { name, .. } if name == self.variable))?;
        if tracks.len() < 2 {
            return None;
        }
        let inverted = index + 1 == tracks.len();
        let line = if inverted { index } else { index + 1 };

        // Cross-axis cells where the line separates two different panels.
        let cross = match self.axis {
            Axis::X => layout.row_count(),
            Axis::Y => layout.col_count(),
        };
        let divides = |i: usize| match self.axis {
            Axis::X => layout.name_at(i, line - 1) != layout.name_at(i, line),
            Axis::Y => layout.name_at(line - 1, i) != layout.name_at(line, i),
        };
        let first = (0..cross).find(|&i| divides(i))?;
        let last = (0..cross).rev().find(|&i| divides(i))?;

        let (cross_lines, pos) = match self.axis {
            Axis::X => (&geometry.row_lines, *geometry.col_lines.get(line)?),
            Axis::Y => (&geometry.col_lines, *geometry.row_lines.get(line)?),
        };
        let start = *cross_lines.get(first)?;
        let end = *cross_lines.get(last + 1)?;
        let half = thickness / 2.0;
        let rect = match self.axis {
            Axis::X => Rect::new(pos - half, start, thickness, end - start),
            Axis::Y => Rect::new(start, pos - half, end - start, thickness),
        };
        Some(Grip {
            handle: *self,
            rect,
            inverted,
        })
    }
}

/// A handle placed on the active grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grip {
    pub handle: ResizeHandle,
    /// Strip centered on the grid line.
    pub rect: Rect,
    pub inverted: bool,
}

pub const OUTLINER_WIDTH: &str = "--outliner-width";
pub const PROPERTIES_WIDTH: &str = "--properties-width";
pub const TIMELINE_HEIGHT: &str = "--timeline-height";

/// The editor shell's size variables: the three borders of the default
/// arrangement plus the side columns of the stacked presets.
pub fn standard_handles() -> Vec<ResizeHandle> {
    vec![
        ResizeHandle::width("left", OUTLINER_WIDTH, 300.0),
        ResizeHandle::width("right", PROPERTIES_WIDTH, 300.0),
        ResizeHandle {
            id: "timeline",
            variable: TIMELINE_HEIGHT,
            axis: Axis::Y,
            min: 100.0,
            max: 400.0,
            default: 200.0,
        },
        ResizeHandle::width("left-panels", "--left-panels-width", 300.0),
        ResizeHandle::width("right-panels", "--right-panels-width", 300.0),
        ResizeHandle::width("left-side", "--left-width", 250.0),
        ResizeHandle::width("right-side", "--right-width", 250.0),
    ]
}

/// First grip containing `point`.
pub fn hit_test(point: Vec2, grips: &[Grip]) -> Option<&Grip> {
    grips.iter().find(|grip| grip.rect.contains(point))
}

// ──────────────────────────────────────────────
// ResizeController
// ──────────────────────────────────────────────

#[derive(Debug)]
struct ActiveResize {
    handle: ResizeHandle,
    inverted: bool,
    last: Vec2,
    token: GestureToken,
}

#[derive(Debug)]
pub struct ResizeController {
    handles: Vec<ResizeHandle>,
    active: Option<ActiveResize>,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(standard_handles())
    }
}

impl ResizeController {
    pub fn new(handles: Vec<ResizeHandle>) -> Self {
        Self {
            handles,
            active: None,
        }
    }

    pub fn handles(&self) -> &[ResizeHandle] {
        &self.handles
    }

    pub fn handle(&self, id: &str) -> Option<&ResizeHandle> {
        self.handles.iter().find(|h| h.id == id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<&ResizeHandle> {
        self.active.as_ref().map(|a| &a.handle)
    }

    /// Grips for every handle that sizes a track of `layout`, in handle
    /// order.
    pub fn grips(&self, layout: &LayoutDescription, geometry: &GridGeometry, thickness: f32) -> Vec<Grip> {
        self.handles
            .iter()
            .filter_map(|h| h.place(layout, geometry, thickness))
            .collect()
    }

    /// Start resizing from `grip`. Refused while another gesture owns the
    /// pointer.
    pub fn begin(&mut self, grip: &Grip, pointer: Vec2, arbiter: &mut GestureArbiter) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(token) = arbiter.try_acquire(GestureKind::Resize) else {
            return false;
        };
        log::debug!("resize {} on {}", grip.handle.id, grip.handle.variable);
        self.active = Some(ActiveResize {
            handle: grip.handle,
            inverted: grip.inverted,
            last: pointer,
            token,
        });
        true
    }

    /// Apply the pointer delta since the last update and return the new
    /// clamped value. Deltas are applied incrementally, so overshooting a
    /// limit and coming back moves the border immediately.
    pub fn update(&mut self, pointer: Vec2, vars: &mut SizeVariables) -> Option<f32> {
        let active = self.active.as_mut()?;
        let handle = active.handle;

        let delta = match handle.axis {
            Axis::X => pointer.x - active.last.x,
            Axis::Y => pointer.y - active.last.y,
        };
        let delta = if active.inverted { -delta } else { delta };
        active.last = pointer;

        let current = vars.get(handle.variable).unwrap_or(handle.default);
        let value = handle.clamp(current + delta);
        vars.set(handle.variable, value);
        Some(value)
    }

    pub fn end(&mut self, arbiter: &mut GestureArbiter) -> bool {
        match self.active.take() {
            Some(active) => {
                arbiter.release(active.token);
                true
            }
            None => false,
        }
    }

    /// Restore every handle's variable to its default.
    pub fn reset(&self, vars: &mut SizeVariables) {
        for handle in &self.handles {
            vars.set(handle.variable, handle.default);
        }
    }

    pub fn cursor(&self) -> Option<CursorIcon> {
        self.active_handle().map(ResizeHandle::cursor)
    }
}
