// Headless grid surface: resolves the committed template to pixel rects the
// way a browser grid container would, so the engine can run without a UI.

use std::cell::RefCell;
use std::rc::Rc;

use dock_core::{CursorIcon, GridArea, GridSurface, PanelElement, Rect};
use dock_layout::{GridGeometry, LayoutDescription, SizeVariables};

/// State shared between the surface and its panel elements.
#[derive(Debug)]
pub struct Viewport {
    pub bounds: Rect,
    /// Height of the draggable header strip at the top of each panel.
    pub header_height: f32,
    pub layout: Option<LayoutDescription>,
    pub vars: SizeVariables,
    pub cursor: CursorIcon,
    pub template: Option<Template>,
}

/// The last template text written to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub areas: Vec<String>,
    pub columns: String,
    pub rows: String,
}

pub type SharedViewport = Rc<RefCell<Viewport>>;

impl Viewport {
    pub fn shared(bounds: Rect, header_height: f32) -> SharedViewport {
        Rc::new(RefCell::new(Viewport {
            bounds,
            header_height,
            layout: None,
            vars: SizeVariables::new(),
            cursor: CursorIcon::Default,
            template: None,
        }))
    }

    fn area_rect(&self, area: GridArea) -> Option<Rect> {
        let layout = self.layout.as_ref()?;
        GridGeometry::compute(layout, self.bounds, &self.vars).area_rect(area)
    }
}

// ──────────────────────────────────────────────
// HeadlessSurface
// ──────────────────────────────────────────────

pub struct HeadlessSurface {
    viewport: SharedViewport,
}

impl HeadlessSurface {
    pub fn new(viewport: SharedViewport) -> Self {
        Self { viewport }
    }
}

impl GridSurface for HeadlessSurface {
    fn set_template(&mut self, areas: &[String], columns: &str, rows: &str) {
        let mut vp = self.viewport.borrow_mut();
        vp.template = Some(Template {
            areas: areas.to_vec(),
            columns: columns.to_string(),
            rows: rows.to_string(),
        });
        // An invalid template leaves the previous grid in place, as a
        // browser ignores an invalid grid-template declaration.
        match LayoutDescription::from_template(areas, columns, rows) {
            Ok(layout) => vp.layout = Some(layout),
            Err(e) => log::warn!("Ignoring grid template: {}", e),
        }
    }

    fn bounds(&self) -> Rect {
        self.viewport.borrow().bounds
    }

    fn set_variable(&mut self, name: &str, px: f32) {
        self.viewport.borrow_mut().vars.set(name, px);
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.viewport.borrow_mut().cursor = cursor;
    }
}

// ──────────────────────────────────────────────
// GridElement
// ──────────────────────────────────────────────

/// A panel placed by grid area. Its bounds follow whatever the surface
/// currently resolves that area to; an unplaced element has empty bounds.
pub struct GridElement {
    viewport: SharedViewport,
    area: Option<GridArea>,
}

impl GridElement {
    pub fn new(viewport: SharedViewport) -> Self {
        Self {
            viewport,
            area: None,
        }
    }
}

impl PanelElement for GridElement {
    fn bounds(&self) -> Rect {
        let vp = self.viewport.borrow();
        self.area
            .and_then(|area| vp.area_rect(area))
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    fn header_bounds(&self) -> Rect {
        let bounds = self.bounds();
        let height = self.viewport.borrow().header_height.min(bounds.height);
        Rect::new(bounds.x, bounds.y, bounds.width, height)
    }

    fn set_grid_area(&mut self, area: Option<GridArea>) {
        self.area = area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_layout::default_layout;

    fn viewport() -> SharedViewport {
        Viewport::shared(Rect::new(0.0, 0.0, 1600.0, 1000.0), 28.0)
    }

    fn commit(surface: &mut HeadlessSurface, layout: &LayoutDescription) {
        surface.set_template(
            &layout.area_lines(),
            &layout.columns_template(),
            &layout.rows_template(),
        );
    }

    #[test]
    fn element_follows_template() {
        let vp = viewport();
        let mut surface = HeadlessSurface::new(vp.clone());
        let layout = default_layout();
        commit(&mut surface, &layout);

        let mut el = GridElement::new(vp.clone());
        el.set_grid_area(layout.area_of("preview"));
        assert_eq!(el.bounds(), Rect::new(300.0, 60.0, 1000.0, 740.0));
        assert_eq!(el.header_bounds(), Rect::new(300.0, 60.0, 1000.0, 28.0));
    }

    #[test]
    fn variables_resize_elements() {
        let vp = viewport();
        let mut surface = HeadlessSurface::new(vp.clone());
        let layout = default_layout();
        commit(&mut surface, &layout);
        surface.set_variable("--outliner-width", 400.0);

        let mut el = GridElement::new(vp);
        el.set_grid_area(layout.area_of("outliner"));
        assert_eq!(el.bounds().width, 400.0);
    }

    #[test]
    fn invalid_template_keeps_previous_grid() {
        let vp = viewport();
        let mut surface = HeadlessSurface::new(vp.clone());
        commit(&mut surface, &default_layout());
        surface.set_template(&["a b".to_string(), "c".to_string()], "1fr 1fr", "1fr 1fr");

        let vp = vp.borrow();
        assert_eq!(vp.layout.as_ref(), Some(&default_layout()));
        assert_eq!(vp.template.as_ref().map(|t| t.areas.len()), Some(2));
    }

    #[test]
    fn unplaced_element_is_empty() {
        let el = GridElement::new(viewport());
        assert_eq!(el.bounds().width, 0.0);
        assert_eq!(el.header_bounds().height, 0.0);
    }
}
