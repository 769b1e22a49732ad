use dock_core::{GridArea, PanelElement, PanelId, Rect, RectSource, Vec2};

// ──────────────────────────────────────────────
// Panel
// ──────────────────────────────────────────────

pub struct Panel {
    pub id: PanelId,
    pub element: Box<dyn PanelElement>,
    /// Grid area assigned by the last apply; `None` while unplaced.
    pub area: Option<GridArea>,
    pub dockable: bool,
}

impl Panel {
    pub fn rect(&self) -> Rect {
        self.element.bounds()
    }

    pub fn header_rect(&self) -> Rect {
        self.element.header_bounds()
    }

    pub fn assign(&mut self, area: Option<GridArea>) {
        self.area = area;
        self.element.set_grid_area(area);
    }
}

// ──────────────────────────────────────────────
// PanelRegistry
// ──────────────────────────────────────────────

/// Panels in manifest order. Rects are always read live from the element.
#[derive(Default)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel. Ids are unique; a duplicate is ignored.
    pub fn register(&mut self, id: &str, element: Box<dyn PanelElement>, dockable: bool) -> bool {
        if self.find(id).is_some() {
            log::warn!("Panel {} is already registered", id);
            return false;
        }
        self.panels.push(Panel {
            id: id.to_string(),
            element,
            area: None,
            dockable,
        });
        true
    }

    pub fn find(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn all_ids(&self) -> Vec<PanelId> {
        self.panels.iter().map(|p| p.id.clone()).collect()
    }

    pub fn dockable_ids(&self) -> Vec<PanelId> {
        self.panels
            .iter()
            .filter(|p| p.dockable)
            .map(|p| p.id.clone())
            .collect()
    }

    pub(crate) fn panels_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.iter_mut()
    }

    /// Dockable panel whose header strip contains `point`. Panel bodies are
    /// never hit so their content stays interactive.
    pub fn header_at(&self, point: Vec2) -> Option<PanelId> {
        self.panels
            .iter()
            .filter(|p| p.dockable && p.area.is_some())
            .find(|p| p.header_rect().contains(point))
            .map(|p| p.id.clone())
    }
}

impl RectSource for PanelRegistry {
    fn rect_of(&self, id: &str) -> Option<Rect> {
        let panel = self.find(id)?;
        panel.area.map(|_| panel.rect())
    }
}
