// Fixed panel manifest for the editor shell. Panels are never discovered at
// runtime; the engine registers exactly these at startup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub id: &'static str,
    pub title: &'static str,
    /// Whether the panel has a draggable header and accepts drops.
    pub dockable: bool,
}

pub const HEADER: &str = "header";

pub static PANELS: [PanelSpec; 5] = [
    PanelSpec {
        id: HEADER,
        title: "Spine Editor",
        dockable: false,
    },
    PanelSpec {
        id: "outliner",
        title: "Outliner",
        dockable: true,
    },
    PanelSpec {
        id: "preview",
        title: "Preview",
        dockable: true,
    },
    PanelSpec {
        id: "properties",
        title: "Properties",
        dockable: true,
    },
    PanelSpec {
        id: "timeline",
        title: "Timeline",
        dockable: true,
    },
];

pub fn spec(id: &str) -> Option<&'static PanelSpec> {
    PANELS.iter().find(|p| p.id == id)
}
