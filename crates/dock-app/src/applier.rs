use dock_core::GridSurface;
use dock_layout::{LayoutDescription, LayoutError};

use crate::registry::PanelRegistry;

/// Commit `layout` to the surface and reassign every panel's grid area.
/// Panels the layout does not place are left unplaced.
pub fn apply(layout: &LayoutDescription, panels: &mut PanelRegistry, surface: &mut dyn GridSurface) {
    surface.set_template(
        &layout.area_lines(),
        &layout.columns_template(),
        &layout.rows_template(),
    );
    for panel in panels.panels_mut() {
        panel.assign(layout.area_of(&panel.id));
    }
    log::info!("Applied layout {}", layout.areas_template());
}

/// Check that `layout` is well formed and fits the registered panels: every
/// area names a registered panel and every dockable panel is placed.
pub fn check_fit(layout: &LayoutDescription, panels: &PanelRegistry) -> Result<(), LayoutError> {
    layout.validate()?;
    if let Some(unknown) = layout.names().into_iter().find(|n| panels.find(n).is_none()) {
        return Err(LayoutError::UnknownPanel(unknown));
    }
    if let Some(missing) = panels
        .dockable_ids()
        .into_iter()
        .find(|id| !layout.contains(id))
    {
        return Err(LayoutError::MissingPanel(missing));
    }
    Ok(())
}
