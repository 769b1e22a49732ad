// spine-dock: panel docking engine for the spine editor shell, driven from
// the command line against a headless grid surface.

mod applier;
mod config;
mod engine;
mod headless;
mod manifest;
mod persist;
mod registry;
mod settings;

use std::process::ExitCode;

use dock_core::{zone_anchor, DropZone, InputEvent, RectSource, Vec2};
use dock_input::{Axis, DragState};
use dock_layout::{LayoutDescription, LayoutObserver};

use engine::LayoutEngine;
use headless::{GridElement, HeadlessSurface, SharedViewport, Viewport};
use persist::JsonFileStore;
use registry::PanelRegistry;
use settings::DockSettings;

const USAGE: &str = "usage: spine-dock [show | presets | preset <name> | reset | settings | drop <dragged> <target> <zone> | resize <handle> <px>]";

/// Logs every committed layout change.
struct LogObserver;

impl LayoutObserver for LogObserver {
    fn layout_changed(&mut self, old: &LayoutDescription, new: &LayoutDescription) {
        log::info!(
            "Layout changed: [{}] -> [{}]",
            old.area_lines().join(" / "),
            new.area_lines().join(" / ")
        );
    }
}

fn build_engine(settings: &DockSettings) -> Option<(LayoutEngine, SharedViewport)> {
    let viewport = Viewport::shared(settings.window.bounds(), settings.window.panel_header_height);

    let mut panels = PanelRegistry::new();
    for spec in manifest::PANELS.iter() {
        panels.register(spec.id, Box::new(GridElement::new(viewport.clone())), spec.dockable);
    }

    let Some(path) = persist::storage_path() else {
        log::error!("Cannot determine storage path");
        return None;
    };
    let store = JsonFileStore::open(path);
    log::debug!("Layout storage at {}", store.path().display());

    let mut engine = LayoutEngine::new(
        panels,
        Box::new(HeadlessSurface::new(viewport.clone())),
        Box::new(store),
        settings,
    );
    engine.add_observer(Box::new(LogObserver));
    Some((engine, viewport))
}

/// Replay a drop as the pointer would perform it: press on the dragged
/// panel's header, move into the target zone, release.
fn simulate_drop(engine: &mut LayoutEngine, dragged: &str, target: &str, zone: DropZone) -> bool {
    let Some(panel) = engine.panels().find(dragged) else {
        eprintln!("unknown panel: {}", dragged);
        return false;
    };
    let header = panel.header_rect();
    let Some(target_rect) = engine.panels().rect_of(target) else {
        eprintln!("unknown panel: {}", target);
        return false;
    };
    let start = Vec2::new(header.x + header.width / 2.0, header.y + header.height / 2.0);
    let end = zone_anchor(target_rect, zone, engine.drop_classifier().thresholds);

    engine.handle(InputEvent::PointerDown { position: start });
    if engine.drag_state() != DragState::Dragging {
        eprintln!("{} cannot be dragged", dragged);
        return false;
    }
    engine.handle(InputEvent::PointerMove { position: end });
    match engine.highlight() {
        Some((panel, zone)) => log::debug!("Releasing over {} ({})", panel, zone.as_str()),
        None => println!("{} {} is not a valid drop zone", target, zone.as_str()),
    }
    engine.handle(InputEvent::PointerUp { position: end })
}

/// Drag a resize grip by `offset` pixels along its axis; positive moves the
/// border right or down.
fn simulate_resize(engine: &mut LayoutEngine, handle: &str, offset: f32) -> bool {
    let Some(grip) = engine.grips().into_iter().find(|g| g.handle.id == handle) else {
        eprintln!("no resize handle {} in this layout", handle);
        return false;
    };
    let rect = grip.rect;
    let start = Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    let end = match grip.handle.axis {
        Axis::X => Vec2::new(start.x + offset, start.y),
        Axis::Y => Vec2::new(start.x, start.y + offset),
    };

    if !engine.begin_resize(handle, start) {
        return false;
    }
    engine.resize_move(end);
    engine.end_resize()
}

fn print_layout(engine: &LayoutEngine, viewport: &SharedViewport) {
    let layout = engine.active_layout();
    match engine.presets().name_of(layout) {
        Some(name) => println!("preset: {}", name),
        None => println!("preset: (custom)"),
    }
    println!("grid-template-areas:");
    for line in layout.area_lines() {
        println!("  \"{}\"", line);
    }
    println!("grid-template-columns: {}", layout.columns_template());
    println!("grid-template-rows: {}", layout.rows_template());

    let mut vars: Vec<(&str, f32)> = engine.vars().iter().collect();
    if !vars.is_empty() {
        vars.sort_by(|a, b| a.0.cmp(b.0));
        println!("size variables:");
        for (name, px) in vars {
            println!("  {}: {}px", name, px);
        }
    }

    let bounds = viewport.borrow().bounds;
    println!("panels ({}x{}):", bounds.width, bounds.height);
    for id in engine.panels().all_ids() {
        let title = manifest::spec(&id).map_or(id.as_str(), |s| s.title);
        match engine.panels().rect_of(&id) {
            Some(r) => println!(
                "  {:<12} {:<14} x={} y={} w={} h={}",
                id, title, r.x, r.y, r.width, r.height
            ),
            None => println!("  {:<12} {:<14} (not placed)", id, title),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings::load_settings();

    if args.first().map(String::as_str) == Some("settings") {
        settings::save_settings(&settings);
        match serde_json::to_string_pretty(&settings) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
        return ExitCode::SUCCESS;
    }

    let Some((mut engine, viewport)) = build_engine(&settings) else {
        return ExitCode::FAILURE;
    };
    engine.restore();

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["show"] => {}
        ["presets"] => {
            for name in engine.presets().names() {
                println!("{}", name);
            }
            return ExitCode::SUCCESS;
        }
        ["preset", name] => {
            if !engine.apply_preset(name) {
                eprintln!("unknown preset: {}", name);
                return ExitCode::FAILURE;
            }
        }
        ["reset"] => engine.reset(),
        ["drop", dragged, target, zone] => {
            let Some(zone) = DropZone::from_name(zone) else {
                eprintln!("unknown zone: {} (top, right, bottom, left, center)", zone);
                return ExitCode::FAILURE;
            };
            if !simulate_drop(&mut engine, dragged, target, zone) {
                println!("layout unchanged");
            }
        }
        ["resize", handle, offset] => {
            let Ok(offset) = offset.parse::<f32>() else {
                eprintln!("invalid offset: {}", offset);
                return ExitCode::FAILURE;
            };
            if !simulate_resize(&mut engine, handle, offset) {
                return ExitCode::FAILURE;
            }
        }
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    }

    print_layout(&engine, &viewport);
    ExitCode::SUCCESS
}
