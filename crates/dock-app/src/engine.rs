// Layout engine: the one owner of the active layout and the active gesture.
// Pointer events go in; committed grid templates come out through the
// surface, and every change is persisted and reported to observers.

use dock_core::{CursorIcon, DropDecision, DropZone, GridSurface, InputEvent, Key, KeyValueStore, Vec2};
use dock_input::{hit_test, DragController, DragFeedback, DragState, GestureArbiter, Grip, ResizeController};
use dock_layout::{
    mutate, GridGeometry, LayoutDescription, LayoutObserver, LayoutRegistry, RecipeTable, SizeVariables,
};

use crate::applier;
use crate::persist::Persister;
use crate::registry::PanelRegistry;
use crate::settings::DockSettings;

pub struct LayoutEngine {
    panels: PanelRegistry,
    surface: Box<dyn GridSurface>,
    store: Box<dyn KeyValueStore>,
    presets: LayoutRegistry,
    recipes: RecipeTable,
    persister: Persister,
    active: LayoutDescription,
    arbiter: GestureArbiter,
    drag: DragController,
    resize: ResizeController,
    vars: SizeVariables,
    grip_size: f32,
    observers: Vec<Box<dyn LayoutObserver>>,
}

impl LayoutEngine {
    /// Build an engine over registered panels. The default preset is applied
    /// immediately so every panel is placed; call [`restore`](Self::restore)
    /// to bring back the persisted layout.
    pub fn new(
        mut panels: PanelRegistry,
        mut surface: Box<dyn GridSurface>,
        store: Box<dyn KeyValueStore>,
        settings: &DockSettings,
    ) -> Self {
        let presets = LayoutRegistry::standard();
        let active = presets.default_layout().clone();
        applier::apply(&active, &mut panels, surface.as_mut());

        Self {
            panels,
            surface,
            store,
            presets,
            recipes: RecipeTable::for_targets(settings.split_targets.as_slice()),
            persister: Persister::new(&settings.storage_key),
            active,
            arbiter: GestureArbiter::new(),
            drag: DragController::new(settings.classifier()),
            resize: ResizeController::default(),
            vars: SizeVariables::new(),
            grip_size: settings.grip_size,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn LayoutObserver>) {
        self.observers.push(observer);
    }

    // ── Queries ─────────────────────────────────

    pub fn active_layout(&self) -> &LayoutDescription {
        &self.active
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn highlight(&self) -> Option<(&str, DropZone)> {
        self.drag.highlight()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn presets(&self) -> &LayoutRegistry {
        &self.presets
    }

    pub fn vars(&self) -> &SizeVariables {
        &self.vars
    }

    pub fn drop_classifier(&self) -> &dock_input::Classifier {
        self.drag.classifier()
    }

    // ── Input ───────────────────────────────────

    /// Dispatch one input event. Returns whether the engine acted on it.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => {
                let resizing = self.is_resizing();
                self.pointer_move(position).is_some() || resizing
            }
            InputEvent::PointerUp { position } => self.pointer_up(position),
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::ResizeStarted => self.resize_started(),
        }
    }

    /// Start a resize on a border grip, or a dock drag on a panel header.
    pub fn pointer_down(&mut self, position: Vec2) -> bool {
        if self.drag.state() != DragState::Idle || self.is_resizing() {
            return false;
        }

        let grips = self.grips();
        if let Some(grip) = hit_test(position, &grips) {
            return self.start_resize(grip, position);
        }

        let Some(panel) = self.panels.header_at(position) else {
            return false;
        };
        if !self.drag.begin(&panel, &mut self.arbiter) {
            return false;
        }
        self.surface.set_cursor(CursorIcon::Grabbing);
        true
    }

    /// Track the pointer. During a dock drag the drop zone is recomputed on
    /// every call and the feedback is returned; during a resize the border
    /// follows the pointer.
    pub fn pointer_move(&mut self, position: Vec2) -> Option<DragFeedback> {
        if self.is_resizing() {
            self.resize_move(position);
            return None;
        }

        let candidates = self.panels.dockable_ids();
        let feedback = self.drag.update(position, &candidates, &self.panels)?;
        self.surface.set_cursor(feedback.cursor);
        Some(feedback)
    }

    /// Finish the active gesture. Returns true if the layout changed.
    pub fn pointer_up(&mut self, position: Vec2) -> bool {
        if self.is_resizing() {
            self.end_resize();
            return false;
        }
        if self.drag.state() != DragState::Dragging {
            return false;
        }

        let candidates = self.panels.dockable_ids();
        self.drag.update(position, &candidates, &self.panels);

        let Some((dragged, decision)) = self.drag.finish() else {
            return false;
        };
        let changed = match decision {
            Some(decision) => self.commit_drop(&dragged, &decision),
            None => {
                log::debug!("Drop of {} discarded: no valid zone", dragged);
                false
            }
        };
        self.drag.end_commit(&mut self.arbiter);
        self.surface.set_cursor(CursorIcon::Default);
        changed
    }

    /// Escape aborts a dock drag.
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => self.cancel_drag(),
            _ => false,
        }
    }

    /// Another component claimed the pointer for a resize.
    pub fn resize_started(&mut self) -> bool {
        self.cancel_drag()
    }

    fn cancel_drag(&mut self) -> bool {
        if !self.drag.cancel(&mut self.arbiter) {
            return false;
        }
        self.surface.set_cursor(CursorIcon::Default);
        true
    }

    // ── Resize ──────────────────────────────────

    /// Grips of the handles that size a track of the active layout.
    pub fn grips(&self) -> Vec<Grip> {
        let geometry = GridGeometry::compute(&self.active, self.surface.bounds(), &self.vars);
        self.resize.grips(&self.active, &geometry, self.grip_size)
    }

    /// Start dragging the named handle's grip. Refused while a dock drag
    /// holds the pointer or the handle has no track in the active layout.
    pub fn begin_resize(&mut self, handle: &str, position: Vec2) -> bool {
        let Some(grip) = self.grips().into_iter().find(|g| g.handle.id == handle) else {
            log::debug!("No grip for resize handle {}", handle);
            return false;
        };
        self.start_resize(&grip, position)
    }

    fn start_resize(&mut self, grip: &Grip, position: Vec2) -> bool {
        if !self.resize.begin(grip, position, &mut self.arbiter) {
            return false;
        }
        if let Some(cursor) = self.resize.cursor() {
            self.surface.set_cursor(cursor);
        }
        true
    }

    pub fn resize_move(&mut self, position: Vec2) -> Option<f32> {
        let value = self.resize.update(position, &mut self.vars)?;
        let variable = self.resize.active_handle()?.variable;
        self.surface.set_variable(variable, value);
        Some(value)
    }

    pub fn end_resize(&mut self) -> bool {
        if !self.resize.end(&mut self.arbiter) {
            return false;
        }
        self.surface.set_cursor(CursorIcon::Default);
        true
    }

    // ── Layout ──────────────────────────────────

    fn commit_drop(&mut self, dragged: &str, decision: &DropDecision) -> bool {
        match mutate(
            &self.recipes,
            &self.active,
            dragged,
            &decision.target,
            decision.zone,
        ) {
            Some(next) => {
                self.commit(next, true);
                true
            }
            None => {
                log::debug!(
                    "Drop of {} on {} ({}) left the layout unchanged",
                    dragged,
                    decision.target,
                    decision.zone.as_str()
                );
                false
            }
        }
    }

    fn commit(&mut self, next: LayoutDescription, persist: bool) {
        applier::apply(&next, &mut self.panels, self.surface.as_mut());
        let old = std::mem::replace(&mut self.active, next);
        if persist {
            self.persister
                .save(self.store.as_mut(), &self.active, &self.presets);
        }
        for observer in &mut self.observers {
            observer.layout_changed(&old, &self.active);
        }
    }

    /// Apply a named preset and persist it. Unknown names change nothing.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let Some(layout) = self.presets.get(name).cloned() else {
            log::warn!("Unknown layout preset: {}", name);
            return false;
        };
        self.commit(layout, true);
        true
    }

    /// Apply the persisted layout, or the default preset when there is none
    /// or it cannot be used. A rejected record stays in storage. Returns true
    /// if the persisted layout was used.
    pub fn restore(&mut self) -> bool {
        let stored = self
            .persister
            .load(self.store.as_ref(), &self.presets, &self.panels);
        let restored = stored.is_some();
        let layout = stored.unwrap_or_else(|| self.presets.default_layout().clone());
        self.commit(layout, false);
        restored
    }

    /// Back to the default preset and default panel sizes; the persisted
    /// record is removed.
    pub fn reset(&mut self) {
        self.resize.reset(&mut self.vars);
        for (name, px) in self.vars.iter() {
            self.surface.set_variable(name, px);
        }
        let layout = self.presets.default_layout().clone();
        self.commit(layout, false);
        self.persister.clear(self.store.as_mut());
        log::info!("Layout reset to {}", dock_layout::DEFAULT_PRESET);
    }
}
