#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::adjacency;
    use crate::{
        hit_test, Classifier, DragController, DragState, GestureArbiter, GestureKind,
        Grip, HighlightChange, ResizeController,
    };
    use dock_core::{CursorIcon, DropZone, PanelId, Rect, Vec2};
    use dock_layout::{
        default_layout, left_stacked_layout, GridGeometry, LayoutDescription, SizeVariables,
    };

    const WINDOW: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1600.0,
        height: 1000.0,
    };

    // Default preset at 1600x1000:
    //   header     (0, 0, 1600, 60)
    //   outliner   (0, 60, 300, 740)
    //   preview    (300, 60, 1000, 740)
    //   properties (1300, 60, 300, 740)
    //   timeline   (0, 800, 1600, 200)
    fn default_rects() -> Vec<(PanelId, Rect)> {
        default_layout().compute_rects(WINDOW, &SizeVariables::new())
    }

    fn grips_on(resize: &ResizeController, layout: &LayoutDescription) -> Vec<Grip> {
        let geometry = GridGeometry::compute(layout, WINDOW, &SizeVariables::new());
        resize.grips(layout, &geometry, 6.0)
    }

    fn default_grip(resize: &ResizeController, id: &str) -> Grip {
        grips_on(resize, &default_layout())
            .into_iter()
            .find(|g| g.handle.id == id)
            .unwrap()
    }

    fn dockable() -> Vec<PanelId> {
        ["outliner", "preview", "properties", "timeline"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn stacked_pair() -> HashMap<PanelId, Rect> {
        let mut rects = HashMap::new();
        rects.insert("x".to_string(), Rect::new(0.0, 0.0, 100.0, 100.0));
        rects.insert("y".to_string(), Rect::new(0.0, 100.0, 100.0, 100.0));
        rects
    }

    // ──────────────────────────────────────────
    // Adjacency
    // ──────────────────────────────────────────

    #[test]
    fn adjacency_side_by_side() {
        let rects = default_rects();
        let adj = adjacency::compute(&rects, "outliner", "preview", 1.0);
        assert!(adj.left);
        assert!(!adj.top && !adj.right && !adj.bottom);
    }

    #[test]
    fn adjacency_stacked() {
        let rects = stacked_pair();
        let adj = adjacency::compute(&rects, "x", "y", 1.0);
        assert!(adj.top);
        assert!(!adj.bottom);

        let adj = adjacency::compute(&rects, "y", "x", 1.0);
        assert!(adj.bottom);
        assert!(!adj.top);
    }

    #[test]
    fn adjacency_respects_tolerance() {
        let mut rects = HashMap::new();
        rects.insert("a".to_string(), Rect::new(0.0, 0.0, 100.0, 100.0));
        rects.insert("b".to_string(), Rect::new(101.0, 0.0, 100.0, 100.0));
        rects.insert("c".to_string(), Rect::new(102.5, 0.0, 100.0, 100.0));

        assert!(adjacency::compute(&rects, "a", "b", 1.0).left);
        assert!(!adjacency::compute(&rects, "a", "c", 1.0).left);
    }

    #[test]
    fn adjacency_unknown_ids_touch_nothing() {
        let rects = default_rects();
        let adj = adjacency::compute(&rects, "outliner", "assets", 1.0);
        assert_eq!(adj, Default::default());
    }

    // ──────────────────────────────────────────
    // Classifier
    // ──────────────────────────────────────────

    #[test]
    fn classify_excludes_dragged_panel() {
        let rects = default_rects();
        let c = Classifier::default();
        let decision = c.classify("preview", Vec2::new(800.0, 430.0), &dockable(), &rects);
        assert_eq!(decision, None);
    }

    #[test]
    fn classify_picks_first_candidate_on_shared_border() {
        let rects = default_rects();
        let c = Classifier::default();
        let target = c.target_at("timeline", Vec2::new(300.0, 400.0), &dockable(), &rects);
        assert_eq!(target.as_deref(), Some("outliner"));
    }

    #[test]
    fn classify_ignores_non_candidates() {
        let rects = default_rects();
        let c = Classifier::default();
        // the header is in the rect list but never a drop target
        let decision = c.classify("outliner", Vec2::new(800.0, 30.0), &dockable(), &rects);
        assert_eq!(decision, None);
    }

    #[test]
    fn classify_rejects_edge_that_already_exists() {
        let rects = stacked_pair();
        let candidates = vec!["x".to_string(), "y".to_string()];
        let c = Classifier::default();

        // x sits directly above y: dropping on y's top edge changes nothing
        let top = c.classify("x", Vec2::new(50.0, 110.0), &candidates, &rects).unwrap();
        assert_eq!(top.zone, DropZone::Top);
        assert!(!top.valid);

        let bottom = c.classify("x", Vec2::new(50.0, 195.0), &candidates, &rects).unwrap();
        assert_eq!(bottom.zone, DropZone::Bottom);
        assert!(bottom.valid);
    }

    #[test]
    fn classify_center_is_always_valid() {
        let rects = stacked_pair();
        let candidates = vec!["x".to_string(), "y".to_string()];
        let c = Classifier::default();
        let center = c.classify("x", Vec2::new(50.0, 150.0), &candidates, &rects).unwrap();
        assert_eq!(center.zone, DropZone::Center);
        assert!(center.valid);
    }

    // ──────────────────────────────────────────
    // Drag session
    // ──────────────────────────────────────────

    #[test]
    fn drag_full_cycle() {
        let rects = default_rects();
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        assert_eq!(drag.state(), DragState::Idle);

        assert!(drag.begin("outliner", &mut arbiter));
        assert_eq!(drag.state(), DragState::Dragging);
        assert_eq!(arbiter.active(), Some(GestureKind::Dock));

        let fb = drag
            .update(Vec2::new(800.0, 100.0), &dockable(), &rects)
            .unwrap();
        assert_eq!(
            fb.highlight,
            HighlightChange::Show {
                target: "preview".to_string(),
                zone: DropZone::Top
            }
        );
        assert_eq!(fb.cursor, CursorIcon::Grabbing);

        let (panel, decision) = drag.finish().unwrap();
        assert_eq!(panel, "outliner");
        let decision = decision.unwrap();
        assert_eq!(decision.target, "preview");
        assert_eq!(decision.zone, DropZone::Top);
        assert_eq!(drag.state(), DragState::Committing);

        // moves during commit are ignored
        assert!(drag.update(Vec2::new(800.0, 430.0), &dockable(), &rects).is_none());

        drag.end_commit(&mut arbiter);
        assert_eq!(drag.state(), DragState::Idle);
        assert!(arbiter.is_free());
    }

    #[test]
    fn drag_highlight_changes_only_with_zone() {
        let rects = default_rects();
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        drag.begin("outliner", &mut arbiter);

        let first = drag.update(Vec2::new(800.0, 100.0), &dockable(), &rects).unwrap();
        assert!(matches!(first.highlight, HighlightChange::Show { .. }));

        let same = drag.update(Vec2::new(820.0, 110.0), &dockable(), &rects).unwrap();
        assert_eq!(same.highlight, HighlightChange::Unchanged);

        let center = drag.update(Vec2::new(800.0, 430.0), &dockable(), &rects).unwrap();
        assert_eq!(
            center.highlight,
            HighlightChange::Show {
                target: "preview".to_string(),
                zone: DropZone::Center
            }
        );

        // over the header: no candidate
        let off = drag.update(Vec2::new(800.0, 30.0), &dockable(), &rects).unwrap();
        assert_eq!(off.highlight, HighlightChange::Cleared);
        assert_eq!(off.cursor, CursorIcon::Grabbing);
        assert_eq!(drag.highlight(), None);
    }

    #[test]
    fn drag_invalid_zone_shows_no_drop() {
        let rects = default_rects();
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        drag.begin("outliner", &mut arbiter);

        // preview's left edge is already the outliner border
        let fb = drag.update(Vec2::new(350.0, 430.0), &dockable(), &rects).unwrap();
        assert_eq!(fb.cursor, CursorIcon::NoDrop);
        assert_eq!(drag.highlight(), None);
        assert!(!drag.decision().unwrap().valid);

        let (_, decision) = drag.finish().unwrap();
        assert_eq!(decision, None);
        drag.end_commit(&mut arbiter);
        assert!(arbiter.is_free());
    }

    #[test]
    fn drag_escape_cancels() {
        let rects = default_rects();
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        drag.begin("timeline", &mut arbiter);
        drag.update(Vec2::new(800.0, 100.0), &dockable(), &rects);

        assert!(drag.cancel(&mut arbiter));
        assert_eq!(drag.state(), DragState::Idle);
        assert!(arbiter.is_free());
        assert!(!drag.cancel(&mut arbiter));
        assert!(drag.finish().is_none());
    }

    #[test]
    fn drag_begin_is_single_session() {
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        assert!(drag.begin("outliner", &mut arbiter));
        assert!(!drag.begin("preview", &mut arbiter));
        assert_eq!(drag.dragged(), Some("outliner"));
    }

    #[test]
    fn idle_controller_ignores_moves() {
        let rects = default_rects();
        let mut drag = DragController::default();
        assert!(drag.update(Vec2::new(800.0, 100.0), &dockable(), &rects).is_none());
        assert!(drag.finish().is_none());
    }

    // ──────────────────────────────────────────
    // Gesture arbitration
    // ──────────────────────────────────────────

    #[test]
    fn resize_refused_while_docking() {
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        let mut resize = ResizeController::default();

        let left = default_grip(&resize, "left");

        assert!(drag.begin("outliner", &mut arbiter));
        assert!(!resize.begin(&left, Vec2::new(300.0, 400.0), &mut arbiter));
        assert!(!resize.is_active());
        assert_eq!(drag.state(), DragState::Dragging);
    }

    #[test]
    fn dock_refused_while_resizing() {
        let mut arbiter = GestureArbiter::new();
        let mut drag = DragController::default();
        let mut resize = ResizeController::default();

        let left = default_grip(&resize, "left");

        assert!(resize.begin(&left, Vec2::new(300.0, 400.0), &mut arbiter));
        assert!(!drag.begin("outliner", &mut arbiter));
        assert_eq!(drag.state(), DragState::Idle);

        assert!(resize.end(&mut arbiter));
        assert!(drag.begin("outliner", &mut arbiter));
    }

    #[test]
    fn released_pointer_goes_to_next_gesture() {
        let mut arbiter = GestureArbiter::new();
        let first = arbiter.try_acquire(GestureKind::Dock).unwrap();
        assert!(arbiter.release(first));
        let _second = arbiter.try_acquire(GestureKind::Resize).unwrap();
        assert_eq!(arbiter.active(), Some(GestureKind::Resize));
    }

    // ──────────────────────────────────────────
    // Resize
    // ──────────────────────────────────────────

    #[test]
    fn resize_left_handle_tracks_pointer() {
        let mut arbiter = GestureArbiter::new();
        let mut resize = ResizeController::default();
        let mut vars = SizeVariables::new();

        let left = default_grip(&resize, "left");
        assert!(!left.inverted);
        resize.begin(&left, Vec2::new(300.0, 400.0), &mut arbiter);
        assert_eq!(resize.update(Vec2::new(350.0, 410.0), &mut vars), Some(350.0));
        assert_eq!(vars.get("--outliner-width"), Some(350.0));
        assert_eq!(resize.cursor(), Some(CursorIcon::ColResize));
    }

    #[test]
    fn resize_last_track_handles_are_inverted() {
        let mut arbiter = GestureArbiter::new();
        let mut resize = ResizeController::default();
        let mut vars = SizeVariables::new();

        let right = default_grip(&resize, "right");
        assert!(right.inverted);
        resize.begin(&right, Vec2::new(1300.0, 400.0), &mut arbiter);
        assert_eq!(resize.update(Vec2::new(1200.0, 400.0), &mut vars), Some(400.0));
        resize.end(&mut arbiter);

        let timeline = default_grip(&resize, "timeline");
        assert!(timeline.inverted);
        resize.begin(&timeline, Vec2::new(800.0, 800.0), &mut arbiter);
        assert_eq!(resize.update(Vec2::new(800.0, 750.0), &mut vars), Some(250.0));
        assert_eq!(resize.cursor(), Some(CursorIcon::RowResize));
    }

    #[test]
    fn resize_clamps_incrementally() {
        let mut arbiter = GestureArbiter::new();
        let mut resize = ResizeController::default();
        let mut vars = SizeVariables::new();

        let left = default_grip(&resize, "left");
        resize.begin(&left, Vec2::new(300.0, 400.0), &mut arbiter);
        assert_eq!(resize.update(Vec2::new(600.0, 400.0), &mut vars), Some(500.0));
        // the way back starts from the clamped value
        assert_eq!(resize.update(Vec2::new(550.0, 400.0), &mut vars), Some(450.0));
        assert_eq!(resize.update(Vec2::new(0.0, 400.0), &mut vars), Some(200.0));
    }

    #[test]
    fn resize_reset_restores_defaults() {
        let resize = ResizeController::default();
        let mut vars = SizeVariables::new();
        vars.set("--outliner-width", 420.0);
        vars.set("--timeline-height", 120.0);
        vars.set("--left-width", 400.0);

        resize.reset(&mut vars);
        assert_eq!(vars.get("--outliner-width"), Some(300.0));
        assert_eq!(vars.get("--properties-width"), Some(300.0));
        assert_eq!(vars.get("--timeline-height"), Some(200.0));
        assert_eq!(vars.get("--left-width"), Some(250.0));
    }

    #[test]
    fn grips_sit_on_grid_borders() {
        let resize = ResizeController::default();
        let grips = grips_on(&resize, &default_layout());
        let ids: Vec<&str> = grips.iter().map(|g| g.handle.id).collect();
        assert_eq!(ids, vec!["left", "right", "timeline"]);

        // column borders span only the rows they divide
        assert_eq!(grips[0].rect, Rect::new(297.0, 60.0, 6.0, 740.0));
        assert_eq!(grips[1].rect, Rect::new(1297.0, 60.0, 6.0, 740.0));
        assert_eq!(grips[2].rect, Rect::new(0.0, 797.0, 1600.0, 6.0));

        let id_at = |x: f32, y: f32| hit_test(Vec2::new(x, y), &grips).map(|g| g.handle.id);
        assert_eq!(id_at(301.0, 400.0), Some("left"));
        assert_eq!(id_at(1298.0, 400.0), Some("right"));
        assert_eq!(id_at(800.0, 802.0), Some("timeline"));
        assert_eq!(id_at(800.0, 400.0), None);
        // no grip across the header or the timeline
        assert_eq!(id_at(300.0, 30.0), None);
        assert_eq!(id_at(300.0, 900.0), None);
    }

    #[test]
    fn grips_follow_the_track_not_the_panel() {
        let resize = ResizeController::default();
        let swapped = default_layout().swapped("outliner", "properties").unwrap();
        let grips = grips_on(&resize, &swapped);

        // the first column still ends at 300 whichever panel fills it
        let left = grips.iter().find(|g| g.handle.id == "left").unwrap();
        assert_eq!(left.rect.x, 297.0);
        assert!(hit_test(Vec2::new(1599.0, 400.0), &grips).is_none());
    }

    #[test]
    fn handles_without_a_track_have_no_grip() {
        let resize = ResizeController::default();
        let grips = grips_on(&resize, &left_stacked_layout());
        let ids: Vec<&str> = grips.iter().map(|g| g.handle.id).collect();
        assert_eq!(ids, vec!["timeline", "left-panels"]);
        assert!(!grips[1].inverted);
    }
}
