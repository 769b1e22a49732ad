use dock_core::{region_of, DropDecision, PanelId, RectSource, Vec2, ZoneThresholds, DEFAULT_EDGE_TOLERANCE};

use crate::adjacency;

/// Turns a pointer position into a drop decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    pub thresholds: ZoneThresholds,
    /// Pixel tolerance for the adjacency check.
    pub tolerance: f32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            thresholds: ZoneThresholds::default(),
            tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }
}

impl Classifier {
    pub fn new(thresholds: ZoneThresholds, tolerance: f32) -> Self {
        Self {
            thresholds,
            tolerance,
        }
    }

    /// The first candidate (in order) whose rect contains `pointer`, skipping
    /// the dragged panel itself.
    pub fn target_at<R: RectSource + ?Sized>(
        &self,
        dragged: &str,
        pointer: Vec2,
        candidates: &[PanelId],
        rects: &R,
    ) -> Option<PanelId> {
        candidates
            .iter()
            .filter(|id| id.as_str() != dragged)
            .find(|id| rects.rect_of(id).is_some_and(|r| r.contains(pointer)))
            .cloned()
    }

    /// Classify `pointer` while `dragged` is being dragged.
    ///
    /// Returns `None` when no candidate is under the pointer or the pointer
    /// falls outside every region. An edge zone whose border already exists
    /// between the two panels yields a decision with `valid == false`.
    pub fn classify<R: RectSource + ?Sized>(
        &self,
        dragged: &str,
        pointer: Vec2,
        candidates: &[PanelId],
        rects: &R,
    ) -> Option<DropDecision> {
        let target = self.target_at(dragged, pointer, candidates, rects)?;
        let rect = rects.rect_of(&target)?;
        let zone = region_of(pointer, rect, self.thresholds)?;
        let adjacency = adjacency::compute(rects, dragged, &target, self.tolerance);

        Some(DropDecision {
            valid: !adjacency.blocks(zone),
            target,
            zone,
        })
    }
}
