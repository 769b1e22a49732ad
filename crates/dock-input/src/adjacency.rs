use dock_core::{edges_touch, AdjacencyResult, RectSource};

/// Which edges of `dragged` currently touch the opposite edge of `target`,
/// read from live rects on every call. Unknown ids touch nothing.
///
/// - top:    dragged bottom vs target top
/// - right:  dragged left   vs target right
/// - bottom: dragged top    vs target bottom
/// - left:   dragged right  vs target left
pub fn compute<R: RectSource + ?Sized>(
    rects: &R,
    dragged: &str,
    target: &str,
    tolerance: f32,
) -> AdjacencyResult {
    let (Some(d), Some(t)) = (rects.rect_of(dragged), rects.rect_of(target)) else {
        return AdjacencyResult::default();
    };

    AdjacencyResult {
        top: edges_touch(d.bottom(), t.top(), tolerance),
        right: edges_touch(d.left(), t.right(), tolerance),
        bottom: edges_touch(d.top(), t.bottom(), tolerance),
        left: edges_touch(d.right(), t.left(), tolerance),
    }
}
