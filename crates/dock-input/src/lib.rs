// Pointer gestures for the panel dock.
// A drag session classifies the pointer against live panel rects on every
// move; resize handles drive size variables. Both share one gesture arbiter.

pub mod adjacency;
mod arbiter;
mod classify;
mod drag;
mod resize;
mod tests;

pub use arbiter::{GestureArbiter, GestureKind, GestureToken};
pub use classify::Classifier;
pub use drag::{DragController, DragFeedback, DragSession, DragState, HighlightChange};
pub use resize::{
    hit_test, standard_handles, Axis, Grip, ResizeController, ResizeHandle, OUTLINER_WIDTH,
    PROPERTIES_WIDTH, TIMELINE_HEIGHT,
};
