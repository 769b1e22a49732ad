use dock_core::{CursorIcon, DropDecision, DropZone, PanelId, RectSource, Vec2};

use crate::arbiter::{GestureArbiter, GestureKind, GestureToken};
use crate::classify::Classifier;

// ──────────────────────────────────────────────
// Panel drag state machine
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
    Committing,
}

#[derive(Debug)]
pub struct DragSession {
    pub panel: PanelId,
    pub decision: Option<DropDecision>,
    committing: bool,
    token: GestureToken,
}

/// What the UI should change after a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightChange {
    /// Same zone as before; leave the highlight alone.
    Unchanged,
    /// Hide every highlight.
    Cleared,
    /// Hide every highlight, then show this one.
    Show { target: PanelId, zone: DropZone },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragFeedback {
    pub highlight: HighlightChange,
    pub cursor: CursorIcon,
}

/// Owns the single docking session. Idle → Dragging on `begin`, Dragging →
/// Committing on `finish`, back to Idle on `end_commit` or `cancel`.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    classifier: Classifier,
}

impl DragController {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            session: None,
            classifier,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            None => DragState::Idle,
            Some(s) if s.committing => DragState::Committing,
            Some(_) => DragState::Dragging,
        }
    }

    pub fn dragged(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.panel.as_str())
    }

    pub fn decision(&self) -> Option<&DropDecision> {
        self.session.as_ref()?.decision.as_ref()
    }

    /// The zone currently highlighted: the last decision, if valid.
    pub fn highlight(&self) -> Option<(&str, DropZone)> {
        self.decision()
            .filter(|d| d.valid)
            .map(|d| (d.target.as_str(), d.zone))
    }

    /// Start dragging `panel`. A no-op returning false when a session is
    /// already open or another gesture holds the pointer.
    pub fn begin(&mut self, panel: &str, arbiter: &mut GestureArbiter) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(token) = arbiter.try_acquire(GestureKind::Dock) else {
            return false;
        };
        log::debug!("drag started: {}", panel);
        self.session = Some(DragSession {
            panel: panel.to_string(),
            decision: None,
            committing: false,
            token,
        });
        true
    }

    /// Reclassify the pointer. Runs on every move with no throttling so the
    /// highlight always matches the pointer. Returns `None` when not dragging.
    pub fn update<R: RectSource + ?Sized>(
        &mut self,
        pointer: Vec2,
        candidates: &[PanelId],
        rects: &R,
    ) -> Option<DragFeedback> {
        let previous = self.highlight().map(|(t, z)| (t.to_string(), z));
        let classifier = self.classifier;
        let session = self.session.as_mut().filter(|s| !s.committing)?;

        session.decision = classifier.classify(&session.panel, pointer, candidates, rects);

        let cursor = match &session.decision {
            Some(d) if !d.valid => CursorIcon::NoDrop,
            _ => CursorIcon::Grabbing,
        };
        let current = session
            .decision
            .as_ref()
            .filter(|d| d.valid)
            .map(|d| (d.target.clone(), d.zone));

        let highlight = if current == previous {
            HighlightChange::Unchanged
        } else {
            match current {
                Some((target, zone)) => HighlightChange::Show { target, zone },
                None => HighlightChange::Cleared,
            }
        };

        Some(DragFeedback { highlight, cursor })
    }

    /// Pointer released: enter Committing and hand back the dragged panel
    /// with the decision to execute, if it is valid. Call
    /// [`end_commit`](Self::end_commit) once the drop has been handled.
    pub fn finish(&mut self) -> Option<(PanelId, Option<DropDecision>)> {
        let session = self.session.as_mut().filter(|s| !s.committing)?;
        session.committing = true;
        let decision = session.decision.clone().filter(|d| d.valid);
        Some((session.panel.clone(), decision))
    }

    /// Close a committing session and release the pointer.
    pub fn end_commit(&mut self, arbiter: &mut GestureArbiter) {
        if let Some(session) = self.session.take() {
            arbiter.release(session.token);
        }
    }

    /// Abort the session without mutating anything. Returns true if a
    /// session was open.
    pub fn cancel(&mut self, arbiter: &mut GestureArbiter) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("drag cancelled: {}", session.panel);
                arbiter.release(session.token);
                true
            }
            None => false,
        }
    }
}
