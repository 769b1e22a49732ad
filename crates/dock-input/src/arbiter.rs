// Gesture arbiter: at most one pointer gesture (dock drag or track resize)
// may own the pointer at a time. A second request is refused, never queued.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Dock,
    Resize,
}

/// Proof of ownership handed out by [`GestureArbiter::try_acquire`].
/// Not `Clone`: only the holder can release it.
#[derive(Debug, PartialEq, Eq)]
pub struct GestureToken {
    kind: GestureKind,
    serial: u64,
}

impl GestureToken {
    pub fn kind(&self) -> GestureKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct GestureArbiter {
    active: Option<(GestureKind, u64)>,
    next_serial: u64,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&mut self, kind: GestureKind) -> Option<GestureToken> {
        if let Some((held, _)) = self.active {
            log::debug!("{:?} gesture refused: {:?} is active", kind, held);
            return None;
        }
        self.next_serial += 1;
        self.active = Some((kind, self.next_serial));
        Some(GestureToken {
            kind,
            serial: self.next_serial,
        })
    }

    /// Release a token. Stale tokens are ignored.
    pub fn release(&mut self, token: GestureToken) -> bool {
        match self.active {
            Some((_, serial)) if serial == token.serial => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn active(&self) -> Option<GestureKind> {
        self.active.map(|(kind, _)| kind)
    }

    pub fn is_free(&self) -> bool {
        self.active.is_none()
    }
}
