use super::dates::DateDirection;

/// How long a first click on a missing date note waits for its second.
pub const CONFIRM_WINDOW_MS: u64 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    Pending {
        target: String,
        direction: DateDirection,
        at_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStep {
    /// First click recorded; nothing should be created yet.
    AwaitingConfirmation,
    /// Second click on the same target inside the window.
    Confirmed,
}

/// Two-click guard in front of date-note creation.
#[derive(Debug, Clone, Default)]
pub struct CreateConfirmation {
    state: ConfirmState,
}

impl CreateConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConfirmState {
        &self.state
    }

    /// Registers a click on `target`.
    ///
    /// A click confirms only if the pending click was on the same target in
    /// the same direction less than [`CONFIRM_WINDOW_MS`] ago. Any other
    /// click starts tracking afresh.
    pub fn activate(&mut self, target: &str, direction: DateDirection, now_ms: u64) -> ConfirmStep {
        if self.is_pending_for(target, direction, now_ms) {
            self.state = ConfirmState::Idle;
            return ConfirmStep::Confirmed;
        }
        self.state = ConfirmState::Pending {
            target: target.to_string(),
            direction,
            at_ms: now_ms,
        };
        ConfirmStep::AwaitingConfirmation
    }

    pub fn is_pending_for(&self, target: &str, direction: DateDirection, now_ms: u64) -> bool {
        match &self.state {
            ConfirmState::Pending {
                target: pending,
                direction: pending_direction,
                at_ms,
            } => {
                pending == target
                    && *pending_direction == direction
                    && now_ms.saturating_sub(*at_ms) < CONFIRM_WINDOW_MS
            }
            ConfirmState::Idle => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = ConfirmState::Idle;
    }
}
