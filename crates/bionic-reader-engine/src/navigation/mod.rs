//! Block graph navigation: where "up", "down", "left" and "right" lead from
//! the block in view, and how to move between (or create) date notes.

pub mod chevrons;
pub mod clock;
pub mod confirm;
pub mod context;
pub mod dates;
pub mod navigator;
pub mod store;

pub use chevrons::{ChevronDisplay, ChevronState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use confirm::{CONFIRM_WINDOW_MS, ConfirmState, ConfirmStep, CreateConfirmation};
pub use context::{BlockContext, BlockGraphResolver, ContextCache};
pub use dates::DateDirection;
pub use navigator::{
    DateTarget, Intent, LogNotifier, Modifiers, NavDirection, NavOutcome, Navigator, Notice,
    Notifier,
};
pub use store::{ChildRef, MemoryTreeStore, TreeStore};
