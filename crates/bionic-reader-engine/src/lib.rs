//! Bionic reading over rendered outliner blocks.
//!
//! [`emphasis`] decides which leading letters of which words are bold,
//! [`render`] applies that to a block's nested inline markup and reverts it,
//! and [`navigation`] moves between blocks and date notes.

pub mod emphasis;
pub mod error;
pub mod navigation;
pub mod render;
pub mod session;

// Re-export key types for easier usage
pub use emphasis::{BionicSettings, EmphasizedFragment, Fixation, Saccade, WordUnit, split};
pub use error::{EngineError, HostError};
pub use navigation::{
    BlockContext, BlockGraphResolver, Clock, Modifiers, NavDirection, NavOutcome, Navigator,
    TreeStore,
};
pub use render::{Markup, NodeId, RenderTree, RewriteOutcome, TextContainer, TreeRewriter, revert};
pub use session::{ChangeDebouncer, Modes, ReaderSession};
