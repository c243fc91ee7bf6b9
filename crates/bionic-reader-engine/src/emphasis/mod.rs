//! Bionic emphasis of plain text: how much of a word is bold, and which
//! words of a paragraph get emphasis at all.

pub mod settings;
pub mod splitter;
pub mod word;

pub use settings::{BionicSettings, Fixation, Saccade};
pub use splitter::{EmphasizedFragment, WordUnit, split};
pub use word::{is_pictographic, split_index};
