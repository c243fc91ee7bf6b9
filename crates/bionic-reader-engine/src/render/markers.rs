//! Structural markers of the host's rendered block markup, plus the tags the
//! rewriter itself produces.

/// Tag of the synthetic wrapper around emphasized text. The host never
/// renders it, so its presence means "already emphasized".
pub const MARKER_TAG: &str = "bionic";

/// Tag of a bold run inside a marker.
pub const BOLD_TAG: &str = "b";

pub const BOLD: &str = "rm-bold";
pub const HIGHLIGHT: &str = "rm-highlight";
pub const ITALICS: &str = "rm-italics";
pub const TAG_REF: &str = "rm-page-ref--tag";
pub const PAGE_REF_LINK: &str = "rm-page-ref--link";
pub const PAGE_REF_BRACKETS: &str = "rm-page-ref__brackets";
pub const POPOVER_WRAPPER: &str = "bp3-popover-wrapper";
pub const BLOCK_REF: &str = "rm-block-ref";
pub const BLOCK_QUOTE: &str = "rm-bq";
