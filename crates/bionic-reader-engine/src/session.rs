use crate::{
    emphasis::BionicSettings,
    render::{RewriteOutcome, TextContainer, TreeRewriter, revert},
};

/// Default quiet period before a burst of content changes triggers a pass.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Which reader features are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    pub bionic: bool,
    pub navigation: bool,
}

/// Settings and mode state for one reader, plus the passes that keep the
/// rendered blocks in line with them.
#[derive(Debug, Clone, Default)]
pub struct ReaderSession {
    settings: BionicSettings,
    modes: Modes,
    debouncer: ChangeDebouncer,
}

impl ReaderSession {
    pub fn new(settings: BionicSettings) -> Self {
        Self {
            settings,
            modes: Modes::default(),
            debouncer: ChangeDebouncer::default(),
        }
    }

    /// Replaces the quiet period used by [`Self::content_changed`].
    pub fn with_debounce(mut self, quiet_ms: u64) -> Self {
        self.debouncer = ChangeDebouncer::new(quiet_ms);
        self
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debouncer.quiet_ms()
    }

    pub fn settings(&self) -> BionicSettings {
        self.settings
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    /// Emphasizes every block in `blocks` if bionic mode is on. Returns the
    /// number of text nodes rewritten.
    pub fn apply_to_blocks<T: TextContainer>(
        &self,
        tree: &mut T,
        blocks: impl IntoIterator<Item = T::Node>,
    ) -> usize {
        if !self.modes.bionic {
            return 0;
        }
        let rewriter = TreeRewriter::new(self.settings);
        blocks
            .into_iter()
            .map(|block| match rewriter.rewrite_block(tree, block) {
                RewriteOutcome::Rewritten { fragments } => fragments,
                RewriteOutcome::AlreadyEmphasized | RewriteOutcome::Detached => 0,
            })
            .sum()
    }

    /// Strips emphasis from every block. Returns the number of markers removed.
    pub fn revert_blocks<T: TextContainer>(
        &self,
        tree: &mut T,
        blocks: impl IntoIterator<Item = T::Node>,
    ) -> usize {
        blocks.into_iter().map(|block| revert(tree, block)).sum()
    }

    /// Flips bionic mode and brings the blocks in line. Returns the new state.
    pub fn toggle_bionic<T: TextContainer>(&mut self, tree: &mut T, blocks: &[T::Node]) -> bool {
        self.modes.bionic = !self.modes.bionic;
        if self.modes.bionic {
            let rewritten = self.apply_to_blocks(tree, blocks.iter().copied());
            log::info!("bionic mode on, {rewritten} text nodes emphasized");
        } else {
            let reverted = self.revert_blocks(tree, blocks.iter().copied());
            log::info!("bionic mode off, {reverted} markers removed");
        }
        self.modes.bionic
    }

    pub fn toggle_navigation(&mut self) -> bool {
        self.modes.navigation = !self.modes.navigation;
        log::info!(
            "navigation mode {}",
            if self.modes.navigation { "on" } else { "off" }
        );
        self.modes.navigation
    }

    /// Reverts and re-applies emphasis, for when block content or settings
    /// changed underneath existing markers.
    pub fn refresh<T: TextContainer>(&self, tree: &mut T, blocks: &[T::Node]) -> usize {
        if !self.modes.bionic {
            return 0;
        }
        self.revert_blocks(tree, blocks.iter().copied());
        self.apply_to_blocks(tree, blocks.iter().copied())
    }

    /// Notes that block content changed at `now_ms`.
    pub fn content_changed(&mut self, now_ms: u64) {
        self.debouncer.signal(now_ms);
    }

    /// Refreshes the blocks once the changes have settled. Returns `None`
    /// while still waiting or when nothing changed.
    pub fn poll<T: TextContainer>(
        &mut self,
        tree: &mut T,
        blocks: &[T::Node],
        now_ms: u64,
    ) -> Option<usize> {
        if !self.debouncer.ready(now_ms) {
            return None;
        }
        Some(self.refresh(tree, blocks))
    }

    pub fn update_settings<T: TextContainer>(
        &mut self,
        tree: &mut T,
        blocks: &[T::Node],
        settings: BionicSettings,
    ) -> usize {
        if settings == self.settings {
            return 0;
        }
        log::debug!("emphasis settings changed to {settings:?}");
        self.settings = settings;
        self.refresh(tree, blocks)
    }
}

/// Coalesces bursts of change notifications into one pass.
#[derive(Debug, Clone)]
pub struct ChangeDebouncer {
    quiet_ms: u64,
    last_signal: Option<u64>,
}

impl Default for ChangeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl ChangeDebouncer {
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            last_signal: None,
        }
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Records a change at `now_ms`, pushing the deadline back.
    pub fn signal(&mut self, now_ms: u64) {
        self.last_signal = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.last_signal.is_some()
    }

    /// True once per burst, when `quiet_ms` have passed since the last signal.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_signal {
            Some(at) if now_ms.saturating_sub(at) >= self.quiet_ms => {
                self.last_signal = None;
                true
            }
            _ => false,
        }
    }
}
