use super::context::BlockContext;

/// Display state of one navigation chevron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChevronState {
    pub visible: bool,
    /// Drawn as a double chevron: the move leaves the current level.
    pub double: bool,
    pub label: &'static str,
}

impl ChevronState {
    fn single(visible: bool, label: &'static str) -> Self {
        Self {
            visible,
            double: false,
            label,
        }
    }
}

/// The four chevrons around the main view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChevronDisplay {
    pub up: ChevronState,
    pub down: ChevronState,
    pub left: ChevronState,
    pub right: ChevronState,
}

impl ChevronDisplay {
    /// Chevrons for an ordinary block or page. `next_block` is what a down
    /// move would reach.
    pub fn for_block(context: &BlockContext, next_block: Option<&str>) -> Self {
        let leaves_level = !context.has_next_sibling();
        Self {
            up: ChevronState::single(context.has_previous_sibling(), "Previous sibling"),
            down: ChevronState {
                visible: next_block.is_some(),
                double: leaves_level,
                label: if leaves_level {
                    "Next parent sibling"
                } else {
                    "Next sibling"
                },
            },
            left: ChevronState::single(!context.is_page, "Parent"),
            right: ChevronState::single(context.first_child.is_some(), "First child"),
        }
    }

    /// Chevrons for a date note. Up and down travel between notes, so both
    /// are double; down stays visible on today's note to offer tomorrow.
    pub fn for_date_note(
        context: &BlockContext,
        has_previous_note: bool,
        has_next_note: bool,
        is_today: bool,
    ) -> Self {
        Self {
            up: ChevronState {
                visible: has_previous_note,
                double: has_previous_note,
                label: "Previous Daily Note (+Shift/Ctrl/Alt for week/month/year)",
            },
            down: ChevronState {
                visible: has_next_note || is_today,
                double: has_next_note || is_today,
                label: "Next Daily Note (+Shift/Ctrl/Alt for week/month/year)",
            },
            left: ChevronState::single(false, "Parent"),
            right: ChevronState::single(context.first_child.is_some(), "First child"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(order: Option<usize>, siblings: &[&str], first_child: Option<&str>) -> BlockContext {
        BlockContext {
            uid: "x".to_string(),
            parent: order.map(|_| "page".to_string()),
            first_child: first_child.map(str::to_string),
            siblings: siblings.iter().map(|s| s.to_string()).collect(),
            order,
            is_page: order.is_none(),
            is_date_note: false,
        }
    }

    #[test]
    fn test_middle_block_shows_everything_single() {
        let ctx = context(Some(1), &["a", "x", "c"], Some("child"));
        let display = ChevronDisplay::for_block(&ctx, Some("c"));

        assert!(display.up.visible);
        assert!(display.down.visible);
        assert!(!display.down.double);
        assert_eq!(display.down.label, "Next sibling");
        assert!(display.left.visible);
        assert!(display.right.visible);
    }

    #[test]
    fn test_last_block_gets_double_down() {
        let ctx = context(Some(1), &["a", "x"], None);
        let display = ChevronDisplay::for_block(&ctx, Some("uncle"));

        assert!(display.down.visible);
        assert!(display.down.double);
        assert_eq!(display.down.label, "Next parent sibling");
        assert!(!display.right.visible);
    }

    #[test]
    fn test_page_hides_up_and_left() {
        let ctx = context(None, &[], Some("first"));
        let display = ChevronDisplay::for_block(&ctx, None);

        assert!(!display.up.visible);
        assert!(!display.left.visible);
        assert!(!display.down.visible);
        assert!(display.right.visible);
    }

    #[test]
    fn test_today_note_offers_tomorrow() {
        let mut ctx = context(None, &[], None);
        ctx.is_date_note = true;
        let display = ChevronDisplay::for_date_note(&ctx, true, false, true);

        assert!(display.up.visible && display.up.double);
        assert!(display.down.visible && display.down.double);
        assert!(!display.left.visible);
    }

    #[test]
    fn test_last_note_in_the_past_hides_down() {
        let mut ctx = context(None, &[], None);
        ctx.is_date_note = true;
        let display = ChevronDisplay::for_date_note(&ctx, false, false, false);

        assert!(!display.up.visible);
        assert!(!display.down.visible);
        assert!(!display.down.double);
    }
}
