use serde::{Deserialize, Serialize};

use crate::error::HostError;

use super::{
    chevrons::ChevronDisplay,
    clock::Clock,
    confirm::{ConfirmStep, CreateConfirmation},
    context::{BlockContext, BlockGraphResolver},
    dates::{self, DateDirection},
    store::TreeStore,
};

const PROMPT_TIMEOUT_MS: u64 = 3_000;
const FAILURE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    fn as_date_direction(self) -> Option<DateDirection> {
        match self {
            NavDirection::Up => Some(DateDirection::Backward),
            NavDirection::Down => Some(DateDirection::Forward),
            NavDirection::Left | NavDirection::Right => None,
        }
    }
}

/// Keys held during a navigation command. On date notes they pick the step
/// size: alt a year, ctrl a month, shift a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// Where an up/down move from a date note would land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTarget {
    pub uid: Option<String>,
    pub label: String,
    pub exists: bool,
    /// The missing target may be created through the two-click protocol.
    pub can_create: bool,
    /// Message for a popover over a missing target.
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Opened { uid: String },
    AwaitingConfirmation { uid: String, title: String },
    Created { uid: String, title: String },
    NoTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Primary,
    Success,
    Danger,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub intent: Intent,
    pub timeout_ms: u64,
}

impl Notice {
    fn new(message: impl Into<String>, intent: Intent, timeout_ms: u64) -> Self {
        Self {
            message: message.into(),
            intent,
            timeout_ms,
        }
    }
}

/// Surface for transient notices (toasts in a UI).
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices, mostly for inspection in tests.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Sends notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.intent {
            Intent::Primary | Intent::Success => log::info!("{}", notice.message),
            Intent::Danger => log::error!("{}", notice.message),
        }
    }
}

/// Moves the main view around the block graph and between date notes.
pub struct Navigator<S: TreeStore, C: Clock, N: Notifier> {
    store: S,
    resolver: BlockGraphResolver<C>,
    confirm: CreateConfirmation,
    notifier: N,
    current: Option<BlockContext>,
}

impl<S: TreeStore, C: Clock, N: Notifier> Navigator<S, C, N> {
    pub fn new(store: S, clock: C, notifier: N) -> Self {
        Self {
            store,
            resolver: BlockGraphResolver::new(clock),
            confirm: CreateConfirmation::new(),
            notifier,
            current: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn current(&self) -> Option<&BlockContext> {
        self.current.as_ref()
    }

    /// Points the navigator at `uid`, the block or page now in view.
    pub fn update(&mut self, uid: &str) -> Option<&BlockContext> {
        self.current = self.resolver.resolve(&self.store, uid);
        if self.current.is_none() {
            log::debug!("no context for {uid}");
        }
        self.current.as_ref()
    }

    /// Target of an up/down move from the current date note, or `None` when
    /// the view is not on a date note or the direction is sideways.
    pub fn date_target(&self, direction: NavDirection, modifiers: Modifiers) -> Option<DateTarget> {
        let context = self.current.as_ref()?;
        if !context.is_date_note {
            return None;
        }
        let direction = direction.as_date_direction()?;
        Some(self.resolve_date_target(&context.uid, direction, modifiers))
    }

    fn resolve_date_target(
        &self,
        uid: &str,
        direction: DateDirection,
        modifiers: Modifiers,
    ) -> DateTarget {
        let sign = direction.sign();
        let forward = direction == DateDirection::Forward;
        let (next_or_previous, plus_or_minus) = if forward {
            ("Next", "+")
        } else {
            ("Previous", "-")
        };
        let exists = |uid: &str| self.store.exists(uid);

        let (target, mut label) = if modifiers.alt {
            (
                dates::offset_by_years(uid, sign as i32),
                format!("{next_or_previous} year (same day)"),
            )
        } else if modifiers.ctrl {
            (
                dates::offset_by_months(uid, sign as i32),
                format!("{next_or_previous} month (same day)"),
            )
        } else if modifiers.shift {
            (
                dates::offset_by_days(uid, 7 * sign),
                format!("{plus_or_minus}7 days"),
            )
        } else {
            let found = match direction {
                DateDirection::Forward => dates::next_existing(uid, exists),
                DateDirection::Backward => dates::previous_existing(uid, exists),
            };
            (found, format!("{next_or_previous} Daily Note"))
        };
        let exists = target.as_deref().is_some_and(exists);

        let tomorrow_from_today = forward
            && !modifiers.any()
            && dates::today_uid(self.resolver.clock()).as_deref() == Some(uid);
        let target = match target {
            None if tomorrow_from_today => {
                label = format!("{next_or_previous} Daily Note (tomorrow)");
                dates::next_day_uid(uid)
            }
            target => target,
        };
        let can_create = !exists && target.is_some() && (modifiers.any() || tomorrow_from_today);

        let hint = match (&target, exists) {
            (Some(target), false) => Some(self.create_hint(target, direction, modifiers, can_create)),
            _ => None,
        };

        DateTarget {
            uid: target,
            label,
            exists,
            can_create,
            hint,
        }
    }

    fn create_hint(
        &self,
        target: &str,
        direction: DateDirection,
        modifiers: Modifiers,
        can_create: bool,
    ) -> String {
        if !can_create {
            return "This daily note page doesn't exist yet.".to_string();
        }
        let title = dates::page_title(target).unwrap_or_else(|| target.to_string());
        let with_modifier = if modifiers.any() {
            " (with the same modifier key)"
        } else {
            ""
        };
        let now = self.resolver.clock().now_ms();
        if self.confirm.is_pending_for(target, direction, now) {
            format!("Click again{with_modifier} to CREATE and open:\n\"{title}\"")
        } else {
            format!("Click twice{with_modifier} to create and open:\n\"{title}\"")
        }
    }

    /// Carries out a navigation command from the current view.
    ///
    /// Missing targets are not errors and yield [`NavOutcome::NoTarget`].
    /// Host failures are reported to the notifier and returned.
    pub fn navigate(
        &mut self,
        direction: NavDirection,
        modifiers: Modifiers,
    ) -> Result<NavOutcome, HostError> {
        let Some(context) = self.current.clone() else {
            return Ok(NavOutcome::NoTarget);
        };

        let target = if context.is_date_note {
            match direction.as_date_direction() {
                Some(date_direction) => {
                    let target = self.resolve_date_target(&context.uid, date_direction, modifiers);
                    if !target.exists {
                        return self.create_or_prompt(target, date_direction, modifiers);
                    }
                    target.uid
                }
                None if direction == NavDirection::Right => context.first_child.clone(),
                None => None,
            }
        } else {
            match direction {
                NavDirection::Up => context.previous_sibling().map(str::to_string),
                NavDirection::Down => self.resolver.next_across_boundary(&self.store, &context),
                NavDirection::Left => context.parent().map(str::to_string),
                NavDirection::Right => context.first_child.clone(),
            }
        };

        match target {
            Some(uid) => self.open(uid),
            None => Ok(NavOutcome::NoTarget),
        }
    }

    fn create_or_prompt(
        &mut self,
        target: DateTarget,
        direction: DateDirection,
        modifiers: Modifiers,
    ) -> Result<NavOutcome, HostError> {
        let Some(uid) = target.uid.filter(|_| target.can_create) else {
            self.confirm.reset();
            return Ok(NavOutcome::NoTarget);
        };
        let title = dates::page_title(&uid).unwrap_or_else(|| uid.clone());
        let now = self.resolver.clock().now_ms();

        match self.confirm.activate(&uid, direction, now) {
            ConfirmStep::AwaitingConfirmation => {
                let with_modifier = if modifiers.any() {
                    " while pressing the same modifier key"
                } else {
                    ""
                };
                self.notifier.notify(Notice::new(
                    format!("Click again{with_modifier} to create: {title}"),
                    Intent::Primary,
                    PROMPT_TIMEOUT_MS,
                ));
                Ok(NavOutcome::AwaitingConfirmation { uid, title })
            }
            ConfirmStep::Confirmed => {
                log::info!("creating daily note {title}");
                let created = match self.store.create_date_note(&title) {
                    Ok(created) => created,
                    Err(err) => return Err(self.report(err)),
                };
                self.notifier.notify(Notice::new(
                    format!("Created Daily Note: {title}"),
                    Intent::Success,
                    PROMPT_TIMEOUT_MS,
                ));
                self.open(created.clone())?;
                Ok(NavOutcome::Created {
                    uid: created,
                    title,
                })
            }
        }
    }

    fn open(&mut self, uid: String) -> Result<NavOutcome, HostError> {
        if let Err(err) = self.store.open_block(&uid) {
            return Err(self.report(err));
        }
        self.resolver.clear_cache();
        self.update(&uid);
        Ok(NavOutcome::Opened { uid })
    }

    fn report(&mut self, err: HostError) -> HostError {
        log::error!("{err}");
        self.confirm.reset();
        self.notifier
            .notify(Notice::new(err.to_string(), Intent::Danger, FAILURE_TIMEOUT_MS));
        err
    }

    /// Chevron display state for the current view.
    pub fn chevrons(&mut self) -> Option<ChevronDisplay> {
        let context = self.current.clone()?;
        if context.is_date_note {
            let exists = |uid: &str| self.store.exists(uid);
            let has_previous = dates::previous_existing(&context.uid, exists).is_some();
            let has_next = dates::next_existing(&context.uid, exists).is_some();
            let is_today =
                dates::today_uid(self.resolver.clock()).as_deref() == Some(context.uid.as_str());
            return Some(ChevronDisplay::for_date_note(
                &context,
                has_previous,
                has_next,
                is_today,
            ));
        }
        let next = self.resolver.next_across_boundary(&self.store, &context);
        Some(ChevronDisplay::for_block(&context, next.as_deref()))
    }
}
