//! Live "time remaining" countdown for a temporary sync code.
//!
//! [`CountdownPresenter::set_expiry`] renders once straight away and then
//! re-renders every [`TICK_INTERVAL`] on the UI scheduler until the deadline
//! passes. The cycle ends on its own at expiry; the only other way out is
//! [`CountdownPresenter::on_destroy`], wired to the host view's teardown.
//!
//! Ticks are cooperative. A tick that was already queued when the view went
//! away still fires, but its first action is to check the destroyed gate, so
//! nothing is written after teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

use super::clock::Clock;
use super::format::format_remaining;
use super::scheduler::UiTaskScheduler;
use super::token::CancellationToken;
use super::view::{ViewHost, ViewId};
use crate::models::settings::CountdownSettings;
use crate::utils::date::{naive_as_utc, to_utc};

/// Delay between two renders of the same countdown.
pub const TICK_INTERVAL: StdDuration = StdDuration::from_millis(1000);

struct PresenterState {
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn UiTaskScheduler>,
    views: Rc<dyn ViewHost>,
    text_view: ViewId,
    settings: CountdownSettings,
    deadline: Cell<Option<DateTime<Utc>>>,
    destroyed: CancellationToken,
    /// Gate of the countdown started by the latest `set_expiry`.
    session: RefCell<CancellationToken>,
}

impl PresenterState {
    fn tick(state: &Rc<PresenterState>, session: &CancellationToken) {
        if state.destroyed.is_cancelled() || session.is_cancelled() {
            return;
        }

        let Some(deadline) = state.deadline.get() else {
            return;
        };

        let remaining = deadline - state.clock.now();
        if remaining <= Duration::zero() {
            log::debug!("Countdown for '{}' reached its deadline", state.text_view);
            return;
        }

        // Looked up on every tick; the host may have replaced or dropped it.
        let Some(sink) = state.views.find_text_view(&state.text_view) else {
            log::debug!(
                "Countdown view '{}' is gone, abandoning the countdown",
                state.text_view
            );
            return;
        };

        let formatted = format_remaining(remaining, state.settings.duration_style);
        sink.set_text(&state.settings.render_message(&formatted));
        log::trace!("Countdown '{}' rendered {}", state.text_view, formatted);

        Self::schedule_next(state, session.clone());
    }

    fn schedule_next(state: &Rc<PresenterState>, session: CancellationToken) {
        let weak: Weak<PresenterState> = Rc::downgrade(state);
        state.scheduler.post_delayed(
            TICK_INTERVAL,
            Box::new(move || {
                // A dropped presenter counts as destroyed.
                if let Some(state) = weak.upgrade() {
                    PresenterState::tick(&state, &session);
                }
            }),
        );
    }
}

/// Drives the countdown text of one view.
pub struct CountdownPresenter {
    state: Rc<PresenterState>,
}

impl CountdownPresenter {
    pub fn new(
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn UiTaskScheduler>,
        views: Rc<dyn ViewHost>,
        text_view: ViewId,
        settings: CountdownSettings,
    ) -> Self {
        Self {
            state: Rc::new(PresenterState {
                clock,
                scheduler,
                views,
                text_view,
                settings,
                deadline: Cell::new(None),
                destroyed: CancellationToken::new(),
                session: RefCell::new(CancellationToken::new()),
            }),
        }
    }

    /// Starts counting down to `deadline` and renders immediately.
    ///
    /// A deadline that is not in the future renders nothing. Calling this
    /// again replaces the deadline; ticks queued for the previous one no-op.
    pub fn set_expiry<Tz: TimeZone>(&self, deadline: DateTime<Tz>) {
        let deadline = to_utc(deadline);
        self.state.deadline.set(Some(deadline));

        let session = CancellationToken::new();
        self.state.session.replace(session.clone()).cancel();

        log::info!(
            "Countdown for '{}' set to expire at {}",
            self.state.text_view,
            deadline.to_rfc3339()
        );
        PresenterState::tick(&self.state, &session);
    }

    /// Same as [`set_expiry`](Self::set_expiry) for a zone-less timestamp,
    /// read at UTC offset.
    pub fn set_expiry_naive(&self, not_after: NaiveDateTime) {
        self.set_expiry(naive_as_utc(not_after));
    }

    /// Host view teardown. Irreversible and idempotent.
    pub fn on_destroy(&self) {
        if self.state.destroyed.cancel() {
            self.state.session.borrow().cancel();
            log::debug!("Countdown for '{}' destroyed", self.state.text_view);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed.is_cancelled()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.state.deadline.get()
    }

    /// Signed time left; negative once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline - self.state.clock.now())
    }

    pub fn text_view(&self) -> &ViewId {
        &self.state.text_view
    }
}
