// Test fixtures - reusable test data
// Provides a deterministic countdown host shared across test files

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sync_code_countdown::models::settings::CountdownSettings;
use sync_code_countdown::services::countdown::{
    Clock, CountdownPresenter, ManualClock, TextSink, UiTaskQueue, ViewHost, ViewId,
    ViewRegistry,
};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Returns Jan 1, 2025 at midnight UTC
    pub fn jan_1_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// Returns Dec 31, 2025 at 23:59:30 UTC (deadlines cross the year)
    pub fn new_years_eve_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 30).unwrap()
    }
}

pub const TEXT_VIEW: &str = "sync_count_down_text";

/// Presenter wired to a manual clock, a UI task queue and a view registry.
pub struct CountdownHarness {
    pub clock: Rc<ManualClock>,
    pub queue: Rc<UiTaskQueue>,
    pub views: Rc<ViewRegistry>,
    pub presenter: CountdownPresenter,
}

impl CountdownHarness {
    /// Countdown whose label shows only the formatted duration.
    pub fn new() -> Self {
        Self::with_settings(
            dates::jan_1_2025(),
            CountdownSettings {
                message_template: "{remaining}".to_string(),
                ..Default::default()
            },
        )
    }

    pub fn with_settings(start: DateTime<Utc>, settings: CountdownSettings) -> Self {
        let clock = Rc::new(ManualClock::new(start));
        let queue = Rc::new(UiTaskQueue::new(clock.clone()));
        let views = Rc::new(ViewRegistry::new());
        views.inflate(text_id());

        let presenter = CountdownPresenter::new(
            clock.clone(),
            queue.clone(),
            views.clone(),
            text_id(),
            settings,
        );

        Self {
            clock,
            queue,
            views,
            presenter,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn text(&self) -> Option<String> {
        self.views.text(&text_id())
    }

    /// Moves the clock and runs whatever became due.
    pub fn advance(&self, by: Duration) -> usize {
        self.clock.advance(by);
        self.queue.run_due()
    }
}

pub fn text_id() -> ViewId {
    ViewId::new(TEXT_VIEW)
}

/// Remembers every write, in order, for a single always-attached label.
#[derive(Default)]
pub struct RecordingSink {
    writes: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl TextSink for RecordingSink {
    fn set_text(&self, text: &str) {
        self.writes.borrow_mut().push(text.to_string());
    }
}

/// View host that hands out the same recording sink for any id.
pub struct RecordingViews {
    pub sink: Rc<RecordingSink>,
}

impl ViewHost for RecordingViews {
    fn find_text_view(&self, _id: &ViewId) -> Option<Rc<dyn TextSink>> {
        Some(self.sink.clone() as Rc<dyn TextSink>)
    }
}

/// Presenter writing into a [`RecordingSink`]; returns the pieces tests poke.
pub fn recording_presenter(
    start: DateTime<Utc>,
) -> (Rc<ManualClock>, Rc<UiTaskQueue>, Rc<RecordingSink>, CountdownPresenter) {
    let clock = Rc::new(ManualClock::new(start));
    let queue = Rc::new(UiTaskQueue::new(clock.clone()));
    let sink = Rc::new(RecordingSink::default());
    let presenter = CountdownPresenter::new(
        clock.clone(),
        queue.clone(),
        Rc::new(RecordingViews { sink: sink.clone() }),
        text_id(),
        CountdownSettings {
            message_template: "{remaining}".to_string(),
            ..Default::default()
        },
    );
    (clock, queue, sink, presenter)
}
