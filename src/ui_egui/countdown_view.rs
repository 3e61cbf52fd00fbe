//! Host view for the sync code countdown.
//!
//! Owns the lifecycle the presenter hooks into: creating the view inflates
//! the countdown label into the registry, destroying it tells the presenter
//! first and then detaches the label.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::models::settings::CountdownSettings;
use crate::services::countdown::{
    Clock, CountdownPresenter, UiTaskScheduler, ViewId, ViewRegistry,
};

/// Identifier of the countdown label inside the view.
pub const SYNC_COUNTDOWN_TEXT: &str = "sync_count_down_text";

pub struct SyncCodeCountdownView {
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn UiTaskScheduler>,
    views: Rc<ViewRegistry>,
    settings: CountdownSettings,
    presenter: Option<CountdownPresenter>,
}

impl SyncCodeCountdownView {
    pub fn new(
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn UiTaskScheduler>,
        views: Rc<ViewRegistry>,
        settings: CountdownSettings,
    ) -> Self {
        Self {
            clock,
            scheduler,
            views,
            settings,
            presenter: None,
        }
    }

    pub fn text_id() -> ViewId {
        ViewId::new(SYNC_COUNTDOWN_TEXT)
    }

    /// Inflates the label and binds a fresh presenter to it. Recreating a
    /// live view tears the old one down first.
    pub fn on_create_view(&mut self) {
        if self.presenter.is_some() {
            self.on_destroy_view();
        }

        self.views.inflate(Self::text_id());
        self.presenter = Some(CountdownPresenter::new(
            self.clock.clone(),
            self.scheduler.clone(),
            self.views.clone(),
            Self::text_id(),
            self.settings.clone(),
        ));
        log::debug!("Sync code countdown view created");
    }

    pub fn on_destroy_view(&mut self) {
        if let Some(presenter) = self.presenter.take() {
            presenter.on_destroy();
        }
        self.views.detach(&Self::text_id());
        log::debug!("Sync code countdown view destroyed");
    }

    /// Returns false when no view is alive to show the countdown.
    pub fn set_not_after(&self, not_after: DateTime<Utc>) -> bool {
        match &self.presenter {
            Some(presenter) => {
                presenter.set_expiry(not_after);
                true
            }
            None => {
                log::warn!("Ignoring code expiry {}: countdown view is not created", not_after);
                false
            }
        }
    }

    pub fn is_created(&self) -> bool {
        self.presenter.is_some()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.presenter.as_ref().and_then(|presenter| presenter.deadline())
    }

    /// Current label text, `None` while the view is destroyed.
    pub fn text(&self) -> Option<String> {
        self.views.text(&Self::text_id())
    }

    pub fn render(&self, ui: &mut egui::Ui) {
        match self.text() {
            Some(text) if !text.is_empty() => {
                ui.label(egui::RichText::new(text).size(16.0));
            }
            Some(_) => {
                ui.weak("No temporary code requested.");
            }
            None => {
                ui.weak("Countdown view closed.");
            }
        }
    }
}
