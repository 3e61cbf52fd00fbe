use std::rc::Rc;

use chrono::{Duration, Utc};

use crate::models::settings::CountdownSettings;
use crate::services::countdown::{Clock, SystemClock, UiTaskQueue, ViewRegistry};

use super::countdown_view::SyncCodeCountdownView;

/// Reference host window: a settings page that hands out temporary codes
/// and shows how long the current one stays valid.
pub struct CountdownApp {
    clock: Rc<dyn Clock>,
    /// UI-thread task queue, pumped once per frame
    queue: Rc<UiTaskQueue>,
    view: SyncCodeCountdownView,
    settings: CountdownSettings,
}

impl eframe::App for CountdownApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.view.on_destroy_view();
    }
}

impl CountdownApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: CountdownSettings) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        let queue = Rc::new(UiTaskQueue::new(clock.clone()));
        let views = Rc::new(ViewRegistry::new());

        let mut view =
            SyncCodeCountdownView::new(clock.clone(), queue.clone(), views, settings.clone());
        view.on_create_view();

        Self {
            clock,
            queue,
            view,
            settings,
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let executed = self.queue.run_due();
        if executed > 0 {
            log::trace!("Ran {} UI task(s)", executed);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sync code");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let created = self.view.is_created();
                if ui
                    .add_enabled(created, egui::Button::new("Request temporary code"))
                    .clicked()
                {
                    self.request_code();
                }
                if created {
                    if ui.button("Close view").clicked() {
                        self.view.on_destroy_view();
                    }
                } else if ui.button("Reopen view").clicked() {
                    self.view.on_create_view();
                }
            });

            ui.add_space(8.0);
            self.view.render(ui);

            if let Some(deadline) = self.view.deadline() {
                ui.small(format!("Valid until {}", deadline.format("%H:%M:%S UTC")));
            }
        });

        // Wake up for the next queued tick rather than repainting continuously.
        if let Some(wait) = self.queue.next_due_in() {
            ctx.request_repaint_after(wait);
        }
    }

    fn request_code(&mut self) {
        let lifetime = i64::try_from(self.settings.code_lifetime_secs).unwrap_or(i64::MAX);
        let not_after = Duration::try_seconds(lifetime)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);
        log::info!("Issued temporary sync code valid until {}", not_after.to_rfc3339());
        self.view.set_not_after(not_after);
    }
}
