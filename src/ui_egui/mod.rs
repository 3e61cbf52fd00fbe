mod app;
mod countdown_view;

pub use app::CountdownApp;
pub use countdown_view::{SyncCodeCountdownView, SYNC_COUNTDOWN_TEXT};
