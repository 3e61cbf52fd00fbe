pub mod clock;
mod format;
mod presenter;
pub mod scheduler;
mod token;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_remaining, whole_seconds_ceil};
pub use presenter::{CountdownPresenter, TICK_INTERVAL};
pub use scheduler::{UiTask, UiTaskQueue, UiTaskScheduler};
pub use token::CancellationToken;
pub use view::{TextLabel, TextSink, ViewHost, ViewId, ViewRegistry};
