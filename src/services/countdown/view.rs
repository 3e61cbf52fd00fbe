//! Text widgets addressed by identifier.
//!
//! The presenter never owns its widget. It asks the [`ViewHost`] for the
//! widget on every write, because the host may drop or recreate it between
//! ticks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Stable identifier of a widget inside the current view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(pub String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A display surface that shows a single line of text.
pub trait TextSink {
    fn set_text(&self, text: &str);
}

/// Resolves widget identifiers to live widgets.
#[cfg_attr(test, mockall::automock)]
pub trait ViewHost {
    /// `None` when the widget is not (or no longer) attached.
    fn find_text_view(&self, id: &ViewId) -> Option<Rc<dyn TextSink>>;
}

/// Plain text label backing a [`ViewId`] in a [`ViewRegistry`].
#[derive(Debug, Default)]
pub struct TextLabel {
    text: RefCell<String>,
}

impl TextLabel {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl TextSink for TextLabel {
    fn set_text(&self, text: &str) {
        let mut current = self.text.borrow_mut();
        current.clear();
        current.push_str(text);
    }
}

/// Minimal view hierarchy: labels attached by id.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    labels: RefCell<HashMap<ViewId, Rc<TextLabel>>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty label under `id`, replacing any existing one.
    pub fn inflate(&self, id: ViewId) -> Rc<TextLabel> {
        let label = Rc::new(TextLabel::default());
        self.labels.borrow_mut().insert(id, label.clone());
        label
    }

    /// Removes the label. Returns false if nothing was attached.
    pub fn detach(&self, id: &ViewId) -> bool {
        self.labels.borrow_mut().remove(id).is_some()
    }

    pub fn is_attached(&self, id: &ViewId) -> bool {
        self.labels.borrow().contains_key(id)
    }

    pub fn text(&self, id: &ViewId) -> Option<String> {
        self.labels.borrow().get(id).map(|label| label.text())
    }
}

impl ViewHost for ViewRegistry {
    fn find_text_view(&self, id: &ViewId) -> Option<Rc<dyn TextSink>> {
        self.labels
            .borrow()
            .get(id)
            .map(|label| label.clone() as Rc<dyn TextSink>)
    }
}
