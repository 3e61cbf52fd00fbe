// Settings module
// User-tunable presentation of the sync code countdown

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the formatted remaining time.
pub const REMAINING_PLACEHOLDER: &str = "{remaining}";

/// How the remaining duration is spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// "1h 0m 5s"
    Compact,
    /// "PT1H5S"
    Iso8601,
}

impl Default for DurationStyle {
    fn default() -> Self {
        Self::Compact
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// Message shown while the code is valid. `{remaining}` is substituted
    /// with the formatted duration; a template without it gets the duration
    /// appended.
    pub message_template: String,
    pub duration_style: DurationStyle,
    /// How long a freshly generated code stays valid (reference host only).
    pub code_lifetime_secs: u64,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            message_template: default_message_template(),
            duration_style: DurationStyle::default(),
            code_lifetime_secs: 300,
        }
    }
}

fn default_message_template() -> String {
    format!("This temporary code is valid for the next {REMAINING_PLACEHOLDER}")
}

impl CountdownSettings {
    /// Builds the display message around an already formatted duration.
    pub fn render_message(&self, remaining: &str) -> String {
        if self.message_template.contains(REMAINING_PLACEHOLDER) {
            self.message_template.replace(REMAINING_PLACEHOLDER, remaining)
        } else if self.message_template.trim().is_empty() {
            remaining.to_string()
        } else {
            format!("{} {}", self.message_template.trim_end(), remaining)
        }
    }
}
