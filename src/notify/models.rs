use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum NoticeLevel {
    #[serde(rename = "error")]
    Error,
}

/// A transient, user-visible notification raised by a chat session.
///
/// Notices are delivered over a channel so the presentation layer
/// decides how to surface them (toast, status line) and tests can
/// assert on them without a UI harness.
#[derive(Clone, Debug, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }
}
