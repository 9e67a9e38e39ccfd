//! Transient messages shown after an operation.

use std::fmt;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message replaced by the next operation's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    text: String,
}

impl Notice {
    /// Success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Holder for the notice currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeSlot(Option<Notice>);

impl NoticeSlot {
    /// Replace whatever is shown.
    pub fn show(&mut self, notice: Notice) {
        self.0 = Some(notice);
    }

    /// Dismiss the current notice.
    pub fn dismiss(&mut self) {
        self.0 = None;
    }

    /// Notice on screen, if any.
    pub fn current(&self) -> Option<&Notice> {
        self.0.as_ref()
    }
}
