//! The outward notice channel through which all failures are reported.

use std::fmt;

use serde::Serialize;

/// A message for the operator. Fatal notices report failures that leave the
/// display without the requested data; non-fatal ones report recovered
/// conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub fatal: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Notice {
        Notice {
            message: message.into(),
            fatal: false,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Notice {
        Notice {
            message: message.into(),
            fatal: true,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fatal {
            write!(f, "error: {}", self.message)
        } else {
            write!(f, "note: {}", self.message)
        }
    }
}

/// Receiver of operator notices.
pub trait NoticeSink {
    fn notify(&mut self, notice: Notice);
}

/// A sink that records every notice in arrival order.
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> NoticeLog {
        NoticeLog::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl NoticeSink for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
