//! Per-user conversation state.
//!
//! No record in the store means idle. Each variant carries exactly the data collected so far, so a
//! style without a link, or a length without a style, cannot be represented.

use prompt::Length;

use crate::error::RepostError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    AwaitingStyle {
        url: String,
    },
    AwaitingLength {
        url: String,
        style: String,
    },
    /// All choices made; generation ran or is running. Kept so the same article can be regenerated.
    Complete {
        url: String,
        style: String,
        length: Length,
    },
}

impl Session {
    pub fn start(url: impl Into<String>) -> Self {
        Session::AwaitingStyle { url: url.into() }
    }

    pub fn url(&self) -> &str {
        match self {
            Session::AwaitingStyle { url }
            | Session::AwaitingLength { url, .. }
            | Session::Complete { url, .. } => url,
        }
    }

    pub fn style(&self) -> Option<&str> {
        match self {
            Session::AwaitingStyle { .. } => None,
            Session::AwaitingLength { style, .. } | Session::Complete { style, .. } => Some(style),
        }
    }

    pub fn state(&self) -> &'static str {
        match self {
            Session::AwaitingStyle { .. } => "awaiting_style",
            Session::AwaitingLength { .. } => "awaiting_length",
            Session::Complete { .. } => "complete",
        }
    }

    /// Records a style. Allowed from every state; a previously chosen length is dropped.
    pub fn with_style(&self, style: impl Into<String>) -> Session {
        Session::AwaitingLength {
            url: self.url().to_string(),
            style: style.into(),
        }
    }

    /// Records a length. Requires a style.
    pub fn with_length(&self, length: Length) -> Result<Session, RepostError> {
        match self {
            Session::AwaitingStyle { .. } => Err(RepostError::Sequence("length chosen before style")),
            Session::AwaitingLength { url, style } | Session::Complete { url, style, .. } => {
                Ok(Session::Complete {
                    url: url.clone(),
                    style: style.clone(),
                    length,
                })
            }
        }
    }
}
