//! Per-event failures of the conversation. None of them is fatal; each becomes a reply.

use article_fetcher::FetchError;
use llm_client::GenerationError;
use thiserror::Error;

use crate::texts;

#[derive(Error, Debug)]
pub enum RepostError {
    /// A choice arrived before the link (or style) it depends on.
    #[error("choice received out of order: {0}")]
    Sequence(&'static str),
    #[error("unknown style: {0}")]
    UnknownStyle(String),
    #[error("unknown choice: {0}")]
    UnknownChoice(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("style {0} produced an empty instruction")]
    EmptyInstruction(String),
}

impl RepostError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            RepostError::Sequence(_) => texts::SEQUENCE_ERROR.to_string(),
            RepostError::UnknownStyle(_) => texts::UNKNOWN_STYLE.to_string(),
            RepostError::UnknownChoice(_) => texts::UNKNOWN_CHOICE.to_string(),
            RepostError::Fetch(_)
            | RepostError::Generation(_)
            | RepostError::EmptyInstruction(_) => texts::processing_failed(self),
        }
    }
}
