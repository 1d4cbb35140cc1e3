use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// Outbound call to the transport failed (send, answer callback).
    #[error("Bot error: {0}")]
    Bot(String),

    /// Inbound payload could not be decoded or queued.
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
