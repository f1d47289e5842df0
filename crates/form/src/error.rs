use formrelay_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No endpoint URL was configured, so nothing was sent.
    #[error("form endpoint URL is not configured")]
    NotConfigured,

    /// The endpoint answered with something other than 200 OK.
    #[error("form endpoint returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

formrelay_common::impl_context!();
