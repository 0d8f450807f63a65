/// Errors from fetching a recursive tree listing.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status.
    #[error("{status} {reason}")]
    Transport { status: u16, reason: String },

    /// The request went out but no response came back.
    #[error("No response from server")]
    NoResponse,

    /// The request could not be built or sent at all.
    #[error("Error: {0}")]
    RequestSetup(String),

    /// A response arrived but did not have the shape of a tree listing.
    #[error("Unknown response: {body}")]
    UnrecognizedResponse { status: u16, body: String },
}

impl FetchError {
    /// Status code to carry in the run outcome: the HTTP status when one
    /// applies, `0` otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Transport { status, .. } | Self::UnrecognizedResponse { status, .. } => *status,
            Self::NoResponse | Self::RequestSetup(_) => 0,
        }
    }
}
