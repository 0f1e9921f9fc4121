/// Everything that can go wrong while fetching a dashboard resource.
///
/// The client never recovers from any of these locally; they propagate to
/// whoever awaits the batch.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response: DNS, refused connection,
    /// transport timeout, or the body stream broke mid-read.
    #[error("Network error fetching {endpoint}: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status. The body is not inspected.
    #[error("HTTP error! status: {status} ({endpoint})")]
    Http { endpoint: &'static str, status: u16 },

    /// The body was not JSON or did not match the expected shape.
    #[error("Malformed response from {endpoint}: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Endpoint path the failing request targeted, if any.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Network { endpoint, .. }
            | Self::Http { endpoint, .. }
            | Self::Parse { endpoint, .. } => Some(endpoint),
            Self::Client(_) => None,
        }
    }

    /// Status code for HTTP errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
