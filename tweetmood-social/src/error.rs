use tweetmood_http::HttpError;

// Twitter v1.1 error codes the status alone does not tell apart.
const CODE_PAGE_NOT_FOUND: i64 = 34;
const CODE_USER_NOT_FOUND: i64 = 50;
const CODE_USER_SUSPENDED: i64 = 63;
const CODE_RATE_LIMITED: i64 = 88;

/// Failures talking to the social network, by cause.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    #[error("invalid handle: {0:?}")]
    InvalidHandle(String),

    #[error("account not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    #[error("rate limit exceeded ({status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("upstream refused our credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    #[error("request could not be built: {0}")]
    Client(String),
}

impl SocialError {
    /// Upstream HTTP status, when the failure came with one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for SocialError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Api {
                status,
                code,
                message,
                ..
            } => {
                let status = status.as_u16();
                match (status, code) {
                    (_, Some(CODE_USER_NOT_FOUND | CODE_USER_SUSPENDED | CODE_PAGE_NOT_FOUND))
                    | (404, _) => Self::NotFound { status, message },
                    (_, Some(CODE_RATE_LIMITED)) | (429, _) => Self::RateLimited { status, message },
                    (401 | 403, _) => Self::Unauthorized { status, message },
                    _ => Self::Upstream { status, message },
                }
            }
            HttpError::Network(msg) => Self::Network(msg),
            HttpError::Decode(msg, _) => Self::Malformed(msg),
            HttpError::Url(msg) | HttpError::Build(msg) => Self::Client(msg),
        }
    }
}
