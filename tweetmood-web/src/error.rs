use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;
use std::path::PathBuf;
use tweetmood_social::SocialError;

/// Everything a page request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Social(#[from] SocialError),

    #[error("page rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("static asset not found: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("static asset {}: {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Social(err) => match err {
                SocialError::InvalidHandle(_) => StatusCode::BAD_REQUEST,
                SocialError::NotFound { .. } => StatusCode::NOT_FOUND,
                SocialError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                SocialError::Unauthorized { .. }
                | SocialError::Upstream { .. }
                | SocialError::Network(_)
                | SocialError::Malformed(_) => StatusCode::BAD_GATEWAY,
                SocialError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Render(_) | Self::Asset { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AssetMissing(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Response body. Upstream messages and paths only go to the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Social(SocialError::InvalidHandle(_)) => "invalid handle",
            Self::Social(SocialError::NotFound { .. }) => "account not found",
            Self::Social(SocialError::RateLimited { .. }) => "rate limited by twitter, try again later",
            Self::Social(SocialError::Client(_)) | Self::Render(_) | Self::Asset { .. } => {
                "internal error"
            }
            Self::Social(_) => "twitter is unavailable",
            Self::AssetMissing(_) => "not found",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request.failed");
        } else {
            tracing::warn!(%status, error = %self, "request.rejected");
        }
        (status, self.public_message()).into_response()
    }
}
