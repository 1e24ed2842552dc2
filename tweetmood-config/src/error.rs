use std::path::PathBuf;

/// Everything that can stop the server before it binds its listener.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("no credentials file given (pass a path or set `credentials_file`)")]
    MissingCredentialsArgument,

    #[error("credentials file not found: {}", .path.display())]
    CredentialsNotFound { path: PathBuf },

    #[error("credentials file must hold 4 comma-separated values, found {found}")]
    MalformedCredentials { found: usize },

    #[error("failed to read credentials file {}: {source}", .path.display())]
    CredentialsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
