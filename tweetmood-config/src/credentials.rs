//! Static Twitter credentials read from a one-line CSV file:
//!
//! ```text
//! consumer_key, consumer_secret, access_token, access_token_secret
//! ```
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use crate::StartupError;

const FIELD_COUNT: usize = 4;

/// OAuth 1.0a user-context credentials. Loaded once, immutable afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// The four values in file order.
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            self.consumer_key.as_str(),
            self.consumer_secret.as_str(),
            self.access_token.as_str(),
            self.access_token_secret.as_str(),
        ]
    }

    /// Parse the first line of a credentials file.
    ///
    /// ```
    /// use tweetmood_config::Credentials;
    ///
    /// let creds = Credentials::parse("k1, k2, k3, k4\n").unwrap();
    /// assert_eq!(creds.fields(), ["k1", "k2", "k3", "k4"]);
    /// ```
    pub fn parse(contents: &str) -> Result<Self, StartupError> {
        let line = contents.lines().next().unwrap_or("");
        let fields: Vec<&str> = line
            .split(',')
            .map(str::trim)
            .take_while(|f| !f.is_empty())
            .collect();

        if fields.len() < FIELD_COUNT {
            return Err(StartupError::MalformedCredentials {
                found: fields.len(),
            });
        }

        Ok(Self {
            consumer_key: fields[0].to_string(),
            consumer_secret: fields[1].to_string(),
            access_token: fields[2].to_string(),
            access_token_secret: fields[3].to_string(),
        })
    }
}

// Only the consumer key is shown; it identifies the app but grants nothing alone.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Read and validate the credentials file at `path`.
pub fn load_credentials<P: AsRef<Path>>(path: P) -> Result<Credentials, StartupError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StartupError::CredentialsNotFound {
            path: path.to_path_buf(),
        },
        _ => StartupError::CredentialsIo {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let creds = Credentials::parse(&contents)?;
    tracing::info!(path = %path.display(), "credentials.loaded");
    Ok(creds)
}
