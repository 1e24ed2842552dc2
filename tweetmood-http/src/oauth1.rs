//! OAuth 1.0a request signing (HMAC-SHA1) for user-context API calls.
//!
//! Only the signing half of OAuth 1.0a lives here: tokens are issued out of
//! band and read from disk at startup, so there is no request-token dance.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;
use url::Url;

use crate::HttpError;

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

/// Consumer and access-token pairs for one authorised account.
#[derive(Clone)]
pub struct OAuth1Keys {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl fmt::Debug for OAuth1Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth1Keys")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}

/// Produces `Authorization: OAuth ...` header values.
#[derive(Debug, Clone)]
pub struct OAuth1Signer {
    keys: OAuth1Keys,
}

impl OAuth1Signer {
    pub fn new(keys: OAuth1Keys) -> Self {
        Self { keys }
    }

    /// Sign `method url` with a fresh nonce and the current timestamp.
    ///
    /// Query parameters already present on `url` are part of the signature,
    /// so callers must attach them before signing.
    pub fn authorization(&self, method: &str, url: &Url) -> Result<String, HttpError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_else(|_| "0".to_string());
        self.authorization_with(method, url, &generate_nonce(), &timestamp)
    }

    /// Deterministic variant of [`Self::authorization`].
    pub fn authorization_with(
        &self,
        method: &str,
        url: &Url,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, HttpError> {
        let mut oauth_params: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", self.keys.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.keys.token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let signature = self.signature(method, url, &oauth_params)?;
        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort_unstable();

        let header_parts: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();

        Ok(format!("OAuth {}", header_parts.join(", ")))
    }

    fn signature(
        &self,
        method: &str,
        url: &Url,
        oauth_params: &[(&str, &str)],
    ) -> Result<String, HttpError> {
        let base_url = format!(
            "{}://{}{}",
            url.scheme(),
            host_with_port(url),
            url.path()
        );

        // Encode first, then sort by encoded key and value.
        let mut pairs: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| (encode(k), encode(v)))
            .chain(url.query_pairs().map(|(k, v)| (encode(&k), encode(&v))))
            .collect();
        pairs.sort_unstable();

        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let signature_base = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            encode(&base_url),
            encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            encode(&self.keys.consumer_secret),
            encode(&self.keys.token_secret)
        );

        let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
            .map_err(|e| HttpError::Build(format!("oauth signing key: {e}")))?;
        mac.update(signature_base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_signer() -> OAuth1Signer {
        OAuth1Signer::new(OAuth1Keys {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        })
    }

    #[test]
    fn percent_encoding_is_rfc3986() {
        assert_eq!(encode("hello world"), "hello%20world");
        assert_eq!(encode("foo=bar&baz"), "foo%3Dbar%26baz");
        assert_eq!(encode("test-_.~"), "test-_.~");
        assert_eq!(encode("☃"), "%E2%98%83");
    }

    // Twitter's published "creating a signature" walkthrough.
    #[test]
    fn matches_twitter_reference_signature() {
        let url = Url::parse(
            "https://api.twitter.com/1.1/statuses/update.json?include_entities=true&status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21",
        )
        .unwrap();

        let header = reference_signer()
            .authorization_with(
                "POST",
                &url,
                "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
                "1318622958",
            )
            .unwrap();

        assert!(
            header.contains(r#"oauth_signature="hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D""#),
            "{header}"
        );
    }

    #[test]
    fn header_carries_only_oauth_params() {
        let url = Url::parse("https://api.twitter.com/1.1/users/show.json?screen_name=jack").unwrap();
        let header = reference_signer().authorization("GET", &url).unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
        assert!(header.contains(r#"oauth_signature_method="HMAC-SHA1""#));
        assert!(!header.contains("screen_name"));
    }

    #[test]
    fn nonces_are_alphanumeric() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), NONCE_LEN);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn debug_hides_secrets() {
        let shown = format!("{:?}", reference_signer());
        assert!(!shown.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
        assert!(!shown.contains("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"));
    }
}
