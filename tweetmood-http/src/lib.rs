//! JSON-over-HTTPS client for signed Twitter API calls.
//!
//! One GET per call: the query is attached, the request is signed, the body
//! is decoded. Non-success statuses come back as [`HttpError::Api`] with the
//! provider error code when the body carries one. Nothing is retried.
//!
//! ```no_run
//! # async fn demo() -> Result<(), tweetmood_http::HttpError> {
//! let client = tweetmood_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", tweetmood_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Logging: every call emits `http.request.start` and `http.response.headers`
//! (including the `x-rate-limit-*` triple) at debug, and `http.error` at warn.
//! Query values of secret-looking parameters are redacted. Setting
//! `TWEETMOOD_HTTP_RAW=1` adds a curl line and the raw response on target
//! `http.raw`, with the Authorization header masked.

use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub mod oauth1;

pub use oauth1::{OAuth1Keys, OAuth1Signer};

const RAW_ENV: &str = "TWEETMOOD_HTTP_RAW";
const RAW_BODY_LIMIT: usize = 64 * 1024;
const SNIPPET_LIMIT: usize = 500;
const REDACTED: &str = "<redacted>";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        /// Provider error code, when the body carries one.
        code: Option<i64>,
        message: String,
        request_id: String,
    },
}

/// How a request proves who it is.
#[derive(Clone, Debug, Default)]
pub enum Auth<'a> {
    /// `Authorization: OAuth ...`, signed over method, URL and query.
    OAuth1(&'a OAuth1Signer),
    #[default]
    None,
}

impl Auth<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::OAuth1(_) => "oauth1",
            Self::None => "none",
        }
    }
}

/// Per-request options.
///
/// ```
/// use tweetmood_http::RequestOpts;
///
/// let opts = RequestOpts {
///     query: Some(vec![("screen_name", "jack".into())]),
///     ..Default::default()
/// };
///
/// assert!(opts.auth.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub auth: Option<Auth<'a>>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

/// `x-rate-limit-*` response headers, as sent.
#[derive(Debug, Default)]
struct RateLimit<'h> {
    limit: Option<&'h str>,
    remaining: Option<&'h str>,
    reset: Option<&'h str>,
}

impl<'h> RateLimit<'h> {
    fn from_headers(headers: &'h HeaderMap) -> Self {
        let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        Self {
            limit: get("x-rate-limit-limit"),
            remaining: get("x-rate-limit-remaining"),
            reset: get("x-rate-limit-reset"),
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Client rooted at `base`; request paths are joined onto it.
    ///
    /// ```no_run
    /// use tweetmood_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let mut base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        // `join` replaces the last segment unless the path ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let inner = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Whole-request timeout, connect included.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.send_json(Method::GET, path, opts).await
    }

    async fn send_json<T>(
        &self,
        method: Method,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.resolve(path, opts.query.as_deref())?;
        let auth = opts.auth.unwrap_or_default();
        let req_id = request_id();

        let mut builder = self
            .inner
            .request(method.clone(), url.clone())
            .timeout(self.default_timeout);
        if let Auth::OAuth1(signer) = &auth {
            builder = builder.header(AUTHORIZATION, signer.authorization(method.as_str(), &url)?);
        }

        tracing::debug!(
            %req_id,
            %method,
            host_path = %format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query = ?redacted_query(opts.query.as_deref()),
            timeout_ms = self.default_timeout.as_millis() as u64,
            auth_kind = auth.kind(),
            "http.request.start"
        );
        if raw_enabled() {
            let curl = make_curl(&method, &url, !matches!(auth, Auth::None));
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        let started = Instant::now();
        let resp = builder.send().await.map_err(|e| network_error(&req_id, "send", e))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| network_error(&req_id, "body", e))?;

        let upstream_id = headers
            .get("x-transaction-id")
            .or_else(|| headers.get("x-request-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let rate = RateLimit::from_headers(&headers);
        tracing::debug!(
            %req_id,
            %status,
            duration_ms = started.elapsed().as_millis() as u64,
            body_len = body.len(),
            x_request_id = %upstream_id,
            rate_limit.limit = ?rate.limit,
            rate_limit.remaining = ?rate.remaining,
            rate_limit.reset = ?rate.reset,
            "http.response.headers"
        );
        if raw_enabled() {
            log_raw_response(&req_id, status, &headers, &body);
        }

        let snippet = snip_body(&body);
        if status.is_success() {
            return serde_json::from_slice::<T>(&body).map_err(|e| {
                tracing::warn!(
                    %req_id,
                    line = e.line(),
                    column = e.column(),
                    error = %e,
                    body_snippet = %snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        let (code, message) = extract_error(&body);
        tracing::warn!(
            %req_id,
            %status,
            ?code,
            %message,
            x_request_id = %upstream_id,
            rate_limit.remaining = ?rate.remaining,
            rate_limit.reset = ?rate.reset,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            code,
            message,
            request_id: upstream_id,
        })
    }

    /// Joins `path` onto the base and appends the query; the signature covers
    /// the query, so it has to be on the URL before signing.
    fn resolve(&self, path: &str, query: Option<&[(&str, Cow<'_, str>)]>) -> Result<Url, HttpError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        if let Some(pairs) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_ref())));
        }
        Ok(url)
    }
}

fn request_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("r{nanos:x}")
}

fn network_error(req_id: &str, stage: &'static str, err: reqwest::Error) -> HttpError {
    let message = err.to_string();
    tracing::warn!(%req_id, stage, %message, timeout = err.is_timeout(), "http.network_error");
    HttpError::Network(message)
}

fn raw_enabled() -> bool {
    matches!(env::var(RAW_ENV).as_deref(), Ok("1" | "true" | "yes"))
}

fn log_raw_response(req_id: &str, status: StatusCode, headers: &HeaderMap, body: &[u8]) {
    let truncated = body.len() > RAW_BODY_LIMIT;
    let shown = &body[..body.len().min(RAW_BODY_LIMIT)];
    tracing::info!(
        target: "http.raw",
        %req_id,
        %status,
        headers = ?redacted_headers(headers),
        body = %String::from_utf8_lossy(shown),
        truncated
    );
}

/// A copy-pasteable curl line; the OAuth header is never printed.
fn make_curl(method: &Method, url: &Url, signed: bool) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{method}")];
    if signed {
        parts.push(format!("-H 'Authorization: OAuth {REDACTED}'"));
    }
    parts.push(format!("'{}'", url.as_str().replace('\'', r"'\''")));
    parts.join(" ")
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if *name == AUTHORIZATION || name.as_str() == "set-cookie" {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

fn redacted_query(query: Option<&[(&str, Cow<'_, str>)]>) -> Vec<(String, String)> {
    query
        .unwrap_or_default()
        .iter()
        .map(|(k, v)| {
            let shown = if is_secret_param(k) { REDACTED } else { v.as_ref() };
            ((*k).to_string(), shown.to_string())
        })
        .collect()
}

fn is_secret_param(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "access_token"
            | "api_key"
            | "auth"
            | "authorization"
            | "client_secret"
            | "key"
            | "oauth_token"
            | "secret"
            | "token"
    )
}

/// `(code, message)` from an error body.
///
/// Understands the v1.1 shape `{"errors":[{"code":50,"message":"..."}]}`, the
/// v2 problem shape (`detail`/`title`), and flat `message`/`detail`/`error`
/// objects. Anything else becomes a snippet of the raw body.
fn extract_error(body: &[u8]) -> (Option<i64>, String) {
    #[derive(Deserialize)]
    struct Envelope {
        errors: Vec<Entry>,
    }

    #[derive(Deserialize)]
    struct Entry {
        #[serde(default)]
        code: Option<i64>,
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    #[derive(Deserialize)]
    struct Flat {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    fn first_non_empty<const N: usize>(candidates: [String; N]) -> Option<String> {
        candidates.into_iter().find(|m| !m.is_empty())
    }

    if let Ok(Envelope { errors }) = serde_json::from_slice::<Envelope>(body) {
        if let Some(first) = errors.into_iter().next() {
            let message = first_non_empty([first.message, first.detail, first.title]);
            return (first.code, message.unwrap_or_default());
        }
    }
    if let Ok(flat) = serde_json::from_slice::<Flat>(body) {
        if let Some(message) = first_non_empty([flat.message, flat.detail, flat.error]) {
            return (None, message);
        }
    }
    (None, snip_body(body))
}

fn snip_body(body: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > SNIPPET_LIMIT {
        let mut cut = SNIPPET_LIMIT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_error_body_yields_code_and_message() {
        let body = br#"{"errors":[{"code":50,"message":"User not found."}]}"#;
        assert_eq!(extract_error(body), (Some(50), "User not found.".to_string()));
    }

    #[test]
    fn v2_problem_body_falls_back_to_detail() {
        let body = br#"{"errors":[{"detail":"Too Many Requests","title":"Too Many Requests"}]}"#;
        assert_eq!(extract_error(body), (None, "Too Many Requests".to_string()));
    }

    #[test]
    fn flat_error_body() {
        assert_eq!(
            extract_error(br#"{"error":"Not authorized."}"#),
            (None, "Not authorized.".to_string())
        );
    }

    #[test]
    fn plain_text_body_is_snipped() {
        let long = "x".repeat(600);
        let (code, message) = extract_error(long.as_bytes());
        assert_eq!(code, None);
        assert_eq!(message.len(), SNIPPET_LIMIT + 3);
    }

    #[test]
    fn snipping_respects_char_boundaries() {
        let text = "é".repeat(400);
        let snip = snip_body(text.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_LIMIT + 3);
    }

    #[test]
    fn secret_params_are_redacted() {
        let query = [
            ("oauth_token", Cow::Borrowed("abc")),
            ("screen_name", Cow::Borrowed("jack")),
        ];
        assert_eq!(
            redacted_query(Some(&query)),
            vec![
                ("oauth_token".to_string(), REDACTED.to_string()),
                ("screen_name".to_string(), "jack".to_string()),
            ]
        );
        assert!(is_secret_param("API_KEY"));
    }

    #[test]
    fn curl_masks_auth() {
        let url = Url::parse("https://api.twitter.com/1.1/users/show.json?screen_name=jack").unwrap();
        let curl = make_curl(&Method::GET, &url, true);
        assert!(curl.contains("OAuth <redacted>"));
        assert!(curl.ends_with("'https://api.twitter.com/1.1/users/show.json?screen_name=jack'"));
    }

    #[test]
    fn query_is_appended_before_signing() {
        let client = HttpClient::new("https://api.twitter.com").unwrap();
        let url = client
            .resolve("1.1/friends/ids.json", Some(&[("screen_name", Cow::from("a b"))]))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.twitter.com/1.1/friends/ids.json?screen_name=a+b");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        for base in ["https://proxy.example/twitter", "https://proxy.example/twitter/"] {
            let client = HttpClient::new(base).unwrap();
            let url = client.resolve("1.1/users/show.json", None).unwrap();
            assert_eq!(url.as_str(), "https://proxy.example/twitter/1.1/users/show.json");
        }
    }
}
