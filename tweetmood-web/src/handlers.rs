use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use std::io;
use tweetmood_social::{fetch_following, fetch_tweets};

use crate::color::add_color;
use crate::stats::median;
use crate::{AppState, WebError};

const FAVICON: &str = "favicon.ico";
const FAVICON_MIME: &str = "image/vnd.microsoft.icon";

/// `GET /{handle}`: recent posts colored by sentiment.
pub(crate) async fn timeline(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Html<String>, WebError> {
    let mut timeline = fetch_tweets(state.api.as_ref(), &handle).await?;
    add_color(&mut timeline.posts, &state.gradient);

    let scores: Vec<f64> = timeline.posts.iter().map(|post| post.score).collect();
    let median = median(&scores);
    tracing::info!(handle = %handle, count = timeline.count, ?median, "page.timeline");

    Ok(Html(state.pages.render_timeline(&timeline, median)?))
}

/// `GET /following/{handle}`: followed accounts, most followed first.
pub(crate) async fn following(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Html<String>, WebError> {
    let accounts = fetch_following(state.api.as_ref(), &handle).await?;
    tracing::info!(handle = %handle, count = accounts.len(), "page.following");

    Ok(Html(state.pages.render_following(&handle, &accounts)?))
}

pub(crate) async fn favicon(State(state): State<AppState>) -> Result<impl IntoResponse, WebError> {
    let path = state.static_dir.join(FAVICON);
    let bytes = tokio::fs::read(&path).await.map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => WebError::AssetMissing(path.clone()),
        _ => WebError::Asset {
            path: path.clone(),
            source,
        },
    })?;
    Ok(([(header::CONTENT_TYPE, FAVICON_MIME)], bytes))
}
