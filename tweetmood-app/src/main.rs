use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tweetmood_common::{LogConfig, init_logging};
use tweetmood_config::{TweetmoodConfig, TweetmoodConfigLoader, load_credentials};
use tweetmood_http::OAuth1Keys;
use tweetmood_social::twitter::TwitterApi;
use tweetmood_web::AppState;

/// Serve Twitter timelines colored by sentiment.
#[derive(Debug, Parser)]
#[command(name = "tweetmood", version, about)]
struct Args {
    /// CSV file holding `consumer_key, consumer_secret, access_token, access_token_secret`
    credentials: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "TWEETMOOD_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `server.bind`
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1) Load config (env wins over file)
    let mut loader = TweetmoodConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let cfg = loader.load()?;

    let log_path = init_logging(LogConfig {
        app_name: "tweetmood",
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    })?;
    tracing::info!(log = %log_path.display(), "tweetmood.start");

    // 2) Credentials are fatal before anything listens
    let api = build_api(&cfg, args.credentials)?;
    let state = AppState::new(Arc::new(api), &cfg.server.static_dir)?;

    let bind = args.bind.unwrap_or_else(|| cfg.server.bind.clone());
    let listener = TcpListener::bind(bind.as_str())
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tweetmood_web::serve(listener, state, shutdown_signal()).await?;
    Ok(())
}

fn build_api(cfg: &TweetmoodConfig, cli_credentials: Option<PathBuf>) -> Result<TwitterApi> {
    let path = cfg.credentials_path(cli_credentials)?;
    let creds = load_credentials(&path)?;

    let keys = OAuth1Keys {
        consumer_key: creds.consumer_key,
        consumer_secret: creds.consumer_secret,
        token: creds.access_token,
        token_secret: creds.access_token_secret,
    };
    let api = TwitterApi::with_base_url(&cfg.twitter.base_url, keys)?
        .with_timeout(Duration::from_secs(cfg.twitter.timeout_secs));
    Ok(api)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "shutdown.signal_failed");
        return;
    }
    tracing::info!("shutdown.requested");
}
