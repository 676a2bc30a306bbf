use anyhow::{Context, Result};
use clap::Parser;
use debate_moderator::driver::InterruptionSink;
use debate_moderator::nats::spawn_transcript_listener;
use debate_moderator::{create_router, AppState, Config, NatsClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "debate-moderator")]
#[command(about = "Real-time utterance analyzer for moderated debate practice")]
struct Args {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = "config/debate-moderator")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("Debate Moderator v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    let analyzer = Arc::new(cfg.analysis.build_analyzer()?);
    info!(
        "Analyzer ready (max_words={}, filler_threshold={:?})",
        analyzer.settings().max_words,
        analyzer.settings().filler_threshold
    );

    let state = if cfg.nats.enabled {
        let client = NatsClient::connect(&cfg.nats.url).await?;
        let sink: Arc<dyn InterruptionSink> = Arc::new(client.clone());
        let state = AppState::new(analyzer, sink);
        spawn_transcript_listener(&client, state.sessions.clone()).await?;
        state
    } else {
        info!("NATS disabled; interruptions will only be logged");
        AppState::with_tracing_sink(analyzer)
    };

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
