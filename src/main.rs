use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loqa_interviews::{
    create_router, AppState, BridgeConfig, CallEventBridge, Config, DocumentStore, FeedbackGateway,
    FeedbackPipeline, GeminiModel, HttpFeedbackClient, InMemoryStore, NatsVoiceProvider,
    SessionController, StartRequest, TeardownPolicy,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loqa-interviews", about = "Voice mock interviews with AI feedback")]
struct Cli {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/loqa-interviews")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the feedback HTTP API
    Serve,

    /// Run one live interview session against the voice provider
    Interview {
        /// Authenticated user id
        #[arg(long)]
        user_id: String,

        /// Display name passed to the voice agent
        #[arg(long)]
        name: String,

        /// Interview to take; omit to generate a new interview instead
        #[arg(long)]
        interview_id: Option<String>,

        /// Prepared question (repeatable)
        #[arg(long = "question")]
        questions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Loqa Interviews v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Interview {
            user_id,
            name,
            interview_id,
            questions,
        } => {
            let request = match interview_id {
                Some(interview_id) => StartRequest::scripted(name, user_id, interview_id, questions),
                None => StartRequest::generate_new(name, user_id),
            };
            interview(cfg, request).await
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let store = match &cfg.store.seed_path {
        Some(path) => InMemoryStore::from_seed_file(path)
            .await
            .with_context(|| format!("Failed to load seed file {}", path))?,
        None => InMemoryStore::new(),
    };
    let store: Arc<dyn DocumentStore> = Arc::new(store);

    let feedback: Option<Arc<dyn FeedbackGateway>> = match &cfg.llm.api_key {
        Some(key) => {
            let model = GeminiModel::new(key.clone(), cfg.llm.model.clone())
                .with_base_url(cfg.llm.base_url.clone());
            info!("Feedback model: {}", model.model());
            Some(Arc::new(FeedbackPipeline::new(Arc::new(model), Arc::clone(&store))))
        }
        None => {
            warn!("No language model API key configured; feedback generation disabled");
            None
        }
    };

    let app = create_router(AppState::new(store, feedback));
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}

async fn interview(cfg: Config, request: StartRequest) -> Result<()> {
    let session_key = format!("{}-{}", request.mode, uuid::Uuid::new_v4());
    let provider = NatsVoiceProvider::connect(
        &cfg.voice.nats_url,
        &cfg.voice.subject_prefix,
        &session_key,
    )
    .await?;

    let bridge = Arc::new(CallEventBridge::new(
        Arc::new(provider),
        BridgeConfig::from(&cfg.voice),
    ));
    let gateway = Arc::new(HttpFeedbackClient::new(cfg.feedback.endpoint.clone()));
    let (mut controller, mut navigation) = SessionController::new(bridge, gateway);

    controller.start(request).await?;
    info!("Waiting for the call; press Ctrl-C to hang up");

    let interrupted = loop {
        tokio::select! {
            event = controller.next_event() => match event {
                Some(event) => {
                    controller.handle_event(event);
                    if !controller.is_subscribed() {
                        break false;
                    }
                }
                None => break false,
            },
            _ = tokio::signal::ctrl_c() => break true,
        }
    };

    if interrupted {
        controller.disconnect().await?;
    }

    let stats = controller.stats();
    info!(
        "Session ended in {} after {:.1}s with {} transcript messages",
        stats.status, stats.duration_secs, stats.transcript_messages
    );

    controller.shutdown(TeardownPolicy::Await).await;

    while let Ok(target) = navigation.try_recv() {
        info!("Navigate to {}", target.path());
    }

    Ok(())
}
