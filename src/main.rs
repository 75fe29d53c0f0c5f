use anyhow::Result;
use clap::Parser;
use jam_recorder::{
    http, AppState, ArchiveUploader, CommandFeed, Config, FeedClient, GatewayClient,
    HttpArchiveUploader, RecorderService, RemoteControl, SessionController, SessionTracker,
    Sweeper, UploadPipeline,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Chat-driven multitrack recorder for an audio server")]
struct Args {
    /// Config file (extension optional); JAM_RECORDER_* variables override it
    #[arg(long, default_value = "config/jam-recorder")]
    config: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    let level = if args.debug || cfg.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .init();

    info!("Jam Recorder v{}", env!("CARGO_PKG_VERSION"));
    info!("Recording root: {}", cfg.recording_dir_prefix.display());

    let remote: Arc<dyn RemoteControl> = Arc::new(GatewayClient::new(
        cfg.rpc_url(),
        cfg.chat_url(),
        cfg.api_key.clone(),
    )?);

    let uploader: Option<Arc<dyn ArchiveUploader>> = match cfg.upload() {
        Some(upload) => {
            info!("Uploading sessions to {}", upload.url);
            Some(Arc::new(HttpArchiveUploader::new(upload)?))
        }
        None => {
            warn!("Upload endpoint not configured, recordings stay local");
            None
        }
    };

    let tracker = SessionTracker::new();
    let pipeline = UploadPipeline::new(
        uploader,
        Arc::clone(&remote),
        cfg.manifest_extension.clone(),
    );
    let controller = SessionController::new(
        remote,
        pipeline,
        tracker.clone(),
        cfg.recording_dir_prefix.clone(),
    );
    let sweeper = Sweeper::new(cfg.recording_dir_prefix.clone());
    let service = RecorderService::new(controller, sweeper);

    if let Some(port) = cfg.status_port {
        let state = AppState::new(tracker);
        tokio::spawn(async move {
            if let Err(e) = http::serve(port, state).await {
                error!("{:#}", e);
            }
        });
    }

    let (tx, feed) = CommandFeed::channel();
    let ingest = FeedClient::new(cfg.events_url()).run(tx);

    tokio::select! {
        res = ingest => {
            let err = match res {
                Ok(()) => anyhow::anyhow!("Event feed ended"),
                Err(e) => e,
            };
            error!("Event feed failed: {:#}", err);
            Err(err)
        }
        res = service.run(feed) => res,
    }
}
