pub mod cleanup;
pub mod commands;
pub mod config;
pub mod feed;
pub mod http;
pub mod remote;
pub mod service;
pub mod session;
pub mod upload;

pub use cleanup::Sweeper;
pub use commands::{Command, SeenIds};
pub use config::{Config, UploadConfig};
pub use feed::{ChatMessage, CommandFeed, Event, FeedClient, FeedError};
pub use http::{create_router, AppState};
pub use remote::{GatewayClient, RecorderStatus, RemoteControl};
pub use service::RecorderService;
pub use session::{
    SessionController, SessionError, SessionId, SessionReport, SessionState, SessionTracker,
};
pub use upload::{ArchiveUploader, HttpArchiveUploader, UploadOutcome, UploadPipeline};
