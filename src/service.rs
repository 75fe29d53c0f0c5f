//! Main loop: one session at a time, cleanup around every attempt

use crate::cleanup::Sweeper;
use crate::commands::SeenIds;
use crate::feed::{CommandFeed, FeedError};
use crate::session::{SessionController, SessionError, SessionReport};
use anyhow::Result;
use tracing::{error, info};

pub struct RecorderService {
    controller: SessionController,
    sweeper: Sweeper,
    seen: SeenIds,
}

impl RecorderService {
    pub fn new(controller: SessionController, sweeper: Sweeper) -> Self {
        Self {
            controller,
            sweeper,
            seen: SeenIds::new(),
        }
    }

    pub fn seen(&self) -> &SeenIds {
        &self.seen
    }

    /// Sweep, wait for an unseen `/start`, run the session, sweep again
    ///
    /// Session failures are logged and returned; only the feed closing is an
    /// outer error.
    pub async fn next_session(
        &mut self,
        feed: &mut CommandFeed,
    ) -> Result<Result<SessionReport, SessionError>, FeedError> {
        self.sweeper.run().await;

        info!("Waiting for /start");
        let trigger = feed.next_start(&mut self.seen).await?;
        info!("Session requested by message {}", trigger.id);

        let result = self.controller.record_session(feed).await;
        match &result {
            Ok(report) => info!(
                "Session {} complete (stopped early: {}, upload: {:?})",
                report.session_id, report.stopped_early, report.upload
            ),
            Err(e) => error!("Session attempt failed: {:#}", e),
        }

        self.sweeper.run().await;
        Ok(result)
    }

    /// Run sessions until the feed closes
    pub async fn run(mut self, mut feed: CommandFeed) -> Result<()> {
        loop {
            // Failed sessions are already reported; keep listening
            let _ = self.next_session(&mut feed).await?;
        }
    }
}
