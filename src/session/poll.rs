use super::error::SessionError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Attempts used for every recorder status poll
pub const POLL_ATTEMPTS: u32 = 10;

/// Delay after each unsuccessful attempt
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run `check` until it yields `true`, sleeping `interval` after each miss
///
/// Errors from `check` end the poll immediately. After `attempts` misses the
/// poll fails with [`SessionError::Timeout`] naming `condition`.
pub async fn poll_until<F, Fut>(
    condition: &'static str,
    attempts: u32,
    interval: Duration,
    mut check: F,
) -> Result<(), SessionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<bool>>,
{
    for attempt in 1..=attempts {
        if check().await? {
            debug!("Observed {} after {} attempt(s)", condition, attempt);
            return Ok(());
        }
        debug!("Waiting for {} ({}/{})", condition, attempt, attempts);
        tokio::time::sleep(interval).await;
    }

    Err(SessionError::Timeout { condition })
}
