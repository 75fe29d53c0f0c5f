//! Recording session orchestration
//!
//! This module provides the `SessionController` state machine that drives the
//! remote recorder through a session:
//! - Recording directory selection and start, each confirmed by polling status
//! - A ten minute countdown with chat reminders, cut short by `/stop`
//! - Stop, confirmed by polling, then handoff to the upload pipeline

mod controller;
mod countdown;
mod error;
mod id;
mod poll;
mod state;

pub use controller::{SessionController, SessionReport, FAILURE_NOTICE, NO_UPLOAD_WARNING};
pub use countdown::{reminder_for, Countdown, RECORDING_TICKS};
pub use error::SessionError;
pub use id::SessionId;
pub use poll::{poll_until, POLL_ATTEMPTS, POLL_INTERVAL};
pub use state::{SessionSnapshot, SessionState, SessionTracker};
