//! Timeout guard around a single source call
//!
//! The guarded future races a timer. Whichever loses is dropped, so a timed
//! out HTTP request is cancelled rather than left running.

use std::future::Future;
use std::time::Duration;

use bh_types::{AdapterError, AdapterResult, SourceStatus};
use tokio::time::timeout;
use tracing::{debug, warn};

/// How a guarded call ended
#[derive(Debug)]
pub enum GuardOutcome<T> {
	Completed(T),
	Failed(AdapterError),
	TimedOut,
}

impl<T> GuardOutcome<T> {
	pub fn into_option(self) -> Option<T> {
		match self {
			GuardOutcome::Completed(value) => Some(value),
			GuardOutcome::Failed(_) | GuardOutcome::TimedOut => None,
		}
	}

	pub fn status(&self) -> SourceStatus {
		match self {
			GuardOutcome::Completed(_) => SourceStatus::Success,
			GuardOutcome::Failed(_) => SourceStatus::Unavailable,
			GuardOutcome::TimedOut => SourceStatus::Timeout,
		}
	}
}

/// Run `operation` with a deadline and report how it ended
pub async fn guard_with_outcome<T, F>(label: &str, timeout_ms: u64, operation: F) -> GuardOutcome<T>
where
	F: Future<Output = AdapterResult<T>>,
{
	match timeout(Duration::from_millis(timeout_ms), operation).await {
		Ok(Ok(value)) => GuardOutcome::Completed(value),
		Ok(Err(e)) if e.is_no_data() => {
			debug!("{}: {}", label, e);
			GuardOutcome::Failed(e)
		},
		Ok(Err(e)) => {
			warn!("{} error: {}", label, e);
			GuardOutcome::Failed(e)
		},
		Err(_) => {
			warn!("{} timeout after {}ms", label, timeout_ms);
			GuardOutcome::TimedOut
		},
	}
}

/// Run `operation` with a deadline, `None` on failure or timeout
pub async fn guard<T, F>(label: &str, timeout_ms: u64, operation: F) -> Option<T>
where
	F: Future<Output = AdapterResult<T>>,
{
	guard_with_outcome(label, timeout_ms, operation)
		.await
		.into_option()
}
