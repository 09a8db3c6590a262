//! Request context and the clock services read time from.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use officex_core::types::{UnixTimestampMs, UserID};

/// Context for the current request.
///
/// Passed into service methods so that every operation knows *who* is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller.
    pub user_id: UserID,
    /// Correlation value echoed into logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserID) -> Self {
        Self {
            user_id,
            tracer: None,
            request_time: Utc::now(),
        }
    }

    /// Attach a tracer.
    pub fn with_tracer(mut self, tracer: impl Into<String>) -> Self {
        self.tracer = Some(tracer.into());
        self
    }

    /// Whether the caller is `owner`.
    pub fn is_owner(&self, owner: &UserID) -> bool {
        &self.user_id == owner
    }
}

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time.
    fn now_ms(&self) -> UnixTimestampMs;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> UnixTimestampMs {
        Utc::now().timestamp_millis().max(0) as UnixTimestampMs
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    pub fn new(now_ms: UnixTimestampMs) -> Self {
        Self {
            now: AtomicU64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: UnixTimestampMs) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by_ms: u64) {
        self.now.fetch_add(by_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> UnixTimestampMs {
        self.now.load(Ordering::SeqCst)
    }
}
