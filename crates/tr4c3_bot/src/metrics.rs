//! Metrics collection for bot operations.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for bot operations.
///
/// Cheap to clone; every clone shares the same counters.
#[derive(Debug, Clone)]
pub struct BotMetrics {
    inner: Arc<BotMetricsInner>,
}

#[derive(Debug)]
struct BotMetricsInner {
    // Cycle counts
    cycles: AtomicU64,
    cycle_failures: AtomicU64,

    // Post counts
    posts: AtomicU64,
    post_failures: AtomicU64,

    // Reply counts
    replies: AtomicU64,
    reply_failures: AtomicU64,

    // Last success timestamps
    post_last_success: parking_lot::Mutex<Option<Instant>>,
    reply_last_success: parking_lot::Mutex<Option<Instant>>,
}

impl Default for BotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BotMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BotMetricsInner {
                cycles: AtomicU64::new(0),
                cycle_failures: AtomicU64::new(0),
                posts: AtomicU64::new(0),
                post_failures: AtomicU64::new(0),
                replies: AtomicU64::new(0),
                reply_failures: AtomicU64::new(0),
                post_last_success: parking_lot::Mutex::new(None),
                reply_last_success: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a cycle run.
    pub fn record_cycle(&self) {
        self.inner.cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a cycle that ended with an error.
    pub fn record_cycle_failure(&self) {
        self.inner.cycle_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a published post.
    pub fn record_post_success(&self) {
        self.inner.posts.fetch_add(1, Ordering::Relaxed);
        *self.inner.post_last_success.lock() = Some(Instant::now());
    }

    /// Records a failed publish attempt.
    pub fn record_post_failure(&self) {
        self.inner.post_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a sent reply.
    pub fn record_reply_success(&self) {
        self.inner.replies.fetch_add(1, Ordering::Relaxed);
        *self.inner.reply_last_success.lock() = Some(Instant::now());
    }

    /// Records a failed reply.
    pub fn record_reply_failure(&self) {
        self.inner.reply_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets cycle count.
    pub fn cycles(&self) -> u64 {
        self.inner.cycles.load(Ordering::Relaxed)
    }

    /// Gets failed cycle count.
    pub fn cycle_failures(&self) -> u64 {
        self.inner.cycle_failures.load(Ordering::Relaxed)
    }

    /// Gets published post count.
    pub fn posts(&self) -> u64 {
        self.inner.posts.load(Ordering::Relaxed)
    }

    /// Gets failed publish count.
    pub fn post_failures(&self) -> u64 {
        self.inner.post_failures.load(Ordering::Relaxed)
    }

    /// Gets sent reply count.
    pub fn replies(&self) -> u64 {
        self.inner.replies.load(Ordering::Relaxed)
    }

    /// Gets failed reply count.
    pub fn reply_failures(&self) -> u64 {
        self.inner.reply_failures.load(Ordering::Relaxed)
    }

    /// Gets time since last published post.
    pub fn post_time_since_success(&self) -> Option<std::time::Duration> {
        self.inner
            .post_last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Gets time since last sent reply.
    pub fn reply_time_since_success(&self) -> Option<std::time::Duration> {
        self.inner
            .reply_last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Gets overall success rate across posts and replies (0.0 - 1.0).
    pub fn overall_success_rate(&self) -> f64 {
        let successes = self.posts() + self.replies();
        let attempts = successes + self.post_failures() + self.reply_failures();

        if attempts == 0 {
            return 1.0;
        }

        successes as f64 / attempts as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles: self.cycles(),
            cycle_failures: self.cycle_failures(),
            posting: ActivitySnapshot {
                successes: self.posts(),
                failures: self.post_failures(),
                seconds_since_success: self.post_time_since_success().map(|d| d.as_secs()),
            },
            replies: ActivitySnapshot {
                successes: self.replies(),
                failures: self.reply_failures(),
                seconds_since_success: self.reply_time_since_success().map(|d| d.as_secs()),
            },
            overall_success_rate: self.overall_success_rate(),
        }
    }
}

/// Serializable snapshot of bot metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Cycles run
    pub cycles: u64,
    /// Cycles that recorded an error
    pub cycle_failures: u64,
    /// Standalone post metrics
    pub posting: ActivitySnapshot,
    /// Mention reply metrics
    pub replies: ActivitySnapshot,
    /// Overall success rate across posts and replies
    pub overall_success_rate: f64,
}

/// Serializable snapshot of one activity's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct ActivitySnapshot {
    /// Number of successes
    pub successes: u64,
    /// Number of failures
    pub failures: u64,
    /// Seconds since last success
    pub seconds_since_success: Option<u64>,
}
