//! Scheduling, orchestration and manual triggers for the TR4C3 bot.
//!
//! - **Orchestrator**: generates content, publishes it and answers mentions;
//!   a cycle never fails as a whole
//! - **BotRunner**: message loop that runs cycles on a [`ScheduleType`] and
//!   owns the mention cursor
//! - **API**: axum routes for on-demand posting, health and metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod metrics;
mod observability;
mod orchestrator;
mod runner;
mod schedule;

pub use api::{ApiState, create_router, serve};
pub use config::{
    ApiEndpoints, BotConfig, Credentials, OPENAI_API_KEY, OPENAI_BASE_URL, ReplyConfig,
    ServerConfig, TWITTER_ACCESS_SECRET, TWITTER_ACCESS_TOKEN, TWITTER_API_BASE_URL,
    TWITTER_API_KEY, TWITTER_API_SECRET,
};
pub use metrics::{ActivitySnapshot, BotMetrics, MetricsSnapshot};
pub use observability::{ObservabilityConfig, init_observability};
pub use orchestrator::{CycleReport, Orchestrator, PublishedPost, ReplySummary};
pub use runner::{BotHandle, BotMessage, BotRunner};
pub use schedule::ScheduleType;
