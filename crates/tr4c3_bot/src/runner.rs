//! Cycle scheduling loop.

use crate::{CycleReport, Orchestrator, ScheduleType};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Message types for the bot runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotMessage {
    /// Run one cycle now
    RunCycle,
    /// Shutdown the runner
    Shutdown,
}

/// Sends messages to a running [`BotRunner`].
#[derive(Debug, Clone)]
pub struct BotHandle {
    tx: mpsc::Sender<BotMessage>,
}

impl BotHandle {
    /// Ask for an immediate cycle. Returns `false` once the runner is gone.
    pub async fn run_now(&self) -> bool {
        self.tx.send(BotMessage::RunCycle).await.is_ok()
    }

    /// Ask the runner to stop after the current cycle.
    pub async fn shutdown(&self) -> bool {
        self.tx.send(BotMessage::Shutdown).await.is_ok()
    }
}

/// Long-running loop that executes cycles on a schedule.
///
/// Owns the mention cursor: each cycle gets the newest id seen so far and the
/// cursor advances from the cycle's report.
pub struct BotRunner {
    orchestrator: Arc<Orchestrator>,
    schedule: ScheduleType,
    run_on_start: bool,
    cursor: Option<String>,
    rx: mpsc::Receiver<BotMessage>,
    tx: mpsc::Sender<BotMessage>,
}

impl BotRunner {
    /// Creates a runner and a handle for driving it.
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        schedule: ScheduleType,
        run_on_start: bool,
        since_id: Option<String>,
    ) -> (Self, BotHandle) {
        let (tx, rx) = mpsc::channel(32);
        let handle = BotHandle { tx: tx.clone() };
        let runner = Self {
            orchestrator,
            schedule,
            run_on_start,
            cursor: since_id,
            rx,
            tx,
        };
        (runner, handle)
    }

    /// Current mention cursor.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Runs the bot loop until shutdown, returning the final cursor.
    #[instrument(skip(self), fields(schedule = ?self.schedule))]
    pub async fn run(mut self) -> Option<String> {
        info!("Bot runner started");

        let scheduler = Self::spawn_scheduler(self.schedule.clone(), self.tx.clone());

        if self.run_on_start {
            self.cycle().await;
        }

        while let Some(msg) = self.rx.recv().await {
            match msg {
                BotMessage::RunCycle => {
                    self.cycle().await;
                }
                BotMessage::Shutdown => {
                    info!("Bot runner shutting down");
                    break;
                }
            }
        }

        scheduler.abort();
        self.cursor
    }

    async fn cycle(&mut self) -> CycleReport {
        let report = self.orchestrator.run_cycle(self.cursor.clone()).await;
        if let Some(error) = report.error() {
            warn!(error = %error, "Cycle finished with errors");
        }
        if report.newest_mention_id() != &self.cursor {
            debug!(cursor = ?report.newest_mention_id(), "Advancing mention cursor");
            self.cursor = report.newest_mention_id().clone();
        }
        report
    }

    fn spawn_scheduler(schedule: ScheduleType, tx: mpsc::Sender<BotMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            loop {
                let Some(delay) = schedule.next_delay(Utc::now(), &mut rng) else {
                    error!("Schedule has no next run, scheduler stopping");
                    break;
                };

                info!(delay_secs = delay.as_secs(), "Next cycle scheduled");
                sleep(delay).await;

                if tx.send(BotMessage::RunCycle).await.is_err() {
                    error!("Bot runner channel closed");
                    break;
                }
            }
        })
    }
}
