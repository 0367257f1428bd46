//! Engine: the poll, validate, translate, notify loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::HomeworkApi;
use crate::clock::Clock;
use crate::config::{Config, EmptyHomeworksPolicy, PollingConfig, RecordSelection, WatermarkPolicy};
use crate::notifier::{send_message, Notifier};
use crate::response::check_response;
use crate::state::LoopState;
use crate::status::HomeworkRecord;
use crate::{BotError, Result};

/// What a single cycle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// At least one new status message was delivered
    Notified { sent: usize },
    /// Every status message matched the last one sent
    Unchanged,
    /// The server reported no homework since the watermark
    NoNewWork,
    /// New status messages existed but none could be delivered
    Undelivered,
    /// The cycle failed and the failure was reported to the chat
    ErrorNotified,
    /// The cycle failed the same way as last reported; nothing sent
    ErrorSuppressed,
    /// The cycle failed and the report could not be delivered
    ErrorUndelivered,
}

/// The engine polls the homework API and forwards status changes
pub struct Engine {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    polling: PollingConfig,
    state: LoopState,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("polling", &self.polling)
            .field("state", &self.state)
            .finish()
    }
}

impl Engine {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        let initial_timestamp = clock
            .now()
            .saturating_sub(config.api.initial_lookback_seconds);
        tracing::debug!("Initial watermark: {}", initial_timestamp);

        Self {
            api,
            notifier,
            clock,
            polling: config.polling.clone(),
            state: LoopState::new(initial_timestamp),
            cancel,
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Run cycles until the cancellation token is triggered
    pub async fn run(&mut self) {
        let interval = Duration::from_secs(self.polling.interval_seconds);
        tracing::info!(
            "Polling every {}s via {}",
            self.polling.interval_seconds,
            self.notifier.type_name()
        );

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!(
                "Cycle finished: {:?}, watermark={}",
                outcome,
                self.state.current_timestamp
            );

            tokio::select! {
                _ = self.clock.sleep(interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one full cycle; failures become chat reports, never errors
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(outcome) => outcome,
            Err(e) => self.report_error(e).await,
        }
    }

    async fn poll(&mut self) -> Result<CycleOutcome> {
        let from_date = self.state.current_timestamp;
        let payload = self.api.fetch(from_date).await?;
        let response = check_response(&payload)?;

        if response.homeworks.is_empty() {
            return match self.polling.empty_homeworks {
                EmptyHomeworksPolicy::Error => Err(BotError::EmptyHomeworks),
                EmptyHomeworksPolicy::Ignore => {
                    tracing::debug!("No new homework since {}", from_date);
                    self.advance_watermark(response.current_date, false);
                    Ok(CycleOutcome::NoNewWork)
                }
            };
        }

        let selected = match self.polling.records {
            RecordSelection::First => &response.homeworks[..1],
            RecordSelection::All => &response.homeworks[..],
        };
        // A bad record aborts the cycle before anything is sent
        let messages = selected
            .iter()
            .rev()
            .map(|value| {
                let record = HomeworkRecord::try_from(value)?;
                let message = record.message()?;
                Ok((record.homework_name, message))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut sent = 0;
        let mut undelivered = 0;
        for (homework_name, message) in messages {
            let is_new = match self.polling.records {
                RecordSelection::First => self.state.is_new_message(&message),
                RecordSelection::All => self.state.is_new_status(&homework_name, &message),
            };
            if !is_new {
                tracing::debug!("Status unchanged: {}", message);
                continue;
            }
            if send_message(self.notifier.as_ref(), &message).await {
                self.state.record_message(&homework_name, message);
                sent += 1;
            } else {
                undelivered += 1;
            }
        }

        self.advance_watermark(response.current_date, sent > 0 && undelivered == 0);

        Ok(if sent > 0 {
            CycleOutcome::Notified { sent }
        } else if undelivered > 0 {
            CycleOutcome::Undelivered
        } else {
            CycleOutcome::Unchanged
        })
    }

    fn advance_watermark(&mut self, current_date: Option<i64>, delivered: bool) {
        let next = match self.polling.watermark {
            WatermarkPolicy::OnDelivery if delivered => current_date,
            WatermarkPolicy::OnDelivery => None,
            WatermarkPolicy::Unconditional => current_date,
        };

        if let Some(timestamp) = next {
            if self.state.advance_to(timestamp) {
                tracing::debug!("Watermark advanced to {}", timestamp);
            }
        }
    }

    async fn report_error(&mut self, error: BotError) -> CycleOutcome {
        let message = format!("Program failure: {}", error);
        tracing::error!("{}", message);

        if !self.state.is_new_error(&message) {
            tracing::debug!("Same failure already reported, not sending again");
            return CycleOutcome::ErrorSuppressed;
        }

        if send_message(self.notifier.as_ref(), &message).await {
            self.state.record_error(message);
            CycleOutcome::ErrorNotified
        } else {
            CycleOutcome::ErrorUndelivered
        }
    }
}
