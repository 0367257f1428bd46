//! Homework bot - homework review status notifications
//!
//! Polls the homework review API, turns status changes into verdicts, and
//! sends them to a Telegram chat. Failures are reported to the same chat.

pub mod api;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod response;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config};
pub use credentials::Credentials;
pub use error::{BotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{HomeworkApi, PracticumClient};
use crate::clock::SystemClock;
use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Run the homework bot until ctrl-c
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        Duration::from_secs(config.api.request_timeout_seconds),
    )?);
    let cancel = CancellationToken::new();

    let api: Arc<dyn HomeworkApi> = Arc::new(PracticumClient::new(
        &config.api,
        &credentials.practicum_token,
        Arc::clone(&http),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram,
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
        Arc::clone(&http),
    ));

    let mut engine = Engine::new(
        api,
        notifier,
        Arc::new(SystemClock),
        &config,
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!("Homework bot started");

    // Run the engine (blocks until cancelled)
    engine.run().await;

    tracing::info!("Homework bot stopped");

    Ok(())
}
