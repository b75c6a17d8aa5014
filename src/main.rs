#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::CaptureName;
use domain::models::Event;
use domain::models::ExchangeClient;
use domain::models::PlaybackName;
use domain::services::ConversationSettings;
use domain::services::TurnOrchestrator;
use infrastructure::capture::CaptureManager;
use infrastructure::exchange::http::HttpExchange;
use infrastructure::playback::PlaybackManager;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        format!(
            "Oh no! Callbot has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        )
        .red()
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// Builds the orchestrator from the loaded config. A backend that can't be
/// reached isn't fatal, it comes back as a warning for the landing view.
async fn build_orchestrator(
    event_tx: mpsc::UnboundedSender<Event>,
) -> Result<(TurnOrchestrator, Option<String>)> {
    let capture_name = CaptureName::parse(Config::get(ConfigKey::Capture))
        .ok_or_else(|| return anyhow!("Unknown capture device '{}'", Config::get(ConfigKey::Capture)))?;
    let playback_name = PlaybackName::parse(Config::get(ConfigKey::Playback))
        .ok_or_else(|| return anyhow!("Unknown playback device '{}'", Config::get(ConfigKey::Playback)))?;

    let capture = CaptureManager::get(capture_name)?;
    let playback = PlaybackManager::get(playback_name)?;
    let exchange = Arc::new(HttpExchange::from_config()?);

    let mut backend_warning = None;
    if let Err(err) = exchange.health_check().await {
        tracing::warn!(error = ?err, "Dialogue backend health check failed");
        backend_warning = Some(format!(
            "Heads up, the dialogue backend isn't reachable. Every turn will fail until it is.\n{err}"
        ));
    }

    let orchestrator = TurnOrchestrator::new(
        capture,
        playback,
        exchange,
        ConversationSettings::from_config()?,
        event_tx,
    );

    return Ok((orchestrator, backend_warning));
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("callbot")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => {}
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let (orchestrator, backend_warning) = match build_orchestrator(event_tx).await {
        Ok(res) => res,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return orchestrator.start(&mut action_rx).await;
    });

    let ui_future = ui::start(action_tx, event_rx, backend_warning);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(anyhow!(err)),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    // The UI dropped its action sender, give the orchestrator a moment to
    // stop any recorder or speech process it still owns.
    if time::timeout(Duration::from_secs(2), background_futures.join_next())
        .await
        .is_err()
    {
        tracing::warn!("Orchestrator did not shut down in time");
    }

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
