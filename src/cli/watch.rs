//! Watch command: follow the registry with live auto-refreshing output.

use super::output;
use super::servers::build_controller;
use super::{load_config_with_overrides, WatchArgs};
use crate::config::{LogFormat, ServerdeckConfig};
use crate::refresh::AutoRefresh;
use crate::state::{AppState, StateController};
use colored::Colorize;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Build filter directives using helper function
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Apply watch-specific CLI overrides on top of the loaded configuration.
fn apply_watch_overrides(mut config: ServerdeckConfig, args: &WatchArgs) -> ServerdeckConfig {
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(interval) = args.interval {
        config.refresh.interval_seconds = interval;
    }
    if args.no_refresh {
        config.refresh.enabled = false;
    }
    config
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

fn print_frame(state: &AppState, controller: &StateController) {
    let pinging = controller.pinging_address();
    // Clear screen and move the cursor home before each frame
    print!("\x1b[2J\x1b[H");
    println!("{}", output::format_watch_frame(state, pinging.as_deref()));
    println!("\n{}", "Press Ctrl-C to exit".dimmed());
}

/// Main watch command handler
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration and apply overrides
    let config = apply_watch_overrides(load_config_with_overrides(&args.connection)?, &args);
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!(
        api_url = %config.api.base_url,
        refresh_enabled = config.refresh.enabled,
        interval_seconds = config.refresh.interval_seconds,
        "Starting watch"
    );

    // 3. Build the controller and start the periodic refresher
    let controller = build_controller(&config);
    let cancel_token = CancellationToken::new();

    let refresh_handle = if config.refresh.enabled {
        Some(
            AutoRefresh::new(controller.clone(), config.refresh.interval_seconds)
                .start(cancel_token.clone()),
        )
    } else {
        None
    };

    let shutdown_handle = tokio::spawn(shutdown_signal(cancel_token.clone()));

    // Without the refresher nothing would populate the snapshot
    if !config.refresh.enabled {
        controller.refresh_list().await;
    }

    // 4. Render every state the controller publishes
    let stream = controller.state_stream();
    tokio::pin!(stream);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            state = stream.next() => match state {
                Some(state) => print_frame(&state, &controller),
                None => break,
            },
        }
    }

    // 5. Cleanup
    if let Some(handle) = refresh_handle {
        let _ = handle.await;
    }
    shutdown_handle.abort();

    tracing::info!("Watch stopped");
    Ok(())
}
