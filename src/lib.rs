pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod modules;
pub mod utils;

#[cfg(test)]
mod test_utils;

use commands::{AppContext, Command};
use modules::auth::HttpAuthClient;
use modules::master::LoggingMaster;
use modules::notify::{LogNotifier, Notification};
use modules::persistence::store::JsonFileStore;
use modules::shutdown::ShutdownCoordinator;
use modules::system::logger;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info, warn};

fn build_context() -> Result<AppContext, String> {
    let store = JsonFileStore::open_default()
        .map_err(|e| format!("failed_to_open_state_store: {}", e))?;
    Ok(AppContext {
        store: Arc::new(store),
        master: Arc::new(LoggingMaster::new()),
        notifier: Arc::new(LogNotifier),
        auth: Arc::new(HttpAuthClient::new(constants::api_base())),
    })
}

async fn start_headless_runtime() -> Result<(), String> {
    let ctx = build_context()?;
    let coordinator = ShutdownCoordinator::new();

    commands::setting::load_config_data(&ctx)
        .await
        .map_err(|e| format!("failed_to_load_config_data: {}", e))?;
    ctx.notifier
        .notify(Notification::Run("main process ready".to_string()));
    ctx.notifier.notify(Notification::Modify {
        state: ctx.master.state(),
    });

    info!("Headless controller is running. Commands are read from stdin; press Ctrl+C to exit.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    error!("failed to listen for shutdown signal: {}", e);
                }
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Command>(trimmed) {
                            Ok(command) => {
                                if let Err(e) = commands::dispatch(&ctx, command).await {
                                    error!("command failed: {}", e);
                                }
                            }
                            Err(e) => warn!("unrecognized command line: {}", e),
                        }
                    }
                    // stdin closed; keep serving until the shutdown signal
                    Ok(None) => {
                        if let Err(e) = tokio::signal::ctrl_c().await {
                            error!("failed to listen for shutdown signal: {}", e);
                        }
                        break;
                    }
                    Err(e) => {
                        error!("failed to read command input: {}", e);
                        break;
                    }
                }
            }
        }
    }

    info!("Shutdown requested, persisting final state");
    coordinator
        .finalize(&ctx)
        .await
        .map_err(|e| format!("failed_to_finalize_shutdown: {}", e))?;
    Ok(())
}

pub fn run() {
    logger::init_logger();

    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    runtime.block_on(async {
        if let Err(e) = start_headless_runtime().await {
            error!("{}", e);
            std::process::exit(1);
        }
        info!("Shutting down headless controller");
    });
}
