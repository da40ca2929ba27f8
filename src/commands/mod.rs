pub mod account;
pub mod setting;
pub mod worker;

use crate::error::AppResult;
use crate::modules::auth::AuthClient;
use crate::modules::master::WorkerMaster;
use crate::modules::notify::{Notification, Notifier};
use crate::modules::persistence::store::{self, StateStore};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Everything a command handler touches, passed explicitly instead of held
/// in module-level globals.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn StateStore>,
    pub master: Arc<dyn WorkerMaster>,
    pub notifier: Arc<dyn Notifier>,
    pub auth: Arc<dyn AuthClient>,
}

/// UI-issued command, keyed by its wire name. The headless runtime
/// deserializes these from `{"cmd": ..., "data": ...}` lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", content = "data")]
pub enum Command {
    #[serde(rename = "run")]
    Run(Value),
    #[serde(rename = "worker.add")]
    WorkerAdd(Value),
    #[serde(rename = "worker.remove_all")]
    WorkerRemoveAll,
    #[serde(rename = "save_setting")]
    SaveSetting(setting::SaveSettingRequest),
    #[serde(rename = "add_account")]
    AddAccount(account::AddAccountRequest),
    #[serde(rename = "delete_account")]
    DeleteAccount(String),
    #[serde(rename = "redraw_player_table")]
    RedrawPlayerTable,
    #[serde(rename = "redraw_proxy_table")]
    RedrawProxyTable,
    #[serde(rename = "worker.start")]
    WorkerStart,
    #[serde(rename = "worker.stop")]
    WorkerStop,
}

pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<()> {
    match command {
        Command::Run(payload) => worker::run_diagnostic(payload),
        Command::WorkerAdd(record) => worker::worker_add(ctx, record),
        Command::WorkerRemoveAll => worker::worker_remove_all(ctx),
        Command::SaveSetting(request) => setting::save_setting(ctx, request).await?,
        Command::AddAccount(request) => account::add_account(ctx, request).await?,
        Command::DeleteAccount(identifier) => account::delete_account(ctx, &identifier).await?,
        Command::RedrawPlayerTable => redraw_player_table(ctx).await?,
        Command::RedrawProxyTable => redraw_proxy_table(ctx).await?,
        Command::WorkerStart => worker::worker_start(ctx),
        Command::WorkerStop => worker::worker_stop(ctx),
    }
    Ok(())
}

/// Re-publishes the current account list to the player table.
pub async fn redraw_player_table(ctx: &AppContext) -> AppResult<()> {
    let accounts = store::read_accounts(ctx.store.as_ref())
        .await?
        .unwrap_or_default();
    ctx.notifier.notify(Notification::RedrawPlayerTable(accounts));
    Ok(())
}

/// Re-publishes the current setting record to the proxy table.
pub async fn redraw_proxy_table(ctx: &AppContext) -> AppResult<()> {
    let setting = store::read_setting(ctx.store.as_ref())
        .await?
        .unwrap_or_default();
    ctx.notifier.notify(Notification::RedrawProxyTable(setting));
    Ok(())
}
