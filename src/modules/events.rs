use crate::commands::{self, AppContext};
use crate::error::AppResult;
use crate::models::{Account, AppSetting};
use crate::modules::notify::Notification;
use crate::modules::persistence::store;
use serde::Deserialize;
use serde_json::Value;

/// Change event pushed back from the worker engine. The engine owns the
/// mutation; the controller persists it and republishes the affected table.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", content = "param", rename_all = "snake_case")]
pub enum MasterEvent {
    AccountList { account_list: Vec<Account> },
    AppSetting { app_setting: AppSetting },
    MasterState { state: Value },
}

pub async fn on_master_change(ctx: &AppContext, event: MasterEvent) -> AppResult<()> {
    match event {
        MasterEvent::AccountList { account_list } => {
            let now = chrono::Utc::now().timestamp_millis();
            let stamped: Vec<Account> = account_list
                .into_iter()
                .map(|account| Account {
                    updated_at: now,
                    ..account
                })
                .collect();
            store::write_accounts(ctx.store.as_ref(), &stamped).await?;
            commands::redraw_player_table(ctx).await?;
        }
        MasterEvent::AppSetting { app_setting } => {
            store::write_setting(ctx.store.as_ref(), &app_setting).await?;
            // zero or missing threshold falls back to the stock 50
            let stop_ecr = if app_setting.ecr != 0.0 {
                app_setting.ecr
            } else {
                crate::constants::DEFAULT_ECR
            };
            ctx.master.set_stop_ecr(stop_ecr);
            commands::redraw_proxy_table(ctx).await?;
        }
        MasterEvent::MasterState { state } => {
            ctx.notifier.notify(Notification::Modify { state });
        }
    }
    Ok(())
}
