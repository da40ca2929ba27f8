use super::AppContext;
use crate::error::AppResult;
use crate::models::{AppSetting, ProxyEntry};
use crate::modules::notify::Notification;
use crate::modules::persistence::store;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyPatch {
    pub ip: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingRequest {
    pub ecr: f64,
    pub start_quest_ecr: f64,
    #[serde(default)]
    pub proxies: Vec<ProxyPatch>,
}

/// Window-ready sequence: both records are seeded with defaults when absent
/// and republished to the UI on every invocation.
pub async fn load_config_data(ctx: &AppContext) -> AppResult<()> {
    let setting = store::read_setting(ctx.store.as_ref())
        .await?
        .unwrap_or_else(AppSetting::new);
    store::write_setting(ctx.store.as_ref(), &setting).await?;
    ctx.notifier.notify(Notification::LoadSetting(setting));

    let accounts = store::read_accounts(ctx.store.as_ref())
        .await?
        .unwrap_or_default();
    ctx.notifier
        .notify(Notification::LoadAccount(accounts.clone()));
    store::write_accounts(ctx.store.as_ref(), &accounts).await?;
    Ok(())
}

/// Rebuilds the proxy list from the incoming entries: an ip already present
/// keeps its stored entry verbatim (live count and status survive), a new ip
/// starts at count 0. Output order follows the incoming list.
pub fn merge_proxies(existing: &[ProxyEntry], incoming: &[ProxyPatch]) -> Vec<ProxyEntry> {
    incoming
        .iter()
        .map(|patch| {
            existing
                .iter()
                .find(|entry| entry.ip == patch.ip)
                .cloned()
                .unwrap_or_else(|| ProxyEntry::new(patch.ip.clone()))
        })
        .collect()
}

pub async fn save_setting(ctx: &AppContext, request: SaveSettingRequest) -> AppResult<()> {
    let old = store::read_setting(ctx.store.as_ref())
        .await?
        .unwrap_or_else(AppSetting::new);

    let merged = AppSetting {
        ecr: request.ecr,
        start_quest_ecr: request.start_quest_ecr,
        bot_per_ip: old.bot_per_ip,
        proxies: merge_proxies(&old.proxies, &request.proxies),
    };
    store::write_setting(ctx.store.as_ref(), &merged).await?;

    ctx.master.dequeue().await;
    Ok(())
}
