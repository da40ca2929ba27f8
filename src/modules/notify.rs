use crate::models::{Account, AppSetting};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNotice {
    pub by_email: bool,
    pub player: String,
    pub email: String,
}

/// Outbound event to the UI channel. Tag and payload shapes are the wire
/// contract the front end renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    LoadSetting(AppSetting),
    LoadAccount(Vec<Account>),
    Modify { state: Value },
    RedrawPlayerTable(Vec<Account>),
    RedrawProxyTable(AppSetting),
    Run(String),
    AddAccountFailed(AccountNotice),
    AddAccountSuccess(AccountNotice),
}

pub trait Notifier: Send + Sync {
    fn notify(&self, event: Notification);
}

/// Headless rendition of the UI channel: every event is logged as one JSON
/// line.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Notification) {
        match serde_json::to_string(&event) {
            Ok(line) => tracing::info!("[Notify] {}", line),
            Err(e) => tracing::error!("failed to serialize notification: {}", e),
        }
    }
}
