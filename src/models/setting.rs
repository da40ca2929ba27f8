use crate::constants::{
    DEFAULT_BOT_PER_IP, DEFAULT_ECR, DEFAULT_PROXY_IP, DEFAULT_START_QUEST_ECR,
};
use serde::{Deserialize, Serialize};

/// One configured outbound proxy. `count` is the live worker assignment
/// counter; `status` stays an open string so values this build does not know
/// about survive a settings merge untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyEntry {
    pub ip: String,
    pub count: u32,
    pub status: String,
}

impl ProxyEntry {
    pub fn new(ip: String) -> Self {
        Self {
            ip,
            count: 0,
            status: "active".to_string(),
        }
    }
}

/// The persisted `app_setting` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSetting {
    pub ecr: f64,
    pub start_quest_ecr: f64,
    pub bot_per_ip: u32,
    #[serde(default)]
    pub proxies: Vec<ProxyEntry>,
}

impl AppSetting {
    pub fn new() -> Self {
        Self {
            ecr: DEFAULT_ECR,
            start_quest_ecr: DEFAULT_START_QUEST_ECR,
            bot_per_ip: DEFAULT_BOT_PER_IP,
            proxies: vec![ProxyEntry::new(DEFAULT_PROXY_IP.to_string())],
        }
    }
}

impl Default for AppSetting {
    fn default() -> Self {
        Self::new()
    }
}
