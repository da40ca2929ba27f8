use crate::constants::{DEC_TOKEN, ECR_TOKEN};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Worker lifecycle status of an account, as persisted and as shown in the
/// player table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    None,
    Pending,
    Running,
    Paused,
    Stopped,
    Error,
}

/// One row of the persisted `account_list` record. Field names on the wire
/// are the camelCase names the UI tables consume. Identity is the
/// (username, email) pair; timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub email: String,
    pub power: u64,
    pub posting_key: String,
    pub updated_at: i64,
    pub last_reward_time: i64,
    pub token: String,
    pub ecr: f64,
    pub dec: f64,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub token: String,
    pub balance: f64,
}

/// Player profile returned by the login collaborator. `last_reward_time`
/// arrives as an RFC 3339 string from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub collection_power: u64,
    pub posting_key: String,
    pub last_reward_time: String,
    pub token: String,
    pub balances: Vec<Balance>,
}

impl LoginProfile {
    pub fn balance_of(&self, token: &str) -> AppResult<f64> {
        self.balances
            .iter()
            .find(|b| b.token == token)
            .map(|b| b.balance)
            .ok_or_else(|| AppError::Auth(format!("missing {} balance in login result", token)))
    }
}

impl Account {
    /// Derives an account record from a login profile. Stored `ecr` is the
    /// raw ECR balance divided by 100; `dec` is the raw DEC balance.
    pub fn from_profile(profile: &LoginProfile, status: AccountStatus) -> AppResult<Self> {
        let ecr = profile.balance_of(ECR_TOKEN)? / 100.0;
        let dec = profile.balance_of(DEC_TOKEN)?;
        Ok(Self {
            username: profile.name.clone(),
            email: profile.email.clone().unwrap_or_default(),
            power: profile.collection_power,
            posting_key: profile.posting_key.clone(),
            updated_at: chrono::Utc::now().timestamp_millis(),
            last_reward_time: parse_reward_time(&profile.last_reward_time),
            token: profile.token.clone(),
            ecr,
            dec,
            status,
        })
    }
}

// An unparseable timestamp degrades to 0 instead of failing the whole login.
fn parse_reward_time(raw: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}
