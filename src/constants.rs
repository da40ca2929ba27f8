use std::sync::LazyLock;

pub const APP_SETTING_KEY: &str = "app_setting";
pub const ACCOUNT_LIST_KEY: &str = "account_list";

pub const DEFAULT_ECR: f64 = 50.0;
pub const DEFAULT_START_QUEST_ECR: f64 = 60.0;
pub const DEFAULT_BOT_PER_IP: u32 = 5;
pub const DEFAULT_PROXY_IP: &str = "Default IP";

pub const ECR_TOKEN: &str = "ECR";
pub const DEC_TOKEN: &str = "DEC";

const DEFAULT_API_BASE: &str = "https://api2.splinterlands.com";

pub fn api_base() -> String {
    match std::env::var("QUESTBOT_API_BASE") {
        Ok(v) if !v.trim().is_empty() => v.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "questbot/{} {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
});
