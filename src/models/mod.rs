pub mod account;
pub mod setting;

pub use account::{Account, AccountStatus, Balance, LoginProfile};
pub use setting::{AppSetting, ProxyEntry};
