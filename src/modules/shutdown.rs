use crate::commands::AppContext;
use crate::error::AppResult;
use crate::models::{Account, AccountStatus, AppSetting};
use crate::modules::persistence::store;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Running = 0,
    Intercepted = 1,
    Finalizing = 2,
    Exited = 3,
}

impl ShutdownPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Intercepted,
            2 => Self::Finalizing,
            3 => Self::Exited,
            _ => Self::Running,
        }
    }
}

/// Intercepts process termination and persists the status-collapsing
/// transform before the process is allowed to exit. The transform runs at
/// most once per process lifetime no matter how often termination is
/// observed.
pub struct ShutdownCoordinator {
    started: AtomicBool,
    phase: AtomicU8,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            phase: AtomicU8::new(0),
        }
    }

    pub fn phase(&self) -> ShutdownPhase {
        ShutdownPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Runs the shutdown transform. Returns true when this call performed
    /// it; later calls (and concurrent ones) observe the guard and return
    /// false without touching the store.
    pub async fn finalize(&self, ctx: &AppContext) -> AppResult<bool> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(false);
        }
        self.phase
            .store(ShutdownPhase::Intercepted as u8, Ordering::SeqCst);

        let accounts = store::read_accounts(ctx.store.as_ref())
            .await?
            .unwrap_or_default();
        let mut setting = store::read_setting(ctx.store.as_ref())
            .await?
            .unwrap_or_else(AppSetting::new);

        let collapsed = collapse_account_statuses(accounts);
        reset_proxy_counts(&mut setting);

        self.phase
            .store(ShutdownPhase::Finalizing as u8, Ordering::SeqCst);
        store::write_accounts(ctx.store.as_ref(), &collapsed).await?;
        store::write_setting(ctx.store.as_ref(), &setting).await?;

        self.phase
            .store(ShutdownPhase::Exited as u8, Ordering::SeqCst);
        tracing::info!(
            "shutdown transform persisted ({} accounts, {} proxies)",
            collapsed.len(),
            setting.proxies.len()
        );
        Ok(true)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// RUNNING collapses to PAUSED so in-flight work resumes next start; every
/// other status collapses to STOPPED.
pub fn collapse_status(status: AccountStatus) -> AccountStatus {
    match status {
        AccountStatus::Running => AccountStatus::Paused,
        _ => AccountStatus::Stopped,
    }
}

pub fn collapse_account_statuses(accounts: Vec<Account>) -> Vec<Account> {
    accounts
        .into_iter()
        .map(|account| Account {
            status: collapse_status(account.status),
            ..account
        })
        .collect()
}

pub fn reset_proxy_counts(setting: &mut AppSetting) {
    for proxy in &mut setting.proxies {
        proxy.count = 0;
    }
}
