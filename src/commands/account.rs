use super::AppContext;
use crate::error::AppResult;
use crate::models::{Account, AccountStatus};
use crate::modules::notify::{AccountNotice, Notification};
use crate::modules::persistence::store;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("invalid email regex")
});

pub fn is_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAccountRequest {
    pub username: String,
    pub password: String,
}

/// Authenticates the credentials through the matching flow, appends the
/// account, and hands a PENDING copy to the priority queue. An auth failure
/// is converted into a failure notification and swallowed; no state changes.
pub async fn add_account(ctx: &AppContext, request: AddAccountRequest) -> AppResult<()> {
    let by_email = is_email(&request.username);
    let login = if by_email {
        ctx.auth
            .login_email(&request.username, &request.password)
            .await
    } else {
        ctx.auth.login(&request.username, &request.password).await
    };

    let profile = match login {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("login failed for {}: {}", request.username, e);
            ctx.notifier
                .notify(Notification::AddAccountFailed(AccountNotice {
                    by_email,
                    player: request.username.clone(),
                    email: request.username.clone(),
                }));
            return Ok(());
        }
    };

    let account = Account::from_profile(&profile, AccountStatus::None)?;

    let mut accounts = store::read_accounts(ctx.store.as_ref())
        .await?
        .unwrap_or_default();
    // no duplicate (username, email) pair after any mutation
    accounts.retain(|a| !(a.username == account.username && a.email == account.email));
    accounts.push(account.clone());
    store::write_accounts(ctx.store.as_ref(), &accounts).await?;

    ctx.notifier
        .notify(Notification::AddAccountSuccess(AccountNotice {
            by_email,
            player: profile.name.clone(),
            email: profile.email.clone().unwrap_or_default(),
        }));

    let pending = Account {
        status: AccountStatus::Pending,
        ..account
    };
    ctx.master.enqueue(pending);
    ctx.master.dequeue().await;
    Ok(())
}

/// Removes every account whose username or email equals the identifier.
pub async fn delete_account(ctx: &AppContext, identifier: &str) -> AppResult<()> {
    let accounts = store::read_accounts(ctx.store.as_ref())
        .await?
        .unwrap_or_default();
    let filtered: Vec<Account> = accounts
        .into_iter()
        .filter(|a| a.username != identifier && a.email != identifier)
        .collect();
    store::write_accounts(ctx.store.as_ref(), &filtered).await
}
