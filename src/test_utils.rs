#![cfg(test)]

use crate::commands::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::{Account, AccountStatus, Balance, LoginProfile};
use crate::modules::auth::AuthClient;
use crate::modules::master::WorkerMaster;
use crate::modules::notify::{Notification, Notifier};
use crate::modules::persistence::store::StateStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

fn global_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    global_env_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct ScopedEnvVar {
    key: &'static str,
    original: Option<String>,
}

impl ScopedEnvVar {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }

    pub(crate) fn unset(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        std::env::remove_var(key);
        Self { key, original }
    }
}

impl Drop for ScopedEnvVar {
    fn drop(&mut self) {
        if let Some(value) = self.original.as_deref() {
            std::env::set_var(self.key, value);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

pub(crate) fn sample_profile(name: &str) -> LoginProfile {
    LoginProfile {
        name: name.to_string(),
        email: Some(format!("{}@example.com", name)),
        collection_power: 12_000,
        posting_key: "5JExamplePostingKey".to_string(),
        last_reward_time: "2022-04-01T10:30:00.000Z".to_string(),
        token: "session-token".to_string(),
        balances: vec![
            Balance {
                token: "ECR".to_string(),
                balance: 5000.0,
            },
            Balance {
                token: "DEC".to_string(),
                balance: 321.5,
            },
        ],
    }
}

pub(crate) fn sample_account(username: &str, email: &str, status: AccountStatus) -> Account {
    Account {
        username: username.to_string(),
        email: email.to_string(),
        power: 10_000,
        posting_key: "5JExamplePostingKey".to_string(),
        updated_at: 1_700_000_000_000,
        last_reward_time: 1_648_809_000_000,
        token: "session-token".to_string(),
        ecr: 80.0,
        dec: 12.0,
        status,
    }
}

/// In-memory stand-in for the persisted store.
pub(crate) struct MemoryStore {
    map: tokio::sync::Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            map: tokio::sync::Mutex::new(Map::new()),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.map.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn take(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordedCall {
    Enqueue,
    Dequeue,
    Add,
    RemoveAll,
    StartWorkers,
    PauseWorkers,
}

pub(crate) struct RecordingMaster {
    calls: Mutex<Vec<RecordedCall>>,
    enqueued: Mutex<Vec<Account>>,
    stop_ecr: Mutex<f64>,
}

impl RecordingMaster {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            enqueued: Mutex::new(Vec::new()),
            stop_ecr: Mutex::new(crate::constants::DEFAULT_ECR),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub(crate) fn enqueued(&self) -> Vec<Account> {
        self.enqueued.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub(crate) fn stop_ecr(&self) -> f64 {
        self.stop_ecr.lock().map(|v| *v).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl WorkerMaster for RecordingMaster {
    fn enqueue(&self, record: Account) {
        self.record(RecordedCall::Enqueue);
        if let Ok(mut enqueued) = self.enqueued.lock() {
            enqueued.push(record);
        }
    }

    async fn dequeue(&self) {
        self.record(RecordedCall::Dequeue);
    }

    fn add(&self, _record: Value) {
        self.record(RecordedCall::Add);
    }

    fn remove_all(&self) {
        self.record(RecordedCall::RemoveAll);
    }

    fn start_workers(&self) {
        self.record(RecordedCall::StartWorkers);
    }

    fn pause_workers(&self) {
        self.record(RecordedCall::PauseWorkers);
    }

    fn state(&self) -> Value {
        Value::Null
    }

    fn set_stop_ecr(&self, ecr: f64) {
        if let Ok(mut lock) = self.stop_ecr.lock() {
            *lock = ecr;
        }
    }
}

/// Auth stub: rejects every login until `succeed_with` installs a profile.
pub(crate) struct StubAuth {
    profile: Mutex<Option<LoginProfile>>,
    username_logins: AtomicUsize,
    email_logins: AtomicUsize,
}

impl StubAuth {
    pub(crate) fn new() -> Self {
        Self {
            profile: Mutex::new(None),
            username_logins: AtomicUsize::new(0),
            email_logins: AtomicUsize::new(0),
        }
    }

    pub(crate) fn succeed_with(&self, profile: LoginProfile) {
        if let Ok(mut lock) = self.profile.lock() {
            *lock = Some(profile);
        }
    }

    pub(crate) fn username_logins(&self) -> usize {
        self.username_logins.load(Ordering::SeqCst)
    }

    pub(crate) fn email_logins(&self) -> usize {
        self.email_logins.load(Ordering::SeqCst)
    }

    fn result(&self) -> AppResult<LoginProfile> {
        self.profile
            .lock()
            .ok()
            .and_then(|p| p.clone())
            .ok_or_else(|| AppError::Auth("invalid credentials".to_string()))
    }
}

#[async_trait]
impl AuthClient for StubAuth {
    async fn login(&self, _username: &str, _password: &str) -> AppResult<LoginProfile> {
        self.username_logins.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn login_email(&self, _email: &str, _password: &str) -> AppResult<LoginProfile> {
        self.email_logins.fetch_add(1, Ordering::SeqCst);
        self.result()
    }
}

pub(crate) struct TestFixtures {
    pub(crate) master: Arc<RecordingMaster>,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) auth: Arc<StubAuth>,
}

/// Builds an `AppContext` wired entirely to recording fakes.
pub(crate) fn test_context() -> (AppContext, TestFixtures) {
    let master = Arc::new(RecordingMaster::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let auth = Arc::new(StubAuth::new());

    let ctx = AppContext {
        store: Arc::new(MemoryStore::new()),
        master: master.clone(),
        notifier: notifier.clone(),
        auth: auth.clone(),
    };
    (
        ctx,
        TestFixtures {
            master,
            notifier,
            auth,
        },
    )
}
