use crate::models::Account;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::RwLock;

/// Lifecycle surface of the external queue/worker engine. The core issues
/// commands and consumes the opaque `state` snapshot; it never inspects the
/// engine's internals.
#[async_trait]
pub trait WorkerMaster: Send + Sync {
    /// Submits a freshly authenticated account into the priority queue.
    fn enqueue(&self, record: Account);
    /// Asks the engine to re-evaluate pending work.
    async fn dequeue(&self);
    fn add(&self, record: Value);
    fn remove_all(&self);
    fn start_workers(&self);
    fn pause_workers(&self);
    /// Opaque engine state, forwarded to the UI without inspection.
    fn state(&self) -> Value;
    /// Live ECR threshold below which workers stop picking up quests.
    fn set_stop_ecr(&self, ecr: f64);
}

/// Headless stand-in that logs every lifecycle command. Carries the opaque
/// state and the stop threshold so the rest of the core behaves exactly as
/// it does against the real engine.
pub struct LoggingMaster {
    state: RwLock<Value>,
    stop_ecr: RwLock<f64>,
}

impl LoggingMaster {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Value::Null),
            stop_ecr: RwLock::new(crate::constants::DEFAULT_ECR),
        }
    }

    pub fn stop_ecr(&self) -> f64 {
        self.stop_ecr.read().map(|v| *v).unwrap_or_default()
    }
}

impl Default for LoggingMaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkerMaster for LoggingMaster {
    fn enqueue(&self, record: Account) {
        tracing::info!("[Master] enqueue: {} ({:?})", record.username, record.status);
    }

    async fn dequeue(&self) {
        tracing::info!("[Master] dequeue requested");
    }

    fn add(&self, record: Value) {
        tracing::info!("[Master] add: {}", record);
    }

    fn remove_all(&self) {
        tracing::info!("[Master] remove_all");
    }

    fn start_workers(&self) {
        tracing::info!("[Master] start_workers");
    }

    fn pause_workers(&self) {
        tracing::info!("[Master] pause_workers");
    }

    fn state(&self) -> Value {
        self.state.read().map(|v| v.clone()).unwrap_or(Value::Null)
    }

    fn set_stop_ecr(&self, ecr: f64) {
        if let Ok(mut lock) = self.stop_ecr.write() {
            *lock = ecr;
        }
        tracing::info!("[Master] stop ECR threshold set to {}", ecr);
    }
}
