use super::AppContext;
use serde_json::Value;

/// Diagnostic no-op; the payload is logged and nothing else happens.
pub fn run_diagnostic(payload: Value) {
    tracing::info!("run: {}", payload);
}

pub fn worker_add(ctx: &AppContext, record: Value) {
    ctx.master.add(record);
}

pub fn worker_remove_all(ctx: &AppContext) {
    ctx.master.remove_all();
}

pub fn worker_start(ctx: &AppContext) {
    ctx.master.start_workers();
}

pub fn worker_stop(ctx: &AppContext) {
    ctx.master.pause_workers();
}
