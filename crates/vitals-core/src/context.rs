//! Request-scoped context store
//!
//! Ambient key/value state bound to one logical task, propagated across
//! suspension points without explicit parameter threading. Built on
//! `tokio::task_local!`, so two concurrently active scopes are fully
//! isolated even on a single-threaded scheduler.
//!
//! Snapshots are copy-on-write: [`set`] clones the current record, inserts
//! the key, and rebinds the new snapshot as current for the active scope.
//! A snapshot handed out earlier (for example to a log line already being
//! rendered) is never mutated in place.

use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

/// The record type held by a scope: string keys to arbitrary JSON values.
pub type ContextMap = serde_json::Map<String, Value>;

tokio::task_local! {
    static SCOPE: RefCell<Arc<ContextMap>>;
}

/// Runs `fut` inside a freshly created, isolated scope seeded with
/// `initial`. Every continuation of `fut`, including ones resuming after
/// an `.await`, observes this scope. The result (or failure) of `fut`
/// propagates unchanged.
///
/// Nested calls start from their own `initial` data only; parent fields
/// are not inherited. Tasks started with `tokio::spawn` are new logical
/// tasks and do not inherit the scope either.
pub async fn scope<F>(initial: ContextMap, fut: F) -> F::Output
where
    F: Future,
{
    SCOPE.scope(RefCell::new(Arc::new(initial)), fut).await
}

/// Synchronous variant of [`scope`] for non-async callers.
pub fn scope_sync<F, T>(initial: ContextMap, f: F) -> T
where
    F: FnOnce() -> T,
{
    SCOPE.sync_scope(RefCell::new(Arc::new(initial)), f)
}

/// Sets `key` in the active scope.
///
/// Produces a new snapshot equal to the current one with `key` overwritten
/// and rebinds it as current for this scope. Calling `set` outside any
/// scope is a no-op.
pub fn set(key: impl Into<String>, value: impl Into<Value>) {
    let _ = SCOPE.try_with(|current| {
        let mut slot = current.borrow_mut();
        let mut next = ContextMap::clone(&slot);
        next.insert(key.into(), value.into());
        *slot = Arc::new(next);
    });
}

/// Returns the value for `key` in the active scope, or `None` when the key
/// is unset or no scope is active.
pub fn get(key: &str) -> Option<Value> {
    SCOPE
        .try_with(|current| current.borrow().get(key).cloned())
        .ok()
        .flatten()
}

/// Returns a defensive copy of the active scope's full record, or an empty
/// map when no scope is active.
pub fn get_all() -> ContextMap {
    SCOPE
        .try_with(|current| ContextMap::clone(&current.borrow()))
        .unwrap_or_default()
}
