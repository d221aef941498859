#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! A [`BatchScope`] collects notifications raised by [`Observable`] mutations
//! and delivers them when the outermost scope is dropped.
//!
//! [`Observable`]: crate::Observable

use std::cell::RefCell;
use std::marker::PhantomData;

type Pending = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchContext {
    depth: usize,
    /// Deferred notifications keyed by observable identity, in first-raised order.
    pending: Vec<(usize, Pending)>,
}

thread_local! {
    static BATCH: RefCell<BatchContext> = RefCell::new(BatchContext::default());
}

/// Returns `true` while at least one [`BatchScope`] is alive on this thread.
#[must_use]
pub fn is_batching() -> bool {
    BATCH.with(|ctx| ctx.borrow().depth > 0)
}

/// Queue a notification for the current batch.
///
/// A second notification for the same `key` within one batch is dropped; the
/// queued one reads the value at flush time anyway.
pub(crate) fn defer(key: usize, notify: Pending) {
    BATCH.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        if ctx.pending.iter().any(|(k, _)| *k == key) {
            return;
        }
        ctx.pending.push((key, notify));
    });
}

/// RAII guard that defers observable notifications until it is dropped.
///
/// Scopes nest: only dropping the outermost scope flushes. The batch stays
/// open while the flush runs, so a callback that mutates another observable
/// queues its notification behind the current round instead of delivering it
/// in the middle of it. Rounds repeat until nothing is pending.
#[must_use = "notifications are flushed when the scope is dropped"]
pub struct BatchScope {
    // Thread-local bookkeeping; the scope must be dropped on the thread that made it.
    _not_send: PhantomData<*const ()>,
}

impl BatchScope {
    /// Open a new batch scope.
    pub fn new() -> Self {
        BATCH.with(|ctx| ctx.borrow_mut().depth += 1);
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let outermost = BATCH.with(|ctx| ctx.borrow().depth == 1);
        if !outermost {
            BATCH.with(|ctx| {
                let mut ctx = ctx.borrow_mut();
                ctx.depth = ctx.depth.saturating_sub(1);
            });
            return;
        }

        // Depth stays at 1 until the queue drains.
        loop {
            let pending = BATCH.with(|ctx| std::mem::take(&mut ctx.borrow_mut().pending));
            if pending.is_empty() {
                break;
            }
            tracing::trace!(count = pending.len(), "flushing batched notifications");
            for (_, notify) in pending {
                notify();
            }
        }
        BATCH.with(|ctx| ctx.borrow_mut().depth = 0);
    }
}
