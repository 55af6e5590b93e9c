//! Injected state store with change subscriptions.
//!
//! Replaces ambient globals: whoever needs a piece of process-wide state is
//! handed a [`SharedStore`] clone. Clones share the same value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::core::service::ToleranceStore;
use crate::slippage::SlippageTolerance;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct StoreInner<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

/// Single-writer, multi-reader value with change notification.
pub struct SharedStore<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SharedStore<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Read without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.read())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.write() = value.clone();
        self.notify(&value);
    }

    /// Mutate in place and notify subscribers with the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut guard = self.inner.value.write();
            f(&mut guard);
            guard.clone()
        }; // Lock released before callbacks run
        self.notify(&snapshot);
    }

    /// Register a callback run after every `set`/`update`.
    ///
    /// The callback stays registered until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> StoreSubscription<T> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().push((id, Arc::new(callback)));
        StoreSubscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    fn notify(&self, value: &T) {
        // Callbacks may subscribe or drop subscriptions; don't hold the list lock
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedStore").field(&*self.inner.value.read()).finish()
    }
}

/// Handle returned by [`SharedStore::subscribe`]; unsubscribes on drop.
pub struct StoreSubscription<T> {
    store: Weak<StoreInner<T>>,
    id: u64,
}

impl<T> Drop for StoreSubscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.subscribers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

impl ToleranceStore for SharedStore<SlippageTolerance> {
    fn get(&self) -> SlippageTolerance {
        SharedStore::get(self)
    }

    fn set(&self, tolerance: SlippageTolerance) {
        SharedStore::set(self, tolerance)
    }
}
