//! Connector handles, their change listeners, and the connector registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Event a connector emits when the wallet changes state outside our control
/// (account switched in the extension, chain switched, session dropped).
pub const CONNECTOR_UPDATE_EVENT: &str = "connector_update";

pub type ConnectorListener = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A wallet-provider integration (browser extension, mobile bridge, ...).
///
/// Only event subscription is visible to the core; everything else about the
/// connector is opaque.
pub trait Connector: Send + Sync {
    /// Registry key, e.g. `"injected"` or `"walletconnect"`
    fn id(&self) -> &str;

    fn add_listener(&self, event: &str, listener: ConnectorListener) -> ListenerId;

    /// Returns `false` if the listener was not registered.
    fn remove_listener(&self, event: &str, id: ListenerId) -> bool;
}

impl fmt::Debug for dyn Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector").field("id", &self.id()).finish()
    }
}

/// Listener bookkeeping for [`Connector`] implementations.
#[derive(Default)]
pub struct ListenerTable {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, ConnectorListener)>>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event: &str, listener: ConnectorListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    pub fn remove(&self, event: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(entries) = listeners.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            listeners.remove(event);
        }
        removed
    }

    /// Call every listener registered for `event`. Returns how many ran.
    pub fn emit(&self, event: &str) -> usize {
        // Listeners may unsubscribe while running
        let snapshot: Vec<ConnectorListener> = self
            .listeners
            .lock()
            .get(event)
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.lock().get(event).map_or(0, Vec::len)
    }
}

/// A live listener on a connector. Dropping it removes the listener.
pub struct Subscription {
    connector: Arc<dyn Connector>,
    event: &'static str,
    id: Option<ListenerId>,
}

impl Subscription {
    pub fn subscribe(
        connector: Arc<dyn Connector>,
        event: &'static str,
        listener: ConnectorListener,
    ) -> Self {
        let id = connector.add_listener(event, listener);
        tracing::debug!(connector = connector.id(), event, "Listener attached");
        Self {
            connector,
            event,
            id: Some(id),
        }
    }

    pub fn connector(&self) -> &Arc<dyn Connector> {
        &self.connector
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.connector.remove_listener(self.event, id);
            tracing::debug!(connector = self.connector.id(), event = self.event, "Listener detached");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("connector", &self.connector.id())
            .field("event", &self.event)
            .finish()
    }
}

/// Connectors the app knows about, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    connectors: HashMap<String, Arc<dyn Connector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, id: impl Into<String>, connector: Arc<dyn Connector>) -> Self {
        self.register(id, connector);
        self
    }

    pub fn register(&mut self, id: impl Into<String>, connector: Arc<dyn Connector>) {
        self.connectors.insert(id.into(), connector);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.connectors.contains_key(id)
    }

    /// Identifiers in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.connectors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
