//! # Reconnect Coordinator
//!
//! Restores the previously used wallet connection on startup, and forces a full
//! reload whenever the active connector reports that the wallet changed under us.
//!
//! ## State Machine
//!
//! ```text
//!            maybe_reconnect                activation ok / account seen
//!   Idle ──────────────────────► Attempting ───────────────────────────► Connected
//!    ▲                               │                                      │
//!    └──────── activation failed ────┘                                      │
//!    └──────────────────── change event ─► reload ─► reset ─────────────────┘
//! ```
//!
//! There is no terminal state; the coordinator reacts for the whole session.
//!
//! ## Failure Handling
//!
//! Activation runs as a detached tokio task. A failure goes to the
//! [`DiagnosticSink`] and the coordinator drops back to `Idle`. It does not retry.
//! Re-entrancy (two activations in flight) is the [`Activator`]'s concern.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use super::connector::{Connector, ConnectorListener, ConnectorRegistry, Subscription, CONNECTOR_UPDATE_EVENT};
use crate::core::service::{Activator, DiagnosticSink, Reloader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectState {
    /// No account and nothing in flight
    Idle,
    /// Activation task running
    Attempting,
    /// Account present
    Connected,
}

/// Connector to activate, if a silent reconnection should be attempted now.
///
/// Attempts only when there is no active account, a saved connector id exists,
/// and that id is still in the registry. An unknown id is not an error.
pub fn should_reconnect(
    active_account: Option<&str>,
    saved_connector: Option<&str>,
    registry: &ConnectorRegistry,
) -> Option<Arc<dyn Connector>> {
    if active_account.is_some() {
        return None;
    }
    registry.get(saved_connector?)
}

struct Watch {
    connector: Arc<dyn Connector>,
    _subscription: Subscription,
}

pub struct ReconnectCoordinator {
    activator: Arc<dyn Activator>,
    diagnostics: Arc<dyn DiagnosticSink>,
    reloader: Arc<dyn Reloader>,
    state: Arc<RwLock<ReconnectState>>,
    // Bumped on reset so abandoned activation tasks don't write state
    epoch: Arc<AtomicU64>,
    watch: Option<Watch>,
}

impl ReconnectCoordinator {
    pub fn new(
        activator: Arc<dyn Activator>,
        diagnostics: Arc<dyn DiagnosticSink>,
        reloader: Arc<dyn Reloader>,
    ) -> Self {
        Self {
            activator,
            diagnostics,
            reloader,
            state: Arc::new(RwLock::new(ReconnectState::Idle)),
            epoch: Arc::new(AtomicU64::new(0)),
            watch: None,
        }
    }

    pub fn state(&self) -> ReconnectState {
        *self.state.read()
    }

    /// Start a silent reconnection if [`should_reconnect`] says so.
    ///
    /// Must be called from within a tokio runtime. Returns the handle of the
    /// spawned activation task; callers are free to drop it.
    pub fn maybe_reconnect(
        &self,
        active_account: Option<&str>,
        saved_connector: Option<&str>,
        registry: &ConnectorRegistry,
    ) -> Option<JoinHandle<()>> {
        let Some(connector) = should_reconnect(active_account, saved_connector, registry) else {
            tracing::trace!(
                has_account = active_account.is_some(),
                saved_connector = ?saved_connector,
                "No reconnection attempt"
            );
            return None;
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, "Cannot reconnect outside a tokio runtime");
                return None;
            }
        };

        *self.state.write() = ReconnectState::Attempting;
        let epoch = self.epoch.load(Ordering::SeqCst);
        tracing::info!(connector = connector.id(), "Attempting silent reconnection");

        let activator = Arc::clone(&self.activator);
        let diagnostics = Arc::clone(&self.diagnostics);
        let state = Arc::clone(&self.state);
        let current_epoch = Arc::clone(&self.epoch);

        Some(runtime.spawn(async move {
            let connector_id = connector.id().to_string();
            let result = activator.activate(connector).await;
            let stale = current_epoch.load(Ordering::SeqCst) != epoch;

            match result {
                Ok(()) => {
                    tracing::info!(connector = %connector_id, stale, "Reconnected");
                    if !stale {
                        *state.write() = ReconnectState::Connected;
                    }
                }
                Err(e) => {
                    tracing::warn!(connector = %connector_id, error = %e, stale, "Reconnection failed");
                    diagnostics.report(&format!("reconnect:{}", connector_id), &e);
                    if !stale {
                        let mut guard = state.write();
                        if *guard == ReconnectState::Attempting {
                            *guard = ReconnectState::Idle;
                        }
                    }
                }
            }
        }))
    }

    /// Track the active account as reported by the wallet.
    pub fn on_account_changed(&self, account: Option<&str>) {
        let mut state = self.state.write();
        match account {
            Some(_) => *state = ReconnectState::Connected,
            None if *state == ReconnectState::Connected => *state = ReconnectState::Idle,
            None => {}
        }
    }

    /// Point the change listener at the active connector.
    ///
    /// Swapping (or clearing) the connector detaches the old listener first, so
    /// an event is never handled twice. Passing the connector already watched
    /// keeps the existing listener.
    pub fn on_connector_change(&mut self, connector: Option<Arc<dyn Connector>>) {
        if let (Some(watch), Some(next)) = (&self.watch, &connector) {
            if Arc::ptr_eq(&watch.connector, next) {
                return;
            }
        }

        // Drops the previous subscription
        self.watch = None;

        let Some(connector) = connector else {
            return;
        };

        let reloader = Arc::clone(&self.reloader);
        let connector_id = connector.id().to_string();
        let listener: ConnectorListener = Arc::new(move || {
            tracing::info!(connector = %connector_id, "Connector changed, reloading application");
            reloader.reload();
        });
        let subscription = Subscription::subscribe(Arc::clone(&connector), CONNECTOR_UPDATE_EVENT, listener);
        self.watch = Some(Watch {
            connector,
            _subscription: subscription,
        });
    }

    pub fn watched_connector(&self) -> Option<&Arc<dyn Connector>> {
        self.watch.as_ref().map(|w| &w.connector)
    }

    /// Forget everything: back to `Idle`, in-flight activations abandoned.
    ///
    /// The connector listener is kept; call [`dispose`](Self::dispose) to drop it.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.state.write() = ReconnectState::Idle;
    }

    /// Detach the connector listener and reset.
    pub fn dispose(&mut self) {
        self.watch = None;
        self.reset();
    }
}

impl std::fmt::Debug for ReconnectCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconnectCoordinator")
            .field("state", &self.state())
            .field("watched", &self.watched_connector().map(|c| c.id().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::connector::tests::MockConnector;
    use crate::wallet::ConnectionError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct RecordingActivator {
        activated: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl Activator for RecordingActivator {
        async fn activate(&self, connector: Arc<dyn Connector>) -> Result<(), ConnectionError> {
            self.activated.lock().push(connector.id().to_string());
            match &self.fail_with {
                Some(msg) => Err(ConnectionError::Rejected(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Mutex<Vec<(String, String)>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, context: &str, error: &ConnectionError) {
            self.reports.lock().push((context.to_string(), error.to_string()));
        }
    }

    #[derive(Default)]
    struct CountingReloader {
        reloads: AtomicUsize,
    }

    impl Reloader for CountingReloader {
        fn reload(&self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Harness {
        coordinator: ReconnectCoordinator,
        activator: Arc<RecordingActivator>,
        sink: Arc<RecordingSink>,
        reloader: Arc<CountingReloader>,
    }

    fn harness(fail_with: Option<&str>) -> Harness {
        let activator = Arc::new(RecordingActivator {
            fail_with: fail_with.map(str::to_string),
            ..Default::default()
        });
        let sink = Arc::new(RecordingSink::default());
        let reloader = Arc::new(CountingReloader::default());
        let coordinator = ReconnectCoordinator::new(activator.clone(), sink.clone(), reloader.clone());
        Harness {
            coordinator,
            activator,
            sink,
            reloader,
        }
    }

    fn registry() -> ConnectorRegistry {
        ConnectorRegistry::new().with("metamask", MockConnector::new("metamask"))
    }

    // ========== should_reconnect ==========

    #[test]
    fn test_should_reconnect_when_saved_connector_registered() {
        let connector = should_reconnect(None, Some("metamask"), &registry());
        assert_eq!(connector.map(|c| c.id().to_string()).as_deref(), Some("metamask"));
    }

    #[test]
    fn test_no_reconnect_with_active_account() {
        assert!(should_reconnect(Some("0xabc"), Some("metamask"), &registry()).is_none());
    }

    #[test]
    fn test_no_reconnect_without_saved_connector() {
        assert!(should_reconnect(None, None, &registry()).is_none());
    }

    #[test]
    fn test_unknown_saved_connector_is_noop() {
        assert!(should_reconnect(None, Some("metamask"), &ConnectorRegistry::new()).is_none());
        assert!(should_reconnect(None, Some("ledger"), &registry()).is_none());
    }

    // ========== maybe_reconnect ==========

    #[tokio::test]
    async fn test_maybe_reconnect_activates_saved_connector() {
        let h = harness(None);
        let handle = h
            .coordinator
            .maybe_reconnect(None, Some("metamask"), &registry())
            .expect("should attempt");
        assert_eq!(h.coordinator.state(), ReconnectState::Attempting);

        handle.await.unwrap();

        assert_eq!(*h.activator.activated.lock(), vec!["metamask".to_string()]);
        assert_eq!(h.coordinator.state(), ReconnectState::Connected);
        assert!(h.sink.reports.lock().is_empty());
    }

    #[tokio::test]
    async fn test_maybe_reconnect_skips_when_preconditions_fail() {
        let h = harness(None);
        assert!(h.coordinator.maybe_reconnect(Some("0xabc"), Some("metamask"), &registry()).is_none());
        assert!(h.coordinator.maybe_reconnect(None, None, &registry()).is_none());
        assert!(h.coordinator.maybe_reconnect(None, Some("metamask"), &ConnectorRegistry::new()).is_none());

        assert!(h.activator.activated.lock().is_empty());
        assert_eq!(h.coordinator.state(), ReconnectState::Idle);
    }

    #[tokio::test]
    async fn test_failed_activation_is_reported_not_retried() {
        let h = harness(Some("user rejected"));
        let handle = h.coordinator.maybe_reconnect(None, Some("metamask"), &registry()).unwrap();
        handle.await.unwrap();

        assert_eq!(h.coordinator.state(), ReconnectState::Idle);
        assert_eq!(h.activator.activated.lock().len(), 1);
        let reports = h.sink.reports.lock();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "reconnect:metamask");
        assert!(reports[0].1.contains("user rejected"));
    }

    #[tokio::test]
    async fn test_reset_abandons_in_flight_attempt() {
        let h = harness(None);
        let handle = h.coordinator.maybe_reconnect(None, Some("metamask"), &registry()).unwrap();
        h.coordinator.reset();
        handle.await.unwrap();

        assert_eq!(h.coordinator.state(), ReconnectState::Idle);
    }

    #[test]
    fn test_maybe_reconnect_outside_runtime_does_not_panic() {
        let h = harness(None);
        assert!(h.coordinator.maybe_reconnect(None, Some("metamask"), &registry()).is_none());
        assert_eq!(h.coordinator.state(), ReconnectState::Idle);
    }

    #[test]
    fn test_account_changes_drive_state() {
        let h = harness(None);
        h.coordinator.on_account_changed(Some("0xabc"));
        assert_eq!(h.coordinator.state(), ReconnectState::Connected);
        h.coordinator.on_account_changed(None);
        assert_eq!(h.coordinator.state(), ReconnectState::Idle);
    }

    // ========== on_connector_change ==========

    #[test]
    fn test_change_event_triggers_one_reload() {
        let mut h = harness(None);
        let connector = MockConnector::new("metamask");
        h.coordinator.on_connector_change(Some(connector.clone()));

        connector.emit_update();
        assert_eq!(h.reloader.reloads.load(Ordering::SeqCst), 1);
        connector.emit_update();
        assert_eq!(h.reloader.reloads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_same_connector_keeps_single_listener() {
        let mut h = harness(None);
        let connector = MockConnector::new("metamask");
        h.coordinator.on_connector_change(Some(connector.clone()));
        h.coordinator.on_connector_change(Some(connector.clone()));

        assert_eq!(connector.listeners.listener_count(CONNECTOR_UPDATE_EVENT), 1);
        connector.emit_update();
        assert_eq!(h.reloader.reloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_connector_swap_detaches_old_listener() {
        let mut h = harness(None);
        let first = MockConnector::new("metamask");
        let second = MockConnector::new("walletconnect");

        h.coordinator.on_connector_change(Some(first.clone()));
        h.coordinator.on_connector_change(Some(second.clone()));

        assert_eq!(first.listeners.listener_count(CONNECTOR_UPDATE_EVENT), 0);
        assert_eq!(first.emit_update(), 0);
        assert_eq!(h.reloader.reloads.load(Ordering::SeqCst), 0);

        second.emit_update();
        assert_eq!(h.reloader.reloads.load(Ordering::SeqCst), 1);
        assert_eq!(
            h.coordinator.watched_connector().map(|c| c.id().to_string()).as_deref(),
            Some("walletconnect")
        );
    }

    #[test]
    fn test_clearing_connector_and_dispose_detach() {
        let mut h = harness(None);
        let connector = MockConnector::new("metamask");

        h.coordinator.on_connector_change(Some(connector.clone()));
        h.coordinator.on_connector_change(None);
        assert_eq!(connector.listeners.listener_count(CONNECTOR_UPDATE_EVENT), 0);

        h.coordinator.on_connector_change(Some(connector.clone()));
        h.coordinator.dispose();
        assert_eq!(connector.listeners.listener_count(CONNECTOR_UPDATE_EVENT), 0);
        assert!(h.coordinator.watched_connector().is_none());
    }

    #[test]
    fn test_drop_detaches_listener() {
        let mut h = harness(None);
        let connector = MockConnector::new("metamask");
        h.coordinator.on_connector_change(Some(connector.clone()));
        drop(h);
        assert_eq!(connector.listeners.listener_count(CONNECTOR_UPDATE_EVENT), 0);
    }
}
