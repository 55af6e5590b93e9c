//! # Application Orchestrator
//!
//! [`App`] owns the state stores, the slippage validator, and the reconnect
//! coordinator, and applies [`AppEvent`]s coming from connectors and the wallet.
//!
//! ## Event Loop
//!
//! ```text
//! Connector ─► listener ─► ChannelReloader ─┐
//! Activator / wallet library ───────────────┼─► async_channel ─► App::process_events
//! ```
//!
//! Connector listeners never touch the app directly; they enqueue an event and
//! the next [`App::process_events`] call applies it. A reload therefore never
//! runs inside a connector's emit.
//!
//! ## Reload
//!
//! A reload discards every in-memory store and rebuilds them from the
//! configuration and the session file, then runs the startup reconnect again.
//! Only the saved connector (persisted in the session file) survives.

pub mod events;
pub mod reloader;

pub use events::AppEvent;
pub use reloader::ChannelReloader;

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::{Activator, DiagnosticSink};
use crate::slippage::{ClassifiedSlippage, SlippageInputState, SlippageValidator};
use crate::state::{ApplicationState, PersistedSession, SessionFile};
use crate::wallet::{AccountButtonView, ConnectorRegistry, ReconnectCoordinator, ReconnectState};

pub struct App {
    config: ClientConfig,
    session: SessionFile,
    registry: ConnectorRegistry,
    activator: Arc<dyn Activator>,
    diagnostics: Arc<dyn DiagnosticSink>,
    state: ApplicationState,
    validator: SlippageValidator,
    slippage_input: SlippageInputState,
    coordinator: ReconnectCoordinator,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
    reloads: u64,
}

impl App {
    pub fn new(
        config: ClientConfig,
        registry: ConnectorRegistry,
        activator: Arc<dyn Activator>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let session = SessionFile::new(config.session_file.clone());
        let state = ApplicationState::new(config.default_tolerance(), &session.load_or_default());
        let validator = build_validator(&config, &state);
        let slippage_input = SlippageInputState::new(state.slippage.get());
        let coordinator = ReconnectCoordinator::new(
            Arc::clone(&activator),
            Arc::clone(&diagnostics),
            Arc::new(ChannelReloader::new(event_tx.clone())),
        );

        tracing::info!(
            connectors = ?registry.ids(),
            saved_connector = ?state.saved_connector.get(),
            "Application initialized"
        );

        Self {
            config,
            session,
            registry,
            activator,
            diagnostics,
            state,
            validator,
            slippage_input,
            coordinator,
            event_tx,
            event_rx,
            reloads: 0,
        }
    }

    /// Try to restore the previous connection. Must run inside a tokio runtime.
    pub fn startup(&self) -> Option<JoinHandle<()>> {
        let account = self.state.account.get();
        let saved = self.state.saved_connector.get();
        self.coordinator
            .maybe_reconnect(account.as_deref(), saved.as_deref(), &self.registry)
    }

    /// Apply every queued event. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply one event.
    ///
    /// Returns the activation task spawned by a reload or by losing the
    /// account, if any.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<JoinHandle<()>> {
        tracing::debug!(event = ?event, "Handling app event");
        match event {
            AppEvent::ReloadRequested => return self.reload(),
            AppEvent::ConnectorActivated(id) => {
                let connector = self.registry.get(&id);
                if connector.is_none() {
                    tracing::warn!(connector = %id, "Activated connector is not registered");
                }
                self.coordinator.on_connector_change(connector);
            }
            AppEvent::AccountChanged(account) => {
                let lost = account.is_none() && self.state.account.with(Option::is_some);
                self.coordinator.on_account_changed(account.as_deref());
                self.state.account.set(account);
                if lost {
                    tracing::info!("Account lost, checking for a saved connector");
                    return self.startup();
                }
            }
            AppEvent::NetworkChanged(connected) => {
                self.state.network_connected.set(connected);
            }
            AppEvent::TransactionAdded(details) => {
                self.state.transactions.update(|registry| registry.add(details));
            }
            AppEvent::TransactionFinalized { hash, receipt } => {
                let mut found = false;
                self.state
                    .transactions
                    .update(|registry| found = registry.finalize(&hash, receipt));
                if !found {
                    tracing::warn!(hash = %hash, "Receipt for unknown transaction");
                }
            }
        }
        None
    }

    /// Rebuild everything from configuration and the session file.
    pub fn reload(&mut self) -> Option<JoinHandle<()>> {
        self.coordinator.dispose();

        let session = self.session.load_or_default();
        self.state = ApplicationState::new(self.config.default_tolerance(), &session);
        self.validator = build_validator(&self.config, &self.state);
        self.slippage_input = SlippageInputState::new(self.state.slippage.get());
        self.reloads += 1;

        tracing::info!(
            reloads = self.reloads,
            saved_connector = ?session.saved_connector,
            "Application reloaded"
        );
        self.startup()
    }

    /// Connect with a registered connector and remember it for next time.
    pub fn connect_with(&mut self, id: &str) -> Result<JoinHandle<()>> {
        let connector = self
            .registry
            .get(id)
            .ok_or_else(|| AppError::State(format!("Unknown connector: {}", id)))?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::State(format!("No async runtime: {}", e)))?;

        self.session.save(&PersistedSession {
            saved_connector: Some(id.to_string()),
        })?;
        self.state.saved_connector.set(Some(id.to_string()));
        tracing::info!(connector = id, "Connecting");

        let activator = Arc::clone(&self.activator);
        let diagnostics = Arc::clone(&self.diagnostics);
        let id = id.to_string();
        Ok(runtime.spawn(async move {
            if let Err(e) = activator.activate(connector).await {
                tracing::warn!(connector = %id, error = %e, "Connection failed");
                diagnostics.report(&format!("connect:{}", id), &e);
            }
        }))
    }

    /// Forget the account and the saved connector.
    pub fn disconnect(&mut self) -> Result<()> {
        self.session.save(&PersistedSession::default())?;
        self.state.saved_connector.set(None);
        self.state.account.set(None);
        self.coordinator.on_account_changed(None);
        self.coordinator.on_connector_change(None);
        tracing::info!("Disconnected");
        Ok(())
    }

    pub fn account_button(&self) -> AccountButtonView {
        let account = self.state.account.get();
        let network_connected = self.state.network_connected.get();
        self.state
            .transactions
            .with(|registry| AccountButtonView::derive(account.as_deref(), network_connected, registry))
    }

    /// Text typed into the custom slippage field.
    pub fn slippage_input(&mut self, raw: &str) -> ClassifiedSlippage {
        self.slippage_input.on_input(raw, &self.validator)
    }

    /// The custom slippage field lost focus.
    pub fn commit_slippage(&mut self) {
        self.slippage_input.commit(&self.validator);
    }

    pub fn select_preset(&mut self, fraction: f64) -> ClassifiedSlippage {
        self.slippage_input.select_preset(fraction, &self.validator)
    }

    pub fn slippage(&self) -> &SlippageInputState {
        &self.slippage_input
    }

    pub fn validator(&self) -> &SlippageValidator {
        &self.validator
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    pub fn reconnect_state(&self) -> ReconnectState {
        self.coordinator.state()
    }

    pub fn coordinator(&self) -> &ReconnectCoordinator {
        &self.coordinator
    }

    /// Number of reloads since startup
    pub fn reloads(&self) -> u64 {
        self.reloads
    }

    /// Enqueue an event for the next [`process_events`](Self::process_events).
    pub fn queue(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            tracing::warn!(error = %e, "Event dropped");
        }
    }

    /// Sender for activators and wallet bindings to push events.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }
}

fn build_validator(config: &ClientConfig, state: &ApplicationState) -> SlippageValidator {
    SlippageValidator::new(
        config.policy(),
        config.default_slippage_tolerance,
        Arc::new(state.slippage.clone()),
    )
    .with_presets(config.slippage_presets.clone())
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("registry", &self.registry)
            .field("coordinator", &self.coordinator)
            .field("reloads", &self.reloads)
            .finish()
    }
}
