//! # Service Traits
//!
//! Traits for the collaborators the core depends on but does not implement:
//! wallet activation, diagnostics, application reload, and tolerance storage.
//! Production wiring supplies real implementations; tests supply mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::slippage::SlippageTolerance;
use crate::wallet::{ConnectionError, Connector};

/// Establishes a live session with a connector.
///
/// Implementations own re-entrancy: calling `activate` while an activation for
/// the same connector is already in flight must not open a second session.
#[async_trait]
pub trait Activator: Send + Sync {
    /// Activate the connector. Errors are network failures, user rejection or
    /// connector-specific faults.
    async fn activate(&self, connector: Arc<dyn Connector>) -> Result<(), ConnectionError>;
}

/// Receives failures that are absorbed locally instead of surfaced to the UI.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, context: &str, error: &ConnectionError);
}

/// Discards all in-memory application state and re-derives it from scratch.
pub trait Reloader: Send + Sync {
    fn reload(&self);
}

/// Process-wide active slippage tolerance.
///
/// Single writer by convention; any number of readers.
pub trait ToleranceStore: Send + Sync {
    fn get(&self) -> SlippageTolerance;
    fn set(&self, tolerance: SlippageTolerance);
}
