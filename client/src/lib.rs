//! # DApp Client Core - Library Root
//!
//! Headless core of a decentralized-exchange front end: slippage tolerance
//! validation, silent wallet reconnection, and the derived account button.
//! Rendering lives elsewhere; this crate owns the state and the rules.
//!
//! ## Features
//!
//! - **Slippage Tolerance**: Classify free text and presets into accepted, warned or rejected values
//! - **Silent Reconnect**: Restore the last used connector on startup, no prompt
//! - **Connector Watch**: Reload the whole app when the active connector changes
//! - **Account Button**: Shortened account, pending-transaction badge, network wait state
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dapp-client (this crate)                  │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio          - Activation tasks                     │
//! │  async-channel  - App event queue                      │
//! │  parking_lot    - Shared state stores                  │
//! │  tracing        - Structured logging                   │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ Activator                    │ Connector events
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Wallet library │          │   Injected / WC / ...   │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] orchestrator and [`AppEvent`]s
//! - **config**: [`ClientConfig`] (JSON file plus `DAPP_*` overrides)
//! - **core**: error types and the collaborator traits
//! - **debug**: logging setup and error aggregation
//! - **slippage**: tolerance classification, presets, input state
//! - **state**: shared stores and the session file
//! - **wallet**: connectors, reconnect coordinator, account button, transactions
//!
//! ## Core Concepts
//!
//! ### Event-Driven Architecture
//!
//! Connectors and wallet bindings push [`AppEvent`]s into an async channel;
//! the main loop drains it with [`App::process_events`]:
//!
//! ```rust,ignore
//! let (tx, rx) = async_channel::unbounded();
//! tx.try_send(AppEvent::ReloadRequested)?;
//!
//! while let Ok(event) = rx.try_recv() {
//!     app.handle_event(event);
//! }
//! ```
//!
//! ### Dependency Injection
//!
//! Wallet activation, diagnostics and reloads sit behind traits in [`crate::core::service`],
//! so every piece can be driven by test doubles.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod slippage;
pub mod state;
pub mod wallet;

pub use app::{App, AppEvent};
pub use config::ClientConfig;
pub use crate::core::{AppError, Result};
