//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **Error Types**: Centralized error handling (see [`error`] module)
//! - **Service Traits**: Collaborator seams (see [`service`] module)
//!
//! ## Dependency Injection
//!
//! The reconnect coordinator never talks to a wallet library directly; it is
//! handed an [`Activator`], a [`DiagnosticSink`] and a [`Reloader`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dapp_client::core::service::{Activator, DiagnosticSink, Reloader};
//! use dapp_client::wallet::ReconnectCoordinator;
//!
//! fn build(
//!     activator: Arc<dyn Activator>,
//!     sink: Arc<dyn DiagnosticSink>,
//!     reloader: Arc<dyn Reloader>,
//! ) -> ReconnectCoordinator {
//!     ReconnectCoordinator::new(activator, sink, reloader)
//! }
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{Activator, DiagnosticSink, Reloader, ToleranceStore};
