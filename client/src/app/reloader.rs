//! [`Reloader`] that routes reload requests through the app event channel.

use async_channel::Sender;

use super::events::AppEvent;
use crate::core::service::Reloader;

/// Queues [`AppEvent::ReloadRequested`]; the main loop performs the reload.
#[derive(Debug, Clone)]
pub struct ChannelReloader {
    tx: Sender<AppEvent>,
}

impl ChannelReloader {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Reloader for ChannelReloader {
    fn reload(&self) {
        if let Err(e) = self.tx.try_send(AppEvent::ReloadRequested) {
            tracing::warn!(error = %e, "Reload request dropped");
        }
    }
}
