use crate::peer::DataChannel;
use crate::transport::Transport;
use dashmap::DashMap;
use emucast_core::{InputEvent, InputKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where an input event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    DataChannel,
    Rpc,
    Dropped,
}

/// Routes input events onto open remote data channels, falling back to the
/// emulator RPC for the event's label.
pub struct DataChannelRouter<T: Transport> {
    transport: Arc<T>,
    channels: Arc<DashMap<String, Arc<dyn DataChannel>>>,
}

impl<T: Transport> Clone for DataChannelRouter<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            channels: self.channels.clone(),
        }
    }
}

impl<T: Transport> DataChannelRouter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            channels: Arc::new(DashMap::new()),
        }
    }

    /// Registers a channel the remote opened, replacing any previous channel
    /// with the same label.
    pub fn on_remote_channel_opened(&self, channel: Arc<dyn DataChannel>) {
        let label = channel.label();
        debug!("Data channel '{}' registered", label);
        self.channels.insert(label, channel);
    }

    pub fn clear(&self) {
        self.channels.clear();
    }

    pub fn has_open_channel(&self, label: &str) -> bool {
        self.channels
            .get(label)
            .is_some_and(|channel| channel.is_open())
    }

    pub async fn send(&self, label: &str, event: InputEvent) -> Delivery {
        // Clone out of the map so no shard guard is held across the write.
        let channel = self
            .channels
            .get(label)
            .map(|entry| entry.value().clone())
            .filter(|channel| channel.is_open());

        if let Some(channel) = channel {
            match channel.send(event.encode()).await {
                Ok(()) => return Delivery::DataChannel,
                Err(e) => warn!("Write to data channel '{}' failed, using RPC: {}", label, e),
            }
        }

        send_fallback(self.transport.as_ref(), label, event).await
    }
}

/// Sends `event` through the RPC named by `label`.
pub async fn send_fallback<T: Transport + ?Sized>(
    transport: &T,
    label: &str,
    event: InputEvent,
) -> Delivery {
    let kind: InputKind = match label.parse() {
        Ok(kind) => kind,
        Err(e) => {
            debug!("Dropping input: {}", e);
            return Delivery::Dropped;
        }
    };

    if kind != event.kind() {
        warn!(
            "Dropping {} event sent on the '{}' label",
            event.kind(),
            label
        );
        return Delivery::Dropped;
    }

    match transport.send_input(event).await {
        Ok(()) => Delivery::Rpc,
        Err(e) => {
            warn!("{} RPC failed: {}", kind, e);
            Delivery::Dropped
        }
    }
}
