use crate::config::{DriverConfig, TransportMode};
use crate::events::{DriverEvent, EventKind, ListenerId, Listeners};
use crate::peer::{PeerConnection, PeerConnector, PeerEvent};
use crate::router::{DataChannelRouter, Delivery, send_fallback};
use crate::transport::Transport;
use emucast_core::{InputEvent, SessionId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, watch};
use tracing::warn;

mod disconnect_impl;
mod handle_remote_sdp_impl;
mod handle_signal_impl;
mod pump_impl;
mod start_stream_impl;

/// Lifecycle of the signaling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Connecting,
    Connected,
    Disconnected,
}

/// State owned by one started session.
struct LiveSession {
    id: SessionId,
    peer: Option<Arc<dyn PeerConnection>>,
    outbound: mpsc::UnboundedSender<String>,
    cancel: watch::Sender<bool>,
}

struct SessionState {
    state: DriverState,
    /// Bumped by every start and teardown. Work tagged with an older epoch
    /// belongs to a session that no longer exists.
    epoch: u64,
    live: Option<LiveSession>,
}

impl SessionState {
    fn live_mut(&mut self, epoch: u64) -> Option<&mut LiveSession> {
        if self.epoch == epoch {
            self.live.as_mut()
        } else {
            None
        }
    }
}

/// Per-session context carried by the pump task.
struct SessionPump {
    epoch: u64,
    session: SessionId,
    peer_events: Option<mpsc::UnboundedReceiver<PeerEvent>>,
}

struct DriverInner<T: Transport> {
    transport: Arc<T>,
    connector: Arc<dyn PeerConnector>,
    config: DriverConfig,
    router: Option<DataChannelRouter<T>>,
    session: Mutex<SessionState>,
    listeners: Mutex<Listeners>,
}

/// Client half of the JSEP negotiation with the emulator.
///
/// Cloning is cheap; every clone drives the same session.
pub struct SignalingDriver<T: Transport> {
    inner: Arc<DriverInner<T>>,
}

impl<T: Transport> Clone for SignalingDriver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Transport> SignalingDriver<T> {
    pub fn new(transport: Arc<T>, connector: Arc<dyn PeerConnector>, config: DriverConfig) -> Self {
        let router = config
            .data_channels
            .then(|| DataChannelRouter::new(transport.clone()));

        Self {
            inner: Arc::new(DriverInner {
                transport,
                connector,
                config,
                router,
                session: Mutex::new(SessionState {
                    state: DriverState::Idle,
                    epoch: 0,
                    live: None,
                }),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    pub fn state(&self) -> DriverState {
        self.lock_session().state
    }

    /// Id of the live session, if one was issued and not yet torn down.
    pub fn session(&self) -> Option<SessionId> {
        self.lock_session().live.as_ref().map(|live| live.id.clone())
    }

    pub fn router(&self) -> Option<&DataChannelRouter<T>> {
        self.inner.router.as_ref()
    }

    pub fn mode(&self) -> TransportMode {
        self.inner.config.mode
    }

    /// Registers `handler` for `kind`. Handlers run in registration order,
    /// outside of any driver lock.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&DriverEvent) + Send + Sync + 'static,
    {
        self.lock_listeners().add(kind, Arc::new(handler))
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.lock_listeners().remove(id)
    }

    /// Forwards an input event to the emulator.
    pub async fn send(&self, label: &str, event: InputEvent) -> Delivery {
        match &self.inner.router {
            Some(router) => router.send(label, event).await,
            None => send_fallback(self.inner.transport.as_ref(), label, event).await,
        }
    }

    fn emit(&self, event: DriverEvent) {
        let handlers = self.lock_listeners().snapshot(event.kind());
        for handler in handlers {
            handler(&event);
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn current_peer(&self, epoch: u64) -> Option<Arc<dyn PeerConnection>> {
        self.lock_session()
            .live_mut(epoch)
            .and_then(|live| live.peer.clone())
    }

    /// Queues a message on the session's outbound queue.
    fn send_jsep(&self, epoch: u64, message: &emucast_core::SignalMessage) {
        let text = match message.to_json() {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to encode outbound signal: {}", e);
                return;
            }
        };

        if let Some(live) = self.lock_session().live_mut(epoch) {
            let _ = live.outbound.send(text);
        }
    }
}

async fn close_peer(peer: Arc<dyn PeerConnection>) {
    if let Err(e) = peer.close().await {
        warn!("Failed to close peer connection: {}", e);
    }
}
