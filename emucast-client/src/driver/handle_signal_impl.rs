use crate::driver::{DriverState, SessionPump, SignalingDriver, close_peer};
use crate::events::DriverEvent;
use crate::peer::PeerEvent;
use crate::transport::Transport;
use emucast_core::{IceCandidate, PeerConnectionConfig, SignalMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

impl<T: Transport> SignalingDriver<T> {
    pub(super) async fn handle_signal(&self, pump: &mut SessionPump, message: SignalMessage) {
        match message {
            SignalMessage::Start(config) => self.handle_start(pump, config).await,

            SignalMessage::Sdp(desc) => self.handle_remote_sdp(pump, desc).await,

            SignalMessage::IceCandidate(candidate) => {
                self.handle_remote_candidate(pump, candidate).await
            }

            SignalMessage::Bye => {
                let live = matches!(
                    self.state(),
                    DriverState::Connecting | DriverState::Connected
                );
                if live {
                    info!("Emulator said bye, closing session {}", pump.session);
                    self.shutdown(pump.epoch).await;
                } else {
                    debug!("Ignoring bye without a live session");
                }
            }
        }
    }

    async fn handle_start(&self, pump: &mut SessionPump, config: PeerConnectionConfig) {
        info!(
            "Received start with {} ICE server(s)",
            config.ice_servers.len()
        );

        let previous = {
            let mut session = self.lock_session();
            let previous = session
                .live_mut(pump.epoch)
                .and_then(|live| live.peer.take());
            // The replacement has no track or channel yet.
            if previous.is_some() && session.state == DriverState::Connected {
                session.state = DriverState::Connecting;
            }
            previous
        };
        if let Some(previous) = previous {
            info!("Replacing the existing peer connection");
            pump.peer_events = None;
            if let Some(router) = &self.inner.router {
                router.clear();
            }
            close_peer(previous).await;
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let peer = match self.inner.connector.connect(config, events_tx).await {
            Ok(peer) => peer,
            Err(e) => {
                error!("Failed to create peer connection: {}", e);
                self.shutdown(pump.epoch).await;
                return;
            }
        };

        let stored = {
            let mut session = self.lock_session();
            match session.live_mut(pump.epoch) {
                Some(live) => {
                    live.peer = Some(peer.clone());
                    true
                }
                None => false,
            }
        };

        if !stored {
            debug!("Session ended while the peer connection was created");
            close_peer(peer).await;
            return;
        }
        pump.peer_events = Some(events_rx);
    }

    async fn handle_remote_candidate(&self, pump: &SessionPump, candidate: IceCandidate) {
        if candidate.is_end_of_candidates() {
            debug!("Remote end of candidates");
            return;
        }

        let Some(peer) = self.current_peer(pump.epoch) else {
            warn!("Dropping ICE candidate received before start");
            return;
        };

        debug!("Adding remote ICE candidate {}", candidate.candidate);
        if let Err(e) = peer.add_ice_candidate(candidate).await {
            warn!("Failed to add remote ICE candidate: {}", e);
        }
    }

    pub(super) async fn handle_peer_event(&self, pump: &mut SessionPump, event: PeerEvent) {
        match event {
            PeerEvent::IceCandidate(candidate) => {
                if candidate.is_end_of_candidates() {
                    return;
                }
                debug!("Local ICE candidate {}", candidate.candidate);
                self.send_jsep(pump.epoch, &SignalMessage::IceCandidate(candidate));
            }

            PeerEvent::Track(track) => {
                if self.mark_connected(pump.epoch) {
                    info!("Remote {:?} track '{}' arrived", track.kind(), track.id());
                    self.emit(DriverEvent::Connected(track));
                }
            }

            PeerEvent::DataChannel(channel) => {
                if !self.mark_connected(pump.epoch) {
                    return;
                }
                match &self.inner.router {
                    Some(router) => router.on_remote_channel_opened(channel),
                    None => debug!("Ignoring data channel '{}'", channel.label()),
                }
            }

            PeerEvent::StateChanged(state) => {
                debug!("Peer connection is {:?}", state);
                if state.is_terminal() {
                    info!("Peer connection {:?}, closing session", state);
                    self.shutdown(pump.epoch).await;
                }
            }
        }
    }

    /// Moves `Connecting` to `Connected`. Returns false when the session is
    /// gone.
    fn mark_connected(&self, epoch: u64) -> bool {
        let mut session = self.lock_session();
        if session.live_mut(epoch).is_none() {
            return false;
        }
        if session.state == DriverState::Connecting {
            session.state = DriverState::Connected;
            info!("Session connected");
        }
        true
    }
}
