use crate::config::TransportMode;
use crate::driver::{DriverState, LiveSession, SessionPump, SignalingDriver};
use crate::error::ClientError;
use crate::events::DriverEvent;
use crate::transport::Transport;
use emucast_core::SessionId;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

impl<T: Transport> SignalingDriver<T> {
    /// Requests a session from the emulator and starts pumping its signals.
    ///
    /// Valid from `Idle` or `Disconnected`. A failed request leaves the state
    /// unchanged, emits `Disconnected` without a session and returns the
    /// error. When `disconnect()` runs before the request completes the
    /// late session is discarded and `ClientError::Cancelled` returned.
    pub async fn start_stream(&self) -> Result<SessionId, ClientError> {
        let epoch = {
            let mut session = self.lock_session();
            match session.state {
                DriverState::Idle | DriverState::Disconnected => {}
                other => return Err(ClientError::InvalidState(other)),
            }
            session.epoch += 1;
            session.epoch
        };

        let id = match self.inner.transport.request_session().await {
            Ok(id) => id,
            Err(e) => {
                warn!("Session request failed: {}", e);
                // A teardown that ran meanwhile already reported the end.
                let current = self.lock_session().epoch == epoch;
                if current {
                    self.emit(DriverEvent::Disconnected { session: None });
                }
                return Err(e.into());
            }
        };

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        {
            let mut session = self.lock_session();
            if session.epoch != epoch {
                debug!("Discarding session {} requested before teardown", id);
                return Err(ClientError::Cancelled);
            }
            session.state = DriverState::Connecting;
            session.live = Some(LiveSession {
                id: id.clone(),
                peer: None,
                outbound: outbound_tx,
                cancel: cancel_tx,
            });
        }

        let mode = self.effective_mode();
        info!("Session {} started ({:?})", id, mode);

        let outbound = self.clone();
        let outbound_id = id.clone();
        let outbound_cancel = cancel_rx.clone();
        tokio::spawn(async move {
            outbound
                .run_outbound(outbound_id, outbound_rx, outbound_cancel)
                .await;
        });

        let pump = SessionPump {
            epoch,
            session: id.clone(),
            peer_events: None,
        };
        let driver = self.clone();
        tokio::spawn(async move {
            driver.run_pump(pump, mode, cancel_rx).await;
        });

        Ok(id)
    }

    fn effective_mode(&self) -> TransportMode {
        match self.inner.config.mode {
            TransportMode::Streaming if !self.inner.transport.supports_streaming() => {
                info!("Transport cannot stream signals, polling instead");
                TransportMode::Polling
            }
            mode => mode,
        }
    }

    /// Drains the outbound queue in order, stamping every message with the
    /// session id.
    async fn run_outbound(
        self,
        session: SessionId,
        mut queue: mpsc::UnboundedReceiver<String>,
        mut cancel: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                biased;

                _ = cancel.changed() => break,

                message = queue.recv() => {
                    let Some(text) = message else { break };
                    debug!("-> {}", text);
                    if let Err(e) = self.inner.transport.send_signal(&session, text).await {
                        warn!("Failed to send signal for session {}: {}", session, e);
                    }
                }
            }
        }
        debug!("Outbound queue for session {} closed", session);
    }
}
