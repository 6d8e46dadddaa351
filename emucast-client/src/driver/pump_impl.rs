use crate::config::TransportMode;
use crate::driver::{SessionPump, SignalingDriver};
use crate::error::TransportError;
use crate::peer::PeerEvent;
use crate::transport::Transport;
use emucast_core::{SessionId, SignalMessage};
use futures::StreamExt;
use futures::future::BoxFuture;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

type PendingReceive = BoxFuture<'static, Result<Option<String>, TransportError>>;

async fn next_peer_event(rx: &mut Option<mpsc::UnboundedReceiver<PeerEvent>>) -> Option<PeerEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn cancelled(cancel: &watch::Receiver<bool>) -> bool {
    *cancel.borrow()
}

impl<T: Transport> SignalingDriver<T> {
    pub(super) async fn run_pump(
        self,
        mut pump: SessionPump,
        mode: TransportMode,
        cancel: watch::Receiver<bool>,
    ) {
        match mode {
            TransportMode::Streaming => self.pump_stream(&mut pump, cancel).await,
            TransportMode::Polling => self.pump_poll(&mut pump, cancel).await,
        }
        info!("Signal pump for session {} stopped", pump.session);
    }

    async fn pump_stream(&self, pump: &mut SessionPump, mut cancel: watch::Receiver<bool>) {
        let subscribed = tokio::select! {
            biased;
            _ = cancel.changed() => return,
            result = self.inner.transport.subscribe_signals(&pump.session) => result,
        };

        let mut stream = match subscribed {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to subscribe to signals: {}", e);
                self.shutdown(pump.epoch).await;
                return;
            }
        };

        loop {
            tokio::select! {
                biased;

                _ = cancel.changed() => break,

                event = next_peer_event(&mut pump.peer_events) => match event {
                    Some(event) => self.handle_peer_event(pump, event).await,
                    None => pump.peer_events = None,
                },

                item = stream.next() => {
                    if cancelled(&cancel) {
                        break;
                    }
                    match item {
                        Some(Ok(text)) => self.dispatch(pump, &text).await,
                        Some(Err(e)) => {
                            warn!("Signal stream failed: {}", e);
                            self.shutdown(pump.epoch).await;
                            break;
                        }
                        None => {
                            info!("Signal stream ended");
                            self.shutdown(pump.epoch).await;
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn pump_poll(&self, pump: &mut SessionPump, mut cancel: watch::Receiver<bool>) {
        // The in-flight receive survives peer events handled in between.
        let mut pending = self.receive_next(&pump.session);

        loop {
            tokio::select! {
                biased;

                _ = cancel.changed() => break,

                event = next_peer_event(&mut pump.peer_events) => match event {
                    Some(event) => self.handle_peer_event(pump, event).await,
                    None => pump.peer_events = None,
                },

                result = &mut pending => {
                    if cancelled(&cancel) {
                        break;
                    }
                    match result {
                        Ok(Some(text)) => self.dispatch(pump, &text).await,
                        Ok(None) => debug!("Empty poll response"),
                        Err(e) => {
                            warn!("Polling for signals failed: {}", e);
                            self.shutdown(pump.epoch).await;
                            break;
                        }
                    }
                    if cancelled(&cancel) {
                        break;
                    }
                    pending = self.receive_next(&pump.session);
                }
            }
        }
    }

    fn receive_next(&self, session: &SessionId) -> PendingReceive {
        let transport = self.inner.transport.clone();
        let session = session.clone();
        Box::pin(async move { transport.receive_signal(&session).await })
    }

    async fn dispatch(&self, pump: &mut SessionPump, text: &str) {
        if text.trim().is_empty() {
            debug!("Skipping empty signal");
            return;
        }
        debug!("<- {}", text);

        match SignalMessage::parse(text) {
            Ok(message) => self.handle_signal(pump, message).await,
            Err(e) => warn!("Dropping malformed signal: {}", e),
        }
    }
}
