use crate::driver::{DriverState, SignalingDriver, close_peer};
use crate::events::DriverEvent;
use crate::transport::Transport;
use tracing::{debug, info};

impl<T: Transport> SignalingDriver<T> {
    /// Tears down the session. Safe from any state; `Disconnected` is emitted
    /// only when the state actually changes.
    pub async fn disconnect(&self) {
        self.teardown(None).await;
    }

    /// Teardown requested from inside session `epoch`. A no-op when that
    /// session is already gone.
    pub(super) async fn shutdown(&self, epoch: u64) {
        self.teardown(Some(epoch)).await;
    }

    async fn teardown(&self, epoch: Option<u64>) {
        let (live, changed) = {
            let mut session = self.lock_session();
            if epoch.is_some_and(|epoch| epoch != session.epoch) {
                debug!("Session {:?} already torn down", epoch);
                return;
            }
            session.epoch += 1;
            let changed = session.state != DriverState::Disconnected;
            session.state = DriverState::Disconnected;
            (session.live.take(), changed)
        };

        let mut ended = None;
        if let Some(live) = live {
            let _ = live.cancel.send(true);
            if let Some(peer) = live.peer {
                close_peer(peer).await;
            }
            ended = Some(live.id);
        }

        if let Some(router) = &self.inner.router {
            router.clear();
        }

        if changed {
            match &ended {
                Some(id) => info!("Session {} disconnected", id),
                None => info!("Driver disconnected"),
            }
            self.emit(DriverEvent::Disconnected { session: ended });
        }
    }
}
