use crate::driver::{SessionPump, SignalingDriver};
use crate::transport::Transport;
use emucast_core::{SdpType, SessionDescription, SignalMessage};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl<T: Transport> SignalingDriver<T> {
    /// Applies a remote description and answers offers.
    ///
    /// The answer is produced asynchronously. If the session was torn down or
    /// the peer replaced meanwhile, the answer is discarded.
    pub(super) async fn handle_remote_sdp(&self, pump: &SessionPump, desc: SessionDescription) {
        let Some(peer) = self.current_peer(pump.epoch) else {
            warn!("Dropping remote description received before start");
            return;
        };

        let is_offer = desc.sdp_type == SdpType::Offer;
        debug!("Setting remote {:?}", desc.sdp_type);
        if let Err(e) = peer.set_remote_description(desc).await {
            error!("Failed to set remote description: {}", e);
            self.shutdown(pump.epoch).await;
            return;
        }

        if !is_offer {
            return;
        }

        let answer = match peer.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to create answer: {}", e);
                self.shutdown(pump.epoch).await;
                return;
            }
        };

        let still_current = self
            .current_peer(pump.epoch)
            .is_some_and(|current| Arc::ptr_eq(&current, &peer));
        if !still_current {
            info!("Session changed while the answer was created, discarding it");
            return;
        }

        if let Err(e) = peer.set_local_description(answer.clone()).await {
            error!("Failed to set local description: {}", e);
            self.shutdown(pump.epoch).await;
            return;
        }

        info!("Sending answer for session {}", pump.session);
        self.send_jsep(pump.epoch, &SignalMessage::Sdp(answer));
    }
}
