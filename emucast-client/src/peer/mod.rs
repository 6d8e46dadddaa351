mod rtc_peer;

pub use rtc_peer::{RtcDataChannel, RtcPeer, RtcPeerConnector, RtcTrack};

use crate::error::PeerError;
use async_trait::async_trait;
use bytes::Bytes;
use emucast_core::{IceCandidate, PeerConnectionConfig, SessionDescription};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl PeerState {
    /// `Disconnected`, `Failed` and `Closed` all end the session.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PeerState::Disconnected | PeerState::Failed | PeerState::Closed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
    Unknown,
}

pub trait RemoteTrack: Send + Sync {
    fn id(&self) -> String;
    fn stream_id(&self) -> String;
    fn kind(&self) -> TrackKind;
    /// Access to the engine-specific track for rendering.
    fn as_any(&self) -> &dyn Any;
}

#[async_trait]
pub trait DataChannel: Send + Sync {
    fn label(&self) -> String;
    fn is_open(&self) -> bool;
    async fn send(&self, data: Bytes) -> Result<(), PeerError>;
}

pub enum PeerEvent {
    Track(Arc<dyn RemoteTrack>),
    IceCandidate(IceCandidate),
    StateChanged(PeerState),
    DataChannel(Arc<dyn DataChannel>),
}

pub type PeerEventSender = mpsc::UnboundedSender<PeerEvent>;

#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), PeerError>;

    async fn create_answer(&self) -> Result<SessionDescription, PeerError>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), PeerError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError>;

    async fn close(&self) -> Result<(), PeerError>;
}

/// Host WebRTC engine. Every event of the created connection is pushed into
/// `events` until the connection is dropped.
#[async_trait]
pub trait PeerConnector: Send + Sync + 'static {
    async fn connect(
        &self,
        config: PeerConnectionConfig,
        events: PeerEventSender,
    ) -> Result<Arc<dyn PeerConnection>, PeerError>;
}
