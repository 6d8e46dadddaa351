use crate::error::PeerError;
use crate::peer::{
    DataChannel, PeerConnection, PeerConnector, PeerEvent, PeerEventSender, PeerState,
    RemoteTrack, TrackKind,
};
use async_trait::async_trait;
use bytes::Bytes;
use emucast_core::{IceCandidate, PeerConnectionConfig, SdpType, SessionDescription};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_state::RTCDataChannelState;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::policy::ice_transport_policy::RTCIceTransportPolicy;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// webrtc-rs backed peer connections.
#[derive(Debug, Default, Clone)]
pub struct RtcPeerConnector;

impl RtcPeerConnector {
    pub fn new() -> Self {
        Self
    }

    fn rtc_configuration(config: PeerConnectionConfig) -> RTCConfiguration {
        let ice_servers = config
            .ice_servers
            .into_iter()
            .map(|server| RTCIceServer {
                urls: server.urls,
                username: server.username.unwrap_or_default(),
                credential: server.credential.unwrap_or_default(),
            })
            .collect();

        let ice_transport_policy = match config.ice_transport_policy.as_deref() {
            Some("relay") => RTCIceTransportPolicy::Relay,
            _ => RTCIceTransportPolicy::All,
        };

        RTCConfiguration {
            ice_servers,
            ice_transport_policy,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PeerConnector for RtcPeerConnector {
    async fn connect(
        &self,
        config: PeerConnectionConfig,
        events: PeerEventSender,
    ) -> Result<Arc<dyn PeerConnection>, PeerError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let peer_connection =
            Arc::new(api.new_peer_connection(Self::rtc_configuration(config)).await?);

        let track_tx = events.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                Box::pin(async move {
                    info!("Remote track {} ({:?}) arrived", track.id(), track.kind());
                    let _ = tx.send(PeerEvent::Track(Arc::new(RtcTrack(track))));
                })
            },
        ));

        let ice_tx = events.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx.send(PeerEvent::IceCandidate(IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_mline_index: init.sdp_mline_index,
                    username_fragment: init.username_fragment,
                }));
            })
        }));

        let state_tx = events.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                Box::pin(async move {
                    debug!("Peer connection state changed: {:?}", s);
                    let state = match s {
                        RTCPeerConnectionState::Connecting => PeerState::Connecting,
                        RTCPeerConnectionState::Connected => PeerState::Connected,
                        RTCPeerConnectionState::Disconnected => PeerState::Disconnected,
                        RTCPeerConnectionState::Failed => PeerState::Failed,
                        RTCPeerConnectionState::Closed => PeerState::Closed,
                        _ => PeerState::New,
                    };
                    let _ = tx.send(PeerEvent::StateChanged(state));
                })
            },
        ));

        let dc_tx = events;
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();
            Box::pin(async move {
                debug!("Remote opened data channel '{}'", dc.label());
                let _ = tx.send(PeerEvent::DataChannel(Arc::new(RtcDataChannel(dc))));
            })
        }));

        Ok(Arc::new(RtcPeer { peer_connection }))
    }
}

pub struct RtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeer {
    pub fn inner(&self) -> &Arc<RTCPeerConnection> {
        &self.peer_connection
    }

    fn to_rtc(desc: SessionDescription) -> Result<RTCSessionDescription, PeerError> {
        let rtc = match desc.sdp_type {
            SdpType::Offer => RTCSessionDescription::offer(desc.sdp)?,
            SdpType::Answer => RTCSessionDescription::answer(desc.sdp)?,
            SdpType::Pranswer => RTCSessionDescription::pranswer(desc.sdp)?,
            SdpType::Rollback => return Err(PeerError::Unsupported("rollback")),
        };
        Ok(rtc)
    }
}

#[async_trait]
impl PeerConnection for RtcPeer {
    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), PeerError> {
        self.peer_connection
            .set_remote_description(Self::to_rtc(desc)?)
            .await?;
        Ok(())
    }

    async fn create_answer(&self) -> Result<SessionDescription, PeerError> {
        let answer = self.peer_connection.create_answer(None).await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), PeerError> {
        self.peer_connection
            .set_local_description(Self::to_rtc(desc)?)
            .await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_mline_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), PeerError> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

pub struct RtcTrack(pub Arc<TrackRemote>);

impl RemoteTrack for RtcTrack {
    fn id(&self) -> String {
        self.0.id()
    }

    fn stream_id(&self) -> String {
        self.0.stream_id()
    }

    fn kind(&self) -> TrackKind {
        match self.0.kind() {
            RTPCodecType::Audio => TrackKind::Audio,
            RTPCodecType::Video => TrackKind::Video,
            _ => TrackKind::Unknown,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct RtcDataChannel(pub Arc<RTCDataChannel>);

#[async_trait]
impl DataChannel for RtcDataChannel {
    fn label(&self) -> String {
        self.0.label().to_owned()
    }

    fn is_open(&self) -> bool {
        self.0.ready_state() == RTCDataChannelState::Open
    }

    async fn send(&self, data: Bytes) -> Result<(), PeerError> {
        self.0.send(&data).await?;
        Ok(())
    }
}
