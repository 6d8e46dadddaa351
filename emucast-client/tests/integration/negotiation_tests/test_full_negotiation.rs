use emucast_client::DriverState;
use emucast_core::{SdpType, SessionId, SignalMessage};

use crate::integration::{create_default_driver, init_tracing};
use crate::utils::{
    ANSWER_SDP, LOCAL_CANDIDATE, PeerCall, Recorded, SIGNAL_TIMEOUT_MS, bye, candidate, offer,
    remote_candidate, start,
};

#[tokio::test]
async fn test_full_negotiation() {
    init_tracing();

    let t = create_default_driver();
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    t.transport.push_signal(&offer());

    // Answer first, then the local candidate gathered after it
    let sent = t.transport.wait_for_signals(2, SIGNAL_TIMEOUT_MS).await;
    assert_eq!(sent.len(), 2, "Expected answer and local candidate");
    assert!(
        sent.iter()
            .all(|s| s.session == SessionId::from("abc123"))
    );

    match SignalMessage::parse(&sent[0].message).expect("answer must parse") {
        SignalMessage::Sdp(desc) => {
            assert_eq!(desc.sdp_type, SdpType::Answer);
            assert_eq!(desc.sdp, ANSWER_SDP);
        }
        other => panic!("Expected answer, got {:?}", other),
    }
    match SignalMessage::parse(&sent[1].message).expect("candidate must parse") {
        SignalMessage::IceCandidate(c) => assert_eq!(c.candidate, LOCAL_CANDIDATE),
        other => panic!("Expected candidate, got {:?}", other),
    }

    assert!(t.events.wait_for_connects(1, SIGNAL_TIMEOUT_MS).await);
    assert_eq!(t.driver.state(), DriverState::Connected);

    for n in 1..=3 {
        t.transport.push_signal(&candidate(n));
    }
    t.transport.push_signal(&bye());

    assert!(t.events.wait_for_disconnects(1, SIGNAL_TIMEOUT_MS).await);
    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert_eq!(t.driver.session(), None);

    assert_eq!(
        t.events.events(),
        vec![
            Recorded::Connected {
                track: "screen".to_owned()
            },
            Recorded::Disconnected {
                session: Some(SessionId::from("abc123"))
            },
        ]
    );

    assert_eq!(
        t.connector.get_calls().await,
        vec![
            PeerCall::Connect(0),
            PeerCall::SetRemote(SdpType::Offer),
            PeerCall::CreateAnswer,
            PeerCall::SetLocal(SdpType::Answer),
            PeerCall::AddCandidate(remote_candidate(1)),
            PeerCall::AddCandidate(remote_candidate(2)),
            PeerCall::AddCandidate(remote_candidate(3)),
            PeerCall::Close(0),
        ]
    );
}
