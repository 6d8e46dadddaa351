use emucast_client::{DriverConfig, TransportMode};

use crate::integration::{create_test_driver, init_tracing, polling_config};
use crate::utils::{
    MockPeerConnector, MockTransport, PeerCall, SIGNAL_TIMEOUT_MS, offer, settle, start,
};

#[tokio::test]
async fn test_streaming_falls_back_to_polling() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123").without_streaming(),
        MockPeerConnector::new(),
        DriverConfig::default(),
    );
    assert_eq!(t.driver.mode(), TransportMode::Streaming);
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    t.transport.push_signal(&offer());

    assert!(
        t.connector
            .wait_for_call(|c| matches!(c, PeerCall::SetLocal(_)), SIGNAL_TIMEOUT_MS)
            .await
    );
    let sent = t.transport.wait_for_signals(1, SIGNAL_TIMEOUT_MS).await;
    assert!(!sent.is_empty(), "Answer should be sent while polling");

    assert_eq!(t.transport.subscribe_calls(), 0);
    assert!(t.transport.receive_calls() >= 2);

    t.driver.disconnect().await;
}

#[tokio::test]
async fn test_polling_keeps_in_flight_receive_across_peer_events() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123"),
        MockPeerConnector::new(),
        polling_config(),
    );
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    t.transport.push_signal(&offer());

    // Answer and local candidate are produced while a receive is pending
    let sent = t.transport.wait_for_signals(2, SIGNAL_TIMEOUT_MS).await;
    assert_eq!(sent.len(), 2);
    assert!(t.events.wait_for_connects(1, SIGNAL_TIMEOUT_MS).await);

    // One receive per delivered message plus the one still pending
    assert!(t.transport.wait_for_receive_calls(3, SIGNAL_TIMEOUT_MS).await);
    settle().await;
    assert_eq!(t.transport.receive_calls(), 3);

    t.driver.disconnect().await;
}
