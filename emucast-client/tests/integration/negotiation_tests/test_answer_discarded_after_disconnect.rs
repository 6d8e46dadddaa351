use emucast_client::{DriverConfig, DriverState};

use crate::integration::{create_test_driver, init_tracing};
use crate::utils::{
    MockPeerConnector, MockTransport, PeerCall, SIGNAL_TIMEOUT_MS, offer, settle, start,
};

#[tokio::test]
async fn test_answer_discarded_after_disconnect() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123"),
        MockPeerConnector::holding_answer(),
        DriverConfig::default(),
    );
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    t.transport.push_signal(&offer());
    assert!(
        t.connector
            .wait_for_call(|c| *c == PeerCall::CreateAnswer, SIGNAL_TIMEOUT_MS)
            .await
    );

    // Tear down while the answer is still being produced
    t.driver.disconnect().await;
    t.connector.release_answer();
    settle().await;

    let calls = t.connector.get_calls().await;
    assert!(calls.contains(&PeerCall::Close(0)));
    assert!(!calls.iter().any(|c| matches!(c, PeerCall::SetLocal(_))));
    assert!(t.transport.get_signals().await.is_empty());
    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert_eq!(t.events.disconnected_count(), 1);
}
