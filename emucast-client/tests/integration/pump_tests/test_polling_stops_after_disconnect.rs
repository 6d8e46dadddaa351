use emucast_client::DriverState;

use crate::integration::{create_test_driver, init_tracing, polling_config};
use crate::utils::{Inbound, MockPeerConnector, MockTransport, SIGNAL_TIMEOUT_MS, settle, start};

#[tokio::test]
async fn test_polling_stops_after_disconnect() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123"),
        MockPeerConnector::new(),
        polling_config(),
    );
    t.driver.start_stream().await.expect("start_stream failed");

    // Empty responses are tolerated and the poll re-issued
    t.transport.push(Inbound::Empty);
    t.transport.push(Inbound::Empty);
    assert!(t.transport.wait_for_receive_calls(3, SIGNAL_TIMEOUT_MS).await);
    assert_eq!(t.transport.subscribe_calls(), 0);
    assert_eq!(t.events.disconnected_count(), 0);

    t.driver.disconnect().await;
    settle().await;
    let frozen = t.transport.receive_calls();

    // Nothing queued after teardown is consumed
    t.transport.push_signal(&start());
    t.transport.push(Inbound::Empty);
    settle().await;

    assert_eq!(t.transport.receive_calls(), frozen);
    assert_eq!(t.connector.connects(), 0);
    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert_eq!(t.events.disconnected_count(), 1);
}

#[tokio::test]
async fn test_polling_error_triggers_cleanup() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123"),
        MockPeerConnector::new(),
        polling_config(),
    );
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push(Inbound::Fail);

    assert!(t.events.wait_for_disconnects(1, SIGNAL_TIMEOUT_MS).await);
    assert_eq!(t.driver.state(), DriverState::Disconnected);
    settle().await;
    assert_eq!(t.transport.receive_calls(), 1);
}
