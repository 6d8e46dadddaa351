use emucast_client::DriverState;

use crate::integration::{create_default_driver, init_tracing};
use crate::utils::{Inbound, PeerCall, SIGNAL_TIMEOUT_MS, start};

#[tokio::test]
async fn test_malformed_signals_dropped() {
    init_tracing();

    let t = create_default_driver();
    t.driver.start_stream().await.expect("start_stream failed");

    for garbage in [
        "not json",
        "[1, 2, 3]",
        r#"{"hello": "world"}"#,
        r#"{"sdp": 5}"#,
        r#"{"start": "nope"}"#,
        r#"{"sdp": {"type": "offer", "sdp": "v=0"}, "bye": true}"#,
        r#"{"bye": false}"#,
        r#"{"bye": null}"#,
    ] {
        t.transport.push_signal(garbage);
    }
    t.transport.push(Inbound::Empty);
    t.transport.push_signal(&start());

    assert!(
        t.connector
            .wait_for_call(|c| *c == PeerCall::Connect(0), SIGNAL_TIMEOUT_MS)
            .await
    );
    assert_eq!(t.connector.get_calls().await, vec![PeerCall::Connect(0)]);
    assert_eq!(t.driver.state(), DriverState::Connecting);
    assert_eq!(t.events.disconnected_count(), 0);

    t.driver.disconnect().await;
}
