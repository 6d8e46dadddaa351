use emucast_client::DriverState;
use emucast_client::peer::{PeerEvent, PeerState};

use crate::integration::{create_default_driver, init_tracing};
use crate::utils::{PeerCall, SIGNAL_TIMEOUT_MS, settle, start};

#[tokio::test]
async fn test_peer_failure_disconnects() {
    init_tracing();

    let t = create_default_driver();
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    assert!(
        t.connector
            .wait_for_call(|c| *c == PeerCall::Connect(0), SIGNAL_TIMEOUT_MS)
            .await
    );

    // Non-terminal states leave the session alone
    t.connector
        .inject(PeerEvent::StateChanged(PeerState::Connecting))
        .await;
    t.connector
        .inject(PeerEvent::StateChanged(PeerState::Connected))
        .await;
    settle().await;
    assert_eq!(t.driver.state(), DriverState::Connecting);

    t.connector
        .inject(PeerEvent::StateChanged(PeerState::Failed))
        .await;
    assert!(t.events.wait_for_disconnects(1, SIGNAL_TIMEOUT_MS).await);
    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert!(t.connector.get_calls().await.contains(&PeerCall::Close(0)));

    // A late terminal state from the closed peer changes nothing
    t.connector
        .inject(PeerEvent::StateChanged(PeerState::Closed))
        .await;
    settle().await;
    assert_eq!(t.events.disconnected_count(), 1);
}
