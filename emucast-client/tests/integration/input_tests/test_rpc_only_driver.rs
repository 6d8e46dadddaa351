use emucast_client::peer::PeerEvent;
use emucast_client::{Delivery, DriverConfig, DriverState};
use emucast_core::InputEvent;
use emucast_core::proto::{MouseEvent, Touch, TouchEvent};

use crate::integration::{create_test_driver, init_tracing};
use crate::utils::{
    MockDataChannel, MockPeerConnector, MockTransport, PeerCall, SIGNAL_TIMEOUT_MS, start,
    wait_until,
};

#[tokio::test]
async fn test_rpc_only_driver() {
    init_tracing();

    let t = create_test_driver(
        MockTransport::new("abc123"),
        MockPeerConnector::new(),
        DriverConfig {
            data_channels: false,
            ..Default::default()
        },
    );
    assert!(t.driver.router().is_none());
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    assert!(
        t.connector
            .wait_for_call(|c| *c == PeerCall::Connect(0), SIGNAL_TIMEOUT_MS)
            .await
    );

    let channel = MockDataChannel::new("touch", true);
    t.connector
        .inject(PeerEvent::DataChannel(channel.clone()))
        .await;
    let driver = t.driver.clone();
    assert!(wait_until(SIGNAL_TIMEOUT_MS, || driver.state() == DriverState::Connected).await);

    let touch = InputEvent::from(TouchEvent {
        touches: vec![Touch {
            x: 100,
            y: 200,
            pressure: 1,
            ..Default::default()
        }],
        display: 0,
    });
    assert_eq!(t.driver.send("touch", touch.clone()).await, Delivery::Rpc);
    assert!(channel.sent().is_empty());

    // Unknown labels and mismatched events never reach the emulator
    assert_eq!(t.driver.send("joystick", touch.clone()).await, Delivery::Dropped);
    let click = InputEvent::from(MouseEvent::default());
    assert_eq!(t.driver.send("touch", click).await, Delivery::Dropped);

    assert_eq!(t.transport.get_inputs().await, vec![touch]);

    t.driver.disconnect().await;
}
