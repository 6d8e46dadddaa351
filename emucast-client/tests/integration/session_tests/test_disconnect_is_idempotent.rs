use emucast_client::DriverState;
use emucast_core::SessionId;

use crate::integration::{create_default_driver, init_tracing};
use crate::utils::Recorded;

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    init_tracing();

    let t = create_default_driver();
    t.driver.start_stream().await.expect("start_stream failed");

    t.driver.disconnect().await;
    t.driver.disconnect().await;

    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert_eq!(t.driver.session(), None);
    assert_eq!(
        t.events.events(),
        vec![Recorded::Disconnected {
            session: Some(SessionId::from("abc123"))
        }]
    );
}

#[tokio::test]
async fn test_disconnect_from_idle() {
    init_tracing();

    let t = create_default_driver();

    t.driver.disconnect().await;
    t.driver.disconnect().await;

    assert_eq!(t.driver.state(), DriverState::Disconnected);
    assert_eq!(
        t.events.events(),
        vec![Recorded::Disconnected { session: None }]
    );
}

#[tokio::test]
async fn test_removed_listener_is_not_called() {
    init_tracing();

    let t = create_default_driver();
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = calls.clone();
    let id = t
        .driver
        .on(emucast_client::EventKind::Disconnected, move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

    assert!(t.driver.off(id));
    t.driver.disconnect().await;

    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(t.events.disconnected_count(), 1);
}
