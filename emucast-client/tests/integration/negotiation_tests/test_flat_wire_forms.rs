use emucast_core::SdpType;
use serde_json::Value;

use crate::integration::{create_default_driver, init_tracing};
use crate::utils::{
    PeerCall, SIGNAL_TIMEOUT_MS, flat_offer, remote_candidate, start, stringified_candidate,
};

#[tokio::test]
async fn test_flat_offer_and_stringified_candidate() {
    init_tracing();

    let t = create_default_driver();
    t.driver.start_stream().await.expect("start_stream failed");

    t.transport.push_signal(&start());
    t.transport.push_signal(&flat_offer());
    t.transport.push_signal(&stringified_candidate(2));

    let expected = remote_candidate(2);
    assert!(
        t.connector
            .wait_for_call(
                |c| matches!(c, PeerCall::AddCandidate(text) if *text == expected),
                SIGNAL_TIMEOUT_MS
            )
            .await
    );
    assert!(
        t.connector
            .get_calls()
            .await
            .contains(&PeerCall::SetRemote(SdpType::Offer))
    );

    // Outbound messages always use the nested form
    let sent = t.transport.wait_for_signals(1, SIGNAL_TIMEOUT_MS).await;
    let answer: Value = serde_json::from_str(&sent[0].message).expect("valid JSON");
    assert_eq!(answer["sdp"]["type"], "answer");
    assert!(answer.get("type").is_none());

    t.driver.disconnect().await;
}
