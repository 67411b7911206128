//! Save flow tests against the in-memory donation box gateway.

use crwd_core::*;
use std::sync::Arc;

fn open_session(amount: f64) -> SplitSession {
    let causes = vec![Cause::new(1, "Water"), Cause::new(2, "Shelter"), Cause::new(3, "Food")];
    let mut saved = vec![
        BoxCause::with_percentage(1, 50.0),
        BoxCause::with_percentage(2, 30.0),
        BoxCause::with_percentage(3, 20.0),
    ];
    saved[1].attributed_collective = Some(CollectiveId(44));
    SplitSession::open(causes, &saved, amount, &AllocatorConfig::default()).unwrap()
}

#[tokio::test]
async fn test_save_without_changes_is_a_no_op() {
    let gateway = InMemoryDonationBoxGateway::new();
    let mut session = open_session(25.0);

    // Below the 0.1 point threshold.
    session.drag_slider(CauseId(1), 50.05).unwrap();
    let outcome = session.save(&gateway).await.unwrap();

    assert_eq!(outcome, SaveOutcome::NoChanges);
    assert_eq!(gateway.save_count().await, 0);
}

#[tokio::test]
async fn test_save_submits_normalized_request() {
    let gateway = InMemoryDonationBoxGateway::new();
    let mut session = open_session(25.0);

    session.drag_slider(CauseId(3), 40.0).unwrap();
    let outcome = session.save(&gateway).await.unwrap();

    let SaveOutcome::Saved(receipt) = outcome else {
        panic!("expected a saved outcome");
    };
    assert_eq!(receipt.request, session.build_request());
    assert_eq!(receipt.request.monthly_amount, "25.00");
    assert_eq!(receipt.request.total_percentage(), 100.0);
    assert_eq!(receipt.request.causes[1].attributed_collective, Some(CollectiveId(44)));
    assert_eq!(gateway.latest().await, Some(receipt));

    // The saved split is the new baseline.
    assert!(!session.has_changes());
    assert_eq!(session.save(&gateway).await.unwrap(), SaveOutcome::NoChanges);
    assert_eq!(gateway.save_count().await, 1);
}

#[tokio::test]
async fn test_failed_save_keeps_edits() {
    let gateway = InMemoryDonationBoxGateway::failing(GatewayError::Unavailable {
        message: "upstream timed out".to_string(),
    });
    let mut session = open_session(25.0);
    session.drag_slider(CauseId(2), 10.0).unwrap();
    let edited = session.percentages().clone();

    let err = session.save(&gateway).await.unwrap_err();

    assert!(matches!(err, SplitError::Gateway(GatewayError::Unavailable { .. })));
    assert!(err.is_recoverable());
    assert_eq!(session.percentages(), &edited);
    assert!(session.has_changes());
}

#[tokio::test]
async fn test_save_through_trait_object() {
    let gateway: Arc<dyn DonationBoxGateway> = Arc::new(InMemoryDonationBoxGateway::new());
    let mut session = open_session(100.0);
    session.reset_to_equal_split();

    let outcome = session.save(gateway.as_ref()).await.unwrap();
    match outcome {
        SaveOutcome::Saved(receipt) => {
            let percentages: Vec<f64> =
                receipt.request.causes.iter().map(|c| c.percentage).collect();
            assert_eq!(percentages, vec![33.33, 33.33, 33.34]);
        }
        SaveOutcome::NoChanges => panic!("reset from 50/30/20 should be a change"),
    }
}

#[tokio::test]
async fn test_request_serializes_for_backend() {
    let mut session = open_session(34.0);
    session.drag_slider(CauseId(1), 70.0).unwrap();

    let json = serde_json::to_value(session.build_request()).unwrap();
    assert_eq!(json["monthly_amount"], "34.00");
    assert_eq!(json["causes"][0]["cause_id"], 1);
    assert_eq!(json["causes"][0]["percentage"], 70.0);
    assert!(json["causes"][0].get("attributed_collective").is_none());
    assert_eq!(json["causes"][1]["attributed_collective"], 44);
}
