#![allow(clippy::unused_async)]
//! End-to-end quorum flows: per-building threshold overrides and live
//! summary subscriptions observing HTTP-driven RSVPs.

use std::sync::{Arc, Mutex};

use salvo::http::StatusCode;

use minyan_test::component::minyan::attendance::{AttendanceSummary, subscribe_attendance};
use minyan_test::component::minyan::quorum::QuorumPolicy;
use minyan_test::component::model::building::{Building, COLLECTION};
use minyan_test::component::store::DocumentStore;
use minyan_test::component::store::memory::MemoryStore;

use super::helpers::*;

/// Seeds a building document directly so the quorum override can be set;
/// the create endpoint always starts without one.
async fn seed_building_with_threshold(store: &MemoryStore, threshold: u32) -> String {
    let building = Building {
        name: "Annex".to_string(),
        address: "1 Side St".to_string(),
        invite_code: "ANNEX1".to_string(),
        admin_user_ids: vec!["admin-1".to_string()],
        quorum_threshold: Some(threshold),
        created_at: 0,
        updated_at: 0,
    };
    store
        .add(
            COLLECTION,
            serde_json::to_value(&building).expect("building should encode"),
        )
        .await
        .expect("building seed should persist")
}

#[test_log::test(tokio::test)]
async fn building_threshold_override_applies_to_summaries() {
    let (service, store) = create_test_service();
    let building_id = seed_building_with_threshold(&store, 2).await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    for user in ["u1", "u2"] {
        TestRequest::put(&format!("/api/app/events/{event_id}/attendance"))
            .json_body(&serde_json::json!({
                "userId": user,
                "userName": user,
                "status": "yes",
            }))
            .send(&service)
            .await
            .assert_status(StatusCode::OK);
    }

    let summary = TestRequest::get(&format!("/api/app/events/{event_id}/attendance"))
        .send(&service)
        .await
        .json();
    assert_eq!(summary["yesCount"], 2);
    assert_eq!(summary["hasMinyan"], true);
}

#[test_log::test(tokio::test)]
async fn live_subscription_observes_http_rsvps() {
    let (service, store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    let seen: Arc<Mutex<Vec<AttendanceSummary>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let guard = subscribe_attendance(&store, &event_id, QuorumPolicy::default(), move |summary| {
        sink.lock().expect("summary sink poisoned").push(summary);
    });

    // The initial snapshot fires synchronously at registration.
    assert_eq!(seen.lock().expect("summary sink poisoned").len(), 1);

    TestRequest::put(&format!("/api/app/events/{event_id}/attendance"))
        .json_body(&serde_json::json!({
            "userId": "u1",
            "userName": "User One",
            "status": "yes",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    {
        let summaries = seen.lock().expect("summary sink poisoned");
        let last = summaries.last().expect("at least one summary");
        assert_eq!(last.yes_count, 1);
        assert!(!last.has_minyan);
    }

    // After unsubscribing, further RSVPs are not delivered.
    drop(guard);
    let count_after_drop = seen.lock().expect("summary sink poisoned").len();

    TestRequest::put(&format!("/api/app/events/{event_id}/attendance"))
        .json_body(&serde_json::json!({
            "userId": "u2",
            "userName": "User Two",
            "status": "yes",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        seen.lock().expect("summary sink poisoned").len(),
        count_after_drop
    );
}
