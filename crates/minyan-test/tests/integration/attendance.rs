#![allow(clippy::unused_async)]
//! Integration tests for RSVP upserts and attendance summaries over HTTP.
//!
//! Tests:
//! - Summary counts and the quorum flag at the default threshold
//! - Re-RSVP overwriting instead of double counting
//! - Event lifecycle: cancel flag, single delete
//! - 404 behavior for unknown events

use salvo::http::StatusCode;

use super::helpers::*;

async fn rsvp(service: &salvo::Service, event_id: &str, user_id: &str, status: &str) -> TestResponse {
    TestRequest::put(&format!("/api/app/events/{event_id}/attendance"))
        .json_body(&serde_json::json!({
            "userId": user_id,
            "userName": format!("User {user_id}"),
            "status": status,
        }))
        .send(service)
        .await
}

#[test_log::test(tokio::test)]
async fn summary_counts_and_quorum_flag() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    for i in 0..10 {
        rsvp(&service, &event_id, &format!("u{i}"), "yes")
            .await
            .assert_status(StatusCode::OK);
    }
    rsvp(&service, &event_id, "u10", "maybe")
        .await
        .assert_status(StatusCode::OK);

    let response = TestRequest::get(&format!("/api/app/events/{event_id}/attendance"))
        .send(&service)
        .await;
    response.assert_status(StatusCode::OK);
    let summary = response.json();

    assert_eq!(summary["yesCount"], 10);
    assert_eq!(summary["maybeCount"], 1);
    assert_eq!(summary["noCount"], 0);
    assert_eq!(summary["hasMinyan"], true);
    assert_eq!(summary["attendees"].as_array().map(Vec::len), Some(11));
}

#[test_log::test(tokio::test)]
async fn nine_yes_is_not_a_minyan() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    for i in 0..9 {
        rsvp(&service, &event_id, &format!("u{i}"), "yes")
            .await
            .assert_status(StatusCode::OK);
    }

    let summary = TestRequest::get(&format!("/api/app/events/{event_id}/attendance"))
        .send(&service)
        .await
        .json();
    assert_eq!(summary["yesCount"], 9);
    assert_eq!(summary["hasMinyan"], false);
}

#[test_log::test(tokio::test)]
async fn re_rsvp_overwrites_previous_status() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    rsvp(&service, &event_id, "u1", "yes")
        .await
        .assert_status(StatusCode::OK);
    let response = rsvp(&service, &event_id, "u1", "no").await;
    response.assert_status(StatusCode::OK);

    let summary = response.json();
    assert_eq!(summary["yesCount"], 0);
    assert_eq!(summary["noCount"], 1);
    assert_eq!(summary["attendees"].as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn rsvp_to_unknown_event_is_404() {
    let (service, _store) = create_test_service();

    let response = rsvp(&service, "no-such-event", "u1", "yes").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn cancel_keeps_the_event_visible() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    TestRequest::post(&format!("/api/app/events/{event_id}/cancel"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = TestRequest::get(&format!(
        "/api/app/buildings/{building_id}/events?date=2024-03-04"
    ))
    .send(&service)
    .await;
    response.assert_status(StatusCode::OK);
    let events = response.json();
    assert_eq!(events.as_array().map(Vec::len), Some(1));
    assert_eq!(events[0]["isCancelled"], true);
}

#[test_log::test(tokio::test)]
async fn cancel_unknown_event_is_404() {
    let (service, _store) = create_test_service();

    let response = TestRequest::post("/api/app/events/no-such-event/cancel")
        .send(&service)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn delete_removes_the_event() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    let event_id = seed_event(&service, &building_id, "2024-03-04").await;

    TestRequest::delete(&format!("/api/app/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let events = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    assert_eq!(events.as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn events_list_is_ordered_by_date_then_time() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    seed_event(&service, &building_id, "2024-03-05").await;
    seed_event(&service, &building_id, "2024-03-04").await;

    let events = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    assert_eq!(events[0]["date"], "2024-03-04");
    assert_eq!(events[1]["date"], "2024-03-05");
}
