#![allow(clippy::unused_async)]
//! Integration tests for recurrence materialization and series deletion.
//!
//! Tests:
//! - Weekday expansion over an inclusive date range
//! - Validation rejections (empty weekday set, inverted range) leave nothing
//!   behind
//! - Series deletion removes events and their attendance in one shot

use salvo::http::StatusCode;

use super::helpers::*;

fn materialize_body(weekdays: &[u8], start: &str, end: &str, building_id: &str) -> serde_json::Value {
    serde_json::json!({
        "buildingId": building_id,
        "prayerType": "Shacharis",
        "nusach": "Ashkenaz",
        "time": "07:00",
        "location": "Main sanctuary",
        "weekdays": weekdays,
        "startDate": start,
        "endDate": end,
        "createdBy": "admin-1",
    })
}

#[test_log::test(tokio::test)]
async fn weekday_pattern_expands_inclusively() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    // Mon-Fri over the first week of 2024; Jan 1 was a Monday.
    let response = TestRequest::post("/api/app/recurrences")
        .json_body(&materialize_body(
            &[1, 2, 3, 4, 5],
            "2024-01-01",
            "2024-01-07",
            &building_id,
        ))
        .send(&service)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["eventCount"], 5);

    let events = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    let dates: Vec<&str> = events
        .as_array()
        .expect("events should be an array")
        .iter()
        .filter_map(|event| event["date"].as_str())
        .collect();
    assert_eq!(
        dates,
        vec![
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-05"
        ]
    );
}

#[test_log::test(tokio::test)]
async fn empty_weekday_set_is_rejected_before_persistence() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    let response = TestRequest::post("/api/app/recurrences")
        .json_body(&materialize_body(&[], "2024-01-01", "2024-01-07", &building_id))
        .send(&service)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let events = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    assert_eq!(events.as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn inverted_date_range_is_rejected() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    let response = TestRequest::post("/api/app/recurrences")
        .json_body(&materialize_body(&[1], "2024-01-07", "2024-01-01", &building_id))
        .send(&service)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn out_of_range_weekday_is_rejected() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    let response = TestRequest::post("/api/app/recurrences")
        .json_body(&materialize_body(&[1, 7], "2024-01-01", "2024-01-07", &building_id))
        .send(&service)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn delete_series_removes_events_and_attendance() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    let body = TestRequest::post("/api/app/recurrences")
        .json_body(&materialize_body(
            &[1, 2, 3],
            "2024-01-01",
            "2024-01-07",
            &building_id,
        ))
        .send(&service)
        .await
        .json();
    let event_ids: Vec<String> = body["eventIds"]
        .as_array()
        .expect("eventIds should be an array")
        .iter()
        .filter_map(|id| id.as_str().map(str::to_string))
        .collect();
    assert_eq!(event_ids.len(), 3);

    // RSVP to one of the materialized events before deleting the series.
    TestRequest::put(&format!("/api/app/events/{}/attendance", event_ids[0]))
        .json_body(&serde_json::json!({
            "userId": "u1",
            "userName": "User One",
            "status": "yes",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    // The recurrence id is stamped on each event.
    let events = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    let recurrence_id = events[0]["recurrenceId"]
        .as_str()
        .expect("recurrenceId should be set")
        .to_string();

    TestRequest::delete(&format!("/api/app/recurrences/{recurrence_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let remaining = TestRequest::get(&format!("/api/app/buildings/{building_id}/events"))
        .send(&service)
        .await
        .json();
    assert_eq!(remaining.as_array().map(Vec::len), Some(0));

    // The attendance records went with the events.
    let response = TestRequest::get(&format!("/api/app/events/{}/attendance", event_ids[0]))
        .send(&service)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn delete_unknown_series_is_a_no_op() {
    let (service, _store) = create_test_service();

    let response = TestRequest::delete("/api/app/recurrences/no-such-series")
        .send(&service)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}
