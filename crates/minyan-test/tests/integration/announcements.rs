#![allow(clippy::unused_async)]
//! Integration tests for announcements.
//!
//! Tests:
//! - Create and list, newest first
//! - Broadcast with no configured gateways reports zero deliveries

use salvo::http::StatusCode;

use super::helpers::*;

async fn post_announcement(
    service: &salvo::Service,
    building_id: &str,
    title: &str,
    broadcast: bool,
) -> TestResponse {
    TestRequest::post("/api/app/announcements")
        .json_body(&serde_json::json!({
            "buildingId": building_id,
            "title": title,
            "message": format!("{title} details"),
            "createdBy": "admin-1",
            "broadcast": broadcast,
        }))
        .send(service)
        .await
}

#[test_log::test(tokio::test)]
async fn create_and_list_newest_first() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    post_announcement(&service, &building_id, "First", false)
        .await
        .assert_status(StatusCode::CREATED);
    // Same-millisecond timestamps would tie; force distinct instants.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    post_announcement(&service, &building_id, "Second", false)
        .await
        .assert_status(StatusCode::CREATED);

    let listed = TestRequest::get(&format!("/api/app/buildings/{building_id}/announcements"))
        .send(&service)
        .await
        .json();
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["title"], "Second");
    assert_eq!(listed[1]["title"], "First");
}

#[test_log::test(tokio::test)]
async fn broadcast_without_gateways_reports_zero_deliveries() {
    let (service, store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;
    seed_user(&store, "user-7", "Dov").await;

    let response = post_announcement(&service, &building_id, "Broadcast", true).await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["pushSuccess"], 0);
    assert_eq!(body["whatsappSent"], 0);
}

#[test_log::test(tokio::test)]
async fn missing_title_is_rejected() {
    let (service, _store) = create_test_service();
    let (building_id, _code) = seed_building(&service, "Beis Midrash").await;

    let response = post_announcement(&service, &building_id, "", false).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
