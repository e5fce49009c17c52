#![allow(clippy::unused_async)]
//! Integration tests for building membership over HTTP.
//!
//! Tests:
//! - Building creation and invite code issuance
//! - Join by invite code, including the unknown-code 404
//! - Leave semantics

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_building_returns_invite_code() {
    let (service, _store) = create_test_service();

    let (building_id, invite_code) = seed_building(&service, "Beis Midrash").await;

    assert!(!building_id.is_empty());
    assert_eq!(invite_code.len(), 6);
    assert_eq!(invite_code, invite_code.to_uppercase());
}

#[test_log::test(tokio::test)]
async fn join_with_valid_code_returns_building() {
    let (service, store) = create_test_service();
    let (building_id, invite_code) = seed_building(&service, "Beis Midrash").await;
    seed_user(&store, "user-7", "Dov").await;

    let response = TestRequest::post("/api/app/buildings/join")
        .json_body(&serde_json::json!({
            "code": invite_code,
            "userId": "user-7",
        }))
        .send(&service)
        .await;

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["buildingId"], building_id);
    assert_eq!(body["name"], "Beis Midrash");
}

#[test_log::test(tokio::test)]
async fn join_with_unknown_code_is_404_with_message() {
    let (service, store) = create_test_service();
    seed_building(&service, "Beis Midrash").await;
    seed_user(&store, "user-7", "Dov").await;

    let response = TestRequest::post("/api/app/buildings/join")
        .json_body(&serde_json::json!({
            "code": "ZZZZZZ",
            "userId": "user-7",
        }))
        .send(&service)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json();
    assert!(body["error"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn join_is_idempotent() {
    let (service, store) = create_test_service();
    let (_building_id, invite_code) = seed_building(&service, "Beis Midrash").await;
    seed_user(&store, "user-7", "Dov").await;

    for _ in 0..2 {
        let response = TestRequest::post("/api/app/buildings/join")
            .json_body(&serde_json::json!({
                "code": invite_code,
                "userId": "user-7",
            }))
            .send(&service)
            .await;
        response.assert_status(StatusCode::OK);
    }
}

#[test_log::test(tokio::test)]
async fn leave_after_join_succeeds() {
    let (service, store) = create_test_service();
    let (building_id, invite_code) = seed_building(&service, "Beis Midrash").await;
    seed_user(&store, "user-7", "Dov").await;

    TestRequest::post("/api/app/buildings/join")
        .json_body(&serde_json::json!({
            "code": invite_code,
            "userId": "user-7",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let response = TestRequest::post(&format!("/api/app/buildings/{building_id}/leave"))
        .json_body(&serde_json::json!({ "userId": "user-7" }))
        .send(&service)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[test_log::test(tokio::test)]
async fn healthcheck_responds_ok() {
    let (service, _store) = create_test_service();

    let response = TestRequest::get("/api/app/healthcheck").send(&service).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, "OK");
}
