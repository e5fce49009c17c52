//! Building creation and invite-code membership.

use serde_json::{Map, json};

use minyan_core::util::invite::generate_invite_code;
use minyan_store::document::{Stored, encode};
use minyan_store::model::building::{Building, COLLECTION};
use minyan_store::model::user;
use minyan_store::query;
use minyan_store::serial::now_millis;
use minyan_store::store::DocumentStore;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CreateBuildingRequest {
    pub name: String,
    pub address: String,
    pub admin_user_id: String,
}

/// ## Summary
/// Creates a building with a freshly generated invite code and the creator
/// as its first admin. Returns the new id and the stored record.
///
/// ## Errors
/// Returns a store error if the write fails.
#[tracing::instrument(skip(store, request), fields(name = %request.name))]
pub async fn create_building(
    store: &dyn DocumentStore,
    request: &CreateBuildingRequest,
) -> ServiceResult<Stored<Building>> {
    let now = now_millis();
    let building = Building {
        name: request.name.clone(),
        address: request.address.clone(),
        invite_code: generate_invite_code(),
        admin_user_ids: vec![request.admin_user_id.clone()],
        quorum_threshold: None,
        created_at: now,
        updated_at: now,
    };
    let id = store.add(COLLECTION, encode(&building)?).await?;
    tracing::info!(building_id = %id, invite_code = %building.invite_code, "Building created");
    Ok(Stored { id, doc: building })
}

/// ## Summary
/// Resolves an invite code and adds the building to the user's membership
/// list. Joining a building the user already belongs to is a no-op.
///
/// Returns `Ok(None)` when the code matches nothing — the caller picks the
/// user-facing message.
///
/// ## Errors
/// Returns `NotFound` if the user record is missing, or a store error.
#[tracing::instrument(skip(store, code))]
pub async fn join_building(
    store: &dyn DocumentStore,
    user_id: &str,
    code: &str,
) -> ServiceResult<Option<Stored<Building>>> {
    let Some(building) = query::buildings::find_by_invite_code(store, code).await? else {
        tracing::debug!("Invite code matched no building");
        return Ok(None);
    };

    let member = query::users::get_user(store, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))?;

    if !member.doc.building_ids.contains(&building.id) {
        let mut building_ids = member.doc.building_ids.clone();
        building_ids.push(building.id.clone());
        let mut patch = Map::new();
        patch.insert("buildingIds".to_string(), json!(building_ids));
        patch.insert("updatedAt".to_string(), json!(now_millis()));
        store.update(user::COLLECTION, user_id, patch).await?;
        tracing::info!(building_id = %building.id, user_id, "User joined building");
    }

    Ok(Some(building))
}

/// ## Summary
/// Removes a building from the user's membership list. Leaving a building
/// the user isn't in is a no-op.
///
/// ## Errors
/// Returns `NotFound` if the user record is missing, or a store error.
#[tracing::instrument(skip(store))]
pub async fn leave_building(
    store: &dyn DocumentStore,
    user_id: &str,
    building_id: &str,
) -> ServiceResult<()> {
    let member = query::users::get_user(store, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))?;

    if member.doc.building_ids.iter().any(|id| id == building_id) {
        let building_ids: Vec<String> = member
            .doc
            .building_ids
            .into_iter()
            .filter(|id| id != building_id)
            .collect();
        let mut patch = Map::new();
        patch.insert("buildingIds".to_string(), json!(building_ids));
        patch.insert("updatedAt".to_string(), json!(now_millis()));
        store.update(user::COLLECTION, user_id, patch).await?;
        tracing::info!(building_id, user_id, "User left building");
    }

    Ok(())
}
