//! User profile maintenance: push tokens and notification preferences.

use serde_json::{Map, json};

use minyan_store::model::user::{COLLECTION, NotificationPreferences};
use minyan_store::serial::now_millis;
use minyan_store::store::DocumentStore;

use crate::error::ServiceResult;

/// ## Summary
/// Stores the user's current push delivery token.
///
/// ## Errors
/// Returns a store error; a missing user surfaces as the store's
/// missing-document error.
#[tracing::instrument(skip(store, token))]
pub async fn update_push_token(
    store: &dyn DocumentStore,
    user_id: &str,
    token: &str,
) -> ServiceResult<()> {
    let mut patch = Map::new();
    patch.insert("pushToken".to_string(), json!(token));
    patch.insert("updatedAt".to_string(), json!(now_millis()));
    store.update(COLLECTION, user_id, patch).await?;
    Ok(())
}

/// ## Summary
/// Replaces the user's notification preferences.
///
/// ## Errors
/// Returns a store error; a missing user surfaces as the store's
/// missing-document error.
#[tracing::instrument(skip(store, preferences))]
pub async fn update_notification_preferences(
    store: &dyn DocumentStore,
    user_id: &str,
    preferences: &NotificationPreferences,
) -> ServiceResult<()> {
    let mut patch = Map::new();
    patch.insert(
        "notificationPreferences".to_string(),
        serde_json::to_value(preferences).map_err(minyan_store::error::StoreError::from)?,
    );
    patch.insert("updatedAt".to_string(), json!(now_millis()));
    store.update(COLLECTION, user_id, patch).await?;
    Ok(())
}
