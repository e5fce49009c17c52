//! Building announcements and their best-effort broadcast fan-out.

use minyan_store::document::encode;
use minyan_store::model::announcement::{Announcement, COLLECTION};
use minyan_store::query;
use minyan_store::serial::now_millis;
use minyan_store::store::DocumentStore;

use crate::error::ServiceResult;
use crate::notify::push::{PushClient, PushPayload};
use crate::notify::whatsapp::WhatsAppClient;

/// Outcome of one broadcast attempt across both channels. Failures are
/// counted, not retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct BroadcastReport {
    pub push_success: u32,
    pub push_failure: u32,
    pub whatsapp_sent: u32,
    pub whatsapp_failed: u32,
}

/// ## Summary
/// Persists an announcement for a building, returning its id.
///
/// ## Errors
/// Returns a store error if the write fails.
#[tracing::instrument(skip(store, title, message))]
pub async fn create_announcement(
    store: &dyn DocumentStore,
    building_id: &str,
    title: &str,
    message: &str,
    created_by: &str,
) -> ServiceResult<String> {
    let announcement = Announcement {
        building_id: building_id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        created_by: created_by.to_string(),
        created_at: now_millis(),
    };
    let id = store.add(COLLECTION, encode(&announcement)?).await?;
    tracing::info!(announcement_id = %id, building_id, "Announcement created");
    Ok(id)
}

/// ## Summary
/// Fans an announcement out to a building's opted-in members over whichever
/// gateways are configured. Best effort: each channel gets one call, gateway
/// failures are tallied in the report and never retried.
///
/// ## Errors
/// Returns a store error if the member listing fails; gateway failures do
/// not error the broadcast.
#[tracing::instrument(skip(store, push, whatsapp, title, message))]
pub async fn broadcast_announcement(
    store: &dyn DocumentStore,
    push: Option<&PushClient>,
    whatsapp: Option<&WhatsAppClient>,
    building_id: &str,
    title: &str,
    message: &str,
) -> ServiceResult<BroadcastReport> {
    let members = query::users::list_members(store, building_id).await?;
    let mut report = BroadcastReport::default();

    if let Some(push) = push {
        let tokens: Vec<String> = members
            .iter()
            .filter(|member| member.doc.notification_preferences.push)
            .filter_map(|member| member.doc.push_token.clone())
            .collect();
        if !tokens.is_empty() {
            match push
                .send(
                    &tokens,
                    &PushPayload {
                        title: title.to_string(),
                        body: message.to_string(),
                        data: None,
                    },
                )
                .await
            {
                Ok(push_report) => {
                    report.push_success = push_report.success_count;
                    report.push_failure = push_report.failure_count;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Push broadcast failed");
                    report.push_failure = u32::try_from(tokens.len()).unwrap_or(u32::MAX);
                }
            }
        }
    }

    if let Some(whatsapp) = whatsapp {
        for member in &members {
            if !member.doc.whatsapp_opt_in || !member.doc.notification_preferences.whatsapp {
                continue;
            }
            let Some(phone) = &member.doc.phone else {
                continue;
            };
            match whatsapp.send(phone, message).await {
                Ok(_sid) => report.whatsapp_sent += 1,
                Err(e) => {
                    tracing::warn!(error = %e, user_id = %member.id, "WhatsApp send failed");
                    report.whatsapp_failed += 1;
                }
            }
        }
    }

    Ok(report)
}
