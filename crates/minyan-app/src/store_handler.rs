use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use minyan_core::error::CoreError;
use minyan_store::store::{DocumentStore, StoreHandle};

/// Injects the shared store client into every request's depot.
pub struct StoreHandler<T: DocumentStore + Clone> {
    pub store: T,
}

#[async_trait]
impl<T: DocumentStore + Clone + 'static> salvo::Handler for StoreHandler<T> {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let store: StoreHandle = Arc::new(self.store.clone());
        depot.inject(store);
    }
}

/// ## Summary
/// Retrieves the store client from the depot.
///
/// ## Errors
/// Returns an error if the store client is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<StoreHandle> {
    depot
        .obtain::<StoreHandle>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Store client not found in depot").into())
}
