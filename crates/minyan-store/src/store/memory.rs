//! In-memory document store engine.
//!
//! Backs the server process and every test. Writes are serialized behind a
//! single collections lock, so a committed batch is visible as one unit and
//! watchers always observe a consistent post-write snapshot.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::store::{
    Direction, DocumentStore, Filter, Query, StoreFuture, Subscription, WatchCallback, WriteBatch,
    WriteOp,
};

type Collections = HashMap<String, BTreeMap<String, Value>>;

struct Watcher {
    query: Query,
    callback: WatchCallback,
}

#[derive(Default)]
struct Inner {
    collections: RwLock<Collections>,
    watchers: Mutex<HashMap<u64, Watcher>>,
    next_watcher_id: AtomicU64,
}

/// Process-local store engine implementing the full capability set.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_collections_read(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.inner
            .collections
            .read()
            .map_err(|_| StoreError::Persistence("store lock poisoned".to_string()))
    }

    fn lock_collections_write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.inner
            .collections
            .write()
            .map_err(|_| StoreError::Persistence("store lock poisoned".to_string()))
    }

    fn run_query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let collections = self.lock_collections_read()?;
        let mut results: Vec<Document> = collections
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| query.filters.iter().all(|f| matches_filter(data, f)))
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        for order in query.order_by.iter().rev() {
            results.sort_by(|a, b| {
                let ordering = compare_values(
                    a.data.get(&order.field).unwrap_or(&Value::Null),
                    b.data.get(&order.field).unwrap_or(&Value::Null),
                );
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        Ok(results)
    }

    /// Re-runs every watcher registered on `collection` and delivers the
    /// fresh result set. Holding the watchers lock for the duration is what
    /// guarantees no delivery happens after an unsubscribe returns.
    fn notify(&self, collection: &str) {
        let Ok(watchers) = self.inner.watchers.lock() else {
            tracing::warn!(collection, "Watcher lock poisoned, skipping notification");
            return;
        };

        for watcher in watchers.values() {
            if watcher.query.collection != collection {
                continue;
            }
            match self.run_query(&watcher.query) {
                Ok(results) => (watcher.callback)(&results),
                Err(e) => {
                    tracing::error!(error = %e, collection, "Failed to recompute watched query");
                }
            }
        }
    }

    fn apply_set(
        collections: &mut Collections,
        collection: &str,
        id: &str,
        data: Value,
    ) {
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
    }
}

fn matches_filter(data: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { field, value } => data.get(field) == Some(value),
        Filter::Contains { field, value } => data
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|items| items.contains(value)),
    }
}

/// Total ordering over JSON values for `order_by`. Nulls sort first, then
/// booleans, numbers, and strings; mixed types fall back to type rank.
fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl DocumentStore for MemoryStore {
    fn get<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Document>> {
        Box::pin(async move {
            let collections = self.lock_collections_read()?;
            Ok(collections
                .get(collection)
                .and_then(|docs| docs.get(id))
                .map(|data| Document::new(id, data.clone())))
        })
    }

    fn add<'a>(&'a self, collection: &'a str, data: Value) -> StoreFuture<'a, String> {
        Box::pin(async move {
            let id = uuid::Uuid::new_v4().simple().to_string();
            {
                let mut collections = self.lock_collections_write()?;
                Self::apply_set(&mut collections, collection, &id, data);
            }
            self.notify(collection);
            Ok(id)
        })
    }

    fn set<'a>(&'a self, collection: &'a str, id: &'a str, data: Value) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            {
                let mut collections = self.lock_collections_write()?;
                Self::apply_set(&mut collections, collection, id, data);
            }
            self.notify(collection);
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        patch: Map<String, Value>,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            {
                let mut collections = self.lock_collections_write()?;
                let existing = collections
                    .get_mut(collection)
                    .and_then(|docs| docs.get_mut(id))
                    .ok_or_else(|| StoreError::Missing {
                        collection: collection.to_string(),
                        id: id.to_string(),
                    })?;
                let Value::Object(fields) = existing else {
                    return Err(StoreError::Persistence(format!(
                        "document {collection}/{id} is not an object"
                    )));
                };
                for (key, value) in patch {
                    fields.insert(key, value);
                }
            }
            self.notify(collection);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, collection: &'a str, id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            {
                let mut collections = self.lock_collections_write()?;
                if let Some(docs) = collections.get_mut(collection) {
                    docs.remove(id);
                }
            }
            self.notify(collection);
            Ok(())
        })
    }

    fn find(&self, query: Query) -> StoreFuture<'_, Vec<Document>> {
        Box::pin(async move { self.run_query(&query) })
    }

    fn commit(&self, batch: WriteBatch) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let ops = batch.into_ops();
            let mut touched: Vec<String> = Vec::new();
            {
                // One write lock across the whole batch: readers never see a
                // partially applied batch.
                let mut collections = self.lock_collections_write()?;
                for op in ops {
                    match op {
                        WriteOp::Set {
                            collection,
                            id,
                            data,
                        } => {
                            Self::apply_set(&mut collections, &collection, &id, data);
                            if !touched.contains(&collection) {
                                touched.push(collection);
                            }
                        }
                        WriteOp::Delete { collection, id } => {
                            if let Some(docs) = collections.get_mut(&collection) {
                                docs.remove(&id);
                            }
                            if !touched.contains(&collection) {
                                touched.push(collection);
                            }
                        }
                    }
                }
            }
            for collection in touched {
                self.notify(&collection);
            }
            Ok(())
        })
    }

    fn watch(&self, query: Query, callback: WatchCallback) -> Subscription {
        let id = self.inner.next_watcher_id.fetch_add(1, Ordering::Relaxed);

        {
            // Register and fire the initial snapshot under the watchers lock
            // so a concurrent write can't slip an earlier notification in.
            let Ok(mut watchers) = self.inner.watchers.lock() else {
                tracing::error!("Watcher lock poisoned, subscription is inert");
                return Subscription::new(Box::new(|| {}));
            };
            match self.run_query(&query) {
                Ok(results) => callback(&results),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to compute initial watch snapshot");
                }
            }
            watchers.insert(
                id,
                Watcher {
                    query,
                    callback,
                },
            );
        }

        let inner = Arc::clone(&self.inner);
        Subscription::new(Box::new(move || {
            if let Ok(mut watchers) = inner.watchers.lock() {
                watchers.remove(&id);
            }
        }))
    }
}
