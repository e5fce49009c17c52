//! The document-store capability set the rest of the system is written
//! against: keyed get/set/update/delete, equality/containment filtered
//! queries with ordering, atomic multi-document batches, and live query
//! subscriptions that re-fire on any matching document's create or update.

pub mod memory;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::StoreResult;

pub type StoreFuture<'a, T> = BoxFuture<'a, StoreResult<T>>;

/// Callback invoked with the full current result set of a watched query.
pub type WatchCallback = Arc<dyn Fn(&[Document]) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value.
    Eq { field: String, value: Value },
    /// Field is an array containing value.
    Contains { field: String, value: Value },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

/// A filtered, optionally ordered query over one named collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order_by: Vec<Order>,
}

impl Query {
    #[must_use]
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn filter_contains(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Contains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(Order {
            field: field.into(),
            direction: Direction::Asc,
        });
        self
    }

    #[must_use]
    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(Order {
            field: field.into(),
            direction: Direction::Desc,
        });
        self
    }
}

/// One operation inside an atomic batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    Set {
        collection: String,
        id: String,
        data: Value,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// A set of writes applied as one unit: either every operation takes effect
/// or none do, and readers never observe a partially applied batch.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: impl Into<String>, id: impl Into<String>, data: Value) {
        self.ops.push(WriteOp::Set {
            collection: collection.into(),
            id: id.into(),
            data,
        });
    }

    pub fn delete(&mut self, collection: impl Into<String>, id: impl Into<String>) {
        self.ops.push(WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// An active live-query registration. Dropping the guard (or calling
/// [`Subscription::unsubscribe`]) deregisters the watcher; no callback
/// invocation happens after that returns.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    #[must_use]
    pub fn new(cancel: Box<dyn FnOnce() + Send>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Capability set of the storage collaborator.
///
/// All persistence is asynchronous; implementations must serialize writes so
/// that a completed batch is visible as one unit. Watch callbacks fire once
/// immediately on registration and again after every write affecting the
/// watched collection; they run outside the control flow that triggered the
/// change and must not issue store writes themselves.
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by key. Absent documents are `Ok(None)`.
    fn get<'a>(&'a self, collection: &'a str, id: &'a str)
    -> StoreFuture<'a, Option<Document>>;

    /// Insert a document under a freshly generated id, returning the id.
    fn add<'a>(&'a self, collection: &'a str, data: Value) -> StoreFuture<'a, String>;

    /// Create or fully replace a document under a caller-chosen id.
    fn set<'a>(&'a self, collection: &'a str, id: &'a str, data: Value) -> StoreFuture<'a, ()>;

    /// Merge fields into an existing document. Fails if the document is
    /// missing.
    fn update<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        patch: Map<String, Value>,
    ) -> StoreFuture<'a, ()>;

    /// Delete one document. Deleting an absent document is a no-op.
    fn delete<'a>(&'a self, collection: &'a str, id: &'a str) -> StoreFuture<'a, ()>;

    /// Run a filtered query, returning matching documents in query order.
    fn find(&self, query: Query) -> StoreFuture<'_, Vec<Document>>;

    /// Apply a batch atomically.
    fn commit(&self, batch: WriteBatch) -> StoreFuture<'_, ()>;

    /// Register a live query. The callback fires immediately with current
    /// state and after every relevant change until the returned guard is
    /// dropped.
    fn watch(&self, query: Query, callback: WatchCallback) -> Subscription;
}

/// Shared handle to a store implementation, as injected into services.
pub type StoreHandle = Arc<dyn DocumentStore>;
