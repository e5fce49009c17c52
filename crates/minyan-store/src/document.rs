use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// One stored document: its key within the collection plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// ## Summary
    /// Deserializes the document body into a typed model.
    ///
    /// ## Errors
    /// Returns a serialization error if the body doesn't match the model.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// ## Summary
    /// Deserializes the document into a typed model paired with its id.
    ///
    /// ## Errors
    /// Returns a serialization error if the body doesn't match the model.
    pub fn decode_stored<T: DeserializeOwned>(&self) -> StoreResult<Stored<T>> {
        Ok(Stored {
            id: self.id.clone(),
            doc: self.decode()?,
        })
    }
}

/// A typed model together with the document id it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stored<T> {
    pub id: String,
    pub doc: T,
}

/// ## Summary
/// Serializes a typed model into a document body.
///
/// ## Errors
/// Returns an error if the model does not serialize to a JSON object.
pub fn encode<T: Serialize>(model: &T) -> StoreResult<Value> {
    let value = serde_json::to_value(model)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(StoreError::Persistence(
            "document body must be a JSON object".to_string(),
        ))
    }
}
