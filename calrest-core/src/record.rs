//! The `Record` trait implemented by every entity a store can hold.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An entity with a single string identity field.
///
/// Implementors serialize their identity under [`Record::ID_FIELD`] so that
/// field queries (see [`crate::query::Query`]) can address it.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Fields a caller supplies to create a record (everything but the identity).
    type Creation;

    /// Human-readable entity name used in errors and logs.
    const KIND: &'static str;

    /// Serialized name of the identity field.
    const ID_FIELD: &'static str = "_id";

    fn id(&self) -> &str;

    /// Only used when upgrading seed records that arrived without an identity.
    fn set_id(&mut self, id: String);

    fn from_creation(id: String, input: Self::Creation) -> Self;
}
