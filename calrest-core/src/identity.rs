//! Identity generation for newly created records.

use uuid::Uuid;

/// Produces identities for records entering a store.
///
/// Implementations must never hand out the same identity twice.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identities.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
