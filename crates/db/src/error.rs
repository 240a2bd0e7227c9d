use taproom_core::types::DbId;

/// Failure raised by a record store.
///
/// "No such record" on reads is not an error; stores return `None` for it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The record violates a constraint enforced at the store boundary.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The stored version no longer matches the version the writer read.
    #[error("{entity} with id {id} was modified concurrently (expected version {expected})")]
    VersionConflict {
        entity: &'static str,
        id: DbId,
        expected: i32,
    },

    /// An update targeted a record that no longer exists, or a write
    /// referenced one.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A delete would orphan rows that point at the record.
    #[error("{entity} with id {id} is still referenced by {referrer} records")]
    Referenced {
        entity: &'static str,
        id: DbId,
        referrer: &'static str,
    },
}
