use crate::model::ValidationError;
use crate::storage::StorageError;

/// Errors surfaced by the lease workflows to the user.
#[derive(Debug, thiserror::Error)]
pub enum GarageError {
    /// The form contents were rejected; nothing was written.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// The store refused the write.
    #[error("could not save: {0}")]
    PersistenceFailure(#[source] StorageError),

    /// A widget selection pointed past the end of the vehicle list.
    #[error("no vehicle at position {0}")]
    NoSuchVehicle(usize),
}

impl GarageError {
    /// Returns `true` for errors the user can fix by editing the form.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
