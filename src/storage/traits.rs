//! Seams between the lease workflows and their external collaborators.

use super::error::StorageError;
use crate::model::VehicleRecord;

/// Persistent collection of vehicle records.
pub trait VehicleRepository {
    /// Returns every stored record, removed ones included, oldest first.
    fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StorageError>;

    /// Inserts or replaces a single record, matched by ID.
    fn save(&self, record: &VehicleRecord) -> Result<(), StorageError>;

    /// Inserts or replaces several records in one write.
    ///
    /// Either every record is stored or none is.
    fn save_all(&self, records: &[VehicleRecord]) -> Result<(), StorageError>;
}

/// Tells the home-screen widget to redraw from the store.
pub trait WidgetRefresher {
    /// Fire-and-forget; failures are the implementation's concern.
    fn reload_all(&self);
}
