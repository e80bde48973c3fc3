use tracing::info;

use super::error::GarageError;
use crate::model::VehicleRecord;
use crate::storage::{VehicleRepository, WidgetRefresher};

/// Picks the vehicle the settings picker starts on.
///
/// The marked vehicle if there is one, otherwise the first vehicle, or
/// `None` for an empty collection.
pub fn initial_widget_selection(records: &[VehicleRecord]) -> Option<usize> {
    records
        .iter()
        .position(|r| r.show_on_widget)
        .or(if records.is_empty() { None } else { Some(0) })
}

/// Returns a copy of `records` with only the vehicle at `index` marked for the widget.
pub fn mark_widget_vehicle(
    records: &[VehicleRecord],
    index: usize,
) -> Result<Vec<VehicleRecord>, GarageError> {
    if index >= records.len() {
        return Err(GarageError::NoSuchVehicle(index));
    }
    Ok(records
        .iter()
        .enumerate()
        .map(|(i, r)| VehicleRecord {
            show_on_widget: i == index,
            ..r.clone()
        })
        .collect())
}

/// Marks the vehicle at `index` for the widget, persists the whole collection
/// in one write, then signals the widget once.
///
/// On a store failure nothing is refreshed and the error is returned; the
/// caller's view of the selection is left as it is.
pub fn select_widget_vehicle<R, W>(
    repo: &R,
    refresher: &W,
    records: &[VehicleRecord],
    index: usize,
) -> Result<Vec<VehicleRecord>, GarageError>
where
    R: VehicleRepository + ?Sized,
    W: WidgetRefresher + ?Sized,
{
    let marked = mark_widget_vehicle(records, index)?;
    repo.save_all(&marked)
        .map_err(GarageError::PersistenceFailure)?;
    refresher.reload_all();

    info!(id = %marked[index].id, name = %marked[index].name, "widget vehicle changed");
    Ok(marked)
}
