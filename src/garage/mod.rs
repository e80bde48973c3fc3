//! Lease workflows: saving and removing vehicles, and choosing the widget vehicle.

mod error;
mod save;
mod widget;

pub use error::GarageError;
pub use save::{remove_vehicle, save_vehicle};
pub use widget::{initial_widget_selection, mark_widget_vehicle, select_widget_vehicle};

#[cfg(test)]
pub(crate) mod fakes;
