//! Actions returned by screen event handlers.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::model::{EditTarget, VehicleDraft, VehicleRecord};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to run workflows against the store and to
/// navigate between screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Open an empty add-vehicle form.
    AddVehicle,
    /// Open the edit form for an existing vehicle.
    EditVehicle(VehicleRecord),
    /// Read a vehicle photo from the given file.
    LoadAvatar(PathBuf),
    /// Validate and persist the form contents.
    SaveVehicle {
        draft: VehicleDraft,
        target: EditTarget,
    },
    /// Soft-delete the given vehicle.
    RemoveVehicle(VehicleRecord),
    /// Show the vehicle at this position of the settings list on the widget.
    SetWidgetVehicle(usize),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
