//! TUI screen implementations.

pub mod help;
pub mod settings;
pub mod vehicle_edit;
pub mod vehicle_list;

pub use help::{HelpState, draw_help};
pub use settings::{SettingsState, draw_settings};
pub use vehicle_edit::{VehicleEditState, draw_vehicle_edit};
pub use vehicle_list::{VehicleListState, draw_vehicle_list};
