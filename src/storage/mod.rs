//! Vehicle persistence (JSONL), photo loading, and widget refresh signalling.
//!
//! All vehicles live in one `vehicles.jsonl` file, one record per line.
//! Every write rewrites a temporary file and renames it into place, so a
//! batch of records is applied as a unit.

mod avatar;
mod error;
mod refresh;
mod store;
mod traits;

pub use avatar::{AVATAR_EDGE, MAX_AVATAR_BYTES, load_avatar};
pub use error::StorageError;
pub use refresh::StampFileRefresher;
pub use store::VehicleStore;
pub use traits::{VehicleRepository, WidgetRefresher};
