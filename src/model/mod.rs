mod avatar;
mod currency;
mod draft;
mod length_unit;
mod validation;
mod vehicle;

pub use avatar::Avatar;
pub use currency::Currency;
pub use draft::{ValidVehicle, VehicleDraft};
pub use length_unit::LengthUnit;
pub use validation::{
    MAX_LEASE_MONTHS, ValidationError, parse_allowed_mileage, parse_fee, parse_lease_length,
    parse_starting_mileage, validate_start_date,
};
pub use vehicle::{EditTarget, VehicleRecord};

#[cfg(test)]
pub(crate) use vehicle::fixtures;
