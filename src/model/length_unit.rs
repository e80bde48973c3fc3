use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit used to display and enter mileage for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    Imperial,
    Metric,
}

impl LengthUnit {
    /// Returns the name shown in the unit picker.
    pub fn long_name(&self) -> &'static str {
        match self {
            LengthUnit::Imperial => "Miles",
            LengthUnit::Metric => "Kilometers",
        }
    }

    /// Returns the abbreviation used next to mileage figures.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LengthUnit::Imperial => "mi",
            LengthUnit::Metric => "km",
        }
    }

    /// Returns the next unit in picker order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            LengthUnit::Imperial => LengthUnit::Metric,
            LengthUnit::Metric => LengthUnit::Imperial,
        }
    }
}

#[mutants::skip]
impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}
