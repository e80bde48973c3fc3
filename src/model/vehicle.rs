use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::avatar::Avatar;
use super::currency::Currency;
use super::length_unit::LengthUnit;

/// One leased vehicle and its lease terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub starting_mileage: u64,
    /// Total mileage allowed over the lease; 0 means unlimited.
    pub allowed_mileage: u64,
    pub lease_length_months: u32,
    pub lease_start_date: NaiveDate,
    /// Fee per unit of distance over the allowance; 0 means unset.
    pub overage_fee: Decimal,
    pub avatar: Avatar,
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub currency: Currency,
    /// Whether this vehicle is the one rendered by the home-screen widget.
    #[serde(default)]
    pub show_on_widget: bool,
    #[serde(default)]
    pub removed: bool,
}

impl VehicleRecord {
    /// Returns `true` if the lease carries no mileage cap.
    pub fn is_unlimited(&self) -> bool {
        self.allowed_mileage == 0
    }

    /// Returns the last day of the lease term.
    ///
    /// Saturates at the latest representable date for absurd inputs.
    pub fn lease_end_date(&self) -> NaiveDate {
        self.lease_start_date
            .checked_add_months(chrono::Months::new(self.lease_length_months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns the mileage allowed per month of the lease, or `None` when unlimited.
    pub fn monthly_allowance(&self) -> Option<u64> {
        if self.is_unlimited() || self.lease_length_months == 0 {
            return None;
        }
        Some(self.allowed_mileage / u64::from(self.lease_length_months))
    }
}

/// What a save applies to: a brand-new vehicle or an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// The add-vehicle form: a new record is created on save.
    Creating,
    /// The edit form for an existing record, updated in place on save.
    Editing(VehicleRecord),
}

impl EditTarget {
    /// Returns the existing record when editing.
    pub fn existing(&self) -> Option<&VehicleRecord> {
        match self {
            Self::Creating => None,
            Self::Editing(record) => Some(record),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn unlimited_when_allowed_is_zero() {
        let mut r = record(0);
        assert!(!r.is_unlimited());
        r.allowed_mileage = 0;
        assert!(r.is_unlimited());
    }

    #[test]
    fn lease_end_date_adds_months() {
        let r = record(0);
        assert_eq!(
            r.lease_end_date(),
            NaiveDate::from_ymd_opt(2028, 6, 1).unwrap()
        );
    }

    #[test]
    fn monthly_allowance_divides_by_term() {
        assert_eq!(record(0).monthly_allowance(), Some(1_000));
    }

    #[test]
    fn monthly_allowance_none_when_unlimited() {
        let mut r = record(0);
        r.allowed_mileage = 0;
        assert_eq!(r.monthly_allowance(), None);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let r = record(0);
        let mut value = serde_json::to_value(&r).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("length_unit");
        obj.remove("currency");
        obj.remove("show_on_widget");
        obj.remove("removed");
        let back: VehicleRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.currency, Currency::Usd);
        assert_eq!(back.length_unit, LengthUnit::Imperial);
        assert!(!back.show_on_widget);
        assert!(!back.removed);
    }

    #[test]
    fn edit_target_existing() {
        assert!(EditTarget::Creating.existing().is_none());
        let r = record(1);
        assert_eq!(EditTarget::Editing(r.clone()).existing(), Some(&r));
    }
}
