//! Transient add/edit form state and its conversion into a [`VehicleRecord`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::avatar::Avatar;
use super::currency::Currency;
use super::length_unit::LengthUnit;
use super::validation::{
    ValidationError, parse_allowed_mileage, parse_fee, parse_lease_length,
    parse_starting_mileage, validate_start_date,
};
use super::vehicle::{EditTarget, VehicleRecord};

/// Raw values bound to the vehicle form, exactly as the user typed them.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub name: String,
    pub starting: String,
    pub allowed: String,
    pub lease_length: String,
    pub fee: String,
    pub start_date: NaiveDate,
    pub length_unit: LengthUnit,
    pub currency: Currency,
    pub avatar: Option<Avatar>,
}

impl VehicleDraft {
    /// Creates an empty draft for the add-vehicle form.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            starting: String::new(),
            allowed: String::new(),
            lease_length: String::new(),
            fee: String::new(),
            start_date: today,
            length_unit: LengthUnit::default(),
            currency: Currency::default(),
            avatar: None,
        }
    }

    /// Pre-fills a draft from an existing record.
    ///
    /// Allowance and fee use 0 for "unset", so they come back as empty strings.
    pub fn from_record(record: &VehicleRecord) -> Self {
        let allowed = if record.allowed_mileage == 0 {
            String::new()
        } else {
            record.allowed_mileage.to_string()
        };
        let fee = if record.overage_fee.is_zero() {
            String::new()
        } else {
            record.overage_fee.normalize().to_string()
        };
        Self {
            name: record.name.clone(),
            starting: record.starting_mileage.to_string(),
            allowed,
            lease_length: record.lease_length_months.to_string(),
            fee,
            start_date: record.lease_start_date,
            length_unit: record.length_unit,
            currency: record.currency,
            avatar: Some(record.avatar.clone()),
        }
    }

    /// Creates the draft matching an [`EditTarget`].
    pub fn for_target(target: &EditTarget, today: NaiveDate) -> Self {
        match target {
            EditTarget::Creating => Self::new(today),
            EditTarget::Editing(record) => Self::from_record(record),
        }
    }

    /// Coarse precondition for enabling the save key.
    ///
    /// Full validation still happens in [`validate`](Self::validate).
    pub fn can_attempt_save(&self) -> bool {
        !self.name.is_empty()
            && self.avatar.is_some()
            && !self.starting.is_empty()
            && !self.lease_length.is_empty()
    }

    /// Validates every field; the first failing rule is returned.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidVehicle, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let allowed_mileage = parse_allowed_mileage(&self.allowed)?;
        let overage_fee = parse_fee(&self.fee)?;
        let starting_mileage = parse_starting_mileage(&self.starting)?;
        let lease_length_months = parse_lease_length(&self.lease_length)?;
        let avatar = self.avatar.clone().ok_or(ValidationError::MissingAvatar)?;
        validate_start_date(self.start_date, today)?;

        Ok(ValidVehicle {
            name: self.name.clone(),
            starting_mileage,
            allowed_mileage,
            lease_length_months,
            lease_start_date: self.start_date,
            overage_fee,
            avatar,
            length_unit: self.length_unit,
            currency: self.currency,
        })
    }
}

/// Fully parsed vehicle fields, ready to be written into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidVehicle {
    pub name: String,
    pub starting_mileage: u64,
    pub allowed_mileage: u64,
    pub lease_length_months: u32,
    pub lease_start_date: NaiveDate,
    pub overage_fee: Decimal,
    pub avatar: Avatar,
    pub length_unit: LengthUnit,
    pub currency: Currency,
}

impl ValidVehicle {
    /// Builds the record to persist for `target`.
    ///
    /// Editing keeps the record's identity, creation time and widget flag.
    /// The result is never marked removed.
    pub fn into_record(self, target: EditTarget, now: DateTime<Utc>) -> VehicleRecord {
        let (id, created_at, show_on_widget) = match target {
            EditTarget::Creating => (Uuid::new_v4(), now, false),
            EditTarget::Editing(existing) => {
                (existing.id, existing.created_at, existing.show_on_widget)
            }
        };
        VehicleRecord {
            id,
            created_at,
            name: self.name,
            starting_mileage: self.starting_mileage,
            allowed_mileage: self.allowed_mileage,
            lease_length_months: self.lease_length_months,
            lease_start_date: self.lease_start_date,
            overage_fee: self.overage_fee,
            avatar: self.avatar,
            length_unit: self.length_unit,
            currency: self.currency,
            show_on_widget,
            removed: false,
        }
    }
}
