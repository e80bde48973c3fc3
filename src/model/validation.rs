use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Longest lease term accepted, in months.
pub const MAX_LEASE_MONTHS: u32 = 120;

/// Reasons a vehicle draft is rejected before anything is saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is empty")]
    EmptyName,
    #[error("Allowed mileage is not a valid number")]
    AllowedNotANumber,
    #[error("Allowed mileage cannot be negative")]
    NegativeAllowedMileage,
    #[error("Fee is not a valid number")]
    FeeNotANumber,
    #[error("Fee cannot be negative")]
    NegativeFee,
    #[error("Starting mileage is not a valid number")]
    StartingNotANumber,
    #[error("Starting mileage should be larger than 0")]
    NegativeStartingMileage,
    #[error("Length of lease is not a valid number")]
    LeaseLengthNotANumber,
    #[error("Length of lease should be larger than 0")]
    LeaseLengthNotPositive,
    #[error("Sorry, a lease with a term longer than 10 years is not supported for now")]
    LeaseLengthTooLong,
    #[error("Please add a vehicle avatar")]
    MissingAvatar,
    #[error("Lease start date {0} is in the future")]
    StartDateInFuture(NaiveDate),
}

/// Parses an optional mileage figure. Empty input means 0 (unlimited).
pub fn parse_allowed_mileage(input: &str) -> Result<u64, ValidationError> {
    if input.is_empty() {
        return Ok(0);
    }
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::AllowedNotANumber)?;
    u64::try_from(value).map_err(|_| ValidationError::NegativeAllowedMileage)
}

/// Parses an optional overage fee. Empty input means 0 (unset).
///
/// Digit separators such as `1_000` are not numbers here.
pub fn parse_fee(input: &str) -> Result<Decimal, ValidationError> {
    if input.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if input.contains('_') {
        return Err(ValidationError::FeeNotANumber);
    }
    let fee: Decimal = input.parse().map_err(|_| ValidationError::FeeNotANumber)?;
    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(ValidationError::NegativeFee);
    }
    Ok(fee)
}

/// Parses the odometer reading at lease start.
pub fn parse_starting_mileage(input: &str) -> Result<u64, ValidationError> {
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::StartingNotANumber)?;
    u64::try_from(value).map_err(|_| ValidationError::NegativeStartingMileage)
}

/// Parses the lease term in months; must be in `1..=MAX_LEASE_MONTHS`.
pub fn parse_lease_length(input: &str) -> Result<u32, ValidationError> {
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::LeaseLengthNotANumber)?;
    match value {
        v if v <= 0 => Err(ValidationError::LeaseLengthNotPositive),
        v if v > i64::from(MAX_LEASE_MONTHS) => Err(ValidationError::LeaseLengthTooLong),
        // Bounded by MAX_LEASE_MONTHS above.
        v => Ok(v as u32),
    }
}

/// Rejects lease start dates after `today`.
pub fn validate_start_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date > today {
        Err(ValidationError::StartDateInFuture(date))
    } else {
        Ok(())
    }
}
