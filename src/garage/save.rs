use chrono::{DateTime, Local, Utc};
use tracing::info;

use super::error::GarageError;
use crate::model::{EditTarget, VehicleDraft, VehicleRecord};
use crate::storage::{VehicleRepository, WidgetRefresher};

/// Validates `draft` and writes the resulting record for `target`.
///
/// Validation completes before anything is touched, so a rejected draft
/// leaves the store unchanged. Returns the record as stored.
pub fn save_vehicle<R>(
    repo: &R,
    draft: &VehicleDraft,
    target: EditTarget,
    now: DateTime<Local>,
) -> Result<VehicleRecord, GarageError>
where
    R: VehicleRepository + ?Sized,
{
    let valid = draft.validate(now.date_naive())?;
    let creating = matches!(target, EditTarget::Creating);
    let record = valid.into_record(target, now.with_timezone(&Utc));

    repo.save(&record).map_err(GarageError::PersistenceFailure)?;

    if creating {
        info!(id = %record.id, name = %record.name, "vehicle added");
    } else {
        info!(id = %record.id, name = %record.name, "vehicle updated");
    }
    Ok(record)
}

/// Soft-deletes `record`: marks it removed and takes it off the widget.
///
/// The widget is told to refresh only when the removed vehicle was on it.
pub fn remove_vehicle<R, W>(
    repo: &R,
    refresher: &W,
    record: &VehicleRecord,
) -> Result<VehicleRecord, GarageError>
where
    R: VehicleRepository + ?Sized,
    W: WidgetRefresher + ?Sized,
{
    let was_on_widget = record.show_on_widget;
    let removed = VehicleRecord {
        removed: true,
        show_on_widget: false,
        ..record.clone()
    };

    repo.save(&removed).map_err(GarageError::PersistenceFailure)?;
    info!(id = %removed.id, name = %removed.name, "vehicle removed");

    if was_on_widget {
        refresher.reload_all();
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::garage::fakes::{CountingRefresher, MemoryRepo};
    use crate::model::fixtures::record;
    use crate::model::{Avatar, Currency, LengthUnit, ValidationError};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn valid_draft() -> VehicleDraft {
        VehicleDraft {
            name: "My car".into(),
            starting: "20".into(),
            allowed: "30000".into(),
            lease_length: "36".into(),
            fee: "0.25".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            length_unit: LengthUnit::Imperial,
            currency: Currency::Usd,
            avatar: Some(Avatar::new(vec![1, 2, 3])),
        }
    }

    mod save {
        use super::*;

        #[test]
        fn creating_stores_parsed_record() {
            let repo = MemoryRepo::default();
            let saved = save_vehicle(&repo, &valid_draft(), EditTarget::Creating, now()).unwrap();

            let stored = repo.fetch_all().unwrap();
            assert_eq!(stored, vec![saved.clone()]);
            assert_eq!(saved.name, "My car");
            assert_eq!(saved.starting_mileage, 20);
            assert_eq!(saved.allowed_mileage, 30_000);
            assert_eq!(saved.lease_length_months, 36);
            assert_eq!(saved.overage_fee.to_string(), "0.25");
            assert_eq!(saved.created_at, now().with_timezone(&Utc));
            assert!(!saved.removed);
        }

        #[test]
        fn editing_updates_in_place() {
            let existing = record(1);
            let repo = MemoryRepo::with(vec![existing.clone(), record(2)]);

            let mut draft = VehicleDraft::from_record(&existing);
            draft.name = "Renamed".into();
            let saved =
                save_vehicle(&repo, &draft, EditTarget::Editing(existing.clone()), now()).unwrap();

            assert_eq!(saved.id, existing.id);
            let stored = repo.fetch_all().unwrap();
            assert_eq!(stored.len(), 2);
            assert_eq!(stored[0].name, "Renamed");
        }

        #[test]
        fn editing_restores_removed_record() {
            let mut existing = record(1);
            existing.removed = true;
            let repo = MemoryRepo::with(vec![existing.clone()]);

            let draft = VehicleDraft::from_record(&existing);
            let saved = save_vehicle(&repo, &draft, EditTarget::Editing(existing), now()).unwrap();
            assert!(!saved.removed);
        }

        #[test]
        fn empty_allowed_saves_as_zero() {
            let repo = MemoryRepo::default();
            let mut draft = valid_draft();
            draft.allowed.clear();
            let saved = save_vehicle(&repo, &draft, EditTarget::Creating, now()).unwrap();
            assert_eq!(saved.allowed_mileage, 0);
        }

        #[test]
        fn invalid_lease_lengths_rejected_without_writing() {
            for input in ["0", "-1", "121"] {
                let repo = MemoryRepo::default();
                let mut draft = valid_draft();
                draft.lease_length = input.into();
                let err = save_vehicle(&repo, &draft, EditTarget::Creating, now()).unwrap_err();
                assert!(
                    matches!(
                        err,
                        GarageError::InvalidInput(
                            ValidationError::LeaseLengthNotPositive
                                | ValidationError::LeaseLengthTooLong
                        )
                    ),
                    "lease {input:?} gave {err:?}"
                );
                assert!(repo.records.borrow().is_empty());
                assert_eq!(repo.batch_writes.get(), 0);
            }
        }

        #[test]
        fn negative_starting_rejected() {
            let repo = MemoryRepo::default();
            let mut draft = valid_draft();
            draft.starting = "-5".into();
            let err = save_vehicle(&repo, &draft, EditTarget::Creating, now()).unwrap_err();
            assert!(matches!(
                err,
                GarageError::InvalidInput(ValidationError::NegativeStartingMileage)
            ));
        }

        #[test]
        fn missing_avatar_rejected() {
            let repo = MemoryRepo::default();
            let mut draft = valid_draft();
            draft.avatar = None;
            let err = save_vehicle(&repo, &draft, EditTarget::Creating, now()).unwrap_err();
            assert!(matches!(
                err,
                GarageError::InvalidInput(ValidationError::MissingAvatar)
            ));
            assert_eq!(err.to_string(), "Please add a vehicle avatar");
        }

        #[test]
        fn rejected_edit_leaves_record_untouched() {
            let existing = record(1);
            let repo = MemoryRepo::with(vec![existing.clone()]);
            let mut draft = VehicleDraft::from_record(&existing);
            draft.name = "Renamed".into();
            draft.fee = "free".into();

            let err = save_vehicle(&repo, &draft, EditTarget::Editing(existing.clone()), now())
                .unwrap_err();
            assert!(err.is_invalid_input());
            assert_eq!(repo.fetch_all().unwrap(), vec![existing]);
        }

        #[test]
        fn store_failure_is_persistence_failure() {
            let repo = MemoryRepo::failing();
            let err = save_vehicle(&repo, &valid_draft(), EditTarget::Creating, now()).unwrap_err();
            assert!(matches!(err, GarageError::PersistenceFailure(_)));
            assert!(!err.is_invalid_input());
        }
    }

    mod round_trip {
        use quickcheck::TestResult;
        use quickcheck_macros::quickcheck;
        use tempfile::tempdir;

        use super::*;
        use crate::storage::VehicleStore;

        #[quickcheck]
        fn any_valid_draft_reads_back(
            name: String,
            starting: u32,
            lease: u8,
            allowed: Option<u32>,
        ) -> TestResult {
            if name.is_empty() {
                return TestResult::discard();
            }
            let lease_months = u32::from(lease) % 120 + 1;
            let draft = VehicleDraft {
                name: name.clone(),
                starting: starting.to_string(),
                allowed: allowed.map(|a| a.to_string()).unwrap_or_default(),
                lease_length: lease_months.to_string(),
                ..valid_draft()
            };

            let dir = tempdir().unwrap();
            let store = VehicleStore::open(dir.path()).unwrap();
            let saved = match save_vehicle(&store, &draft, EditTarget::Creating, now()) {
                Ok(saved) => saved,
                Err(e) => return TestResult::error(format!("rejected: {e}")),
            };

            TestResult::from_bool(
                store.fetch_all().unwrap() == vec![saved.clone()]
                    && saved.name == name
                    && saved.starting_mileage == u64::from(starting)
                    && saved.allowed_mileage == u64::from(allowed.unwrap_or(0))
                    && saved.lease_length_months == lease_months,
            )
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn marks_removed_and_keeps_record() {
            let r = record(1);
            let repo = MemoryRepo::with(vec![r.clone()]);
            let refresher = CountingRefresher::default();

            let removed = remove_vehicle(&repo, &refresher, &r).unwrap();
            assert!(removed.removed);
            assert_eq!(repo.fetch_all().unwrap(), vec![removed]);
            assert_eq!(refresher.calls.get(), 0);
        }

        #[test]
        fn widget_vehicle_is_unmarked_and_refreshed() {
            let mut r = record(1);
            r.show_on_widget = true;
            let repo = MemoryRepo::with(vec![r.clone()]);
            let refresher = CountingRefresher::default();

            let removed = remove_vehicle(&repo, &refresher, &r).unwrap();
            assert!(!removed.show_on_widget);
            assert_eq!(refresher.calls.get(), 1);
        }

        #[test]
        fn store_failure_does_not_refresh() {
            let mut r = record(1);
            r.show_on_widget = true;
            let repo = MemoryRepo::failing();
            let refresher = CountingRefresher::default();

            let err = remove_vehicle(&repo, &refresher, &r).unwrap_err();
            assert!(matches!(err, GarageError::PersistenceFailure(_)));
            assert_eq!(refresher.calls.get(), 0);
        }
    }
}
