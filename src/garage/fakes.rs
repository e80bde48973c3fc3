//! In-memory collaborators for workflow tests.

use std::cell::{Cell, RefCell};
use std::io;

use crate::model::VehicleRecord;
use crate::storage::{StorageError, VehicleRepository, WidgetRefresher};

/// Repository backed by a `Vec`, with switchable write failures.
#[derive(Default)]
pub(crate) struct MemoryRepo {
    pub(crate) records: RefCell<Vec<VehicleRecord>>,
    pub(crate) fail_writes: Cell<bool>,
    pub(crate) batch_writes: Cell<usize>,
}

impl MemoryRepo {
    pub(crate) fn with(records: Vec<VehicleRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        let repo = Self::default();
        repo.fail_writes.set(true);
        repo
    }
}

impl VehicleRepository for MemoryRepo {
    fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StorageError> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, record: &VehicleRecord) -> Result<(), StorageError> {
        self.save_all(std::slice::from_ref(record))
    }

    fn save_all(&self, records: &[VehicleRecord]) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Io(io::Error::other("disk full")));
        }
        self.batch_writes.set(self.batch_writes.get() + 1);
        let mut all = self.records.borrow_mut();
        for record in records {
            match all.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => all.push(record.clone()),
            }
        }
        Ok(())
    }
}

/// Refresher that counts signals.
#[derive(Default)]
pub(crate) struct CountingRefresher {
    pub(crate) calls: Cell<usize>,
}

impl WidgetRefresher for CountingRefresher {
    fn reload_all(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}
