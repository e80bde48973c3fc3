use std::fs;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use super::error::StorageError;
use super::traits::VehicleRepository;
use crate::model::VehicleRecord;

/// File name of the vehicle collection inside the data directory.
const VEHICLES_FILE: &str = "vehicles.jsonl";

/// Manages JSONL-based vehicle persistence.
///
/// The collection is stored as a single `vehicles.jsonl` file with one
/// [`VehicleRecord`] per line. A missing file is an empty collection.
pub struct VehicleStore {
    path: PathBuf,
}

impl VehicleStore {
    /// Opens the store in `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(VEHICLES_FILE),
        })
    }

    /// Returns the path of the backing JSONL file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists vehicles that have not been soft-deleted, oldest first.
    pub fn fetch_active(&self) -> Result<Vec<VehicleRecord>, StorageError> {
        let mut records = self.fetch_all()?;
        records.retain(|r| !r.removed);
        Ok(records)
    }

    /// Loads a single vehicle by ID, removed or not.
    pub fn load_vehicle(&self, id: Uuid) -> Result<VehicleRecord, StorageError> {
        self.read_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StorageError::VehicleNotFound(id))
    }

    /// Reads every line of the collection file in file order.
    fn read_all(&self) -> Result<Vec<VehicleRecord>, StorageError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        BufReader::new(file)
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(StorageError::Json)
            })
            .collect()
    }

    /// Replaces the collection file with `records`.
    ///
    /// Writes to a sibling temporary file, syncs it to disk, then renames it
    /// over the original.
    fn write_all(&self, records: &[VehicleRecord]) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp_path)?);
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(count = records.len(), path = %self.path.display(), "wrote vehicle store");
        Ok(())
    }
}

impl VehicleRepository for VehicleStore {
    fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StorageError> {
        let mut records = self.read_all()?;
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    fn save(&self, record: &VehicleRecord) -> Result<(), StorageError> {
        self.save_all(std::slice::from_ref(record))
    }

    fn save_all(&self, records: &[VehicleRecord]) -> Result<(), StorageError> {
        let mut all = self.read_all()?;
        for record in records {
            match all.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => all.push(record.clone()),
            }
        }
        self.write_all(&all)
    }
}
