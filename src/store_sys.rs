use std::fs;
use std::path::{Path, PathBuf};

use crate::db::models::DisasterRow;
use crate::db::DbStore;
use crate::report::{DisasterType, Report, Severity};
use crate::util;


pub type StoreResult<T> = Result<T, String>;


/// Durable keyed storage for dashboard reports.
///
/// Two interchangeable implementations exist: the structured sqlite store and
/// the flat whole-blob file. Which one backs a session is decided once, at
/// `open_store` time; the query operations return `Ok(None)` when the backend
/// has no index to serve them.
pub trait RecordStore: Send {
    fn load_all(&mut self) -> StoreResult<Vec<Report>>;
    fn insert(&mut self, report: &Report) -> StoreResult<()>;
    fn delete(&mut self, id: i64) -> StoreResult<()>;
    fn replace_all(&mut self, reports: &[Report]) -> StoreResult<()>;

    fn query_by_kind(&mut self, kind: DisasterType) -> StoreResult<Option<Vec<Report>>>;
    fn query_by_severity(&mut self, severity: Severity) -> StoreResult<Option<Vec<Report>>>;
}


fn rows_into_reports(rows: Vec<DisasterRow>) -> Vec<Report> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            let report = row.into_report();
            if report.is_none() {
                warn!("Skipping stored report {} with unknown type or severity", id);
            }
            report
        })
        .collect()
}

impl RecordStore for DbStore {
    fn load_all(&mut self) -> StoreResult<Vec<Report>> {
        self.load_rows()
            .map(rows_into_reports)
            .map_err(|err| err.to_string())
    }

    fn insert(&mut self, report: &Report) -> StoreResult<()> {
        self.insert_row(&DisasterRow::from_report(report))
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn delete(&mut self, id: i64) -> StoreResult<()> {
        self.delete_row(id)
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn replace_all(&mut self, reports: &[Report]) -> StoreResult<()> {
        let rows = reports.iter().map(DisasterRow::from_report).collect::<Vec<_>>();
        self.replace_rows(&rows)
            .map(|_| ())
            .map_err(|err| err.to_string())
    }

    fn query_by_kind(&mut self, kind: DisasterType) -> StoreResult<Option<Vec<Report>>> {
        self.rows_by_kind(kind.as_str())
            .map(|rows| Some(rows_into_reports(rows)))
            .map_err(|err| err.to_string())
    }

    fn query_by_severity(&mut self, severity: Severity) -> StoreResult<Option<Vec<Report>>> {
        self.rows_by_severity(severity.as_str())
            .map(|rows| Some(rows_into_reports(rows)))
            .map_err(|err| err.to_string())
    }
}


/// Flat fallback store: the full report list as one JSON blob,
/// rewritten in full on every mutation.
#[derive(Clone)]
pub struct FlatStore {
    path: PathBuf,
}

impl FlatStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FlatStore { path: path.as_ref().to_owned() }
    }

    fn read_blob(&self) -> StoreResult<Vec<Report>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|err| err.to_string())?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|err| err.to_string())
    }

    fn write_blob(&self, reports: &[Report]) -> StoreResult<()> {
        let text = serde_json::to_string(reports).map_err(|err| err.to_string())?;

        // Write to a scratch file first so a failed write keeps the old blob.
        let tmp = self.path.with_extension(format!("tmp-{}", util::generate_rand_id(8)));
        fs::write(&tmp, text).map_err(|err| err.to_string())?;
        fs::rename(&tmp, &self.path).map_err(|err| err.to_string())
    }
}

impl RecordStore for FlatStore {
    fn load_all(&mut self) -> StoreResult<Vec<Report>> {
        self.read_blob()
    }

    fn insert(&mut self, report: &Report) -> StoreResult<()> {
        let mut reports = self.read_blob()?;
        reports.push(report.clone());
        self.write_blob(&reports)
    }

    fn delete(&mut self, id: i64) -> StoreResult<()> {
        let mut reports = self.read_blob()?;
        reports.retain(|r| r.id != id);
        self.write_blob(&reports)
    }

    fn replace_all(&mut self, reports: &[Report]) -> StoreResult<()> {
        self.write_blob(reports)
    }

    fn query_by_kind(&mut self, _kind: DisasterType) -> StoreResult<Option<Vec<Report>>> {
        Ok(None)
    }

    fn query_by_severity(&mut self, _severity: Severity) -> StoreResult<Option<Vec<Report>>> {
        Ok(None)
    }
}


/// Opens the structured store, falling back to the flat blob when it is
/// unreachable. Returns the selected store plus the flat handle kept around
/// for compensating rewrites.
///
/// Reconciliation rule: the structured store wins. When it opens empty while
/// the flat blob has records, the blob is migrated into it.
pub fn open_store(db_path: &str, flat_path: &str) -> (Box<dyn RecordStore>, FlatStore) {
    let fallback = FlatStore::new(flat_path);

    match DbStore::open(db_path) {
        Ok(mut store) => {
            migrate_flat_blob(&mut store, &fallback);
            (Box::new(store), fallback)
        }
        Err(err) => {
            warn!("Fail to open record store: {}; using flat store", err);
            (Box::new(fallback.clone()), fallback)
        }
    }
}

fn migrate_flat_blob(store: &mut DbStore, fallback: &FlatStore) {
    let empty = match store.load_all() {
        Ok(reports) => reports.is_empty(),
        Err(err) => {
            warn!("Fail to read record store during migration check: {}", err);
            return;
        }
    };

    if !empty {
        return;
    }

    match fallback.read_blob() {
        Ok(reports) if !reports.is_empty() => {
            match store.replace_all(&reports) {
                Ok(_) => info!("Migrated {} reports from flat store", reports.len()),
                Err(err) => warn!("Fail to migrate flat store: {}", err),
            }
        }
        Ok(_) => (),
        Err(err) => warn!("Fail to read flat store: {}", err),
    }
}
