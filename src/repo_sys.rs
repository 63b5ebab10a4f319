use chrono::{Local, Utc};

use crate::report::{DisasterType, Report, Severity};
use crate::store_sys::{FlatStore, RecordStore};


/// Canonical in-memory sequence of reports for the active session.
///
/// Mutations update the sequence first and write through to the record store
/// afterwards; a durable failure never rolls the sequence back, it only
/// triggers a compensating rewrite of the flat blob.
pub struct ReportRepository {
    reports: Vec<Report>,
    store: Box<dyn RecordStore>,
    fallback: FlatStore,
    last_id: i64,
    loaded: bool,
}

impl ReportRepository {
    pub fn new(store: Box<dyn RecordStore>, fallback: FlatStore) -> Self {
        ReportRepository {
            reports: Vec::new(),
            store,
            fallback,
            last_id: 0,
            loaded: false,
        }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: i64) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Populates the sequence from the record store. Idempotent: a second
    /// call leaves the sequence untouched.
    pub fn load_all(&mut self) -> usize {
        if self.loaded {
            return self.reports.len();
        }

        self.reports = match self.store.load_all() {
            Ok(reports) => reports,
            Err(err) => {
                warn!("Fail to load record store: {}; reading flat store", err);
                self.fallback.load_all().unwrap_or_else(|err| {
                    warn!("Fail to load flat store: {}", err);
                    Vec::new()
                })
            }
        };

        self.last_id = self.reports.iter().map(|r| r.id).max().unwrap_or(0);
        self.loaded = true;

        self.reports.len()
    }

    /// Assigns an id and timestamp, appends, and writes through.
    pub fn add(
        &mut self,
        kind: DisasterType,
        location: String,
        severity: Severity,
        description: String,
        coordinates: (f64, f64),
    ) -> &Report {
        let report = Report {
            id: self.next_id(),
            kind,
            location,
            severity,
            description,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            coordinates: [coordinates.0, coordinates.1],
        };

        self.reports.push(report);
        let report = self.reports.last().unwrap();

        if let Err(err) = self.store.insert(report) {
            warn!("Fail to insert report {}: {}", report.id, err);
            self.compensate();
        }

        self.reports.last().unwrap()
    }

    /// Removes the report with the given id. A no-op when the id is absent.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.id != id);

        if self.reports.len() == before {
            return false;
        }

        if let Err(err) = self.store.delete(id) {
            warn!("Fail to delete report {}: {}", id, err);
            self.compensate();
        }

        true
    }

    /// Read-only filter by type; indexed store lookup when available,
    /// linear scan otherwise.
    pub fn query_by_kind(&mut self, kind: DisasterType) -> Vec<Report> {
        match self.store.query_by_kind(kind) {
            Ok(Some(reports)) => reports,
            Ok(None) => self.scan(|r| r.kind == kind),
            Err(err) => {
                warn!("Fail to query store by type: {}", err);
                self.scan(|r| r.kind == kind)
            }
        }
    }

    /// Read-only filter by severity; same lookup preference as by type.
    pub fn query_by_severity(&mut self, severity: Severity) -> Vec<Report> {
        match self.store.query_by_severity(severity) {
            Ok(Some(reports)) => reports,
            Ok(None) => self.scan(|r| r.severity == severity),
            Err(err) => {
                warn!("Fail to query store by severity: {}", err);
                self.scan(|r| r.severity == severity)
            }
        }
    }

    fn scan<F: Fn(&Report) -> bool>(&self, pred: F) -> Vec<Report> {
        self.reports.iter().filter(|r| pred(r)).cloned().collect()
    }

    // Ids derive from creation time but must stay unique and never be
    // reused, so two adds within one millisecond still get distinct ids.
    fn next_id(&mut self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        if id <= self.last_id {
            id = self.last_id + 1;
        }

        self.last_id = id;
        id
    }

    // Full flat-blob rewrite from the authoritative sequence, so a failed
    // durable write does not silently lose data.
    fn compensate(&mut self) {
        if let Err(err) = self.fallback.replace_all(&self.reports) {
            warn!("Fail to rewrite flat store: {}", err);
        }
    }
}
