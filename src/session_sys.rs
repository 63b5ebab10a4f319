use serde_json::{json, Value as JsonValue};

use crate::export_sys::{self, Export};
use crate::geocode_sys::{CityTableGeocoder, Geocoder};
use crate::notify_sys::Notifier;
use crate::repo_sys::ReportRepository;
use crate::report::{DisasterType, Severity};
use crate::store_sys::{open_store, FlatStore, RecordStore};
use crate::view_sys::{Projections, ReportFilter};


/// One dashboard session: the repository, its three projections, the
/// notification queue and the geocoder, wired so that every user action runs
/// repository mutation -> durable write-through -> projection update -> notify.
pub struct DashboardSession {
    repo: ReportRepository,
    views: Projections,
    notifier: Notifier,
    geocoder: Box<dyn Geocoder + Send>,
}

impl DashboardSession {
    pub fn open(db_path: &str, flat_path: &str) -> Self {
        let (store, fallback) = open_store(db_path, flat_path);
        let mut session = DashboardSession::with_parts(store, fallback, Box::new(CityTableGeocoder));
        session.load_all();
        session
    }

    pub fn with_parts(
        store: Box<dyn RecordStore>,
        fallback: FlatStore,
        geocoder: Box<dyn Geocoder + Send>,
    ) -> Self {
        DashboardSession {
            repo: ReportRepository::new(store, fallback),
            views: Projections::new(),
            notifier: Notifier::new(),
            geocoder,
        }
    }

    /// Loads the stored reports and rebuilds every projection from them.
    /// Safe to call again; the repository load is idempotent.
    pub fn load_all(&mut self) -> usize {
        let count = self.repo.load_all();
        let reports = self.repo.reports().to_vec();
        self.views.rebuild(&reports);

        info!("Loaded {} reports", count);
        count
    }

    /// Validates and creates a report from form input. Returns the new id.
    ///
    /// Coordinate resolution sits on the critical path: it must complete
    /// (or degrade to the default point) before the report exists anywhere.
    pub fn submit(
        &mut self,
        kind: &str,
        location: &str,
        severity: &str,
        description: &str,
    ) -> Result<i64, String> {
        let location = location.trim();

        let parsed = match (DisasterType::from_name(kind), Severity::from_name(severity)) {
            (Some(kind), Some(severity)) if !location.is_empty() => (kind, severity),
            _ => {
                let msg = "Please fill out all required fields.";
                self.notifier.error(msg);
                return Err(msg.into());
            }
        };

        let coordinates = self.geocoder.resolve(location);

        let report = self.repo.add(
            parsed.0,
            location.to_owned(),
            parsed.1,
            description.to_owned(),
            coordinates,
        );
        let id = report.id;
        let report = report.clone();

        self.views.add(&report);
        self.views.update_statistics(self.repo.reports());
        self.notifier.success("Disaster report submitted successfully!");

        Ok(id)
    }

    /// Deletes a report everywhere at once. Silently no-ops on unknown ids.
    pub fn delete(&mut self, id: i64) -> bool {
        if !self.repo.remove(id) {
            return false;
        }

        self.views.remove(id);
        self.views.update_statistics(self.repo.reports());
        self.notifier.success("Disaster report deleted successfully!");

        true
    }

    /// Detail payload for one report, looked up by id in the repository.
    pub fn detail_json(&self, id: i64) -> Option<JsonValue> {
        self.repo.get(id).map(|report| {
            json!({
                "id": report.id,
                "type": report.kind.label(),
                "location": report.location,
                "severity": report.severity.as_str(),
                "color": report.severity.color(),
                "description": report.description_or_default(),
                "reported": report.timestamp,
                "coordinates": [
                    round4(report.latitude()),
                    round4(report.longitude()),
                ],
            })
        })
    }

    pub fn set_filter(&mut self, kind: Option<&str>, severity: Option<&str>) {
        let filter = ReportFilter {
            kind: parse_filter(kind, DisasterType::from_name, "type"),
            severity: parse_filter(severity, Severity::from_name, "severity"),
        };

        self.views.set_filter(filter);
    }

    /// Exports one report or the whole sequence as CSV.
    pub fn export(&mut self, id: Option<i64>) -> Result<Export, String> {
        let result = match id {
            Some(id) => self.repo.get(id)
                .map(export_sys::export_single)
                .ok_or_else(|| "Report not found".to_owned()),
            None => export_sys::export_all(self.repo.reports()),
        };

        match &result {
            Ok(_) if id.is_some() => self.notifier.success("Report exported successfully!"),
            Ok(_) => self.notifier.success("Reports exported successfully!"),
            Err(err) => self.notifier.error(err.clone()),
        }

        result
    }

    pub fn query_by_kind(&mut self, kind: DisasterType) -> Vec<crate::report::Report> {
        self.repo.query_by_kind(kind)
    }

    pub fn query_by_severity(&mut self, severity: Severity) -> Vec<crate::report::Report> {
        self.repo.query_by_severity(severity)
    }

    pub fn table_json(&self) -> JsonValue {
        self.views.table_json()
    }

    pub fn map_json(&self) -> JsonValue {
        self.views.map_json()
    }

    pub fn statistics_json(&self) -> JsonValue {
        self.views.statistics_json()
    }

    pub fn notifications_json(&mut self) -> JsonValue {
        self.notifier.to_json()
    }

    #[cfg(test)]
    pub(crate) fn views(&self) -> &Projections {
        &self.views
    }

    #[cfg(test)]
    pub(crate) fn reports(&self) -> &[crate::report::Report] {
        self.repo.reports()
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// Empty means "no filter"; an unrecognized name degrades to the same,
// with a trace of what was dropped.
fn parse_filter<T>(name: Option<&str>, parse: fn(&str) -> Option<T>, what: &str) -> Option<T> {
    let name = name.filter(|s| !s.is_empty())?;

    let parsed = parse(name);
    if parsed.is_none() {
        warn!("Ignoring unknown {} filter: {}", what, name);
    }

    parsed
}
