use super::schema::{disasters, reports};

use crate::report::{DisasterType, Report, Severity};


/// A dashboard report as stored in the `disasters` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = disasters)]
pub struct DisasterRow {
    pub id: i64,
    pub kind: String,
    pub location: String,
    pub severity: String,
    pub description: String,
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DisasterRow {
    pub fn from_report(report: &Report) -> Self {
        DisasterRow {
            id: report.id,
            kind: report.kind.as_str().to_owned(),
            location: report.location.clone(),
            severity: report.severity.as_str().to_owned(),
            description: report.description.clone(),
            timestamp: report.timestamp.clone(),
            latitude: report.latitude(),
            longitude: report.longitude(),
        }
    }

    /// Returns `None` when the stored type or severity name is unknown.
    pub fn into_report(self) -> Option<Report> {
        let kind = DisasterType::from_name(&self.kind)?;
        let severity = Severity::from_name(&self.severity)?;

        Some(Report {
            id: self.id,
            kind,
            location: self.location,
            severity,
            description: self.description,
            timestamp: self.timestamp,
            coordinates: [self.latitude, self.longitude],
        })
    }
}


/// A row of the collaborator's append-only report log.
#[derive(Debug, Clone, Queryable)]
pub struct LogReport {
    pub id: i32,
    pub kind: String,
    pub location: String,
    pub severity: String,
    pub description: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub struct NewLogReport {
    pub kind: String,
    pub location: String,
    pub severity: String,
    pub description: String,
}
