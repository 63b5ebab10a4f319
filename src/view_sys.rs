use serde_json::{json, Value as JsonValue};

use crate::report::{DisasterType, Report, Severity};


/// Type + severity filter, combined with AND. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportFilter {
    pub kind: Option<DisasterType>,
    pub severity: Option<Severity>,
}

impl ReportFilter {
    pub fn matches(&self, kind: DisasterType, severity: Severity) -> bool {
        self.kind.map_or(true, |k| k == kind)
            && self.severity.map_or(true, |s| s == severity)
    }
}


struct TableRow {
    id: i64,
    kind: DisasterType,
    location: String,
    severity: Severity,
    description: String,
    visible: bool,
}

struct Marker {
    id: i64,
    kind: DisasterType,
    location: String,
    severity: Severity,
    description: String,
    timestamp: String,
    latitude: f64,
    longitude: f64,
    visible: bool,
}

#[derive(Default)]
struct Statistics {
    total: usize,
    kind_counts: Vec<(DisasterType, usize)>,
    severity_counts: Vec<(Severity, usize)>,
}


/// The three derived views of the report sequence: table rows, map markers
/// and aggregate statistics. Rows and markers are updated per mutation;
/// statistics are recomputed in full each time, which is fine at dashboard
/// report volumes.
pub struct Projections {
    rows: Vec<TableRow>,
    markers: Vec<Marker>,
    stats: Statistics,
    filter: ReportFilter,
}

impl Projections {
    pub fn new() -> Self {
        Projections {
            rows: Vec::new(),
            markers: Vec::new(),
            stats: Statistics::default(),
            filter: ReportFilter::default(),
        }
    }

    /// Adds the report's row and marker. Visibility honors the active filter.
    pub fn add(&mut self, report: &Report) {
        let visible = self.filter.matches(report.kind, report.severity);

        self.rows.push(TableRow {
            id: report.id,
            kind: report.kind,
            location: report.location.clone(),
            severity: report.severity,
            description: report.description.clone(),
            visible,
        });

        self.markers.push(Marker {
            id: report.id,
            kind: report.kind,
            location: report.location.clone(),
            severity: report.severity,
            description: report.description_or_default().to_owned(),
            timestamp: report.timestamp.clone(),
            latitude: report.latitude(),
            longitude: report.longitude(),
            visible,
        });
    }

    /// Drops the row and marker keyed by the report id.
    pub fn remove(&mut self, id: i64) {
        self.rows.retain(|row| row.id != id);
        self.markers.retain(|marker| marker.id != id);
    }

    /// Wholesale resynchronization, used only at load time.
    pub fn rebuild(&mut self, reports: &[Report]) {
        self.rows.clear();
        self.markers.clear();

        for report in reports {
            self.add(report);
        }

        self.update_statistics(reports);
    }

    /// Full recomputation of the aggregate counts from the current sequence.
    pub fn update_statistics(&mut self, reports: &[Report]) {
        self.stats = Statistics {
            total: reports.len(),
            kind_counts: DisasterType::ALL
                .iter()
                .map(|&k| (k, reports.iter().filter(|r| r.kind == k).count()))
                .collect(),
            severity_counts: Severity::ALL
                .iter()
                .map(|&s| (s, reports.iter().filter(|r| r.severity == s).count()))
                .collect(),
        };
    }

    /// Applies the filter to row and marker visibility. The underlying
    /// sequence is never touched; clearing the filter restores everything.
    pub fn set_filter(&mut self, filter: ReportFilter) {
        self.filter = filter;

        for row in &mut self.rows {
            row.visible = filter.matches(row.kind, row.severity);
        }
        for marker in &mut self.markers {
            marker.visible = filter.matches(marker.kind, marker.severity);
        }
    }

    pub fn filter(&self) -> ReportFilter {
        self.filter
    }

    pub fn visible_row_ids(&self) -> Vec<i64> {
        self.rows.iter().filter(|r| r.visible).map(|r| r.id).collect()
    }

    pub fn visible_marker_ids(&self) -> Vec<i64> {
        self.markers.iter().filter(|m| m.visible).map(|m| m.id).collect()
    }

    pub fn row_ids(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.id).collect()
    }

    pub fn marker_ids(&self) -> Vec<i64> {
        self.markers.iter().map(|m| m.id).collect()
    }

    pub fn table_json(&self) -> JsonValue {
        let rows = self.rows.iter().map(|row| {
            json!({
                "id": row.id,
                "type": row.kind.label(),
                "location": row.location,
                "severity": row.severity.as_str(),
                "color": row.severity.color(),
                "description": row.description,
                "visible": row.visible,
            })
        })
        .collect::<Vec<_>>();

        json!({
            "rows": rows,
            "size": rows.len(),
        })
    }

    pub fn map_json(&self) -> JsonValue {
        let markers = self.markers.iter().map(|marker| {
            json!({
                "id": marker.id,
                "latitude": marker.latitude,
                "longitude": marker.longitude,
                "visible": marker.visible,
                "popup": {
                    "title": marker.kind.label(),
                    "location": marker.location,
                    "severity": marker.severity.as_str(),
                    "color": marker.severity.color(),
                    "description": marker.description,
                    "reported": marker.timestamp,
                },
            })
        })
        .collect::<Vec<_>>();

        json!({
            "markers": markers,
            "size": markers.len(),
        })
    }

    pub fn statistics_json(&self) -> JsonValue {
        let percentage = |count: usize| {
            if self.stats.total == 0 {
                0.0
            } else {
                (count as f64 / self.stats.total as f64 * 1000.0).round() / 10.0
            }
        };

        json!({
            "total": self.stats.total,
            "types": self.stats.kind_counts.iter().map(|&(kind, count)| {
                json!({
                    "type": kind.as_str(),
                    "icon": kind.icon(),
                    "count": count,
                    "percentage": percentage(count),
                })
            }).collect::<Vec<_>>(),
            "severities": self.stats.severity_counts.iter().map(|&(severity, count)| {
                json!({
                    "severity": severity.as_str(),
                    "color": severity.color(),
                    "count": count,
                    "percentage": percentage(count),
                })
            }).collect::<Vec<_>>(),
        })
    }

    pub fn kind_count(&self, kind: DisasterType) -> usize {
        self.stats.kind_counts.iter()
            .find(|&&(k, _)| k == kind)
            .map(|&(_, c)| c)
            .unwrap_or(0)
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.stats.severity_counts.iter()
            .find(|&&(s, _)| s == severity)
            .map(|&(_, c)| c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.stats.total
    }
}
