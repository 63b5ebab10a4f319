use crate::report::Report;


pub const CSV_HEADER: &str = "Type,Location,Severity,Description,Timestamp,Latitude,Longitude";

pub const BULK_EXPORT_NAME: &str = "disaster_reports.csv";


/// A rendered CSV document and the file name to offer it under.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub filename: String,
    pub content: String,
}


// Free-text fields lose their commas so the column layout survives.
// Lossy but deterministic.
fn sanitize_field(text: &str) -> String {
    text.replace(',', " ")
}

fn csv_row(report: &Report) -> String {
    [
        report.kind.as_str().to_owned(),
        sanitize_field(&report.location),
        report.severity.as_str().to_owned(),
        sanitize_field(&report.description),
        report.timestamp.clone(),
        report.latitude().to_string(),
        report.longitude().to_string(),
    ]
    .join(",")
}

fn render(reports: &[Report]) -> String {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');

    for report in reports {
        content.push_str(&csv_row(report));
        content.push('\n');
    }

    content
}

/// Serializes one report, named after its id.
pub fn export_single(report: &Report) -> Export {
    Export {
        filename: format!("disaster_report_{}.csv", report.id),
        content: render(std::slice::from_ref(report)),
    }
}

/// Serializes the full sequence. An empty sequence is an error so the
/// caller can surface it instead of producing a header-only file.
pub fn export_all(reports: &[Report]) -> Result<Export, String> {
    if reports.is_empty() {
        return Err("No reports to export".into());
    }

    Ok(Export {
        filename: BULK_EXPORT_NAME.into(),
        content: render(reports),
    })
}
