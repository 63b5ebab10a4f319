use serde::{Deserialize, Serialize};


/// Kinds of disaster a user can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisasterType {
    Earthquake,
    Flood,
    Fire,
    Cyclone,
    Landslide,
}

impl DisasterType {
    pub const ALL: [DisasterType; 5] = [
        DisasterType::Earthquake,
        DisasterType::Flood,
        DisasterType::Fire,
        DisasterType::Cyclone,
        DisasterType::Landslide,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Earthquake" => Some(DisasterType::Earthquake),
            "Flood" => Some(DisasterType::Flood),
            "Fire" => Some(DisasterType::Fire),
            "Cyclone" => Some(DisasterType::Cyclone),
            "Landslide" => Some(DisasterType::Landslide),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "Earthquake",
            DisasterType::Flood => "Flood",
            DisasterType::Fire => "Fire",
            DisasterType::Cyclone => "Cyclone",
            DisasterType::Landslide => "Landslide",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "\u{1F504}",
            DisasterType::Flood => "\u{1F30A}",
            DisasterType::Fire => "\u{1F525}",
            DisasterType::Cyclone => "\u{1F300}",
            DisasterType::Landslide => "\u{26F0}\u{FE0F}",
        }
    }

    /// Icon plus name, as shown in table rows and popups.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon(), self.as_str())
    }
}


/// Severity levels, ordered from Low to Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            "Critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "#3498db",
            Severity::Medium => "#f39c12",
            Severity::High => "#e74c3c",
            Severity::Critical => "#8e44ad",
        }
    }
}


/// A single disaster observation record.
///
/// The serialized form keeps the flat-blob field names (`type`,
/// `coordinates: [lat, lon]`) so old blobs stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: DisasterType,
    pub location: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    pub timestamp: String,
    pub coordinates: [f64; 2],
}

impl Report {
    pub fn latitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn description_or_default(&self) -> &str {
        if self.description.is_empty() {
            "No description provided"
        } else {
            &self.description
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_disaster_type_name() {
        for kind in DisasterType::ALL {
            assert_eq!(DisasterType::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(DisasterType::from_name("Meteor"), None);
        assert_eq!(DisasterType::from_name(""), None);
    }

    #[test]
    fn parses_every_severity_name() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_name(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::from_name("Extreme"), None);
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn report_serializes_with_wire_field_names() {
        let report = Report {
            id: 42,
            kind: DisasterType::Flood,
            location: "Mumbai".into(),
            severity: Severity::High,
            description: "water rising".into(),
            timestamp: "2026-01-01 10:00:00".into(),
            coordinates: [19.0, 72.8],
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["type"], "Flood");
        assert_eq!(value["severity"], "High");
        assert_eq!(value["coordinates"][0], 19.0);

        let back: Report = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn empty_description_gets_placeholder() {
        let report = Report {
            id: 1,
            kind: DisasterType::Fire,
            location: "Pune".into(),
            severity: Severity::Low,
            description: String::new(),
            timestamp: "t".into(),
            coordinates: [0.0, 0.0],
        };

        assert_eq!(report.description_or_default(), "No description provided");
    }
}
