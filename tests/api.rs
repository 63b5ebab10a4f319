use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value as JsonValue;

use disaster_map_server::{server, util, AppConfig};


fn test_client() -> Client {
    let config = AppConfig {
        db_path: util::temp_path("api-db", "sqlite"),
        flat_path: util::temp_path("api-flat", "json"),
        log_db_path: util::temp_path("api-log", "sqlite"),
    };

    Client::tracked(server(config)).expect("valid rocket instance")
}

fn get_json(client: &Client, uri: &str) -> JsonValue {
    let response = client.get(uri).dispatch();
    assert_eq!(response.status(), Status::Ok);
    serde_json::from_str(&response.into_string().unwrap()).unwrap()
}

fn submit(client: &Client, kind: &str, location: &str, severity: &str, description: &str) -> i64 {
    let body = format!(
        "type={}&location={}&severity={}&description={}",
        kind, location, severity, description
    );
    let response = client
        .post("/submit")
        .header(ContentType::Form)
        .body(body)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    response.into_string().unwrap().parse().unwrap()
}


#[test]
fn index_banner() {
    let client = test_client();

    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "Disaster Map Server");
}

#[test]
fn submit_populates_table_map_and_statistics() {
    let client = test_client();

    let id = submit(&client, "Flood", "Mumbai", "High", "water%20rising");

    let table = get_json(&client, "/report-table");
    assert_eq!(table["size"], 1);
    assert_eq!(table["rows"][0]["id"], id);
    assert_eq!(table["rows"][0]["severity"], "High");
    assert_eq!(table["rows"][0]["color"], "#e74c3c");

    let map = get_json(&client, "/report-map");
    assert_eq!(map["size"], 1);
    assert_eq!(map["markers"][0]["id"], id);
    assert_eq!(map["markers"][0]["popup"]["location"], "Mumbai");

    let stats = get_json(&client, "/statistics");
    assert_eq!(stats["total"], 1);

    let detail = get_json(&client, &format!("/report?id={}", id));
    assert_eq!(detail["id"], id);
    assert_eq!(detail["location"], "Mumbai");
}

#[test]
fn invalid_submission_is_rejected_with_a_notification() {
    let client = test_client();

    let response = client
        .post("/submit")
        .header(ContentType::Form)
        .body("type=&location=Pune&severity=Low&description=")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let notes = get_json(&client, "/notifications");
    assert_eq!(notes["notifications"][0]["kind"], "error");

    let table = get_json(&client, "/report-table");
    assert_eq!(table["size"], 0);
}

#[test]
fn delete_clears_every_projection() {
    let client = test_client();
    let id = submit(&client, "Fire", "Pune", "Low", "brush%20fire");

    let response = client.delete(format!("/report?id={}", id)).dispatch();
    assert_eq!(response.into_string().unwrap(), "1");

    assert_eq!(get_json(&client, "/report-table")["size"], 0);
    assert_eq!(get_json(&client, "/report-map")["size"], 0);
    assert_eq!(get_json(&client, "/statistics")["total"], 0);

    let missing = client.get(format!("/report?id={}", id)).dispatch();
    assert_eq!(missing.status(), Status::BadRequest);

    // Deleting again is a silent no-op.
    let again = client.delete(format!("/report?id={}", id)).dispatch();
    assert_eq!(again.into_string().unwrap(), "0");
}

#[test]
fn filter_toggles_visibility_only() {
    let client = test_client();
    let fire = submit(&client, "Fire", "Pune", "Low", "");
    submit(&client, "Flood", "Mumbai", "High", "");

    let response = client.post("/filter?type=Fire&severity=").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let table = get_json(&client, "/report-table");
    assert_eq!(table["size"], 2);
    let visible: Vec<_> = table["rows"].as_array().unwrap().iter()
        .filter(|row| row["visible"] == true)
        .collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["id"], fire);

    client.post("/filter").dispatch();
    let table = get_json(&client, "/report-table");
    assert!(table["rows"].as_array().unwrap().iter().all(|row| row["visible"] == true));
}

#[test]
fn export_returns_a_named_csv_attachment() {
    let client = test_client();
    submit(&client, "Cyclone", "Chennai", "Critical", "landfall%20expected");
    submit(&client, "Earthquake", "Delhi", "Medium", "");

    let response = client.get("/export").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let disposition = response.headers().get_one("Content-Disposition").unwrap().to_owned();
    assert!(disposition.contains("disaster_reports.csv"));

    let body = response.into_string().unwrap();
    assert_eq!(body.trim_end().lines().count(), 3);
    assert!(body.starts_with("Type,Location,Severity,Description,Timestamp,Latitude,Longitude"));
}

#[test]
fn export_with_nothing_stored_fails() {
    let client = test_client();

    let response = client.get("/export").dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn collaborator_log_round_trip() {
    let client = test_client();

    let response = client
        .post("/report")
        .header(ContentType::JSON)
        .body(r#"{"type":"Flood","location":"Kolkata","severity":"High","description":"embankment breach"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: JsonValue = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert!(body["message"].is_string());

    let rows = get_json(&client, "/reports");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "Flood");
    assert_eq!(rows[0]["location"], "Kolkata");
    assert!(rows[0]["id"].is_i64());
}

#[test]
fn collaborator_log_ignores_dashboard_state() {
    let client = test_client();
    submit(&client, "Fire", "Pune", "Low", "");

    // The telemetry log is a separate, unreconciled store.
    let rows = get_json(&client, "/reports");
    assert!(rows.as_array().unwrap().is_empty());
}

#[test]
fn guidelines_for_known_and_unknown_types() {
    let client = test_client();

    let known = get_json(&client, "/api/guidelines?disaster=Flood");
    assert!(known["guidelines"].as_array().unwrap().len() >= 3);
    assert!(known["benefits"].is_array());

    let unknown = get_json(&client, "/api/guidelines?disaster=Meteor");
    assert_eq!(
        unknown["message"],
        "No official guidelines available for this disaster."
    );
}
