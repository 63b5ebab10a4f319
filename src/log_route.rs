use std::sync::Mutex;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::db::models::NewLogReport;
use crate::db::LogStore;


type LogResult = Result<Json<JsonValue>, Custom<Json<JsonValue>>>;


#[derive(Deserialize)]
pub struct IncomingReport {
    #[serde(rename = "type")]
    kind: String,
    location: String,
    severity: String,
    #[serde(default)]
    description: String,
}


fn make_log_error(err: String) -> Custom<Json<JsonValue>> {
    Custom(Status::InternalServerError, Json(json!({ "error": err })))
}


#[post("/report", format = "json", data = "<body>")]
pub fn post_report(body: Json<IncomingReport>, store: &State<Mutex<LogStore>>) -> LogResult {
    let report = NewLogReport {
        kind: body.kind.clone(),
        location: body.location.clone(),
        severity: body.severity.clone(),
        description: body.description.clone(),
    };

    let mut store = store.lock().unwrap();

    match store.insert_report(&report) {
        Ok(_) => Ok(Json(json!({ "message": "Report stored in database" }))),
        Err(err) => {
            warn!("Fail to append to report log: {}", err);
            Err(make_log_error(err.to_string()))
        }
    }
}

#[get("/reports")]
pub fn get_reports(store: &State<Mutex<LogStore>>) -> LogResult {
    let mut store = store.lock().unwrap();

    match store.get_reports() {
        Ok(reports) => {
            let rows = reports.iter().map(|r| {
                json!({
                    "id": r.id,
                    "type": r.kind,
                    "location": r.location,
                    "severity": r.severity,
                    "description": r.description,
                })
            })
            .collect::<Vec<_>>();

            Ok(Json(JsonValue::Array(rows)))
        }
        Err(err) => Err(make_log_error(err.to_string())),
    }
}
