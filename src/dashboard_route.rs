use std::sync::Mutex;

use rocket::form::Form;
use rocket::http::Header;
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value as JsonValue;

use crate::session_sys::DashboardSession;


type JsonResult = Result<Json<JsonValue>, BadRequest<String>>;
type StringResult = Result<String, BadRequest<String>>;


#[derive(FromForm)]
pub struct SubmitForm {
    #[field(name = "type", default = String::new())]
    kind: String,
    #[field(default = String::new())]
    location: String,
    #[field(default = String::new())]
    severity: String,
    #[field(default = String::new())]
    description: String,
}

#[derive(FromForm)]
pub struct FilterParams {
    #[field(name = "type")]
    kind: Option<String>,
    severity: Option<String>,
}

/// CSV document offered as a named download.
#[derive(Responder)]
#[response(content_type = "text/csv")]
pub struct CsvAttachment {
    content: String,
    disposition: Header<'static>,
}


#[post("/submit", data = "<form>")]
pub fn post_submit(
    form: Form<SubmitForm>,
    session: &State<Mutex<DashboardSession>>,
) -> StringResult {
    let mut session = session.lock().unwrap();

    session
        .submit(&form.kind, &form.location, &form.severity, &form.description)
        .map(|id| id.to_string())
        .map_err(BadRequest)
}

#[delete("/report?<id>")]
pub fn delete_report(id: i64, session: &State<Mutex<DashboardSession>>) -> String {
    let mut session = session.lock().unwrap();

    if session.delete(id) { "1".into() } else { "0".into() }
}

#[get("/report?<id>")]
pub fn get_report(id: i64, session: &State<Mutex<DashboardSession>>) -> JsonResult {
    let session = session.lock().unwrap();

    match session.detail_json(id) {
        Some(detail) => Ok(Json(detail)),
        None => Err(BadRequest("Not found".into())),
    }
}

#[get("/report-table")]
pub fn get_report_table(session: &State<Mutex<DashboardSession>>) -> Json<JsonValue> {
    Json(session.lock().unwrap().table_json())
}

#[get("/report-map")]
pub fn get_report_map(session: &State<Mutex<DashboardSession>>) -> Json<JsonValue> {
    Json(session.lock().unwrap().map_json())
}

#[get("/statistics")]
pub fn get_statistics(session: &State<Mutex<DashboardSession>>) -> Json<JsonValue> {
    Json(session.lock().unwrap().statistics_json())
}

#[post("/filter?<params..>")]
pub fn post_filter(params: FilterParams, session: &State<Mutex<DashboardSession>>) -> String {
    let mut session = session.lock().unwrap();

    session.set_filter(params.kind.as_deref(), params.severity.as_deref());

    "ok".into()
}

#[get("/export?<id>")]
pub fn get_export(
    id: Option<i64>,
    session: &State<Mutex<DashboardSession>>,
) -> Result<CsvAttachment, BadRequest<String>> {
    let mut session = session.lock().unwrap();

    match session.export(id) {
        Ok(export) => Ok(CsvAttachment {
            content: export.content,
            disposition: Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        }),
        Err(err) => Err(BadRequest(err)),
    }
}

#[get("/notifications")]
pub fn get_notifications(session: &State<Mutex<DashboardSession>>) -> Json<JsonValue> {
    Json(session.lock().unwrap().notifications_json())
}
