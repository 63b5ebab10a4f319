use std::env;
use std::fs;

use rocket::serde::json::Json;
use serde_json::{json, Value as JsonValue};


lazy_static! {
    static ref GUIDELINE_DATA: JsonValue = load_guideline_data();
}


fn load_guideline_data() -> JsonValue {
    let path = env::var("GUIDELINES_PATH")
        .unwrap_or_else(|_| "data/guidelines.json".into());

    match fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(err) => {
                warn!("Fail to parse {}: {}", path, err);
                json!({})
            }
        },
        Err(err) => {
            warn!("Fail to read {}: {}", path, err);
            json!({})
        }
    }
}

/// Advisory text per disaster type, read-only.
#[get("/api/guidelines?<disaster>")]
pub fn get_guidelines(disaster: String) -> Json<JsonValue> {
    match GUIDELINE_DATA.get(&disaster) {
        Some(entry) => Json(entry.clone()),
        None => Json(json!({
            "message": "No official guidelines available for this disaster."
        })),
    }
}
