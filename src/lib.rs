#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod db;
pub mod logger;
pub mod util;

pub mod report;

pub mod export_sys;
pub mod geocode_sys;
pub mod guideline_sys;
pub mod notify_sys;
pub mod repo_sys;
pub mod session_sys;
pub mod store_sys;
pub mod view_sys;

pub mod dashboard_route;
pub mod log_route;

use std::env;
use std::fs::create_dir_all;
use std::path::Path;
use std::sync::Mutex;

use rocket::{Build, Rocket};

use session_sys::DashboardSession;


pub struct AppConfig {
    pub db_path: String,
    pub flat_path: String,
    pub log_db_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            db_path: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "data/disaster_map.sqlite".into()),
            flat_path: env::var("FLAT_STORE_PATH")
                .unwrap_or_else(|_| "data/disasters.json".into()),
            log_db_path: env::var("REPORT_LOG_URL")
                .unwrap_or_else(|_| "data/report_log.sqlite".into()),
        }
    }
}


#[get("/")]
fn index() -> &'static str {
    "Disaster Map Server"
}

pub fn server(config: AppConfig) -> Rocket<Build> {
    for path in [&config.db_path, &config.flat_path, &config.log_db_path] {
        if let Some(dir) = Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir).expect("Initial directory creation failed");
            }
        }
    }

    let session = DashboardSession::open(&config.db_path, &config.flat_path);
    let log_store = db::LogStore::open(&config.log_db_path)
        .expect("Fail to open report log store");

    rocket::build()
        .manage(Mutex::new(session))
        .manage(Mutex::new(log_store))
        .mount("/", routes![index])
        .mount("/", routes![
            dashboard_route::post_submit,
            dashboard_route::delete_report,
            dashboard_route::get_report,
            dashboard_route::get_report_table,
            dashboard_route::get_report_map,
            dashboard_route::get_statistics,
            dashboard_route::post_filter,
            dashboard_route::get_export,
            dashboard_route::get_notifications,
        ])
        .mount("/", routes![
            log_route::post_report,
            log_route::get_reports,
            guideline_sys::get_guidelines,
        ])
}
