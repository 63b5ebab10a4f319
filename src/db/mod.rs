pub mod models;
pub mod schema;


use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::QueryResult;
use diesel::sqlite::SqliteConnection;

use models::*;
use schema::disasters::dsl as d_dsl;
use schema::reports::dsl as r_dsl;


const DISASTERS_INIT_SQL: &str = "
CREATE TABLE IF NOT EXISTS disasters (
    id BIGINT PRIMARY KEY NOT NULL,
    type TEXT NOT NULL,
    location TEXT NOT NULL,
    severity TEXT NOT NULL,
    description TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    latitude DOUBLE NOT NULL,
    longitude DOUBLE NOT NULL
);
CREATE INDEX IF NOT EXISTS disasters_type_idx ON disasters (type);
CREATE INDEX IF NOT EXISTS disasters_location_idx ON disasters (location);
CREATE INDEX IF NOT EXISTS disasters_severity_idx ON disasters (severity);
CREATE INDEX IF NOT EXISTS disasters_timestamp_idx ON disasters (timestamp);
";

const REPORTS_INIT_SQL: &str = "
CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    location TEXT NOT NULL,
    severity TEXT NOT NULL,
    description TEXT NOT NULL
);
";


fn establish(database_url: &str) -> Result<SqliteConnection, String> {
    SqliteConnection::establish(database_url)
        .map_err(|err| format!("Error connecting to {}: {}", database_url, err))
}


/// Structured, indexed store for dashboard reports.
pub struct DbStore {
    conn: SqliteConnection,
}

impl DbStore {
    pub fn open(database_url: &str) -> Result<Self, String> {
        let mut conn = establish(database_url)?;
        conn.batch_execute(DISASTERS_INIT_SQL)
            .map_err(|err| err.to_string())?;

        Ok(DbStore { conn })
    }

    pub fn load_rows(&mut self) -> QueryResult<Vec<DisasterRow>> {
        d_dsl::disasters
            .order(d_dsl::id.asc())
            .load::<DisasterRow>(&mut self.conn)
    }

    pub fn insert_row(&mut self, row: &DisasterRow) -> QueryResult<usize> {
        diesel::insert_into(schema::disasters::table)
            .values(row)
            .execute(&mut self.conn)
    }

    pub fn delete_row(&mut self, id: i64) -> QueryResult<usize> {
        diesel::delete(d_dsl::disasters.find(id))
            .execute(&mut self.conn)
    }

    /// Clears the table and writes the given rows back in one transaction.
    pub fn replace_rows(&mut self, rows: &[DisasterRow]) -> QueryResult<usize> {
        self.conn.transaction(|conn| {
            diesel::delete(d_dsl::disasters).execute(conn)?;
            diesel::insert_into(schema::disasters::table)
                .values(rows)
                .execute(conn)
        })
    }

    pub fn rows_by_kind(&mut self, kind: &str) -> QueryResult<Vec<DisasterRow>> {
        d_dsl::disasters
            .filter(d_dsl::kind.eq(kind))
            .order(d_dsl::id.asc())
            .load::<DisasterRow>(&mut self.conn)
    }

    pub fn rows_by_severity(&mut self, severity: &str) -> QueryResult<Vec<DisasterRow>> {
        d_dsl::disasters
            .filter(d_dsl::severity.eq(severity))
            .order(d_dsl::id.asc())
            .load::<DisasterRow>(&mut self.conn)
    }
}


/// Append-only report log behind the collaborator endpoint.
pub struct LogStore {
    conn: SqliteConnection,
}

impl LogStore {
    pub fn open(database_url: &str) -> Result<Self, String> {
        let mut conn = establish(database_url)?;
        conn.batch_execute(REPORTS_INIT_SQL)
            .map_err(|err| err.to_string())?;

        Ok(LogStore { conn })
    }

    pub fn insert_report(&mut self, report: &NewLogReport) -> QueryResult<usize> {
        diesel::insert_into(schema::reports::table)
            .values(report)
            .execute(&mut self.conn)
    }

    pub fn get_reports(&mut self) -> QueryResult<Vec<LogReport>> {
        r_dsl::reports
            .order(r_dsl::id.asc())
            .load::<LogReport>(&mut self.conn)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::temp_path;

    #[test]
    fn log_store_appends_and_lists() {
        let path = temp_path("log", "sqlite");
        let mut store = LogStore::open(&path).unwrap();

        let report = NewLogReport {
            kind: "Fire".into(),
            location: "Pune".into(),
            severity: "High".into(),
            description: "smoke".into(),
        };
        store.insert_report(&report).unwrap();
        store.insert_report(&report).unwrap();

        let rows = store.get_reports().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, "Fire");
        assert!(rows[0].id < rows[1].id);
    }

    #[test]
    fn db_store_round_trips_rows() {
        let path = temp_path("db", "sqlite");
        let mut store = DbStore::open(&path).unwrap();

        let row = DisasterRow {
            id: 7,
            kind: "Flood".into(),
            location: "Mumbai".into(),
            severity: "High".into(),
            description: "water".into(),
            timestamp: "2026-01-01 10:00:00".into(),
            latitude: 19.0,
            longitude: 72.8,
        };
        store.insert_row(&row).unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].location, "Mumbai");

        assert_eq!(store.delete_row(7).unwrap(), 1);
        assert!(store.load_rows().unwrap().is_empty());
    }
}
