use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;

mod common;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

#[test]
fn test_creates_migrated_db() {
    let test_db = common::TestDb::new("test_creates_migrated_db.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_connections_use_wal() {
    let test_db = common::TestDb::new("test_connections_use_wal.db");
    let mut conn = test_db.pool().get().unwrap();
    let mode: JournalMode = sql_query("PRAGMA journal_mode")
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(mode.journal_mode.to_lowercase(), "wal");
}

#[test]
fn test_status_check_constraint_rejects_unknown_values() {
    let test_db = common::TestDb::new("test_status_check_constraint.db");
    let mut conn = test_db.pool().get().unwrap();
    let inserted = sql_query("INSERT INTO leads (first_name, status) VALUES ('Ann', 'archived')")
        .execute(&mut conn);
    assert!(inserted.is_err());
}
