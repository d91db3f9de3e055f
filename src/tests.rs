use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use crate::app::{guard_redirect, matching_sections, sections, Route};
use crate::config::AppConfig;
use crate::domain::claims::encode_test_token;
use crate::domain::entities::directory::School;
use crate::domain::entities::record::{Column, Record};
use crate::infra::export::csv::{default_export_file_name, export_records_to_csv, write_records};
use crate::infra::memory::MemorySessionStore;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::session_store::SqliteSessionStore;
use crate::ui::styles::*;
use crate::usecase::ports::session::SessionStore;
use crate::usecase::services::session_service::SessionContext;
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("school-admin-{prefix}-{nanos}"))
}

fn school(id: i64, name: &str, address: &str) -> School {
    School {
        id: id.into(),
        name: name.to_string(),
        address: address.to_string(),
        email: String::new(),
        phone: String::new(),
    }
}

#[test]
fn init_db_creates_session_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("nested").join("session.sqlite");

    let result = init_db(&db_path);
    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'session'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "session table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_session_survives_reopen_and_clear() {
    let temp_dir = unique_test_dir("session-store");
    let db_path = temp_dir.join("session.sqlite");

    let first = SqliteSessionStore::open(db_path.clone()).expect("store should open");
    assert_eq!(first.load_token().expect("load"), None);
    first.save_token("old.token.value").expect("save");
    first.save_token("new.token.value").expect("overwrite");

    let reopened = SqliteSessionStore::open(db_path.clone()).expect("store should reopen");
    assert_eq!(
        reopened.load_token().expect("load").as_deref(),
        Some("new.token.value")
    );

    reopened.clear_token().expect("clear");
    assert_eq!(first.load_token().expect("load"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn session_context_restores_signed_in_user_after_restart() {
    let temp_dir = unique_test_dir("session-context");
    let db_path = temp_dir.join("session.sqlite");
    let token = encode_test_token(r#"{"userId":42,"email":"head@school.org","exp":4102444800}"#);

    {
        let store = SqliteSessionStore::open(db_path.clone()).expect("store should open");
        let session = SessionContext::new(Arc::new(store));
        session.set_token(&token).expect("token should persist");
    }

    let store = SqliteSessionStore::open(db_path.clone()).expect("store should reopen");
    let session = SessionContext::new(Arc::new(store));
    assert_eq!(session.user_id().as_deref(), Some("42"));
    assert!(!session.is_expired());

    session.clear_token();
    let store = SqliteSessionStore::open(db_path).expect("store should reopen");
    assert!(SessionContext::new(Arc::new(store)).is_expired());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_export_writes_headers_and_rendered_cells() {
    let schools = vec![
        school(1, "North High", "1 Elm St, Springfield"),
        school(2, "South Primary", ""),
    ];
    let mut buffer = Vec::new();

    let written = write_records(&mut buffer, &School::columns(), &schools).expect("write csv");

    assert_eq!(written, 2);
    let text = String::from_utf8(buffer).expect("csv should be utf-8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Name,Address,Email,Phone"));
    assert_eq!(
        lines.next(),
        Some("North High,\"1 Elm St, Springfield\",,")
    );
    assert_eq!(lines.next(), Some("South Primary,,,"));
}

#[test]
fn csv_export_to_file_creates_the_file() {
    let temp_dir = unique_test_dir("csv-export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("schools.csv");
    let columns: Vec<Column<School>> = School::columns().into_iter().take(1).collect();

    let written = export_records_to_csv(&csv_path, &columns, &[school(3, "East", "")])
        .expect("export should succeed");

    assert_eq!(written, 1);
    let content = fs::read_to_string(&csv_path).expect("read export");
    assert_eq!(content, "Name\nEast\n");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_file_name_includes_collection_and_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    assert_eq!(
        default_export_file_name("forbidden-keywords", date),
        "forbidden-keywords-20240301.csv"
    );
}

#[test]
fn config_file_is_optional_and_partial() {
    let temp_dir = unique_test_dir("config");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let config_path = temp_dir.join("config.json");

    let missing = AppConfig::load_from(&config_path).expect("missing file is fine");
    assert_eq!(missing, AppConfig::default());

    fs::write(
        &config_path,
        r#"{"api_base_url":"https://admin.school.org/api/","page_size":0}"#,
    )
    .expect("write config");
    let loaded = AppConfig::load_from(&config_path)
        .expect("config should parse")
        .sanitized();
    assert_eq!(loaded.api_base_url, "https://admin.school.org/api");
    assert_eq!(loaded.page_size, 1);

    fs::write(&config_path, "{ not json").expect("write config");
    assert!(AppConfig::load_from(&config_path).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn quick_nav_filters_sections_by_label_and_blurb() {
    let labels = |query: &str| -> Vec<&'static str> {
        matching_sections(query)
            .into_iter()
            .map(|section| section.label)
            .collect()
    };

    assert!(labels("").is_empty());
    assert!(labels("   ").is_empty());
    assert_eq!(labels("STUD"), vec!["Students"]);
    assert_eq!(labels("chatbot"), vec!["Default replies", "Forbidden keywords"]);
    assert!(labels("payroll").is_empty());
}

#[test]
fn every_section_has_its_own_route() {
    let all = sections();
    assert_eq!(all.len(), 9);
    for (idx, section) in all.iter().enumerate() {
        assert!(
            all.iter().skip(idx + 1).all(|other| other.route != section.route),
            "{} shares a route",
            section.label
        );
    }
    assert!(all.iter().any(|section| section.route == Route::Logs {}));
}

#[test]
fn sticky_header_styles_include_positioning() {
    let style = table_header_cell_style();

    assert!(style.contains("position: sticky"));
    assert!(style.contains("top: 0"));
    assert!(style.contains("z-index"));
}

#[test]
fn table_container_style_allows_scroll() {
    let style = table_container_style();

    assert!(style.contains("overflow: auto"));
    assert!(style.contains("flex: 1"));
    assert!(style.contains("min-height: 0"));
}

#[test]
fn root_container_style_uses_viewport_height_and_flex() {
    let style = root_container_style();

    assert!(style.contains("height: 100vh"));
    assert!(style.contains("display: flex"));
    assert!(style.contains("flex-direction: column"));
    assert!(style.contains("overflow: hidden"));
}

#[test]
fn status_style_marks_errors() {
    assert!(status_style(true).contains("#c62828"));
    assert!(!status_style(false).contains("#c62828"));
}

#[test]
fn column_alignment_right_aligns_numeric_columns() {
    let rows = vec![
        vec!["Gold".to_string(), "1,234.50".to_string(), String::new()],
        vec!["Basic".to_string(), "9.00".to_string(), String::new()],
    ];

    assert_eq!(column_alignment(&rows, 0), "left");
    assert_eq!(column_alignment(&rows, 1), "right");
    assert_eq!(column_alignment(&rows, 2), "left", "empty column stays left");
    assert_eq!(column_alignment(&rows, 9), "left");
}

#[test]
fn default_db_path_uses_school_admin_directory() {
    let db_path = default_db_path().expect("default db path should resolve");
    let path_text = db_path.to_string_lossy().to_lowercase();

    assert_eq!(
        db_path.file_name().and_then(|name| name.to_str()),
        Some("session.sqlite")
    );
    assert!(
        path_text.contains("school-admin") || path_text.contains("schooladmin"),
        "unexpected data directory: {}",
        db_path.display()
    );
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn guard_sends_expired_sessions_to_sign_in_and_clears_them() {
    let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
    assert_eq!(guard_redirect(&session), Some(Route::SignIn {}));

    session
        .set_token(&encode_test_token(r#"{"id":"admin-1","exp":1000}"#))
        .expect("memory store should accept token");
    assert_eq!(guard_redirect(&session), Some(Route::SignIn {}));
    assert_eq!(session.token(), None);

    session
        .set_token(&encode_test_token(r#"{"id":"admin-1","exp":4102444800}"#))
        .expect("memory store should accept token");
    assert_eq!(guard_redirect(&session), None);
    assert!(session.token().is_some());
}
