use std::sync::Arc;
use upalate_mongo::cli::{self, Command, OutputMode};
use upalate_mongo::errors::DbError;
use upalate_mongo::{MemoryStore, MongoDBClient};

fn memory_client() -> MongoDBClient<MemoryStore> {
    MongoDBClient::with_store(Arc::new(MemoryStore::new()), "clidb").unwrap()
}

fn run_to_string(client: &MongoDBClient<MemoryStore>, cmd: Command, mode: OutputMode) -> Result<String, DbError> {
    let mut out = Vec::new();
    cli::run_with_format(client, cmd, mode, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn insert_many_then_find_prints_ndjson() {
    let client = memory_client();
    let inserted = run_to_string(
        &client,
        Command::InsertMany {
            collection: "people".into(),
            json: r#"[{"name":"alice","age":30},{"name":"bob","age":41}]"#.into(),
        },
        OutputMode::Human,
    )
    .unwrap();
    assert_eq!(inserted, "inserted 2 into people\n");

    let found = run_to_string(
        &client,
        Command::Find {
            collection: "people".into(),
            operator: "greater_than".into(),
            key: "age".into(),
            value: "35".into(),
            limit: None,
        },
        OutputMode::Human,
    )
    .unwrap();
    let lines: Vec<&str> = found.lines().collect();
    assert_eq!(lines.len(), 1);
    let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(v["name"], "bob");
    assert_eq!(v["age"], 41);
}

#[test]
fn find_respects_limit() {
    let client = memory_client();
    for n in 0..5 {
        run_to_string(&client, Command::Insert { collection: "c".into(), json: format!(r#"{{"n":{n}}}"#) }, OutputMode::Json)
            .unwrap();
    }
    let found = run_to_string(
        &client,
        Command::Find { collection: "c".into(), operator: "ALL".into(), key: String::new(), value: String::new(), limit: Some(2) },
        OutputMode::Human,
    )
    .unwrap();
    assert_eq!(found.lines().count(), 2);
}

#[test]
fn count_in_json_mode() {
    let client = memory_client();
    run_to_string(&client, Command::Insert { collection: "c".into(), json: r#"{"a":1}"#.into() }, OutputMode::Human).unwrap();
    let out = run_to_string(&client, Command::Count { collection: "c".into() }, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(v["count"], 1);
    assert_eq!(v["collection"], "c");
}

#[test]
fn unknown_operator_is_reported() {
    let client = memory_client();
    let err = run_to_string(
        &client,
        Command::Find { collection: "c".into(), operator: "LIKE".into(), key: "a".into(), value: "b".into(), limit: None },
        OutputMode::Human,
    )
    .unwrap_err();
    assert!(matches!(err, DbError::UnsupportedOperator(_)));
}

#[test]
fn operators_lists_whole_catalog() {
    let out = run_to_string(&memory_client(), Command::Operators, OutputMode::Json).unwrap();
    assert_eq!(out.lines().count(), 8);
    assert!(out.contains("\"GREATER_THAN_OR_EQUALS\""));
}

#[test]
fn info_and_ping() {
    let client = memory_client();
    let report = cli::info(&client);
    assert_eq!(report.package_name, "upalate-mongo");
    assert_eq!(report.database, "clidb");
    let out = run_to_string(&client, Command::Ping, OutputMode::Human).unwrap();
    assert_eq!(out, "ok\n");
    let out = run_to_string(&client, Command::Info, OutputMode::Human).unwrap();
    assert!(out.contains("database: clidb"));
}
