//! Statement Execution API round trips against a local JSON responder

mod common;

use common::serve_json;
use eyre::Result;
use serde_json::json;
use titanic_etl::{DatabricksConfig, EtlError, SqlConnector, SqlSession};

const CHUNK_LINK: &str = "/api/2.0/sql/statements/s1/result/chunks/1?row_offset=2";

fn config(base: &str) -> DatabricksConfig {
    DatabricksConfig {
        server_hostname: base.to_string(),
        http_path: "/sql/1.0/warehouses/wh1".to_string(),
        access_token: "dapi-test".to_string(),
    }
}

fn database_error(err: &eyre::Report) -> (&str, &str) {
    match err.downcast_ref::<EtlError>() {
        Some(EtlError::Database { state, message }) => (state.as_str(), message.as_str()),
        other => panic!("expected a database error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_polls_until_done_and_follows_chunks() -> Result<()> {
    let (base, requests) = serve_json(vec![
        (200, json!({"statement_id": "s1", "status": {"state": "PENDING"}})),
        (200, json!({"statement_id": "s1", "status": {"state": "RUNNING"}})),
        (
            200,
            json!({
                "statement_id": "s1",
                "status": {"state": "SUCCEEDED"},
                "manifest": {"schema": {"columns": [{"name": "PassengerId"}]}},
                "result": {
                    "data_array": [["1"], [null]],
                    "next_chunk_internal_link": CHUNK_LINK
                }
            }),
        ),
        (200, json!({"chunk_index": 1, "data_array": [["3"]]})),
    ]);
    let session = config(&base).connect()?;

    let result = session.execute("SELECT PassengerId FROM default.Titanic").await?;

    assert_eq!(result.columns, vec!["PassengerId"]);
    assert_eq!(
        result.rows,
        vec![
            vec![Some("1".to_string())],
            vec![None],
            vec![Some("3".to_string())]
        ]
    );

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests[0].starts_with("POST /api/2.0/sql/statements/ HTTP/1.1"));
    assert!(
        requests[0]
            .to_lowercase()
            .contains("authorization: bearer dapi-test")
    );
    assert!(requests[0].contains(r#""warehouse_id":"wh1""#));
    assert!(requests[0].contains(r#""statement":"SELECT PassengerId FROM default.Titanic""#));
    assert!(requests[1].starts_with("GET /api/2.0/sql/statements/s1 HTTP/1.1"));
    assert!(requests[2].starts_with("GET /api/2.0/sql/statements/s1 HTTP/1.1"));
    assert!(requests[3].starts_with(&format!("GET {} HTTP/1.1", CHUNK_LINK)));

    Ok(())
}

#[tokio::test]
async fn test_statement_without_result_set() -> Result<()> {
    let (base, _) = serve_json(vec![(
        200,
        json!({"statement_id": "s2", "status": {"state": "SUCCEEDED"}}),
    )]);
    let session = config(&base).connect()?;

    let result = session.execute("CREATE TABLE t (a INT)").await?;

    assert!(result.is_empty());
    assert!(result.columns.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_state_is_a_database_error() -> Result<()> {
    let (base, _) = serve_json(vec![(
        200,
        json!({
            "statement_id": "s3",
            "status": {
                "state": "FAILED",
                "error": {"error_code": "BAD_REQUEST", "message": "[TABLE_OR_VIEW_NOT_FOUND] default.Ports"}
            }
        }),
    )]);
    let session = config(&base).connect()?;

    let err = session.execute("SELECT * FROM default.Ports").await.unwrap_err();

    assert_eq!(
        database_error(&err),
        ("FAILED", "BAD_REQUEST: [TABLE_OR_VIEW_NOT_FOUND] default.Ports")
    );

    Ok(())
}

#[tokio::test]
async fn test_canceled_while_polling_is_a_database_error() -> Result<()> {
    let (base, _) = serve_json(vec![
        (200, json!({"statement_id": "s4", "status": {"state": "RUNNING"}})),
        (200, json!({"statement_id": "s4", "status": {"state": "CANCELED"}})),
    ]);
    let session = config(&base).connect()?;

    let err = session.execute("SELECT 1").await.unwrap_err();

    let (state, message) = database_error(&err);
    assert_eq!(state, "CANCELED");
    assert_eq!(message, "no error detail returned");

    Ok(())
}

#[tokio::test]
async fn test_http_rejection_is_a_database_error() -> Result<()> {
    let (base, _) = serve_json(vec![(
        403,
        json!({"error_code": "PERMISSION_DENIED", "message": "Invalid access token."}),
    )]);
    let session = config(&base).connect()?;

    let err = session.execute("SELECT 1").await.unwrap_err();

    let (state, message) = database_error(&err);
    assert_eq!(state, "403 Forbidden");
    assert!(message.contains("PERMISSION_DENIED"));

    Ok(())
}

#[tokio::test]
async fn test_failed_chunk_fetch_is_a_database_error() -> Result<()> {
    let (base, _) = serve_json(vec![
        (
            200,
            json!({
                "statement_id": "s1",
                "status": {"state": "SUCCEEDED"},
                "result": {"data_array": [["1"]], "next_chunk_internal_link": CHUNK_LINK}
            }),
        ),
        (500, json!({"message": "chunk expired"})),
    ]);
    let session = config(&base).connect()?;

    let err = session.execute("SELECT 1").await.unwrap_err();

    let (state, message) = database_error(&err);
    assert_eq!(state, "500 Internal Server Error");
    assert!(message.contains("chunk expired"));

    Ok(())
}
