// Tests for the Sheets values client and session against a mock HTTP server.
use mockito::{Matcher, Server};
use serde_json::json;
use sheetprune::client::{SheetSession, SheetsClient, StaticToken, ValuesApi};
use sheetprune::config::Config;
use sheetprune::controller::{PruneOutcome, delete_old_records, generate_demo_data};

const VALUES_PATH: &str = "/v4/spreadsheets/sheet-1/values/Sheet3!A1:E500";

fn config_for(url: &str) -> Config {
    Config {
        spreadsheet_id: "sheet-1".to_string(),
        api_base_url: url.to_string(),
        application_name: "sheetprune-tests".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_get_values_sends_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", VALUES_PATH)
        .match_header("authorization", "Bearer token-1")
        .match_header("user-agent", "sheetprune-tests")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "range": "Sheet3!A1:E2",
                "majorDimension": "ROWS",
                "values": [
                    ["1", "Demo Name 1", "demo1@example.com", "123-456-7890", "2025-01-01"],
                    ["2", "Demo Name 2", "demo2@example.com", "123-456-7891", "2025-01-02"]
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SheetsClient::new(&server.url(), "token-1", "sheetprune-tests").unwrap();
    let values = client.get_values("sheet-1", "Sheet3!A1:E500").await.unwrap();

    assert_eq!(values.values.len(), 2);
    assert_eq!(values.values[1][4], json!("2025-01-02"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_range_reads_as_no_rows() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", VALUES_PATH)
        .with_status(200)
        .with_body(r#"{"range":"Sheet3!A1:E500","majorDimension":"ROWS"}"#)
        .create_async()
        .await;

    let session = SheetSession::new(
        SheetsClient::new(&server.url(), "t", "app").unwrap(),
        "sheet-1",
        "Sheet3!A1:E500",
    );
    assert!(session.read().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_uses_raw_input_and_row_major_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", VALUES_PATH)
        .match_query(Matcher::UrlEncoded(
            "valueInputOption".into(),
            "RAW".into(),
        ))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "range": "Sheet3!A1:E500",
            "majorDimension": "ROWS",
            "values": [[1, "Demo Name 1", "demo1@example.com", "123-456-7890", "2025-01-01"]]
        })))
        .with_status(200)
        .with_body(
            json!({
                "spreadsheetId": "sheet-1",
                "updatedRange": "Sheet3!A1:E1",
                "updatedRows": 1,
                "updatedColumns": 5,
                "updatedCells": 5
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SheetsClient::new(&server.url(), "t", "app").unwrap();
    let response = client
        .update_values(
            "sheet-1",
            "Sheet3!A1:E500",
            vec![vec![
                json!(1),
                json!("Demo Name 1"),
                json!("demo1@example.com"),
                json!("123-456-7890"),
                json!("2025-01-01"),
            ]],
        )
        .await
        .unwrap();

    assert_eq!(response.updated_cells, 5);
    assert_eq!(response.updated_range.as_deref(), Some("Sheet3!A1:E1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_clear_posts_to_clear_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", format!("{}:clear", VALUES_PATH).as_str())
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(r#"{"spreadsheetId":"sheet-1","clearedRange":"Sheet3!A1:E500"}"#)
        .create_async()
        .await;

    let client = SheetsClient::new(&server.url(), "t", "app").unwrap();
    let response = client.clear_values("sheet-1", "Sheet3!A1:E500").await.unwrap();

    assert_eq!(response.cleared_range.as_deref(), Some("Sheet3!A1:E500"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", VALUES_PATH)
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"message":"The caller does not have permission"}}"#)
        .create_async()
        .await;

    let client = SheetsClient::new(&server.url(), "t", "app").unwrap();
    let err = client
        .get_values("sheet-1", "Sheet3!A1:E500")
        .await
        .unwrap_err();
    let msg = format!("{:#}", err);

    assert!(msg.contains("403"), "{}", msg);
    assert!(msg.contains("does not have permission"), "{}", msg);
}

#[tokio::test]
async fn test_generate_demo_data_writes_full_batch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", VALUES_PATH)
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer static")
        .match_body(Matcher::Regex(r#""Demo Name 500""#.to_string()))
        .with_status(200)
        .with_body(r#"{"spreadsheetId":"sheet-1","updatedRows":500,"updatedColumns":5,"updatedCells":2500}"#)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let summary = generate_demo_data(&config, &StaticToken("static".to_string()))
        .await
        .unwrap();

    assert_eq!(summary.rows, 500);
    assert_eq!(summary.updated_cells, 2500);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_old_records_reads_clears_and_rewrites() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", VALUES_PATH)
        .with_status(200)
        .with_body(
            json!({
                "values": [
                    ["1", "Demo Name 1", "demo1@example.com", "123-456-7890", "2025-01-01"],
                    ["2", "Demo Name 2", "demo2@example.com", "123-456-7891", "2025-01-09"],
                    ["3", "Demo Name 3", "demo3@example.com", "123-456-7892", "2025-01-10"]
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let clear = server
        .mock("POST", format!("{}:clear", VALUES_PATH).as_str())
        .with_status(200)
        .with_body(r#"{"spreadsheetId":"sheet-1","clearedRange":"Sheet3!A1:E500"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", VALUES_PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "values": [
                ["2", "Demo Name 2", "demo2@example.com", "123-456-7891", "2025-01-09"],
                ["3", "Demo Name 3", "demo3@example.com", "123-456-7892", "2025-01-10"]
            ]
        })))
        .with_status(200)
        .with_body(r#"{"spreadsheetId":"sheet-1","updatedCells":10}"#)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let outcome = delete_old_records(&config, &StaticToken("t".to_string()))
        .await
        .unwrap();

    match outcome {
        PruneOutcome::Pruned {
            report,
            updated_cells,
            ..
        } => {
            assert_eq!(report.kept, 2);
            assert_eq!(report.expired, 1);
            assert_eq!(updated_cells, Some(10));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    get.assert_async().await;
    clear.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn test_delete_old_records_with_bad_reference_only_reads() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", VALUES_PATH)
        .with_status(200)
        .with_body(
            json!({
                "values": [
                    ["1", "Demo Name 1", "demo1@example.com", "123-456-7890", "2025-01-01"],
                    ["2", "Demo Name 2", "demo2@example.com", "123-456-7891", "soon"]
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let clear = server
        .mock("POST", format!("{}:clear", VALUES_PATH).as_str())
        .expect(0)
        .create_async()
        .await;
    let put = server
        .mock("PUT", VALUES_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server.url());
    let outcome = delete_old_records(&config, &StaticToken("t".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome, PruneOutcome::InvalidReference("soon".to_string()));
    get.assert_async().await;
    clear.assert_async().await;
    put.assert_async().await;
}
