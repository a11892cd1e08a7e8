use envlens::mcp::{EnvLensMcpServer, types::PositionParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

fn at(fixture: &McpTestFixture, line: u32, column: u32) -> Parameters<PositionParams> {
    Parameters(PositionParams {
        project_root_path: fixture.root(),
        file_path: "config/app.php".to_string(),
        line,
        column,
    })
}

// ============================================================================
// env_hover tests
// ============================================================================

#[tokio::test]
async fn test_hover_defined_key() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_hover(at(&fixture, 3, 20)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["hover"]["content"], "Laravel");
}

#[tokio::test]
async fn test_hover_undefined_key() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_hover(at(&fixture, 5, 20)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["hover"]["content"], "[undefined]");
}

#[tokio::test]
async fn test_hover_outside_call() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_hover(at(&fixture, 2, 2)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["hover"].is_null());
}

#[tokio::test]
async fn test_hover_absolute_file_path() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let params = Parameters(PositionParams {
        project_root_path: fixture.root(),
        file_path: fixture
            .root_path()
            .join("config/app.php")
            .to_string_lossy()
            .to_string(),
        line: 4,
        column: 22,
    });
    let result = server.env_hover(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["hover"]["content"], "true");
}

#[tokio::test]
async fn test_hover_sees_env_file_edits() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_hover(at(&fixture, 3, 20)).await.unwrap();
    assert_eq!(extract_tool_result_json(&result)["hover"]["content"], "Laravel");

    fixture
        .write_file(".env", "APP_NAME=\"Renamed App\"\nAPP_DEBUG=true\n")
        .unwrap();

    let result = server.env_hover(at(&fixture, 3, 20)).await.unwrap();
    assert_eq!(
        extract_tool_result_json(&result)["hover"]["content"],
        "Renamed App"
    );
}

#[tokio::test]
async fn test_hover_without_env_file_publishes_nothing() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_file("config/app.php", crate::APP_CONFIG).unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_hover(at(&fixture, 3, 20)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["hover"].is_null());
}

#[tokio::test]
async fn test_hover_missing_source_file_is_an_error() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let params = Parameters(PositionParams {
        project_root_path: fixture.root(),
        file_path: "config/nope.php".to_string(),
        line: 0,
        column: 0,
    });
    assert!(server.env_hover(params).await.is_err());
}

// ============================================================================
// env_definition tests
// ============================================================================

#[tokio::test]
async fn test_definition_points_into_env_file() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_definition(at(&fixture, 4, 22)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let definition = &json_result["definition"];
    assert_eq!(definition["position"], json!({"line": 1, "column": 0}));
    assert!(
        definition["path"]
            .as_str()
            .unwrap()
            .ends_with(".env")
    );
}

#[tokio::test]
async fn test_definition_of_undefined_key() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_definition(at(&fixture, 6, 24)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["definition"].is_null());
}

// ============================================================================
// env_completion tests
// ============================================================================

#[tokio::test]
async fn test_completion_by_prefix() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    // Right before the closing quote of `env('APP_')`.
    let result = server.env_completion(at(&fixture, 8, 26)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["items"],
        json!([
            {"label": "APP_DEBUG", "detail": "true", "kind": "constant"},
            {"label": "APP_NAME", "detail": "Laravel", "kind": "constant"}
        ])
    );
}

#[tokio::test]
async fn test_completion_outside_call_is_empty() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let result = server.env_completion(at(&fixture, 0, 0)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"], json!([]));
}
