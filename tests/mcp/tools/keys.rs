use envlens::mcp::{EnvLensMcpServer, types::ProjectParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_list_keys() {
    let fixture = McpTestFixture::laravel().unwrap();
    let server = EnvLensMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });
    let result = server.env_list_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    assert_eq!(
        json_result["keys"],
        json!([
            {"key": "APP_DEBUG", "value": "true", "position": {"line": 1, "column": 0}},
            {"key": "APP_NAME", "value": "Laravel", "position": {"line": 0, "column": 0}}
        ])
    );
    assert_eq!(json_result["missingFromEnv"], json!(["APP_KEY", "MAIL_HOST"]));
}

#[tokio::test]
async fn test_list_keys_without_example_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_file(".env", "# comment\nAPP_NAME=Laravel\nnot a definition\n")
        .unwrap();
    let server = EnvLensMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });
    let result = server.env_list_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["keys"][0]["position"]["line"], 1);
    assert_eq!(json_result["missingFromEnv"], json!([]));
}

#[tokio::test]
async fn test_list_keys_uses_configured_env_file() {
    let fixture = McpTestFixture::laravel().unwrap();
    fixture
        .write_file(".envlensrc.json", r#"{ "envFile": ".env.testing" }"#)
        .unwrap();
    fixture
        .write_file(".env.testing", "DB_CONNECTION=sqlite\n")
        .unwrap();
    let server = EnvLensMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: fixture.root(),
    });
    let result = server.env_list_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["keys"][0]["key"], "DB_CONNECTION");
    assert!(
        json_result["envFile"]
            .as_str()
            .unwrap()
            .ends_with(".env.testing")
    );
}

#[tokio::test]
async fn test_list_keys_invalid_root() {
    let server = EnvLensMcpServer::new();

    let params = Parameters(ProjectParams {
        project_root_path: "/definitely/not/a/project".to_string(),
    });
    assert!(server.env_list_keys(params).await.is_err());
}
