use std::collections::HashMap;

use alloy::primitives::Address;
use eip7702_inspector::{
    cli::{DelegateArgs, NetworkArgs},
    commands,
    config::{InspectorConfig, NetworkOverride, SignerConfig},
};
use serde_json::{Value, json};
use wiremock::{Mock, MockServer, Request, ResponseTemplate, matchers::method};

// anvil's first dev account
const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Node whose every account has the same code; other methods are errors
async fn node_with_code(code: &'static str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(move |request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            let response = if body["method"] == "eth_getCode" {
                json!({ "jsonrpc": "2.0", "id": body["id"], "result": code })
            } else {
                json!({
                    "jsonrpc": "2.0",
                    "id": body["id"],
                    "error": { "code": -32601, "message": "method not stubbed" }
                })
            };
            ResponseTemplate::new(200).set_body_json(response)
        })
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> InspectorConfig {
    InspectorConfig {
        networks: HashMap::from([(
            "anvil".to_string(),
            NetworkOverride {
                rpc_url: server.uri(),
            },
        )]),
        signer: SignerConfig {
            private_key: Some(ANVIL_KEY.to_string()),
        },
        ..Default::default()
    }
}

fn anvil() -> NetworkArgs {
    NetworkArgs {
        network: "anvil".to_string(),
    }
}

async fn requested_methods(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
        .filter_map(|body| body["method"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn revoke_without_delegation_sends_nothing() {
    let server = node_with_code("0x").await;

    commands::revoke(anvil(), &config_for(&server)).await.unwrap();

    assert_eq!(requested_methods(&server).await, vec!["eth_getCode"]);
}

#[tokio::test]
async fn delegate_to_current_delegate_sends_nothing() {
    let contract: Address = "0x5fbdb2315678afecb367f032d93f642f64180aa3".parse().unwrap();
    let server = node_with_code("0xef01005fbdb2315678afecb367f032d93f642f64180aa3").await;

    commands::delegate(
        DelegateArgs {
            contract: Some(contract),
            network: anvil(),
        },
        &config_for(&server),
    )
    .await
    .unwrap();

    let methods = requested_methods(&server).await;
    assert!(methods.iter().all(|m| m == "eth_getCode"), "{methods:?}");
}

#[tokio::test]
async fn revoke_without_signer_fails_before_any_request() {
    let server = node_with_code("0x").await;
    let config = InspectorConfig {
        signer: SignerConfig { private_key: None },
        ..config_for(&server)
    };

    let error = commands::revoke(anvil(), &config).await.unwrap_err();

    assert!(error.to_string().contains("No signer configured"));
    assert!(requested_methods(&server).await.is_empty());
}
