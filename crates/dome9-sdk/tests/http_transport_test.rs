//! HttpTransport against a local mock API

use dome9_sdk::services::iplist::{IpList, Item};
use dome9_sdk::{Client, Dome9Error, HttpConfig};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    let config = HttpConfig::new("access-id", "secret-key").with_base_url(server.uri());
    Client::from_config(config).unwrap()
}

#[tokio::test]
async fn sends_basic_auth_and_decodes_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iplist/42"))
        .and(basic_auth("access-id", "secret-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "office",
            "description": "branch offices",
            "items": [{"ip": "10.0.0.1", "comment": "hq"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server).ip_lists().get(42).await.unwrap();
    assert_eq!(list.id, 42);
    assert_eq!(list.items[0].comment, "hq");
}

#[tokio::test]
async fn posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/iplist"))
        .and(body_json(json!({
            "name": "office",
            "items": [{"ip": "10.0.0.1", "comment": "hq"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "name": "office"})))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .ip_lists()
        .create(&IpList {
            name: "office".to_string(),
            items: vec![Item {
                ip: "10.0.0.1".to_string(),
                comment: "hq".to_string(),
            }],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn encodes_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workload/agentless/azure/terraform/sub-1/onboarding"))
        .and(query_param("centralizedId", "hub 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "region": "eastus",
            "appClientId": "app",
            "CloudAccountId": "sub-1",
            "CentralizedCloudAccountId": "hub 1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = client_for(&server)
        .awp_azure_onboarding()
        .get_onboarding_data("sub-1", "hub 1")
        .await
        .unwrap();
    assert_eq!(data.app_client_id, "app");
    assert_eq!(data.centralized_cloud_account_id, "hub 1");
}

#[tokio::test]
async fn maps_error_status_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/iplist/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "IP list not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).ip_lists().delete(9).await.unwrap_err();
    match &err {
        Dome9Error::Api(response) => {
            assert_eq!(response.status, 404);
            assert_eq!(response.message, "IP list not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_object_not_found());
}

#[tokio::test]
async fn unreachable_server_has_no_status() {
    let config = HttpConfig::new("access-id", "secret-key").with_base_url("http://127.0.0.1:9");
    let client = Client::from_config(config).unwrap();

    let err = client.users().get("1").await.unwrap_err();
    assert!(matches!(err, Dome9Error::Http(_)));
    assert_eq!(err.status(), None);
}
