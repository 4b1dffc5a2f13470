// atelier-client/tests/cached_client.rs
// Cache deduplication and invalidation against a mock backend

use std::time::Duration;

use atelier_client::shared::models::QuotationStatus;
use atelier_client::{CachedClient, ClientConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quotations() -> serde_json::Value {
    json!([{"id": "q1", "status": "draft", "items": [
        {"productName": "Hemming", "quantity": 2, "unitPrice": "15.00"}
    ]}])
}

async fn cached_client(server: &MockServer, ttl: u64) -> CachedClient {
    CachedClient::new(&ClientConfig::new(server.uri()).with_cache_ttl(ttl)).unwrap()
}

#[tokio::test]
async fn test_concurrent_reads_hit_backend_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/quotations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(quotations())
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, 60).await;
    let (a, b) = tokio::join!(client.list_quotations(), client.list_quotations());
    assert_eq!(a.unwrap(), b.unwrap());

    // Served from the cache
    let again = client.list_quotations().await.unwrap();
    assert_eq!(again[0].id, "q1");
}

#[tokio::test]
async fn test_mutation_invalidates_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/quotations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quotations()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/quotations/q1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "q1", "status": "sent"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = cached_client(&server, 60).await;
    client.list_quotations().await.unwrap();
    client.list_customers().await.unwrap();

    client
        .set_quotation_status("q1", QuotationStatus::Sent)
        .await
        .unwrap();

    // Quotations are fetched again, customers are untouched
    client.list_quotations().await.unwrap();
    client.list_customers().await.unwrap();
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/inventory/i1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Item is in use"})),
        )
        .mount(&server)
        .await;

    let client = cached_client(&server, 60).await;
    client.list_inventory().await.unwrap();

    let err = client.delete_inventory_item("i1").await.unwrap_err();
    assert_eq!(err.user_message(), "Item is in use");

    client.list_inventory().await.unwrap();
}

#[tokio::test]
async fn test_zero_ttl_disables_caching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = cached_client(&server, 0).await;
    client.list_suppliers().await.unwrap();
    client.list_suppliers().await.unwrap();
}
