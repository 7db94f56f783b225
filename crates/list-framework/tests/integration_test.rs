use list_framework::{FetchError, HttpTransport, PageFetcher, StopReason};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Client {
    id: u32,
    full_name: String,
}

fn client(id: u32) -> serde_json::Value {
    json!({ "id": id, "full_name": format!("Клиент {id}") })
}

/// Three envelope pages linked by absolute `next` URLs, the way the API serves them.
#[tokio::test]
async fn test_follows_next_links_across_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/barbershop/clients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 5,
            "next": format!("{base}/api/barbershop/clients/p2/"),
            "previous": null,
            "results": [client(1), client(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/barbershop/clients/p2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/barbershop/clients/p3/"),
            "results": [client(3), client(4)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/barbershop/clients/p3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "results": [client(5)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{base}/api")).unwrap();
    let fetcher = PageFetcher::<Client, _>::new(transport.source());
    let collected = fetcher.collect("barbershop/clients/").await;

    assert_eq!(collected.stop, StopReason::Exhausted);
    assert_eq!(collected.pages, 3);
    let ids: Vec<u32> = collected.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(collected.items[2].full_name, "Клиент 3");
}

/// A bare JSON array is a complete collection on its own.
#[tokio::test]
async fn test_bare_array_is_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/barbershop/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([client(1), client(2)])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{}/api/", server.uri())).unwrap();
    let items = PageFetcher::<Client, _>::new(transport.source())
        .fetch_all("/barbershop/services/")
        .await;

    assert_eq!(items.len(), 2);
}

/// A 500 on page two keeps page one and does not surface as an error.
#[tokio::test]
async fn test_server_error_keeps_partial_result() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/cashflows/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/cashflows/p2/"),
            "results": [client(1), client(2)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cashflows/p2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{base}/api")).unwrap();
    let collected = PageFetcher::<Client, _>::new(transport.source())
        .collect("cashflows/")
        .await;

    assert_eq!(collected.items.len(), 2);
    assert_eq!(collected.pages, 1);
    match collected.stop {
        StopReason::Failed(FetchError::Status { status, ref url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/cashflows/p2/"));
        }
        other => panic!("unexpected stop reason: {other:?}"),
    }
}

/// A page that links back to the first page ends the walk with the records gathered,
/// even when the walk started from a relative path and the link is absolute.
#[tokio::test]
async fn test_cycle_back_to_first_page_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/employees/p2/"),
            "results": [client(1)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/employees/p2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/employees/"),
            "results": [client(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{base}/api")).unwrap();
    let collected = PageFetcher::<Client, _>::new(transport.source())
        .collect("/employees/")
        .await;

    assert_eq!(collected.items.len(), 2);
    assert_eq!(collected.pages, 2);
    assert_eq!(
        collected.stop,
        StopReason::RepeatedCursor(format!("{base}/api/employees/").into())
    );
}

/// Credentials and static query parameters ride along on every request.
#[tokio::test]
async fn test_sends_bearer_token_and_static_query() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/appointments/"))
        .and(header("authorization", "Bearer secret-token"))
        .and(query_param("company", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/appointments/p2/?company=7"),
            "results": [client(1)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/appointments/p2/"))
        .and(header("authorization", "Bearer secret-token"))
        .and(query_param("company", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [client(2)] })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{base}/api"))
        .unwrap()
        .with_token("secret-token")
        .with_query("company", "7");
    let collected = PageFetcher::<Client, _>::new(transport.source())
        .collect("appointments/")
        .await;

    assert!(collected.is_complete());
    assert_eq!(collected.items.len(), 2);
}

/// A body that is neither an envelope nor an array is a decode failure.
#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{}/api", server.uri())).unwrap();
    let collected = PageFetcher::<Client, _>::new(transport.source())
        .collect("services/")
        .await;

    assert!(collected.items.is_empty());
    assert!(matches!(collected.stop, StopReason::Failed(FetchError::Decode(_))));
}

/// One record of the wrong shape is dropped; the rest of the page and the walk survive.
#[tokio::test]
async fn test_bad_record_skips_only_itself() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/clients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{base}/api/clients/p2/"),
            "results": [client(1), { "id": 2 }, { "full_name": "Без номера" }, client(4)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clients/p2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([client(5)])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{base}/api")).unwrap();
    let collected = PageFetcher::<Client, _>::new(transport.source())
        .collect("clients/")
        .await;

    let ids: Vec<u32> = collected.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 4, 5]);
    assert!(collected.is_complete());
}
