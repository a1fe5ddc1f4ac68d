#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardClient` using wiremock.

use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudscrape_api::{DashboardClient, Error, PagePaths, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

fn paths() -> PagePaths {
    PagePaths {
        login: "/login.php".into(),
        data: "/data.php".into(),
        user: "/user.php".into(),
        checkin: "/checkin.php".into(),
    }
}

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DashboardClient::new(base_url, paths(), &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_the_dashboard_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login.php"))
        .and(body_string_contains("account=operator"))
        .and(body_string_contains("status=View+Status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    client.login("operator", &secret).await.unwrap();
}

#[tokio::test]
async fn test_login_failure_is_an_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("operator", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Page fetch tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_status_page_carries_the_required_parameters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data.php"))
        .and(query_param("network", "homenet"))
        .and(query_param("showall", "1"))
        .and(query_param("details", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<table id=\"mytable\"></table>"))
        .mount(&server)
        .await;

    let page = client.fetch_status_page("homenet").await.unwrap();
    assert!(page.contains("mytable"));
}

#[tokio::test]
async fn test_usage_page_scopes_to_the_network() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user.php"))
        .and(query_param("network", "homenet"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    client.fetch_usage_page("homenet").await.unwrap();
}

#[tokio::test]
async fn test_non_200_status_page_surfaces_the_http_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.fetch_status_page("homenet").await;

    assert!(
        matches!(result, Err(Error::Http { status: 503 })),
        "expected Http {{ 503 }}, got: {result:?}"
    );
}

#[tokio::test]
async fn test_checkin_image_fetch_returns_raw_bytes() {
    let (server, client) = setup().await;

    let body = vec![0x89u8, 0x50, 0x4e, 0x47];
    Mock::given(method("GET"))
        .and(path("/checkin.php"))
        .and(query_param("mac", "aa:bb:cc:dd:ee:ff"))
        .and(query_param("legend", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let bytes = client.fetch_checkin_image("aa:bb:cc:dd:ee:ff").await.unwrap();
    assert_eq!(bytes, body);
}
