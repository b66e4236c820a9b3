//! Integration tests for the HTTP-facing services.

use nubot::error::AppError;
use nubot::models::{Config, RecipientsConfig, Secrets};
use nubot::services::{NoticeFetcher, SheetClient};
use wiremock::matchers::{header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn secrets() -> Secrets {
    Secrets::from_lookup(|key| {
        let value = match key {
            "sheet_name" => "subscribers",
            "project_name" => "nuNews",
            "project_code" => "9f8e7d",
            "shetty_token" => "sheet-token",
            "sender_email" => "bot@example.com",
            "sender_password" => "app-password",
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test secrets are complete")
}

#[tokio::test]
async fn test_fetcher_sends_configured_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/examination-notice.php"))
        .and(header("user-agent", "Defined"))
        .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="news-item"><a href="a.pdf">  Admit card  </a></div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.fetch.url = format!("{}/examination-notice.php", server.uri());

    let fetcher = NoticeFetcher::new(config).unwrap();
    let extraction = fetcher.fetch_latest().await.unwrap();

    assert_eq!(extraction.len(), 1);
    assert_eq!(extraction.announcements()[0].heading, "Admit card");
    assert_eq!(
        extraction.announcements()[0].link,
        "https://www.nu.ac.bd/a.pdf"
    );
}

#[tokio::test]
async fn test_fetcher_parses_error_pages_as_is() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<p>maintenance</p>"))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.fetch.url = server.uri();

    let fetcher = NoticeFetcher::new(config).unwrap();
    assert!(fetcher.fetch_latest().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sheet_client_uses_bearer_token_and_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/9f8e7d/nuNews/subscribers"))
        .and(header("authorization", "Bearer sheet-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"userInfo": [
                {"name": "A", "emailAddress": "a@b.com"},
                {"name": " ", "emailAddress": "a@b.com"},
                {"emailAddress": "c@d.com"}
            ]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = RecipientsConfig {
        api_base: server.uri(),
        ..RecipientsConfig::default()
    };
    let client = SheetClient::new(&config, &secrets()).unwrap();
    let recipients = client.fetch_recipients().await.unwrap();

    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].name, "A");
    assert_eq!(recipients[0].email, "a@b.com");
}

#[tokio::test]
async fn test_sheet_client_rejects_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let config = RecipientsConfig {
        api_base: server.uri(),
        ..RecipientsConfig::default()
    };
    let client = SheetClient::new(&config, &secrets()).unwrap();

    assert!(matches!(
        client.fetch_recipients().await,
        Err(AppError::Json(_))
    ));
}
