//! Mailgun adapter tests.

use mailform::providers::MailgunMailer;
use mailform::{Attachment, Configuration, Mail, MailBuilder, MailError, Mailer};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn config(server: &MockServer) -> Configuration {
    Configuration::new("fake-api-key", "avengers.com").api_url(server.uri())
}

fn valid_mail(config: Configuration) -> Mail {
    MailBuilder::using(config)
        .from("tony.stark@example.com")
        .unwrap()
        .to("steve.rogers@example.com")
        .unwrap()
        .subject("Hello, Avengers!")
        .unwrap()
        .html("<h1>Hello</h1>")
        .unwrap()
        .build()
}

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Queued. Thank you.",
        "id": "<20111114174239.25659.5817@samples.mailgun.org>"
    }))
}

async fn mount_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(success_response())
        .expect(1)
        .mount(server)
        .await;
}

async fn sent_fields(server: &MockServer) -> Vec<(String, String)> {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_urlencoded::from_bytes(&requests[0].body).unwrap()
}

async fn sent_body(server: &MockServer) -> (String, String) {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    (content_type, String::from_utf8_lossy(&requests[0].body).into_owned())
}

fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Basic Delivery Tests
// ============================================================================

#[tokio::test]
async fn successful_delivery_returns_ok() {
    let server = MockServer::start().await;

    // Mailgun uses Basic auth with "api:key" format
    let expected_auth = format!(
        "Basic {}",
        base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            "api:fake-api-key"
        )
    );

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(header("Authorization", expected_auth.as_str()))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let delivery = MailgunMailer::new()
        .deliver(&valid_mail(config(&server)))
        .await
        .unwrap();

    assert_eq!(
        delivery.message_id,
        "<20111114174239.25659.5817@samples.mailgun.org>"
    );
    assert_eq!(
        delivery.provider_response.unwrap()["message"],
        "Queued. Thank you."
    );
}

#[tokio::test]
async fn send_uses_the_mail_configuration() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let result = valid_mail(config(&server)).send().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn text_only_mail_is_url_encoded_in_call_order() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let mail = MailBuilder::using(config(&server))
        .from(("T Stark", "tony.stark@example.com"))
        .unwrap()
        .to(("Steve Rogers", "steve.rogers@example.com"))
        .unwrap()
        .to("wasp.avengers@example.com")
        .unwrap()
        .reply_to("office.avengers@example.com")
        .unwrap()
        .cc("thor.odinson@example.com")
        .unwrap()
        .bcc("beast.avengers@example.com")
        .unwrap()
        .subject("Hello, Avengers!")
        .unwrap()
        .text("Hello")
        .unwrap()
        .build();

    MailgunMailer::new().deliver(&mail).await.unwrap();

    let (content_type, _) = sent_body(&server).await;
    assert_eq!(content_type, "application/x-www-form-urlencoded");
    assert_eq!(
        sent_fields(&server).await,
        pairs(&[
            ("from", "T Stark <tony.stark@example.com>"),
            ("to", "Steve Rogers <steve.rogers@example.com>"),
            ("to", "wasp.avengers@example.com"),
            ("h:Reply-To", "office.avengers@example.com"),
            ("cc", "thor.odinson@example.com"),
            ("bcc", "beast.avengers@example.com"),
            ("subject", "Hello, Avengers!"),
            ("text", "Hello"),
        ])
    );
}

#[tokio::test]
async fn sending_options_and_variables_are_sent() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let mail = MailBuilder::using(config(&server))
        .to("steve.rogers@example.com")
        .unwrap()
        .tag("welcome")
        .unwrap()
        .tag("onboarding")
        .unwrap()
        .option("tracking", "yes")
        .unwrap()
        .variable("user_id", "123")
        .unwrap()
        .template("welcome-template")
        .unwrap()
        .build();

    MailgunMailer::new().deliver(&mail).await.unwrap();

    assert_eq!(
        sent_fields(&server).await,
        pairs(&[
            ("to", "steve.rogers@example.com"),
            ("o:tag", "welcome"),
            ("o:tag", "onboarding"),
            ("o:tracking", "yes"),
            ("v:user_id", "123"),
            ("template", "welcome-template"),
        ])
    );
}

// ============================================================================
// Configuration Defaults Tests
// ============================================================================

#[tokio::test]
async fn default_sender_is_used_when_mail_has_none() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let config = config(&server)
        .from(("Nick Fury", "fury@shield.gov"))
        .default_parameter("o:testmode", "yes");

    let mail = MailBuilder::using(config)
        .to("steve.rogers@example.com")
        .unwrap()
        .build();

    MailgunMailer::new().deliver(&mail).await.unwrap();

    assert_eq!(
        sent_fields(&server).await,
        pairs(&[
            ("to", "steve.rogers@example.com"),
            ("from", "Nick Fury <fury@shield.gov>"),
            ("o:testmode", "yes"),
        ])
    );
}

#[tokio::test]
async fn mail_params_take_precedence_over_defaults() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let config = config(&server)
        .from("fury@shield.gov")
        .default_parameter("o:testmode", "yes");

    let mail = MailBuilder::using(config)
        .from("tony.stark@example.com")
        .unwrap()
        .option("testmode", "no")
        .unwrap()
        .build();

    MailgunMailer::new().deliver(&mail).await.unwrap();

    assert_eq!(
        sent_fields(&server).await,
        pairs(&[("from", "tony.stark@example.com"), ("o:testmode", "no")])
    );
}

// ============================================================================
// Attachment Tests
// ============================================================================

#[tokio::test]
async fn mail_with_attachments_is_multipart() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let mut builder = MailBuilder::using(config(&server));
    builder
        .from("tony.stark@example.com")
        .unwrap()
        .to("steve.rogers@example.com")
        .unwrap();
    builder
        .multipart()
        .attachment(Attachment::from_bytes("mark-42.pdf", b"%PDF-1.4".to_vec()))
        .unwrap()
        .inline(Attachment::from_bytes("logo.png", vec![0x89, 0x50, 0x4E, 0x47]))
        .unwrap()
        .mail_builder()
        .text("Specs attached")
        .unwrap();

    MailgunMailer::new().deliver(&builder.build()).await.unwrap();

    let (content_type, body) = sent_body(&server).await;
    assert!(content_type.starts_with("multipart/form-data"));

    let from = body.find("name=\"from\"").unwrap();
    let attachment = body
        .find("name=\"attachment\"; filename=\"mark-42.pdf\"")
        .unwrap();
    let inline = body.find("name=\"inline\"; filename=\"logo.png\"").unwrap();
    let text = body.find("name=\"text\"").unwrap();

    assert!(from < attachment);
    assert!(attachment < inline);
    assert!(inline < text);
    assert!(body.contains("application/pdf"));
    assert!(body.contains("%PDF-1.4"));
}

#[tokio::test]
async fn default_fields_follow_multipart_parts() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let config = config(&server)
        .from(("Nick Fury", "fury@shield.gov"))
        .default_parameter("o:testmode", "yes");

    let mut builder = MailBuilder::using(config);
    builder.to("steve.rogers@example.com").unwrap();
    builder
        .multipart()
        .attachment(Attachment::from_text("briefing.txt", "Phase two"))
        .unwrap();

    MailgunMailer::new().deliver(&builder.build()).await.unwrap();

    let (content_type, body) = sent_body(&server).await;
    assert!(content_type.starts_with("multipart/form-data"));

    let to = body.find("name=\"to\"").unwrap();
    let attachment = body
        .find("name=\"attachment\"; filename=\"briefing.txt\"")
        .unwrap();
    let from = body.find("name=\"from\"").unwrap();
    let testmode = body.find("name=\"o:testmode\"").unwrap();

    assert!(to < attachment);
    assert!(attachment < from);
    assert!(from < testmode);
    assert!(body.contains("Nick Fury <fury@shield.gov>"));
    assert_eq!(body.matches("name=\"from\"").count(), 1);
}

#[tokio::test]
async fn invalid_attachment_content_type_is_an_error() {
    let server = MockServer::start().await;

    let mut builder = MailBuilder::using(config(&server));
    builder
        .multipart()
        .attachment(Attachment::from_bytes("broken.bin", vec![1]).content_type("not a mime"))
        .unwrap();

    let result = MailgunMailer::new().deliver(&builder.build()).await;
    assert!(matches!(result, Err(MailError::AttachmentError(_))));
}

// ============================================================================
// Error Response Tests
// ============================================================================

#[tokio::test]
async fn deliver_with_401_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = MailgunMailer::new()
        .deliver(&valid_mail(config(&server)))
        .await
        .unwrap_err();

    match err {
        MailError::ProviderError {
            provider,
            message,
            status,
        } => {
            assert_eq!(provider, "mailgun");
            assert_eq!(message, "Forbidden");
            assert_eq!(status, Some(401));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn deliver_with_json_error_uses_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "'from' parameter is missing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = MailgunMailer::new()
        .deliver(&valid_mail(config(&server)))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("'from' parameter is missing"));
}

#[tokio::test]
async fn deliver_with_empty_api_key_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(success_response())
        .expect(0)
        .mount(&server)
        .await;

    let config = Configuration::new("", "avengers.com").api_url(server.uri());
    let result = MailgunMailer::new().deliver(&valid_mail(config)).await;
    assert!(matches!(result, Err(MailError::Configuration(_))));
}

#[tokio::test]
async fn deliver_with_empty_default_sender_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(success_response())
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server).from("");
    let mail = MailBuilder::using(config)
        .to("steve.rogers@example.com")
        .unwrap()
        .build();

    let result = MailgunMailer::new().deliver(&mail).await;
    assert!(matches!(result, Err(MailError::Configuration(_))));
}

#[tokio::test]
async fn api_url_with_trailing_slash_posts_to_messages() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let config = Configuration::new("fake-api-key", "avengers.com")
        .api_url(format!("{}/", server.uri()));

    MailgunMailer::new().deliver(&valid_mail(config)).await.unwrap();
}

// ============================================================================
// EU Base URL Test
// ============================================================================

#[tokio::test]
async fn deliver_with_eu_domain_returns_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/avengers.eu/messages"))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let config = Configuration::new("fake-api-key", "avengers.eu").api_url(server.uri());
    let result = MailgunMailer::new().deliver(&valid_mail(config)).await;
    assert!(result.is_ok());
}

// ============================================================================
// Provider Name Test
// ============================================================================

#[test]
fn provider_name_returns_mailgun() {
    assert_eq!(MailgunMailer::new().provider_name(), "mailgun");
}
