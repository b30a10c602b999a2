use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageBuffer, Rgb};
use serde_json::{Value, json};
use snapcalorie_core::{
    application::create_service,
    domain::{
        common::{LLMConfig, SnapCalorieConfig, entities::app_errors::CoreError},
        meal_analysis::{
            entities::{MealImage, Quantity},
            parser::ReportError,
            ports::{LLMClient, MealAnalysisService},
            prompt::MEAL_ANALYSIS_PROMPT,
            value_objects::AnalyzeMealInput,
        },
    },
    infrastructure::llm::GeminiLLMClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";
const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn meal_image(format: image::ImageFormat) -> MealImage {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 6, Rgb([180, 90, 20]));
    let mut bytes = Cursor::new(Vec::new());
    buffer.write_to(&mut bytes, format).unwrap();
    MealImage::from_bytes(bytes.into_inner()).unwrap()
}

fn client(server: &MockServer) -> GeminiLLMClient {
    GeminiLLMClient::new("test-key".to_string(), MODEL.to_string()).with_base_url(server.uri())
}

fn reply(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": parts }, "finishReason": "STOP" }
        ]
    })
}

async fn request_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0].body_json::<Value>().unwrap()
}

#[tokio::test]
async fn test_sends_prompt_and_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&["{}"])))
        .expect(1)
        .mount(&server)
        .await;

    let image = meal_image(image::ImageFormat::Jpeg);
    let expected_data = general_purpose::STANDARD.encode(&image.data);

    let text = client(&server)
        .generate_with_image(MEAL_ANALYSIS_PROMPT.to_string(), image)
        .await
        .unwrap();
    assert_eq!(text, "{}");

    let body = request_body(&server).await;
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], MEAL_ANALYSIS_PROMPT);
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
    assert_eq!(parts[1]["inline_data"]["data"], expected_data);
    assert!(body.get("generation_config").is_none());
}

#[tokio::test]
async fn test_png_mime_type_and_structured_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&["{}"])))
        .mount(&server)
        .await;

    client(&server)
        .with_structured_output(true)
        .generate_with_image("prompt".to_string(), meal_image(image::ImageFormat::Png))
        .await
        .unwrap();

    let body = request_body(&server).await;
    assert_eq!(
        body["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/png"
    );
    assert_eq!(
        body["generation_config"]["response_mime_type"],
        "application/json"
    );
    assert_eq!(
        body["generation_config"]["response_schema"]["required"],
        json!(["items", "total"])
    );
}

#[tokio::test]
async fn test_joins_text_parts_of_first_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reply(&["```json\n{\"items\": ", "[]}\n```"])),
        )
        .mount(&server)
        .await;

    let text = client(&server)
        .generate_with_image("prompt".to_string(), meal_image(image::ImageFormat::Png))
        .await
        .unwrap();

    assert_eq!(text, "```json\n{\"items\": []}\n```");
}

#[tokio::test]
async fn test_error_status_is_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_with_image("prompt".to_string(), meal_image(image::ImageFormat::Png))
        .await
        .unwrap_err();

    match err {
        CoreError::ExternalServiceError(message) => {
            assert!(message.contains("403"));
            assert!(message.contains("API key not valid"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_prompt_has_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_with_image("prompt".to_string(), meal_image(image::ImageFormat::Png))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::ExternalServiceError("No response from LLM".to_string())
    );
}

#[tokio::test]
async fn test_failure_message_does_not_leak_key() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = GeminiLLMClient::new("super-secret".to_string(), MODEL.to_string())
        .with_base_url(uri)
        .generate_with_image("prompt".to_string(), meal_image(image::ImageFormat::Png))
        .await
        .unwrap_err();

    match err {
        CoreError::ExternalServiceError(message) => assert!(!message.contains("super-secret")),
        other => panic!("unexpected error: {:?}", other),
    }
}

fn config(server: &MockServer, api_key: Option<&str>) -> SnapCalorieConfig {
    SnapCalorieConfig {
        llm: LLMConfig {
            gemini_api_key: api_key.map(str::to_string),
            gemini_model: MODEL.to_string(),
            gemini_base_url: server.uri(),
            structured_output: false,
        },
    }
}

#[tokio::test]
async fn test_service_analyzes_fenced_reply_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&[
            "```json\n{\"items\": [{\"name\": \"Salmon\", \"calories\": 367, \"protein\": 39, \"carbs\": 0, \"fat\": 22}], \"total\": {\"calories\": 367, \"protein\": 39, \"carbs\": 0, \"fat\": 22}}\n```",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_service(config(&server, Some("test-key"))).await.unwrap();
    let report = service
        .analyze_meal(AnalyzeMealInput {
            image: meal_image(image::ImageFormat::Jpeg),
        })
        .await
        .unwrap();

    assert_eq!(report.items[0].name, "Salmon");
    assert_eq!(report.total.protein, Quantity::Integer(39));
}

#[tokio::test]
async fn test_service_without_key_never_calls_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&["{}"])))
        .expect(0)
        .mount(&server)
        .await;

    for api_key in [None, Some(""), Some("  ")] {
        let service = create_service(config(&server, api_key)).await.unwrap();
        assert!(!service.is_llm_configured());

        let err = service
            .analyze_meal(AnalyzeMealInput {
                image: meal_image(image::ImageFormat::Png),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::MissingApiKey);
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_reports_missing_total() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&[r#"{"items": []}"#])))
        .mount(&server)
        .await;

    let service = create_service(config(&server, Some("test-key"))).await.unwrap();
    let err = service
        .analyze_meal(AnalyzeMealInput {
            image: meal_image(image::ImageFormat::Png),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CoreError::MalformedResponse(ReportError::MissingField {
            field: "total".to_string()
        })
    );
}

#[tokio::test]
async fn test_debug_output_hides_api_key() {
    let server = MockServer::start().await;

    let client_output = format!("{:?}", client(&server));
    assert!(!client_output.contains("test-key"));
    assert!(client_output.contains("<redacted>"));

    let service = create_service(config(&server, Some("test-key"))).await.unwrap();
    let service_output = format!("{:?}", service);
    assert!(!service_output.contains("test-key"));
    assert!(service_output.contains(MODEL));
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected() {
    let server = MockServer::start().await;

    let mut bad_url = config(&server, Some("test-key"));
    bad_url.llm.gemini_base_url = "generativelanguage.googleapis.com".to_string();
    assert!(matches!(
        create_service(bad_url).await.unwrap_err(),
        CoreError::InvalidConfiguration(_)
    ));

    let mut bad_scheme = config(&server, None);
    bad_scheme.llm.gemini_base_url = "ftp://example.test/v1beta".to_string();
    assert!(matches!(
        create_service(bad_scheme).await.unwrap_err(),
        CoreError::InvalidConfiguration(_)
    ));

    let mut blank_model = config(&server, Some("test-key"));
    blank_model.llm.gemini_model = "  ".to_string();
    assert!(matches!(
        create_service(blank_model).await.unwrap_err(),
        CoreError::InvalidConfiguration(_)
    ));
}
