use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    common::{ChatTimeouts, LLMConfig},
    menu_analysis::{entities::GatewayError, ports::LLMClient, value_objects::ImageUpload},
};

const TEMPERATURE: f64 = 0.2;
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct ChatLLMClient {
    api_key: Option<String>,
    endpoint: String,
    text_model: String,
    image_model: String,
    text: Transport,
    image: Transport,
}

/// HTTP client tuned for one class of call (text or image).
#[derive(Debug, Clone)]
struct Transport {
    client: Client,
    timeouts: ChatTimeouts,
}

impl Transport {
    fn new(timeouts: ChatTimeouts) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .build()?;

        Ok(Self { client, timeouts })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<Part>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

impl Message {
    fn system(content: String) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(content),
        }
    }

    fn user(content: MessageContent) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

impl ChatLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            text: Transport::new(config.text_timeouts)?,
            image: Transport::new(config.image_timeouts)?,
        })
    }

    async fn call_chat_api(
        &self,
        transport: &Transport,
        request: ChatRequest<'_>,
    ) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;
        let total = transport.timeouts.total;

        let response = transport
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(total)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, total.as_secs_f64()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, total.as_secs_f64()))?;

        interpret_response(status, &body).inspect_err(|e| {
            tracing::error!(model = request.model, "Chat completion failed: {}", e);
        })
    }
}

fn transport_error(error: reqwest::Error, timeout_secs: f64) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout_secs)
    } else {
        tracing::error!("Chat completion request failed: {}", error);
        GatewayError::Transport(error.to_string())
    }
}

/// Turns a raw HTTP status and body into the reply content or a diagnostic.
fn interpret_response(status: StatusCode, body: &str) -> Result<String, GatewayError> {
    let data: Option<Value> = serde_json::from_str(body).ok();

    if status.is_client_error() || status.is_server_error() {
        let detail = data
            .as_ref()
            .and_then(extract_error)
            .unwrap_or_else(|| body.to_string());
        return Err(GatewayError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let Some(data) = data.filter(Value::is_object) else {
        return Err(GatewayError::MissingContent);
    };

    if let Some(detail) = extract_error(&data) {
        return Err(GatewayError::Upstream(detail));
    }

    data.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .ok_or(GatewayError::MissingContent)
}

/// Pulls a human-readable message out of an error payload, checking
/// `error.message`, `error.type`, a string `error`, then `message`.
fn extract_error(data: &Value) -> Option<String> {
    let non_blank = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if !data.is_object() {
        return None;
    }

    match data.get("error") {
        Some(Value::Object(error)) => {
            if let Some(detail) =
                non_blank(error.get("message")).or_else(|| non_blank(error.get("type")))
            {
                return Some(detail);
            }
        }
        Some(Value::String(error)) if !error.trim().is_empty() => {
            return Some(error.trim().to_string());
        }
        _ => {}
    }

    non_blank(data.get("message"))
}

fn build_data_url(image: &ImageUpload) -> String {
    let mime_type = if image.mime_type.is_empty() {
        DEFAULT_IMAGE_MIME
    } else {
        image.mime_type.as_str()
    };
    let encoded = general_purpose::STANDARD.encode(&image.data);
    format!("data:{mime_type};base64,{encoded}")
}

fn text_messages(system_prompt: Option<String>, prompt: String) -> Vec<Message> {
    system_prompt
        .map(Message::system)
        .into_iter()
        .chain(std::iter::once(Message::user(MessageContent::Text(prompt))))
        .collect()
}

fn image_messages(system_prompt: String, prompt: String, image: &ImageUpload) -> Vec<Message> {
    vec![
        Message::system(system_prompt),
        Message::user(MessageContent::Parts(vec![
            Part::Text { text: prompt },
            Part::ImageUrl {
                image_url: ImageUrl {
                    url: build_data_url(image),
                },
            },
        ])),
    ]
}

impl LLMClient for ChatLLMClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_with_text(
        &self,
        system_prompt: Option<String>,
        prompt: String,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.text_model,
            messages: text_messages(system_prompt, prompt),
            temperature: TEMPERATURE,
        };

        self.call_chat_api(&self.text, request).await
    }

    async fn generate_with_image(
        &self,
        system_prompt: String,
        prompt: String,
        image: &ImageUpload,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.image_model,
            messages: image_messages(system_prompt, prompt, image),
            temperature: TEMPERATURE,
        };

        self.call_chat_api(&self.image, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    use super::*;
    use crate::domain::common::RawLLMSettings;

    fn client_for(server: &MockServer, text_timeout: Option<&str>) -> ChatLLMClient {
        ChatLLMClient::new(&LLMConfig::resolve(RawLLMSettings {
            api_key: Some("sk-test".to_string()),
            base_url: Some(format!("{}/v1/", server.uri())),
            text_model: Some("text-model".to_string()),
            image_model: Some("vision-model".to_string()),
            text_timeout_seconds: text_timeout.map(str::to_string),
            ..Default::default()
        }))
        .unwrap()
    }

    fn completion(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    fn image() -> ImageUpload {
        ImageUpload {
            data: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        }
    }

    #[test]
    fn text_request_omits_missing_system_prompt() {
        let request = ChatRequest {
            model: "text-model",
            messages: text_messages(None, "hello".to_string()),
            temperature: TEMPERATURE,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "text-model",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.2
            })
        );
    }

    #[test]
    fn image_request_embeds_data_url() {
        let messages = image_messages("describe".to_string(), "Look".to_string(), &image());
        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            json!([
                {"role": "system", "content": "describe"},
                {"role": "user", "content": [
                    {"type": "text", "text": "Look"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AQID"}}
                ]}
            ])
        );
    }

    #[test]
    fn data_url_defaults_mime_type() {
        let upload = ImageUpload {
            data: b"hi".to_vec(),
            mime_type: String::new(),
        };
        assert_eq!(build_data_url(&upload), "data:image/jpeg;base64,aGk=");
    }

    #[test]
    fn successful_reply_is_trimmed() {
        let body = r#"{"choices":[{"message":{"content":"  {\"menu_items\": []}\n"}}]}"#;
        assert_eq!(
            interpret_response(StatusCode::OK, body),
            Ok("{\"menu_items\": []}".to_string())
        );
    }

    #[test]
    fn error_status_prefers_structured_message() {
        let body = r#"{"error":{"message":"invalid api key","type":"auth"}}"#;
        assert_eq!(
            interpret_response(StatusCode::UNAUTHORIZED, body),
            Err(GatewayError::Status {
                status: 401,
                detail: "invalid api key".to_string()
            })
        );

        let err = interpret_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert_eq!(err.to_string(), "upstream 502: upstream down");
    }

    #[test]
    fn error_inside_success_body_is_a_failure() {
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"error":"quota exceeded"}"#),
            Err(GatewayError::Upstream("quota exceeded".to_string()))
        );
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"error":{"type":"rate_limit"}}"#),
            Err(GatewayError::Upstream("rate_limit".to_string()))
        );
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"message":"maintenance"}"#),
            Err(GatewayError::Upstream("maintenance".to_string()))
        );
    }

    #[test]
    fn blank_or_missing_content_is_a_failure() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            r#"{"choices":[{"message":{"content":[{"type":"text"}]}}]}"#,
            "not json",
            "[]",
        ] {
            assert_eq!(
                interpret_response(StatusCode::OK, body),
                Err(GatewayError::MissingContent),
                "body {body:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_credential_short_circuits() {
        let client = ChatLLMClient::new(&LLMConfig::resolve(RawLLMSettings {
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        }))
        .unwrap();

        assert!(!client.is_configured());
        assert_eq!(
            client.generate_with_text(None, "menu".to_string()).await,
            Err(GatewayError::MissingCredential)
        );
        assert_eq!(
            client
                .generate_with_image("sys".to_string(), "look".to_string(), &image())
                .await,
            Err(GatewayError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn text_call_posts_chat_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "text-model",
                "temperature": 0.2,
                "messages": [
                    {"role": "system", "content": "extract"},
                    {"role": "user", "content": "Pad Thai: peanut"}
                ]
            })))
            .respond_with(completion(" {\"menu_items\": []} "))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server, None)
            .generate_with_text(Some("extract".to_string()), "Pad Thai: peanut".to_string())
            .await;

        assert_eq!(reply, Ok("{\"menu_items\": []}".to_string()));
    }

    #[tokio::test]
    async fn image_call_uses_image_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({"model": "vision-model"})))
            .respond_with(completion("Noodles with peanuts."))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server, None)
            .generate_with_image("describe".to_string(), "Look".to_string(), &image())
            .await;

        assert_eq!(reply, Ok("Noodles with peanuts.".to_string()));
    }

    #[tokio::test]
    async fn error_status_carries_upstream_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"message": "model overloaded", "type": "server_error"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .generate_with_text(None, "menu".to_string())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Status {
                status: 503,
                detail: "model overloaded".to_string()
            }
        );
        assert_eq!(err.to_string(), "upstream 503: model overloaded");
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(completion("too late").set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("0.2"))
            .generate_with_text(None, "menu".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Timeout(_)), "got {err:?}");
        assert!(err.to_string().starts_with("timeout after 0.2"));
    }
}
