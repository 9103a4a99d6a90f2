use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::domain::release_notes::ReleaseNotes;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(base_url: String, api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
            max_tokens,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.max_tokens,
        )
    }

    fn messages_endpoint(base_url: &str) -> String {
        format!("{}/v1/messages", base_url.trim_end_matches('/'))
    }

    fn headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            AppError::Configuration("API key contains invalid header characters".to_string())
        })?;
        headers.insert("x-api-key", api_key);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl LanguageModelService for AnthropicClient {
    async fn draft_release_notes(&self, prompt: &str) -> AppResult<ReleaseNotes> {
        let request_body = MessagesRequest::single_turn(&self.model, self.max_tokens, prompt);
        tracing::debug!(model = %self.model, max_tokens = self.max_tokens, "requesting release notes");

        let response = self
            .http
            .post(Self::messages_endpoint(&self.base_url))
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call Anthropic: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "Anthropic responded with {status}: {body}"
            )));
        }

        let payload: MessagesResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Anthropic response: {err}"))
        })?;

        payload.into_release_notes()
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

impl<'a> MessagesRequest<'a> {
    fn single_turn(model: &'a str, max_tokens: u32, prompt: &'a str) -> Self {
        Self {
            model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn into_release_notes(self) -> AppResult<ReleaseNotes> {
        if let Some(reason) = &self.stop_reason {
            tracing::debug!(stop_reason = %reason, "generation finished");
        }

        let first = self.content.into_iter().next().ok_or_else(|| {
            AppError::LanguageModel("Anthropic returned no content".to_string())
        })?;

        match (first.block_type.as_str(), first.text) {
            ("text", Some(text)) => Ok(ReleaseNotes::new(text)),
            (other, _) => Err(AppError::LanguageModel(format!(
                "expected a text block, got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    /// Answers a single request with a canned response and returns the raw request text.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .to_ascii_lowercase()
                    .lines()
                    .find_map(|line| {
                        line.strip_prefix("content-length:")
                            .and_then(|value| value.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client(base_url: String) -> AnthropicClient {
        AnthropicClient::new(
            base_url,
            "sk-test".to_string(),
            "claude-sonnet-4-20250514".to_string(),
            500,
        )
    }

    #[tokio::test]
    async fn posts_message_and_returns_first_text_block() {
        let body = json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "• Widgets refresh instantly"}],
            "stop_reason": "end_turn"
        })
        .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let notes = client(base_url)
            .draft_release_notes("Write notes")
            .await
            .unwrap();
        assert_eq!(notes.text, "• Widgets refresh instantly");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/messages HTTP/1.1\r\n"));
        let lowered = request.to_ascii_lowercase();
        assert!(lowered.contains("x-api-key: sk-test\r\n"));
        assert!(lowered.contains("anthropic-version: 2023-06-01\r\n"));
        assert!(lowered.contains("content-type: application/json\r\n"));

        let (_, payload) = request.split_once("\r\n\r\n").unwrap();
        let payload: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 500,
                "messages": [{"role": "user", "content": "Write notes"}],
            })
        );
    }

    #[tokio::test]
    async fn error_status_carries_response_body() {
        let body = json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })
        .to_string();
        let (base_url, server) = serve_once("401 Unauthorized", body).await;

        let result = client(base_url).draft_release_notes("Write notes").await;
        server.await.unwrap();

        match result {
            Err(AppError::LanguageModel(message)) => {
                assert!(message.contains("401"), "{message}");
                assert!(message.contains("invalid x-api-key"), "{message}");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(notes) => panic!("unexpected notes: {}", notes.text),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_error() {
        let (base_url, server) = serve_once("200 OK", "not json".to_string()).await;

        let result = client(base_url).draft_release_notes("Write notes").await;
        server.await.unwrap();

        assert!(matches!(result, Err(AppError::LanguageModel(_))));
    }

    #[test]
    fn serializes_single_user_message() {
        let request =
            MessagesRequest::single_turn("claude-sonnet-4-20250514", 500, "Write notes");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 500,
                "messages": [{"role": "user", "content": "Write notes"}],
            })
        );
    }

    #[test]
    fn builds_endpoint_from_base_url() {
        assert_eq!(
            AnthropicClient::messages_endpoint("https://api.anthropic.com/"),
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(
            AnthropicClient::messages_endpoint("http://localhost:8080"),
            "http://localhost:8080/v1/messages"
        );
    }

    #[test]
    fn takes_text_of_first_block() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "• New widget styles"},
                {"type": "text", "text": "ignored"}
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();

        let notes = response.into_release_notes().unwrap();
        assert_eq!(notes.text, "• New widget styles");
    }

    #[test]
    fn empty_content_is_an_error() {
        let response: MessagesResponse =
            serde_json::from_value(json!({"content": []})).unwrap();
        assert!(matches!(
            response.into_release_notes(),
            Err(AppError::LanguageModel(_))
        ));
    }

    #[test]
    fn non_text_first_block_is_an_error() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [{"type": "tool_use", "id": "toolu_1", "name": "x", "input": {}}]
        }))
        .unwrap();
        assert!(matches!(
            response.into_release_notes(),
            Err(AppError::LanguageModel(_))
        ));
    }

    #[test]
    fn rejects_api_key_with_control_characters() {
        let client = AnthropicClient::new(
            "http://localhost".to_string(),
            "bad\nkey".to_string(),
            "model".to_string(),
            500,
        );
        assert!(matches!(client.headers(), Err(AppError::Configuration(_))));
    }
}
