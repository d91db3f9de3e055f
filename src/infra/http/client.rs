use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::usecase::ports::session::TokenSource;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("you do not have permission to do that")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response from server: {0}")]
    Decode(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// The backend answers either with the bare value or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Human-readable reason from an error body: `message`, then `error`, then
/// the raw text.
pub fn error_message(body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.chars().count() > 200 {
        format!("{}...", text.chars().take(200).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Maps a non-success status to its `ApiError`. `None` for 2xx.
pub fn status_error(status: u16, path: &str, body: &[u8]) -> Option<ApiError> {
    match status {
        200..=299 => None,
        401 => Some(ApiError::Unauthorized),
        403 => Some(ApiError::Forbidden),
        404 => Some(ApiError::NotFound(path.to_string())),
        _ => Some(ApiError::Status {
            status,
            message: error_message(body),
        }),
    }
}

/// REST client for the school-admin backend. Every request carries the
/// current session token as a bearer header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        log::info!("api client targeting {base_url}");
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.inspect_err(|err| {
            log::warn!("request to {path} failed: {err}");
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        if let Some(err) = status_error(status, path, &body) {
            log::warn!("{path} -> {status}: {err}");
            return Err(err);
        }
        log::debug!("{path} -> {status} ({} bytes)", body.len());
        Ok(body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.request(Method::GET, path), path).await?;
        decode_body(&body)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::POST, path).json(payload), path)
            .await?;
        decode_body(&body)
    }

    /// POST where the response body does not matter.
    pub async fn post_unit<B>(&self, path: &str, payload: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(payload), path)
            .await
            .map(|_| ())
    }

    pub async fn put_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(self.request(Method::PUT, path).json(payload), path)
            .await?;
        decode_body(&body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path), path)
            .await
            .map(|_| ())
    }

    /// Multipart upload with the file under the `file` field.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_path: &Path,
    ) -> Result<T, ApiError> {
        let bytes = std::fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let body = self
            .send(self.request(Method::POST, path).multipart(form), path)
            .await?;
        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    struct NoToken;

    impl TokenSource for NoToken {
        fn bearer_token(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn decodes_bare_and_wrapped_bodies() {
        let bare: Vec<Item> = decode_body(br#"[{"id":1},{"id":2}]"#).expect("bare list");
        let wrapped: Vec<Item> =
            decode_body(br#"{"data":[{"id":3}],"message":"ok"}"#).expect("wrapped list");

        assert_eq!(bare, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(wrapped, vec![Item { id: 3 }]);
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let result: Result<Vec<Item>, ApiError> = decode_body(b"<html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert!(status_error(204, "users/1", b"").is_none());
        assert!(matches!(
            status_error(401, "users", b""),
            Some(ApiError::Unauthorized)
        ));
        assert!(matches!(
            status_error(404, "users/9", b""),
            Some(ApiError::NotFound(path)) if path == "users/9"
        ));
        match status_error(422, "users", br#"{"message":"email taken"}"#) {
            Some(ApiError::Status { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "email taken");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_message_falls_back_to_text() {
        assert_eq!(error_message(br#"{"error":"bad otp"}"#), "bad otp");
        assert_eq!(error_message(b"  gateway timeout \n"), "gateway timeout");
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let client = ApiClient::new(
            "http://localhost:5000/api/",
            Duration::from_secs(5),
            Arc::new(NoToken),
        )
        .expect("client should build");

        assert_eq!(client.url("schools"), "http://localhost:5000/api/schools");
        assert_eq!(client.url("/schools/3"), "http://localhost:5000/api/schools/3");
    }
}
