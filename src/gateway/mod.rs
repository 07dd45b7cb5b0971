//! Client for the CMDB REST API.
//!
//! Every collection supports list, get, create, update and delete. Bodies are snake_case
//! on the wire and camelCase in the models; the translation happens here and nowhere else.

mod case;
mod resource;

pub use case::*;
pub use resource::*;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AppError, GatewayError};
use crate::models::{Entity, Validate};

/// Error body of the CMDB API. FastAPI-style backends use `detail`, others `message`.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client bound to one CMDB API base address.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: Client,
    base_url: Url,
}

impl ApiGateway {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::Config(format!("Invalid CMDB API URL {:?}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "CMDB API URL {:?} cannot carry a path",
                base_url.as_str()
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// URL made of the base path followed by `segments`. Each segment is percent-encoded
    /// on its own, so a `/`, `?` or `#` inside one cannot leave it.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` only accepts bases that can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self, resource: Resource) -> Url {
        self.url(&["api", resource.as_str()])
    }

    fn item_url(&self, resource: Resource, id: &str) -> Result<Url, AppError> {
        // URL normalization drops `.` and `..`, which would address the collection instead.
        if matches!(id, "" | "." | "..") {
            return Err(AppError::BadRequest(format!("Invalid record id {:?}", id)));
        }
        Ok(self.url(&["api", resource.as_str(), id]))
    }

    /// GET the full collection of `E`.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, GatewayError> {
        self.request(Method::GET, self.collection_url(E::RESOURCE), None)
            .await
    }

    /// Validate `input` and POST it. Invalid input never reaches the network.
    pub async fn create<E: Entity>(&self, input: &E::Input) -> Result<E, AppError> {
        input.validate()?;
        let body = serde_json::to_value(input)?;
        let created = self
            .request(Method::POST, self.collection_url(E::RESOURCE), Some(body))
            .await?;
        Ok(created)
    }

    /// Validate `input` and PUT it over the record `id`.
    pub async fn update<E: Entity>(&self, id: &str, input: &E::Input) -> Result<E, AppError> {
        input.validate()?;
        let body = serde_json::to_value(input)?;
        let url = self.item_url(E::RESOURCE, id)?;
        let updated = self.request(Method::PUT, url, Some(body)).await?;
        Ok(updated)
    }

    /// DELETE the record `id`. The response body is ignored.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), AppError> {
        let url = self.item_url(resource, id)?;
        self.request::<Value>(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<T, GatewayError> {
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(&keys_to_snake(body));
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = GatewayError::Application {
                status: status.as_u16(),
                message: error_message(status, &text),
            };
            tracing::warn!("{} {} rejected: {}", method, url, err);
            return Err(err);
        }

        let bytes = response.bytes().await?;
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))?
        };

        serde_json::from_value(keys_to_camel(value)).map_err(|e| {
            tracing::warn!("{} {} returned an unexpected body: {}", method, url, e);
            GatewayError::Decode(e.to_string())
        })
    }
}

/// Human-readable message from an error body, falling back to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )
    };

    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(ErrorPayload {
            detail: Some(Value::String(detail)),
            ..
        }) => detail,
        Ok(ErrorPayload {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorPayload {
            detail: Some(detail),
            ..
        }) => detail.to_string(),
        _ => fallback(),
    }
}
