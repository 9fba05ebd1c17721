//! HTTP Gateway Implementation
//!
//! reqwest-backed [`RemoteGateway`]. Form bodies are sent as
//! `multipart/form-data`, as the service expects.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use kernel::error::kind::ErrorKind;
use platform::config::ClientConfig;
use platform::http::{bearer, build_client, endpoint, error_from_response, normalize_base_url};
use platform::secret::SecretToken;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url, header};
use serde::de::DeserializeOwned;

use crate::contract::RemoteGateway;
use crate::dto::{
    CollectionEntryDto, CollectionFilter, CollectionStatsResponse, CollectionValueResponse,
    ConfirmRequest, DiscoveryResponse, ImagePart, MessageResponse, RegisterRequest, TokenRequest,
    TokenResponse, UploadRequest, UploadResponse,
};

/// reqwest-backed gateway
///
/// Cheap to clone: the underlying client is reference counted.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpGateway {
    /// Build a gateway and its HTTP client from configuration
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = build_client(config)?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, base_url: impl AsRef<str>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.as_ref()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn gated(builder: RequestBuilder, token: &SecretToken) -> RequestBuilder {
        builder.header(header::AUTHORIZATION, bearer(token.expose()))
    }

    /// Send one request and decode the response
    ///
    /// ## Returns
    /// * `Ok(T)` - 2xx with a decodable body
    /// * `Err(AppError)` - transport failure (`Network`), non-2xx
    ///   (kind from status, detail from body) or undecodable body (`Server`)
    async fn execute<T>(&self, operation: &'static str, builder: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Request failed without a response");
            AppError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), &body);
            match err.kind() {
                ErrorKind::Server => {
                    tracing::error!(operation, status = status.as_u16(), detail = err.message(), "Service error");
                }
                ErrorKind::Auth => {
                    tracing::warn!(operation, status = status.as_u16(), "Service rejected credentials");
                }
                _ => {
                    tracing::debug!(operation, status = status.as_u16(), detail = err.message(), "Service rejected request");
                }
            }
            return Err(err);
        }

        let payload = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(operation, error = %e, "Undecodable response payload");
            AppError::from(e)
        })?;

        tracing::debug!(operation, status = status.as_u16(), "Request completed");
        Ok(payload)
    }
}

fn text_form(fields: Vec<(&'static str, String)>) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

fn file_part(image: &ImagePart) -> AppResult<Part> {
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)?;
    Ok(part)
}

impl RemoteGateway for HttpGateway {
    async fn discover(&self) -> AppResult<DiscoveryResponse> {
        let builder = self.client.get(self.url("/"));
        self.execute("discover", builder).await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<MessageResponse> {
        let form = text_form(vec![
            ("email", request.email.clone()),
            ("password", request.password.expose().to_string()),
        ]);
        let builder = self.client.post(self.url("register")).multipart(form);
        self.execute("register", builder).await
    }

    async fn authenticate(&self, request: &TokenRequest) -> AppResult<TokenResponse> {
        let form = text_form(vec![
            ("username", request.username.clone()),
            ("password", request.password.expose().to_string()),
        ]);
        let builder = self.client.post(self.url("token")).multipart(form);
        self.execute("authenticate", builder).await
    }

    async fn submit_images(
        &self,
        token: &SecretToken,
        request: &UploadRequest,
    ) -> AppResult<UploadResponse> {
        let form = Form::new()
            .part("recto", file_part(&request.recto)?)
            .part("verso", file_part(&request.verso)?);

        tracing::debug!(
            recto_bytes = request.recto.bytes.len(),
            verso_bytes = request.verso.bytes.len(),
            "Uploading card images"
        );

        let builder = Self::gated(self.client.post(self.url("upload")), token).multipart(form);
        self.execute("submit_images", builder).await
    }

    async fn confirm_draft(
        &self,
        token: &SecretToken,
        request: &ConfirmRequest,
    ) -> AppResult<MessageResponse> {
        let form = text_form(request.form_fields());
        let builder = Self::gated(self.client.post(self.url("confirm")), token).multipart(form);
        self.execute("confirm_draft", builder).await
    }

    async fn list_collection(
        &self,
        token: &SecretToken,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<CollectionEntryDto>> {
        let url = Url::parse_with_params(&self.url("collection/list"), filter.query_pairs())
            .map_err(|e| AppError::validation(format!("Invalid collection URL: {}", e)))?;
        let builder = Self::gated(self.client.get(url), token);
        self.execute("list_collection", builder).await
    }

    async fn collection_value(&self, token: &SecretToken) -> AppResult<CollectionValueResponse> {
        let builder = Self::gated(self.client.get(self.url("collection/value")), token);
        self.execute("collection_value", builder).await
    }

    async fn collection_stats(&self, token: &SecretToken) -> AppResult<CollectionStatsResponse> {
        let builder = Self::gated(self.client.get(self.url("collection/stats")), token);
        self.execute("collection_stats", builder).await
    }
}
