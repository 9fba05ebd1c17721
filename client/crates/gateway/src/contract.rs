//! Gateway Contract
//!
//! Interface of the remote service. Implementation is in infrastructure layer.

use kernel::error::app_error::AppResult;
use platform::secret::SecretToken;

use crate::dto::{
    CollectionEntryDto, CollectionFilter, CollectionStatsResponse, CollectionValueResponse,
    ConfirmRequest, DiscoveryResponse, MessageResponse, RegisterRequest, TokenRequest,
    TokenResponse, UploadRequest, UploadResponse,
};

/// Remote service gateway trait
///
/// Stateless: gated calls receive the bearer token as an argument and attach
/// it verbatim.
#[trait_variant::make(RemoteGateway: Send)]
pub trait LocalRemoteGateway {
    /// `GET /` - capability discovery
    async fn discover(&self) -> AppResult<DiscoveryResponse>;

    /// `POST /register` - create an account (does not authenticate)
    async fn register(&self, request: &RegisterRequest) -> AppResult<MessageResponse>;

    /// `POST /token` - exchange credentials for a bearer token
    async fn authenticate(&self, request: &TokenRequest) -> AppResult<TokenResponse>;

    /// `POST /upload` - submit the front/back images for recognition
    async fn submit_images(
        &self,
        token: &SecretToken,
        request: &UploadRequest,
    ) -> AppResult<UploadResponse>;

    /// `POST /confirm` - persist a draft into the collection
    ///
    /// Not idempotent: never retry without the user asking for it.
    async fn confirm_draft(
        &self,
        token: &SecretToken,
        request: &ConfirmRequest,
    ) -> AppResult<MessageResponse>;

    /// `GET /collection/list` - persisted entries matching a filter
    async fn list_collection(
        &self,
        token: &SecretToken,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<CollectionEntryDto>>;

    /// `GET /collection/value` - total value of the collection
    async fn collection_value(&self, token: &SecretToken) -> AppResult<CollectionValueResponse>;

    /// `GET /collection/stats` - aggregate statistics
    async fn collection_stats(&self, token: &SecretToken) -> AppResult<CollectionStatsResponse>;
}
