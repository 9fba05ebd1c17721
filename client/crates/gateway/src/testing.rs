//! In-memory gateway
//!
//! Stands in for the remote service in tests of the session and acquisition
//! layers. Accounts, tokens and the collection live in memory; upload and
//! confirm outcomes can be scripted per call.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use kernel::error::app_error::{AppError, AppResult};
use platform::secret::SecretToken;

use crate::contract::RemoteGateway;
use crate::dto::{
    CardSummaryDto, CollectionEntryDto, CollectionFilter, CollectionStatsResponse,
    CollectionValueResponse, ConfirmRequest, DiscoveryResponse, MessageResponse, PriceGuideDto,
    RegisterRequest, SuggestionDto, TokenRequest, TokenResponse, UploadRequest, UploadResponse,
};

/// Gateway operations, for call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Discover,
    Register,
    Authenticate,
    SubmitImages,
    ConfirmDraft,
    ListCollection,
    CollectionValue,
    CollectionStats,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, String>,
    tokens: HashSet<String>,
    issued: u64,
    offline: bool,
    uploads: VecDeque<AppResult<UploadResponse>>,
    confirms: VecDeque<AppResult<MessageResponse>>,
    collection: Vec<CollectionEntryDto>,
    last_upload: Option<UploadRequest>,
    calls: HashMap<Operation, usize>,
}

impl State {
    fn record(&mut self, operation: Operation) {
        *self.calls.entry(operation).or_default() += 1;
    }

    fn check_token(&self, token: &SecretToken) -> AppResult<()> {
        if self.tokens.contains(token.expose()) {
            Ok(())
        } else {
            Err(AppError::auth("Invalid or expired token").with_action("Log in again"))
        }
    }
}

/// In-memory [`RemoteGateway`]
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<State>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.lock()
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Make `discover` fail with a network error
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Queue the outcome of the next `submit_images`
    ///
    /// With nothing queued, uploads succeed with no suggestions.
    pub fn script_upload(&self, outcome: AppResult<UploadResponse>) {
        self.lock().uploads.push_back(outcome);
    }

    /// Queue the outcome of the next `confirm_draft`
    ///
    /// A queued error leaves the collection untouched.
    pub fn script_confirm(&self, outcome: AppResult<MessageResponse>) {
        self.lock().confirms.push_back(outcome);
    }

    /// Invalidate every issued token, as a server-side expiry would
    pub fn revoke_tokens(&self) {
        self.lock().tokens.clear();
    }

    pub fn calls(&self, operation: Operation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Entries persisted by successful confirms
    pub fn confirmed(&self) -> Vec<CollectionEntryDto> {
        self.lock().collection.clone()
    }

    pub fn last_upload(&self) -> Option<UploadRequest> {
        self.lock().last_upload.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Build a suggestion with an average sell price
pub fn suggestion(
    name: &str,
    set: &str,
    number: &str,
    rarity: Option<&str>,
    average_sell_price: Option<f64>,
) -> SuggestionDto {
    SuggestionDto {
        id: Some(format!("{}-{}", set.to_lowercase().replace(' ', ""), number)),
        name: Some(name.to_string()),
        set: Some(set.to_string()),
        number: Some(number.to_string()),
        rarity: rarity.map(str::to_string),
        image: Some(format!("https://images.example/{}.png", number)),
        prices: Some(PriceGuideDto {
            average_sell_price,
            ..Default::default()
        }),
    }
}

fn matches_filter(entry: &CollectionEntryDto, filter: &CollectionFilter) -> bool {
    let eq = |wanted: &Option<String>, actual: &Option<String>| match wanted {
        Some(w) => actual.as_deref() == Some(w.as_str()),
        None => true,
    };
    let price = entry.price.unwrap_or(0.0);
    eq(&filter.set_name, &entry.set)
        && eq(&filter.rarity, &entry.rarity)
        && eq(&filter.finish, &entry.finish)
        && filter.min_price.is_none_or(|min| price >= min)
        && filter.max_price.is_none_or(|max| price <= max)
}

fn summary(entry: &CollectionEntryDto) -> CardSummaryDto {
    CardSummaryDto {
        name: entry.name.clone(),
        set: entry.set.clone(),
        price: entry.price,
        finish: entry.finish.clone(),
    }
}

impl RemoteGateway for FakeGateway {
    async fn discover(&self) -> AppResult<DiscoveryResponse> {
        let mut state = self.lock();
        state.record(Operation::Discover);
        if state.offline {
            return Err(AppError::network("Connection refused"));
        }
        Ok(DiscoveryResponse {
            message: "Card recognition API".to_string(),
            endpoints: ["/register", "/token", "/upload", "/confirm", "/collection/list"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<MessageResponse> {
        let mut state = self.lock();
        state.record(Operation::Register);
        if state.accounts.contains_key(&request.email) {
            return Err(AppError::validation("Email déjà utilisé"));
        }
        state
            .accounts
            .insert(request.email.clone(), request.password.expose().to_string());
        Ok(MessageResponse {
            message: "Utilisateur créé".to_string(),
        })
    }

    async fn authenticate(&self, request: &TokenRequest) -> AppResult<TokenResponse> {
        let mut state = self.lock();
        state.record(Operation::Authenticate);
        let valid = state
            .accounts
            .get(&request.username)
            .is_some_and(|password| password == request.password.expose());
        if !valid {
            return Err(AppError::auth("Identifiants invalides").with_action("Log in again"));
        }
        state.issued += 1;
        let token = format!("token-{}", state.issued);
        state.tokens.insert(token.clone());
        Ok(TokenResponse {
            access_token: token,
            token_type: Some("bearer".to_string()),
        })
    }

    async fn submit_images(
        &self,
        token: &SecretToken,
        request: &UploadRequest,
    ) -> AppResult<UploadResponse> {
        let mut state = self.lock();
        state.record(Operation::SubmitImages);
        state.check_token(token)?;
        state.last_upload = Some(request.clone());
        state.uploads.pop_front().unwrap_or_else(|| {
            Ok(UploadResponse {
                status: Some("pending_confirmation".to_string()),
                ..Default::default()
            })
        })
    }

    async fn confirm_draft(
        &self,
        token: &SecretToken,
        request: &ConfirmRequest,
    ) -> AppResult<MessageResponse> {
        let mut state = self.lock();
        state.record(Operation::ConfirmDraft);
        state.check_token(token)?;
        let outcome = state.confirms.pop_front().unwrap_or_else(|| {
            Ok(MessageResponse {
                message: "Carte ajoutée à la collection".to_string(),
            })
        });
        if outcome.is_ok() {
            let id = state.collection.len() as i64 + 1;
            state.collection.push(CollectionEntryDto {
                id,
                name: Some(request.name.clone()),
                set: Some(request.set_name.clone()),
                number: Some(request.number.clone()),
                rarity: Some(request.rarity.clone()),
                price: Some(request.price),
                image: Some(request.image.clone()),
                finish: Some(request.finish.clone()),
            });
        }
        outcome
    }

    async fn list_collection(
        &self,
        token: &SecretToken,
        filter: &CollectionFilter,
    ) -> AppResult<Vec<CollectionEntryDto>> {
        let mut state = self.lock();
        state.record(Operation::ListCollection);
        state.check_token(token)?;
        Ok(state
            .collection
            .iter()
            .filter(|entry| matches_filter(entry, filter))
            .cloned()
            .collect())
    }

    async fn collection_value(&self, token: &SecretToken) -> AppResult<CollectionValueResponse> {
        let mut state = self.lock();
        state.record(Operation::CollectionValue);
        state.check_token(token)?;
        let total_value = state.collection.iter().filter_map(|e| e.price).sum();
        Ok(CollectionValueResponse { total_value })
    }

    async fn collection_stats(&self, token: &SecretToken) -> AppResult<CollectionStatsResponse> {
        let mut state = self.lock();
        state.record(Operation::CollectionStats);
        state.check_token(token)?;

        let mut entries: Vec<&CollectionEntryDto> = state.collection.iter().collect();
        entries.sort_by(|a, b| {
            b.price
                .unwrap_or(0.0)
                .total_cmp(&a.price.unwrap_or(0.0))
        });
        let prices: Vec<f64> = entries.iter().map(|e| e.price.unwrap_or(0.0)).collect();
        let count = prices.len() as u64;
        let (avg_price, max_price, min_price) = if prices.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                prices.iter().sum::<f64>() / prices.len() as f64,
                prices.iter().copied().fold(f64::MIN, f64::max),
                prices.iter().copied().fold(f64::MAX, f64::min),
            )
        };

        Ok(CollectionStatsResponse {
            count,
            avg_price,
            max_price,
            min_price,
            most_expensive: entries.first().map(|e| summary(e)),
            top5: entries.iter().take(5).map(|e| summary(e)).collect(),
        })
    }
}
