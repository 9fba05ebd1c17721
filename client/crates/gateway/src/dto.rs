//! Wire DTOs (Data Transfer Objects)
//!
//! Field names in this module are the service's wire contract.

use platform::secret::ClearTextPassword;
use serde::Deserialize;

// ============================================================================
// Discovery
// ============================================================================

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoveryResponse {
    pub message: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

// ============================================================================
// Account
// ============================================================================

/// `POST /register` form
#[derive(Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: ClearTextPassword,
}

/// `POST /token` form
///
/// The service names the account identifier `username`; it carries the email.
#[derive(Debug)]
pub struct TokenRequest {
    pub username: String,
    pub password: ClearTextPassword,
}

/// `POST /token` response
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// `{ message }` response shared by register and confirm
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Upload
// ============================================================================

/// One image file part
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// `POST /upload` form: `recto` is the front, `verso` the back
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub recto: ImagePart,
    pub verso: ImagePart,
}

/// Price guide attached to a suggestion
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceGuideDto {
    #[serde(default)]
    pub average_sell_price: Option<f64>,
    #[serde(default)]
    pub low_price: Option<f64>,
    #[serde(default)]
    pub trend_price: Option<f64>,
}

/// One ranked suggestion from the recognition service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestionDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prices: Option<PriceGuideDto>,
}

/// `POST /upload` response
///
/// Suggestions are in relevance order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub recto_text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pokemon_name: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<SuggestionDto>,
}

// ============================================================================
// Confirm
// ============================================================================

/// `POST /confirm` form
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: String,
    pub price: f64,
    pub image: String,
    pub finish: String,
}

impl ConfirmRequest {
    /// Form fields in wire order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("set_name", self.set_name.clone()),
            ("number", self.number.clone()),
            ("rarity", self.rarity.clone()),
            ("price", self.price.to_string()),
            ("image", self.image.clone()),
            ("finish", self.finish.clone()),
        ]
    }
}

// ============================================================================
// Collection (read-only)
// ============================================================================

/// `GET /collection/list` query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionFilter {
    pub set_name: Option<String>,
    pub rarity: Option<String>,
    pub finish: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CollectionFilter {
    /// Query pairs for the filters that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(set_name) = &self.set_name {
            pairs.push(("set_name", set_name.clone()));
        }
        if let Some(rarity) = &self.rarity {
            pairs.push(("rarity", rarity.clone()));
        }
        if let Some(finish) = &self.finish {
            pairs.push(("finish", finish.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// One persisted collection entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionEntryDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
}

/// `GET /collection/value` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionValueResponse {
    pub total_value: f64,
}

/// Card line in collection statistics
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardSummaryDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub finish: Option<String>,
}

/// `GET /collection/stats` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionStatsResponse {
    pub count: u64,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    #[serde(default)]
    pub most_expensive: Option<CardSummaryDto>,
    #[serde(default)]
    pub top5: Vec<CardSummaryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_deserialization() {
        let json = r#"{
            "recto_text": "Pikachu 58/102",
            "language": "en",
            "pokemon_name": "Pikachu",
            "card_number": "58/102",
            "status": "pending_confirmation",
            "suggestions": [
                {"id":"base1-58","name":"Pikachu","set":"Base Set","number":"58","rarity":"Common",
                 "image":"https://images.example/base1/58.png",
                 "prices":{"averageSellPrice":2.5,"lowPrice":0.5,"trendPrice":2.9,"reverseHoloSell":null}},
                {"id":"base2-60","name":"Pikachu","set":"Jungle","number":"60","rarity":null,"image":null,"prices":{}}
            ]
        }"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.suggestions.len(), 2);
        let first = &response.suggestions[0];
        assert_eq!(first.name.as_deref(), Some("Pikachu"));
        assert_eq!(first.set.as_deref(), Some("Base Set"));
        let prices = first.prices.as_ref().unwrap();
        assert_eq!(prices.average_sell_price, Some(2.5));
        assert_eq!(prices.trend_price, Some(2.9));

        let second = &response.suggestions[1];
        assert!(second.rarity.is_none());
        assert_eq!(second.prices.as_ref().unwrap().average_sell_price, None);
    }

    #[test]
    fn test_upload_response_without_suggestions() {
        let json = r#"{"recto_text":"","language":"unknown","pokemon_name":null,"card_number":null,"status":"pending_confirmation"}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(response.suggestions.is_empty());
        assert_eq!(response.language.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_token_response_debug_redacted() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc.def.ghi","token_type":"bearer"}"#)
                .unwrap();
        assert_eq!(response.access_token, "abc.def.ghi");
        assert!(!format!("{:?}", response).contains("abc.def.ghi"));
    }

    #[test]
    fn test_confirm_form_fields() {
        let request = ConfirmRequest {
            name: "Pikachu".into(),
            set_name: "Base Set".into(),
            number: "58".into(),
            rarity: "Common".into(),
            price: 2.5,
            image: String::new(),
            finish: "Normal".into(),
        };
        let fields = request.form_fields();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["name", "set_name", "number", "rarity", "price", "image", "finish"]
        );
        assert_eq!(fields[4].1, "2.5");
    }

    #[test]
    fn test_collection_filter_pairs() {
        assert!(CollectionFilter::default().is_empty());

        let filter = CollectionFilter {
            rarity: Some("Rare Holo".into()),
            min_price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("rarity", "Rare Holo".to_string()), ("min_price", "10".to_string())]
        );
    }

    #[test]
    fn test_stats_response_deserialization() {
        let json = r#"{"count":0,"avg_price":0.0,"max_price":0.0,"min_price":0.0,"most_expensive":null,"top5":[]}"#;
        let stats: CollectionStatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.most_expensive.is_none());
    }
}
