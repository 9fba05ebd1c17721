//! Collection Views
//!
//! Read-only views of the persisted collection.

use gateway::dto::{CardSummaryDto, CollectionEntryDto, CollectionStatsResponse};

/// One persisted card
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub id: i64,
    pub name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: String,
    pub price: f64,
    pub image_url: String,
    pub finish: String,
}

impl From<CollectionEntryDto> for CollectionEntry {
    fn from(dto: CollectionEntryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            set_name: dto.set.unwrap_or_default(),
            number: dto.number.unwrap_or_default(),
            rarity: dto.rarity.unwrap_or_default(),
            price: dto.price.unwrap_or(0.0),
            image_url: dto.image.unwrap_or_default(),
            finish: dto.finish.unwrap_or_default(),
        }
    }
}

/// Card line in the statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CardSummary {
    pub name: String,
    pub set_name: String,
    pub price: f64,
    pub finish: String,
}

impl From<CardSummaryDto> for CardSummary {
    fn from(dto: CardSummaryDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            set_name: dto.set.unwrap_or_default(),
            price: dto.price.unwrap_or(0.0),
            finish: dto.finish.unwrap_or_default(),
        }
    }
}

/// Aggregate statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub count: u64,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub most_expensive: Option<CardSummary>,
    /// Most valuable cards, highest first
    pub top: Vec<CardSummary>,
}

impl From<CollectionStatsResponse> for CollectionStats {
    fn from(dto: CollectionStatsResponse) -> Self {
        Self {
            count: dto.count,
            avg_price: dto.avg_price,
            max_price: dto.max_price,
            min_price: dto.min_price,
            most_expensive: dto.most_expensive.map(CardSummary::from),
            top: dto.top5.into_iter().map(CardSummary::from).collect(),
        }
    }
}
