//! Domain Entities
//!
//! Images going out, candidates coming back, and the draft in between.

use gateway::dto::{ConfirmRequest, ImagePart, SuggestionDto, UploadRequest, UploadResponse};

use crate::domain::value_objects::{DraftPatch, Finish, ImageSide};
use crate::error::{AcquisitionError, AcquisitionResult};

// ============================================================================
// Images
// ============================================================================

/// One photographed side of a card
#[derive(Clone, PartialEq, Eq)]
pub struct CardImage {
    file_name: String,
    bytes: Vec<u8>,
    content_type: &'static str,
}

impl CardImage {
    /// Create an image; zero-byte files are rejected
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> AcquisitionResult<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(AcquisitionError::EmptyImage { file_name });
        }
        let content_type = content_type_for(&file_name);
        Ok(Self {
            file_name,
            bytes,
            content_type,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn to_part(&self) -> ImagePart {
        ImagePart {
            file_name: self.file_name.clone(),
            content_type: self.content_type.to_string(),
            bytes: self.bytes.clone(),
        }
    }
}

impl std::fmt::Debug for CardImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type from the file extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Front and back of one card
///
/// Both halves must be present before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePair {
    front: Option<CardImage>,
    back: Option<CardImage>,
}

impl ImagePair {
    pub fn set(&mut self, side: ImageSide, image: CardImage) {
        match side {
            ImageSide::Front => self.front = Some(image),
            ImageSide::Back => self.back = Some(image),
        }
    }

    pub fn get(&self, side: ImageSide) -> Option<&CardImage> {
        match side {
            ImageSide::Front => self.front.as_ref(),
            ImageSide::Back => self.back.as_ref(),
        }
    }

    /// First missing side, front before back
    pub fn missing(&self) -> Option<ImageSide> {
        if self.front.is_none() {
            Some(ImageSide::Front)
        } else if self.back.is_none() {
            Some(ImageSide::Back)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_none()
    }

    pub fn clear(&mut self) {
        self.front = None;
        self.back = None;
    }

    /// Upload form; fails on a partial pair
    pub fn to_request(&self) -> AcquisitionResult<UploadRequest> {
        match (&self.front, &self.back) {
            (Some(front), Some(back)) => Ok(UploadRequest {
                recto: front.to_part(),
                verso: back.to_part(),
            }),
            (None, _) => Err(AcquisitionError::IncompleteInput {
                missing: ImageSide::Front,
            }),
            (_, None) => Err(AcquisitionError::IncompleteInput {
                missing: ImageSide::Back,
            }),
        }
    }
}

// ============================================================================
// Recognition results
// ============================================================================

/// One ranked identification returned by the recognition service
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Catalog id
    pub id: Option<String>,
    pub name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: Option<String>,
    pub image_url: Option<String>,
    pub average_sell_price: Option<f64>,
    pub low_price: Option<f64>,
    pub trend_price: Option<f64>,
}

impl From<SuggestionDto> for Candidate {
    fn from(dto: SuggestionDto) -> Self {
        let prices = dto.prices.unwrap_or_default();
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            set_name: dto.set.unwrap_or_default(),
            number: dto.number.unwrap_or_default(),
            rarity: dto.rarity,
            image_url: dto.image,
            average_sell_price: prices.average_sell_price,
            low_price: prices.low_price,
            trend_price: prices.trend_price,
        }
    }
}

/// Metadata the service extracted from the images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionSummary {
    pub recto_text: String,
    pub language: Option<String>,
    pub pokemon_name: Option<String>,
    pub card_number: Option<String>,
    pub status: Option<String>,
}

/// Result of one submission: metadata plus candidates in relevance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    pub summary: RecognitionSummary,
    pub candidates: Vec<Candidate>,
}

impl Recognition {
    /// "No candidates found" is a valid outcome, not an error
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<UploadResponse> for Recognition {
    fn from(response: UploadResponse) -> Self {
        Self {
            summary: RecognitionSummary {
                recto_text: response.recto_text,
                language: response.language,
                pokemon_name: response.pokemon_name,
                card_number: response.card_number,
                status: response.status,
            },
            candidates: response.suggestions.into_iter().map(Candidate::from).collect(),
        }
    }
}

// ============================================================================
// Draft
// ============================================================================

/// Editable record sent on confirmation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateDraft {
    pub name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: String,
    pub price: f64,
    pub image_url: String,
    pub finish: Finish,
}

impl CandidateDraft {
    /// Draft from a chosen candidate
    ///
    /// Missing strings become empty, a missing average price becomes `0`,
    /// finish starts at `Normal`.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            set_name: candidate.set_name.clone(),
            number: candidate.number.clone(),
            rarity: candidate.rarity.clone().unwrap_or_default(),
            price: candidate.average_sell_price.unwrap_or(0.0),
            image_url: candidate.image_url.clone().unwrap_or_default(),
            finish: Finish::Normal,
        }
    }

    /// Empty draft for manual entry
    pub fn manual() -> Self {
        Self::default()
    }

    /// Apply one patch
    ///
    /// A non-finite price is rejected and the draft is left unchanged.
    pub fn apply(&mut self, patch: DraftPatch) -> AcquisitionResult<()> {
        match patch {
            DraftPatch::Name(v) => self.name = v,
            DraftPatch::SetName(v) => self.set_name = v,
            DraftPatch::Number(v) => self.number = v,
            DraftPatch::Rarity(v) => self.rarity = v,
            DraftPatch::Price(v) if v.is_finite() => self.price = v,
            DraftPatch::Price(v) => {
                return Err(AcquisitionError::InvalidPrice {
                    value: v.to_string(),
                });
            }
            DraftPatch::Image(v) => self.image_url = v,
            DraftPatch::Finish(v) => self.finish = v,
        }
        Ok(())
    }

    /// Confirm form with every field
    pub fn to_request(&self) -> ConfirmRequest {
        ConfirmRequest {
            name: self.name.clone(),
            set_name: self.set_name.clone(),
            number: self.number.clone(),
            rarity: self.rarity.clone(),
            price: self.price,
            image: self.image_url.clone(),
            finish: self.finish.as_str().to_string(),
        }
    }
}
