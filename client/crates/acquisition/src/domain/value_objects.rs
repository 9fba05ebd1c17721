//! Domain Value Objects
//!
//! Closed vocabularies of the acquisition domain.

use std::fmt;
use std::str::FromStr;

use crate::error::{AcquisitionError, AcquisitionResult};

/// One side of a photographed card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSide {
    /// `recto` on the wire
    Front,
    /// `verso` on the wire
    Back,
}

impl ImageSide {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageSide::Front => "front",
            ImageSide::Back => "back",
        }
    }
}

impl fmt::Display for ImageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical print variant of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Finish {
    #[default]
    Normal,
    Holo,
    Reverse,
}

impl Finish {
    pub const ALL: [Finish; 3] = [Finish::Normal, Finish::Holo, Finish::Reverse];

    /// Wire value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Finish::Normal => "Normal",
            Finish::Holo => "Holo",
            Finish::Reverse => "Reverse",
        }
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Finish {
    type Err = AcquisitionError;

    /// Case-insensitive match on the three names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Finish::ALL
            .into_iter()
            .find(|finish| finish.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AcquisitionError::InvalidFinish {
                value: s.to_string(),
            })
    }
}

/// Editable draft field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    SetName,
    Number,
    Rarity,
    Price,
    Image,
    Finish,
}

impl DraftField {
    /// Resolve a field name: the wire names plus a few aliases
    pub fn parse(key: &str) -> AcquisitionResult<Self> {
        let field = match key.trim() {
            "name" => DraftField::Name,
            "set_name" | "set" | "setName" => DraftField::SetName,
            "number" => DraftField::Number,
            "rarity" => DraftField::Rarity,
            "price" => DraftField::Price,
            "image" | "imageUrl" => DraftField::Image,
            "finish" => DraftField::Finish,
            _ => {
                return Err(AcquisitionError::UnknownField {
                    key: key.to_string(),
                });
            }
        };
        Ok(field)
    }

    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::SetName => "set_name",
            DraftField::Number => "number",
            DraftField::Rarity => "rarity",
            DraftField::Price => "price",
            DraftField::Image => "image",
            DraftField::Finish => "finish",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Update of exactly one draft field
#[derive(Debug, Clone, PartialEq)]
pub enum DraftPatch {
    Name(String),
    SetName(String),
    Number(String),
    Rarity(String),
    Price(f64),
    Image(String),
    Finish(Finish),
}

impl DraftPatch {
    /// Build a patch from textual input
    ///
    /// ## Errors
    /// * `UnknownField` - key is not a draft field
    /// * `InvalidPrice` - price is not a finite number
    /// * `InvalidFinish` - finish is not Normal / Holo / Reverse
    pub fn parse(key: &str, value: &str) -> AcquisitionResult<Self> {
        let patch = match DraftField::parse(key)? {
            DraftField::Name => DraftPatch::Name(value.to_string()),
            DraftField::SetName => DraftPatch::SetName(value.to_string()),
            DraftField::Number => DraftPatch::Number(value.to_string()),
            DraftField::Rarity => DraftPatch::Rarity(value.to_string()),
            DraftField::Image => DraftPatch::Image(value.to_string()),
            DraftField::Price => DraftPatch::Price(parse_price(value)?),
            DraftField::Finish => DraftPatch::Finish(value.parse()?),
        };
        Ok(patch)
    }

    pub fn field(&self) -> DraftField {
        match self {
            DraftPatch::Name(_) => DraftField::Name,
            DraftPatch::SetName(_) => DraftField::SetName,
            DraftPatch::Number(_) => DraftField::Number,
            DraftPatch::Rarity(_) => DraftField::Rarity,
            DraftPatch::Price(_) => DraftField::Price,
            DraftPatch::Image(_) => DraftField::Image,
            DraftPatch::Finish(_) => DraftField::Finish,
        }
    }
}

fn parse_price(value: &str) -> AcquisitionResult<f64> {
    let invalid = || AcquisitionError::InvalidPrice {
        value: value.to_string(),
    };
    let price: f64 = value.trim().parse().map_err(|_| invalid())?;
    if price.is_finite() { Ok(price) } else { Err(invalid()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_parse_case_insensitive() {
        assert_eq!("holo".parse::<Finish>().unwrap(), Finish::Holo);
        assert_eq!(" REVERSE ".parse::<Finish>().unwrap(), Finish::Reverse);
        assert_eq!("Normal".parse::<Finish>().unwrap(), Finish::Normal);
        assert!(matches!(
            "Gold".parse::<Finish>(),
            Err(AcquisitionError::InvalidFinish { .. })
        ));
        assert!("".parse::<Finish>().is_err());
    }

    #[test]
    fn test_finish_default() {
        assert_eq!(Finish::default(), Finish::Normal);
    }

    #[test]
    fn test_field_aliases() {
        assert_eq!(DraftField::parse("set").unwrap(), DraftField::SetName);
        assert_eq!(DraftField::parse("setName").unwrap(), DraftField::SetName);
        assert_eq!(DraftField::parse("imageUrl").unwrap(), DraftField::Image);
        assert!(matches!(
            DraftField::parse("owner"),
            Err(AcquisitionError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_patch_parse_price() {
        assert_eq!(DraftPatch::parse("price", "12.5").unwrap(), DraftPatch::Price(12.5));
        assert_eq!(DraftPatch::parse("price", " 3 ").unwrap(), DraftPatch::Price(3.0));
        for bad in ["abc", "", "NaN", "inf", "1,5"] {
            assert!(
                matches!(
                    DraftPatch::parse("price", bad),
                    Err(AcquisitionError::InvalidPrice { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_patch_parse_text_fields_verbatim() {
        assert_eq!(
            DraftPatch::parse("name", "Mr. Mime").unwrap(),
            DraftPatch::Name("Mr. Mime".into())
        );
        assert_eq!(
            DraftPatch::parse("rarity", "").unwrap(),
            DraftPatch::Rarity(String::new())
        );
        assert_eq!(DraftPatch::parse("finish", "holo").unwrap().field(), DraftField::Finish);
    }
}
