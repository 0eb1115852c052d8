// File: autostylist-common/src/models/outfit.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::wardrobe::WardrobeItemRef;

/// Context tag that drives recommendation selection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    #[default]
    Casual,
    Office,
    Party,
    Traditional,
}

impl Occasion {
    pub const ALL: [Occasion; 4] = [
        Occasion::Casual,
        Occasion::Office,
        Occasion::Party,
        Occasion::Traditional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Office => "office",
            Occasion::Party => "party",
            Occasion::Traditional => "traditional",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occasion {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(Occasion::Casual),
            "office" => Ok(Occasion::Office),
            "party" => Ok(Occasion::Party),
            "traditional" => Ok(Occasion::Traditional),
            _ => Err(format!("Unknown occasion: {}", s)),
        }
    }
}

/// Which of the three recommendation tabs an outfit belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum OutfitRank {
    #[default]
    Best,
    Medium,
    Average,
}

impl OutfitRank {
    pub const ALL: [OutfitRank; 3] = [OutfitRank::Best, OutfitRank::Medium, OutfitRank::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutfitRank::Best => "best",
            OutfitRank::Medium => "medium",
            OutfitRank::Average => "average",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutfitRank::Best => "Best Match",
            OutfitRank::Medium => "Good Option",
            OutfitRank::Average => "Alternative",
        }
    }
}

impl fmt::Display for OutfitRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutfitRank {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" => Ok(OutfitRank::Best),
            "medium" | "good" => Ok(OutfitRank::Medium),
            "average" | "alt" | "alternative" => Ok(OutfitRank::Average),
            _ => Err(format!("Unknown outfit tab: {}", s)),
        }
    }
}

/// Optional accessory items layered onto a base outfit.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Extras {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<WardrobeItemRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jewellery: Option<WardrobeItemRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accessories: Vec<WardrobeItemRef>,
}

impl Extras {
    pub fn is_empty(&self) -> bool {
        self.shoes.is_none() && self.jewellery.is_none() && self.accessories.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &WardrobeItemRef> {
        self.shoes
            .iter()
            .chain(self.jewellery.iter())
            .chain(self.accessories.iter())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WardrobeItemRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<WardrobeItemRef>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Exactly one of these shapes is populated per outfit.
#[derive(Debug, Clone, PartialEq)]
pub enum OutfitBase {
    Separates {
        top: WardrobeItemRef,
        bottom: WardrobeItemRef,
    },
    FullBody(WardrobeItemRef),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "RawOutfit", into = "RawOutfit")]
pub struct Outfit {
    pub base: OutfitBase,
    pub extras: Extras,
}

impl Outfit {
    pub fn separates(top: WardrobeItemRef, bottom: WardrobeItemRef) -> Self {
        Self {
            base: OutfitBase::Separates { top, bottom },
            extras: Extras::default(),
        }
    }

    pub fn full_body(item: WardrobeItemRef) -> Self {
        Self {
            base: OutfitBase::FullBody(item),
            extras: Extras::default(),
        }
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    /// Base garments followed by extras, in display order.
    pub fn items(&self) -> Vec<&WardrobeItemRef> {
        let mut out = match &self.base {
            OutfitBase::Separates { top, bottom } => vec![top, bottom],
            OutfitBase::FullBody(item) => vec![item],
        };
        out.extend(self.extras.items());
        out
    }

    pub fn item_ids(&self) -> Vec<&str> {
        self.items().into_iter().map(|i| i.id.as_str()).collect()
    }
}

/// Wire shape: `top`, `bottom`, `full_body` are each nullable.
#[derive(Debug, Serialize, Deserialize, Clone)]
struct RawOutfit {
    #[serde(default)]
    top: Option<WardrobeItemRef>,
    #[serde(default)]
    bottom: Option<WardrobeItemRef>,
    #[serde(default)]
    full_body: Option<WardrobeItemRef>,
    #[serde(default, deserialize_with = "null_as_default_extras")]
    extras: Extras,
}

fn null_as_default_extras<'de, D>(deserializer: D) -> Result<Extras, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Extras>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<RawOutfit> for Outfit {
    type Error = String;

    fn try_from(raw: RawOutfit) -> Result<Self, Self::Error> {
        let base = match (raw.top, raw.bottom, raw.full_body) {
            (Some(top), Some(bottom), None) => OutfitBase::Separates { top, bottom },
            (None, None, Some(item)) => OutfitBase::FullBody(item),
            (_, _, Some(_)) => {
                return Err("outfit populates both top/bottom and full_body".to_string());
            }
            _ => {
                return Err("outfit needs either top and bottom, or full_body".to_string());
            }
        };
        Ok(Outfit {
            base,
            extras: raw.extras,
        })
    }
}

impl From<Outfit> for RawOutfit {
    fn from(outfit: Outfit) -> Self {
        let (top, bottom, full_body) = match outfit.base {
            OutfitBase::Separates { top, bottom } => (Some(top), Some(bottom), None),
            OutfitBase::FullBody(item) => (None, None, Some(item)),
        };
        RawOutfit {
            top,
            bottom,
            full_body,
            extras: outfit.extras,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutfitRecommendationSet {
    #[serde(default)]
    pub best: Option<Outfit>,
    #[serde(default)]
    pub medium: Option<Outfit>,
    #[serde(default)]
    pub average: Option<Outfit>,
}

impl OutfitRecommendationSet {
    pub fn get(&self, rank: OutfitRank) -> Option<&Outfit> {
        match rank {
            OutfitRank::Best => self.best.as_ref(),
            OutfitRank::Medium => self.medium.as_ref(),
            OutfitRank::Average => self.average.as_ref(),
        }
    }

    /// Populated tabs only, best first.
    pub fn iter(&self) -> impl Iterator<Item = (OutfitRank, &Outfit)> {
        OutfitRank::ALL
            .into_iter()
            .filter_map(move |rank| self.get(rank).map(|o| (rank, o)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// External conditions the backend used to build a recommendation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Context {
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub weather: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_type: Option<String>,
    pub occasion: Occasion,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: OutfitRecommendationSet,
    pub context: Context,
}
