// File: autostylist-common/src/models/feedback.rs

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::outfit::{OutfitRank, OutfitRecommendationSet};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FeedbackAction {
    Like,
    Dislike,
    Wear,
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackAction::Like => write!(f, "like"),
            FeedbackAction::Dislike => write!(f, "dislike"),
            FeedbackAction::Wear => write!(f, "wear"),
        }
    }
}

impl FromStr for FeedbackAction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(FeedbackAction::Like),
            "dislike" => Ok(FeedbackAction::Dislike),
            "wear" => Ok(FeedbackAction::Wear),
            _ => Err(format!("Unknown feedback action: {}", s)),
        }
    }
}

/// JSON body for `POST /feedback`.
///
/// `liked_items` and `disliked_items` never share an id; the backend applies
/// the payload without checking.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FeedbackEvent {
    pub liked_items: Vec<String>,
    pub disliked_items: Vec<String>,
    pub worn_items: Vec<String>,
}

impl FeedbackEvent {
    /// Builds the payload for `action` taken on the `rank` tab.
    ///
    /// Like and dislike also rate the other populated tabs the opposite way;
    /// wear only records the chosen outfit.
    pub fn from_choice(
        set: &OutfitRecommendationSet,
        rank: OutfitRank,
        action: FeedbackAction,
    ) -> Result<Self, Error> {
        let chosen = set
            .get(rank)
            .ok_or_else(|| Error::validation(format!("No {} outfit to give feedback on", rank.label())))?;

        let mut seen = BTreeSet::new();
        let selected: Vec<String> = chosen
            .item_ids()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(String::from)
            .collect();

        let others: Vec<String> = set
            .iter()
            .filter(|(r, _)| *r != rank)
            .flat_map(|(_, outfit)| outfit.item_ids())
            .filter(|id| seen.insert(*id))
            .map(String::from)
            .collect();

        let event = match action {
            FeedbackAction::Like => FeedbackEvent {
                liked_items: selected,
                disliked_items: others,
                worn_items: vec![],
            },
            FeedbackAction::Dislike => FeedbackEvent {
                liked_items: others,
                disliked_items: selected,
                worn_items: vec![],
            },
            FeedbackAction::Wear => FeedbackEvent {
                liked_items: vec![],
                disliked_items: vec![],
                worn_items: selected,
            },
        };
        Ok(event)
    }

    pub fn is_disjoint(&self) -> bool {
        let liked: BTreeSet<&String> = self.liked_items.iter().collect();
        self.disliked_items.iter().all(|id| !liked.contains(id))
    }

    pub fn is_empty(&self) -> bool {
        self.liked_items.is_empty() && self.disliked_items.is_empty() && self.worn_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outfit::{Extras, Outfit};
    use crate::models::wardrobe::WardrobeItemRef;

    fn r(id: &str) -> WardrobeItemRef {
        WardrobeItemRef {
            id: id.to_string(),
            image_path: format!("static/{id}.png"),
            category: None,
            colors: vec![],
        }
    }

    /// Shoes `s1` appear in every tab, so they can never be both liked and disliked.
    fn sample() -> OutfitRecommendationSet {
        let shoes = Extras {
            shoes: Some(r("s1")),
            ..Default::default()
        };
        OutfitRecommendationSet {
            best: Some(Outfit::separates(r("t1"), r("b1")).with_extras(shoes.clone())),
            medium: Some(Outfit::separates(r("t2"), r("b1")).with_extras(shoes.clone())),
            average: Some(Outfit::full_body(r("f1")).with_extras(Extras {
                shoes: Some(r("s1")),
                jewellery: Some(r("j1")),
                accessories: vec![r("a1"), r("a1")],
            })),
        }
    }

    #[test]
    fn like_rates_other_tabs_down_without_overlap() {
        let fb = FeedbackEvent::from_choice(&sample(), OutfitRank::Best, FeedbackAction::Like).unwrap();
        assert_eq!(fb.liked_items, vec!["t1", "b1", "s1"]);
        assert_eq!(fb.disliked_items, vec!["t2", "f1", "j1", "a1"]);
        assert!(fb.worn_items.is_empty());
        assert!(fb.is_disjoint());
    }

    #[test]
    fn dislike_mirrors_like() {
        let fb = FeedbackEvent::from_choice(&sample(), OutfitRank::Average, FeedbackAction::Dislike).unwrap();
        assert_eq!(fb.disliked_items, vec!["f1", "s1", "j1", "a1"]);
        assert_eq!(fb.liked_items, vec!["t1", "b1", "t2"]);
        assert!(fb.is_disjoint());
    }

    #[test]
    fn wear_only_records_selected() {
        let fb = FeedbackEvent::from_choice(&sample(), OutfitRank::Medium, FeedbackAction::Wear).unwrap();
        assert_eq!(fb.worn_items, vec!["t2", "b1", "s1"]);
        assert!(fb.liked_items.is_empty() && fb.disliked_items.is_empty());
    }

    #[test]
    fn every_choice_is_disjoint() {
        let set = sample();
        for rank in OutfitRank::ALL {
            for action in [FeedbackAction::Like, FeedbackAction::Dislike, FeedbackAction::Wear] {
                let fb = FeedbackEvent::from_choice(&set, rank, action).unwrap();
                assert!(fb.is_disjoint(), "{rank} {action}");
                let selected: BTreeSet<&str> =
                    set.get(rank).unwrap().item_ids().into_iter().collect();
                let complement = match action {
                    FeedbackAction::Like => &fb.disliked_items,
                    _ => &fb.liked_items,
                };
                assert!(complement.iter().all(|id| !selected.contains(id.as_str())));
            }
        }
    }

    #[test]
    fn empty_tab_is_rejected() {
        let set = OutfitRecommendationSet {
            best: Some(Outfit::separates(r("t1"), r("b1"))),
            ..Default::default()
        };
        let err = FeedbackEvent::from_choice(&set, OutfitRank::Medium, FeedbackAction::Like).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let fb = FeedbackEvent::from_choice(&set, OutfitRank::Best, FeedbackAction::Dislike).unwrap();
        assert!(fb.liked_items.is_empty());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let fb = FeedbackEvent {
            liked_items: vec!["a".into()],
            disliked_items: vec![],
            worn_items: vec!["a".into()],
        };
        assert_eq!(
            serde_json::to_value(&fb).unwrap(),
            serde_json::json!({"liked_items": ["a"], "disliked_items": [], "worn_items": ["a"]})
        );
    }
}
