//! JSON shapes of the backend API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fridgechef_core::date::lenient;
use fridgechef_core::{IngredientId, RecipeId};
use fridgechef_pantry::Ingredient;
use fridgechef_recipes::{CandidateRecipe, PersistedRecipe, RecipeDetails};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: IngredientId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "lenient::option", default)]
    pub added_date: Option<NaiveDate>,
    /// The persisted expire date.
    #[serde(with = "lenient::option", default)]
    pub limit_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_frozen: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<IngredientRecord> for Ingredient {
    fn from(record: IngredientRecord) -> Self {
        Ingredient {
            id: Some(record.id),
            name: record.name,
            category: record.category,
            added_date: record.added_date,
            expire_date: record.limit_date,
            is_frozen: record.is_frozen.unwrap_or(false),
            image_url: record.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientList {
    pub ingredients: Vec<IngredientRecord>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientPayload {
    pub name: String,
    pub category: String,
    #[serde(with = "lenient::option", skip_serializing_if = "Option::is_none", default)]
    pub added_date: Option<NaiveDate>,
    #[serde(with = "lenient::option", skip_serializing_if = "Option::is_none", default)]
    pub limit_date: Option<NaiveDate>,
    pub is_frozen: bool,
}

impl From<&Ingredient> for IngredientPayload {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            category: ingredient.category.clone(),
            added_date: ingredient.added_date,
            limit_date: ingredient.expire_date,
            is_frozen: ingredient.is_frozen,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl From<VideoRecord> for CandidateRecipe {
    fn from(video: VideoRecord) -> Self {
        CandidateRecipe {
            source_url: video.url,
            title: video.title,
            thumbnail_url: video.thumbnail,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

/// Recipe as returned by the detail endpoint and the recipe listing.
///
/// The detail endpoint names the source `youtube_url`, the listing
/// `youtube_link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub id: Option<RecipeId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub seasonings: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, alias = "youtube_link")]
    pub youtube_url: String,
    #[serde(default)]
    pub is_starred: bool,
}

impl RecipeRecord {
    pub fn details(&self) -> RecipeDetails {
        RecipeDetails {
            subtitle: self.subtitle.clone().unwrap_or_default(),
            ingredients: self.ingredients.clone(),
            seasonings: self.seasonings.clone(),
            steps: self.steps.clone(),
        }
    }

    /// `None` when the backend did not assign an id.
    pub fn into_persisted(self, fallback_source: &str) -> Option<PersistedRecipe> {
        let details = self.details();
        let id = self.id?;
        let source_url = if self.youtube_url.is_empty() {
            fallback_source.to_string()
        } else {
            self.youtube_url
        };
        Some(PersistedRecipe {
            id,
            title: self.title,
            details,
            source_url,
            is_starred: self.is_starred,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub recipe: RecipeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_record_accepts_datetimes() {
        let record: IngredientRecord = serde_json::from_str(
            r#"{"id":4,"name":"우유","category":"유제품","added_date":"2024-05-01T09:30:00",
                "limit_date":"2024-05-08T00:00:00","is_frozen":null,"is_expired":false,
                "days_until_expiry":7,"image_url":"/static/milk.svg"}"#,
        )
        .unwrap();
        let ingredient = Ingredient::from(record);
        assert_eq!(ingredient.id, Some(IngredientId::new(4)));
        assert_eq!(ingredient.added_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(ingredient.expire_date, NaiveDate::from_ymd_opt(2024, 5, 8));
        assert!(!ingredient.is_frozen);
    }

    #[test]
    fn payload_carries_expire_date_as_limit_date() {
        let milk = Ingredient::draft("우유").with_dates(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
        );
        let json = serde_json::to_value(IngredientPayload::from(&milk)).unwrap();
        assert_eq!(json["limit_date"], "2024-05-08");
        assert_eq!(json["added_date"], "2024-05-01");
        assert_eq!(json["is_frozen"], false);
    }

    #[test]
    fn listing_and_detail_name_the_source_differently() {
        let listed: RecipeRecord =
            serde_json::from_str(r#"{"id":1,"title":"t","youtube_link":"https://y/watch?v=a"}"#).unwrap();
        assert_eq!(listed.youtube_url, "https://y/watch?v=a");

        let detail: RecipeEnvelope = serde_json::from_str(
            r#"{"status":"success","recipe":{"title":"t","subtitle":"s","steps":["a"],
                "ingredients":["두부 1모"],"seasonings":[],"youtube_url":"https://y/watch?v=b"}}"#,
        )
        .unwrap();
        assert_eq!(detail.recipe.details().ingredients, vec!["두부 1모"]);
        assert!(detail.recipe.into_persisted("x").is_none());
    }
}
