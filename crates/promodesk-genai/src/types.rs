//! Input and output schemas for the two generation flows.
//!
//! Field names are camelCase on the wire; the backend is prompted with the
//! same names it must answer with.

use promodesk_core::{FieldErrors, Validator};
use serde::{Deserialize, Serialize};

use crate::error::GenAiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketingContentInput {
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub key_features: String,
    pub tone: String,
}

impl MarketingContentInput {
    /// # Errors
    ///
    /// Returns every field shorter than its minimum.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.min_len("productName", &self.product_name, 3)
            .min_len("productDescription", &self.product_description, 50)
            .min_len("targetAudience", &self.target_audience, 10)
            .min_len("keyFeatures", &self.key_features, 10)
            .min_len("tone", &self.tone, 3);
        v.finish(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContent {
    pub headline: String,
    pub body: String,
    pub call_to_action: String,
}

impl MarketingContent {
    pub(crate) fn check(&self) -> Result<(), GenAiError> {
        for (field, value) in [
            ("headline", &self.headline),
            ("body", &self.body),
            ("callToAction", &self.call_to_action),
        ] {
            if value.trim().is_empty() {
                return Err(GenAiError::Schema {
                    flow: crate::flows::MARKETING_CONTENT_FLOW,
                    reason: format!("{field} is empty"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSuggestionInput {
    pub user_profile: String,
    pub interests: String,
    /// Optional; blank means none.
    pub past_promotions: Option<String>,
}

impl ProductSuggestionInput {
    /// # Errors
    ///
    /// Returns every field shorter than its minimum.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.min_len("userProfile", &self.user_profile, 20)
            .min_len("interests", &self.interests, 5);
        v.finish(())
    }

    pub(crate) fn past_promotions(&self) -> Option<&str> {
        self.past_promotions
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSuggestions {
    pub product_recommendations: Vec<String>,
    pub reasoning: String,
}

impl ProductSuggestions {
    pub(crate) fn check(&self) -> Result<(), GenAiError> {
        let schema = |reason: &str| GenAiError::Schema {
            flow: crate::flows::PRODUCT_SUGGESTIONS_FLOW,
            reason: reason.to_string(),
        };
        if self.product_recommendations.is_empty() {
            return Err(schema("productRecommendations is empty"));
        }
        if self
            .product_recommendations
            .iter()
            .any(|r| r.trim().is_empty())
        {
            return Err(schema("productRecommendations contains an empty entry"));
        }
        if self.reasoning.trim().is_empty() {
            return Err(schema("reasoning is empty"));
        }
        Ok(())
    }
}
