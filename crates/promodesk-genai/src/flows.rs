//! The two generation flows: validate input, prompt, parse structured output.

use serde::de::DeserializeOwned;

use crate::error::GenAiError;
use crate::prompts;
use crate::types::{
    MarketingContent, MarketingContentInput, ProductSuggestionInput, ProductSuggestions,
};
use crate::TextGenerator;

pub const MARKETING_CONTENT_FLOW: &str = "marketing_content";
pub const PRODUCT_SUGGESTIONS_FLOW: &str = "product_suggestions";

/// Generate a headline, body, and call to action for one product.
///
/// # Errors
///
/// - [`GenAiError::InvalidInput`] before any backend call if `input` is invalid.
/// - [`GenAiError::Schema`] if the generated text is not the expected object.
/// - Any transport or backend error from `generator`.
pub async fn generate_marketing_content(
    generator: &dyn TextGenerator,
    input: &MarketingContentInput,
) -> Result<MarketingContent, GenAiError> {
    input.validate().map_err(GenAiError::InvalidInput)?;
    let raw = generator
        .generate(&prompts::marketing_content(input))
        .await?;
    let content: MarketingContent = parse_structured(MARKETING_CONTENT_FLOW, &raw)?;
    content.check()?;
    tracing::info!(flow = MARKETING_CONTENT_FLOW, product = %input.product_name, "generation complete");
    Ok(content)
}

/// Suggest products to promote for a creator profile.
///
/// # Errors
///
/// Same contract as [`generate_marketing_content`].
pub async fn suggest_products(
    generator: &dyn TextGenerator,
    input: &ProductSuggestionInput,
) -> Result<ProductSuggestions, GenAiError> {
    input.validate().map_err(GenAiError::InvalidInput)?;
    let raw = generator
        .generate(&prompts::product_suggestions(input))
        .await?;
    let suggestions: ProductSuggestions = parse_structured(PRODUCT_SUGGESTIONS_FLOW, &raw)?;
    suggestions.check()?;
    tracing::info!(
        flow = PRODUCT_SUGGESTIONS_FLOW,
        recommendations = suggestions.product_recommendations.len(),
        "generation complete"
    );
    Ok(suggestions)
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````) if present.
/// Single-line fences (```` ```{...}``` ````) are accepted too.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end();
    let body = rest.strip_suffix("```").unwrap_or(rest);
    let body = match body.split_once('\n') {
        // The opening line holds only the info string (e.g. `json`).
        Some((info, after)) if !info.trim_start().starts_with(['{', '[']) => after,
        _ => body.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim()
}

fn parse_structured<T: DeserializeOwned>(flow: &'static str, raw: &str) -> Result<T, GenAiError> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| GenAiError::Schema {
        flow,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Returns a canned reply and records every prompt it receives.
    struct FakeGenerator {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GenAiError::Backend {
                    status: *status,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn marketing_input() -> MarketingContentInput {
        MarketingContentInput {
            product_name: "GamerFuel Energy Drink".to_string(),
            product_description: "Zero sugar energy drink with citrus flavor made for long gaming sessions."
                .to_string(),
            target_audience: "Competitive and casual gamers".to_string(),
            key_features: "Zero sugar, citrus, 160mg caffeine".to_string(),
            tone: "Energetic".to_string(),
        }
    }

    fn suggestion_input() -> ProductSuggestionInput {
        ProductSuggestionInput {
            user_profile: "Tech reviewer with a gaming-focused YouTube audience".to_string(),
            interests: "gadgets, esports".to_string(),
            past_promotions: None,
        }
    }

    #[tokio::test]
    async fn invalid_input_never_calls_backend() {
        let generator = FakeGenerator::replying("{}");
        let input = MarketingContentInput {
            product_description: "Too short".to_string(),
            ..marketing_input()
        };

        let err = generate_marketing_content(&generator, &input)
            .await
            .unwrap_err();

        match err {
            GenAiError::InvalidInput(errors) => assert!(errors.has("productDescription")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn marketing_content_parses_fenced_json() {
        let generator = FakeGenerator::replying(
            "```json\n{\"headline\":\"Fuel Up\",\"body\":\"Long sessions need focus.\",\"callToAction\":\"Grab a pack\"}\n```",
        );

        let content = generate_marketing_content(&generator, &marketing_input())
            .await
            .unwrap();

        assert_eq!(content.headline, "Fuel Up");
        assert_eq!(content.call_to_action, "Grab a pack");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn suggestions_parse_from_single_line_fence() {
        let generator = FakeGenerator::replying(
            r#"```{"productRecommendations":["Capture card"],"reasoning":"Fits a streaming audience."}```"#,
        );

        let suggestions = suggest_products(&generator, &suggestion_input())
            .await
            .unwrap();

        assert_eq!(suggestions.product_recommendations, ["Capture card"]);
        assert_eq!(suggestions.reasoning, "Fits a streaming audience.");
    }

    #[tokio::test]
    async fn empty_field_is_a_schema_error() {
        let generator =
            FakeGenerator::replying(r#"{"headline":"","body":"Body","callToAction":"Go"}"#);
        let err = generate_marketing_content(&generator, &marketing_input())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenAiError::Schema { flow: MARKETING_CONTENT_FLOW, ref reason } if reason.contains("headline")
        ));
    }

    #[tokio::test]
    async fn missing_reasoning_is_a_schema_error() {
        let generator = FakeGenerator::replying(r#"{"productRecommendations":["Smart plug"]}"#);
        let err = suggest_products(&generator, &suggestion_input())
            .await
            .unwrap_err();
        assert!(matches!(err, GenAiError::Schema { flow: PRODUCT_SUGGESTIONS_FLOW, .. }));
    }

    #[tokio::test]
    async fn suggestions_parse_and_keep_order() {
        let generator = FakeGenerator::replying(
            r#"{"productRecommendations":["Mechanical keyboard","Capture card"],"reasoning":"Fits a gaming tech audience."}"#,
        );
        let suggestions = suggest_products(&generator, &suggestion_input())
            .await
            .unwrap();
        assert_eq!(
            suggestions.product_recommendations,
            ["Mechanical keyboard", "Capture card"]
        );
    }

    #[tokio::test]
    async fn backend_failure_is_passed_through() {
        let generator = FakeGenerator::failing(503);
        let err = suggest_products(&generator, &suggestion_input())
            .await
            .unwrap_err();
        assert!(matches!(err, GenAiError::Backend { status: 503, .. }));
    }

    #[test]
    fn strip_code_fence_variants() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```[1,\n2]```"), "[1,\n2]");
    }
}
