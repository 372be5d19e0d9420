use crate::types::{MarketingContentInput, ProductSuggestionInput};

pub(crate) fn marketing_content(input: &MarketingContentInput) -> String {
    format!(
        "You are an expert marketing copywriter for affiliate promoters.\n\
         Write promotional copy for the product below.\n\n\
         Product name: {name}\n\
         Product description: {description}\n\
         Target audience: {audience}\n\
         Key features: {features}\n\
         Tone: {tone}\n\n\
         Respond with a single JSON object with exactly these string fields:\n\
         \"headline\" (a catchy headline), \"body\" (two or three persuasive paragraphs), \
         \"callToAction\" (one short call to action).",
        name = input.product_name.trim(),
        description = input.product_description.trim(),
        audience = input.target_audience.trim(),
        features = input.key_features.trim(),
        tone = input.tone.trim(),
    )
}

pub(crate) fn product_suggestions(input: &ProductSuggestionInput) -> String {
    let history = input
        .past_promotions()
        .map(|p| format!("Products promoted before: {p}\n"))
        .unwrap_or_default();
    format!(
        "You help content creators choose products to promote.\n\
         Suggest products that fit the creator described below.\n\n\
         Creator profile: {profile}\n\
         Interests: {interests}\n\
         {history}\n\
         Respond with a single JSON object with these fields:\n\
         \"productRecommendations\" (an array of 3 to 5 product names or categories), \
         \"reasoning\" (a short paragraph explaining the choices).",
        profile = input.user_profile.trim(),
        interests = input.interests.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketing_prompt_carries_every_input_field() {
        let input = MarketingContentInput {
            product_name: "Energy Drink".to_string(),
            product_description: "A zero sugar drink".to_string(),
            target_audience: "Competitive gamers".to_string(),
            key_features: "Citrus, caffeine".to_string(),
            tone: "Hype".to_string(),
        };
        let prompt = marketing_content(&input);
        for needle in ["Energy Drink", "zero sugar", "Competitive gamers", "Citrus", "Hype"] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
        assert!(prompt.contains("\"callToAction\""));
    }

    #[test]
    fn suggestion_prompt_omits_blank_history() {
        let input = ProductSuggestionInput {
            user_profile: "Tech reviewer with a gaming audience".to_string(),
            interests: "gadgets".to_string(),
            past_promotions: Some("   ".to_string()),
        };
        assert!(!product_suggestions(&input).contains("promoted before"));

        let input = ProductSuggestionInput {
            past_promotions: Some("Smart plugs".to_string()),
            ..input
        };
        assert!(product_suggestions(&input).contains("Products promoted before: Smart plugs"));
    }
}
