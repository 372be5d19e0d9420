//! Run the generation flows from the terminal against the configured backend.

use clap::Subcommand;
use promodesk_core::AppConfig;
use promodesk_genai::{
    GeminiClient, MarketingContent, MarketingContentInput, ProductSuggestionInput,
    ProductSuggestions,
};

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Write a headline, body and call to action for one product
    Content {
        #[arg(long)]
        product_name: String,
        /// At least 50 characters
        #[arg(long)]
        product_description: String,
        #[arg(long)]
        target_audience: String,
        #[arg(long)]
        key_features: String,
        #[arg(long, default_value = "Friendly")]
        tone: String,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Suggest products to promote for a creator profile
    Suggest {
        /// At least 20 characters
        #[arg(long)]
        profile: String,
        #[arg(long)]
        interests: String,
        #[arg(long)]
        past_promotions: Option<String>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
}

fn client(config: &AppConfig) -> anyhow::Result<GeminiClient> {
    GeminiClient::from_app_config(config)?
        .ok_or_else(|| anyhow::anyhow!("GENAI_API_KEY is not set; generation is unavailable"))
}

pub(crate) async fn run_generate(
    config: &AppConfig,
    command: GenerateCommands,
) -> anyhow::Result<()> {
    match command {
        GenerateCommands::Content {
            product_name,
            product_description,
            target_audience,
            key_features,
            tone,
            json,
        } => {
            let input = MarketingContentInput {
                product_name,
                product_description,
                target_audience,
                key_features,
                tone,
            };
            // Invalid input never reaches the backend, so check it before
            // requiring a key.
            input
                .validate()
                .map_err(|errors| anyhow::anyhow!("invalid input: {errors}"))?;
            let content =
                promodesk_genai::generate_marketing_content(&client(config)?, &input).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&content)?);
            } else {
                print!("{}", render_marketing_content(&content));
            }
        }
        GenerateCommands::Suggest {
            profile,
            interests,
            past_promotions,
            json,
        } => {
            let input = ProductSuggestionInput {
                user_profile: profile,
                interests,
                past_promotions,
            };
            input
                .validate()
                .map_err(|errors| anyhow::anyhow!("invalid input: {errors}"))?;
            let suggestions = promodesk_genai::suggest_products(&client(config)?, &input).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                print!("{}", render_suggestions(&suggestions));
            }
        }
    }
    Ok(())
}

pub(crate) fn render_marketing_content(content: &MarketingContent) -> String {
    format!(
        "{}\n\n{}\n\n> {}\n",
        content.headline.trim(),
        content.body.trim(),
        content.call_to_action.trim()
    )
}

pub(crate) fn render_suggestions(suggestions: &ProductSuggestions) -> String {
    let mut out = String::new();
    for (i, product) in suggestions.product_recommendations.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, product.trim()));
    }
    out.push('\n');
    out.push_str(suggestions.reasoning.trim());
    out.push('\n');
    out
}
