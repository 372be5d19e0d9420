//! Entity records shared by the admin dashboard and the client portal.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record that can be listed, stored, and edited by identifier.
pub trait Entity: std::fmt::Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable storage discriminator (one per record type).
    const KIND: &'static str;
    /// Prefix used when minting identifiers for new records.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
}

/// Mint a timestamp-based identifier for a new record of type `T`.
///
/// Two records created within the same millisecond collide; callers that
/// need uniqueness must rely on the repository's conflict check.
#[must_use]
pub fn generate_id<T: Entity>() -> String {
    format!("{}{}", T::ID_PREFIX, Utc::now().timestamp_millis())
}

macro_rules! impl_display_as_serde {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandCategory {
    Technology,
    Fashion,
    Gaming,
    HealthWellness,
    FoodBeverage,
    HomeLiving,
    Other,
}

impl_display_as_serde!(BrandCategory {
    Technology => "technology",
    Fashion => "fashion",
    Gaming => "gaming",
    HealthWellness => "health_wellness",
    FoodBeverage => "food_beverage",
    HomeLiving => "home_living",
    Other => "other",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: BrandCategory,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl Entity for Brand {
    const KIND: &'static str = "brand";
    const ID_PREFIX: &'static str = "brand";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Promotional items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Product,
    Digital,
    Service,
    Subscription,
    Campaign,
}

impl_display_as_serde!(ItemType {
    Product => "product",
    Digital => "digital",
    Service => "service",
    Subscription => "subscription",
    Campaign => "campaign",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionalItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// References a [`Brand`] by id. Not enforced.
    pub brand_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub item_type: ItemType,
    pub affiliate_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Percentage in `0..=100`.
    pub commission_rate: Decimal,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Entity for PromotionalItem {
    const KIND: &'static str = "promotional_item";
    const ID_PREFIX: &'static str = "item";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub description: String,
    pub promoter_id: String,
    #[serde(default)]
    pub promotional_item_id: Option<String>,
    #[serde(default)]
    pub brand_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

impl Entity for Campaign {
    const KIND: &'static str = "campaign";
    const ID_PREFIX: &'static str = "camp";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Blog,
    Video,
    Tutorial,
    SocialPost,
}

impl_display_as_serde!(ContentType {
    Blog => "blog",
    Video => "video",
    Tutorial => "tutorial",
    SocialPost => "social_post",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPiece {
    pub id: String,
    pub title: String,
    pub body: String,
    pub creator_id: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub promotional_item_id: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub is_monetized: bool,
    /// Always zero when `is_monetized` is false.
    #[serde(default)]
    pub ad_revenue: Decimal,
}

impl Entity for ContentPiece {
    const KIND: &'static str = "content_piece";
    const ID_PREFIX: &'static str = "content";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Affiliate links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateLink {
    pub id: String,
    pub promotional_item_name: String,
    pub unique_code: String,
    pub short_link: String,
    pub original_url: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    pub created_date: NaiveDate,
}

impl Entity for AffiliateLink {
    const KIND: &'static str = "affiliate_link";
    const ID_PREFIX: &'static str = "link";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Earnings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningSource {
    Affiliate,
    AdRevenue,
    Campaign,
}

impl_display_as_serde!(EarningSource {
    Affiliate => "affiliate",
    AdRevenue => "ad_revenue",
    Campaign => "campaign",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningStatus {
    PaidOut,
    Credited,
    PendingPayout,
}

impl_display_as_serde!(EarningStatus {
    PaidOut => "paid_out",
    Credited => "credited",
    PendingPayout => "pending_payout",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earning {
    pub id: String,
    pub source: EarningSource,
    pub amount: Decimal,
    pub related_item_name: String,
    pub created_date: NaiveDate,
    pub status: EarningStatus,
}

impl Entity for Earning {
    const KIND: &'static str = "earning";
    const ID_PREFIX: &'static str = "earn";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Instagram,
    Youtube,
    Tiktok,
    Twitter,
    Facebook,
    Linkedin,
    Blog,
    Other,
}

impl_display_as_serde!(SocialPlatform {
    Instagram => "instagram",
    Youtube => "youtube",
    Tiktok => "tiktok",
    Twitter => "twitter",
    Facebook => "facebook",
    Linkedin => "linkedin",
    Blog => "blog",
    Other => "other",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub platform: SocialPlatform,
    pub profile_url: String,
    #[serde(default)]
    pub followers_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub social_profiles: Vec<SocialProfile>,
}

impl Entity for UserProfile {
    const KIND: &'static str = "user_profile";
    const ID_PREFIX: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Identifier of the single platform settings document.
pub const PLATFORM_SETTINGS_DOC_ID: &str = "platformSettings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub site_name: String,
    pub support_email: String,
    pub default_commission_rate: Decimal,
    pub allow_new_registrations: bool,
    pub maintenance_mode: bool,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            site_name: "PromoDesk".to_string(),
            support_email: "support@promodesk.example".to_string(),
            default_commission_rate: Decimal::new(10, 0),
            allow_new_registrations: true,
            maintenance_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_carries_prefix() {
        let id = generate_id::<Brand>();
        assert!(id.starts_with("brand"));
        assert!(id["brand".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn enums_serialize_snake_case() {
        let json = serde_json::to_string(&EarningStatus::PendingPayout).unwrap();
        assert_eq!(json, "\"pending_payout\"");
        assert_eq!(ContentType::SocialPost.to_string(), "social_post");
        assert_eq!(BrandCategory::HealthWellness.as_str(), "health_wellness");
    }

    #[test]
    fn campaign_defaults_counters_when_absent() {
        let campaign: Campaign = serde_json::from_value(serde_json::json!({
            "id": "camp9",
            "title": "Spring",
            "description": "Spring launch push",
            "promoter_id": "user001",
            "start_date": "2024-03-01",
            "end_date": "2024-03-31"
        }))
        .expect("deserialize campaign");
        assert_eq!(campaign.clicks, 0);
        assert!(campaign.brand_id.is_none());
    }
}
