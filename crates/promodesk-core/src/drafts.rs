//! Editor drafts and validation rules for every entity.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::editor::Draft;
use crate::model::{
    AffiliateLink, Brand, BrandCategory, Campaign, ContentPiece, ContentType, Earning,
    EarningSource, EarningStatus, Entity, ItemType, PlatformSettings, PromotionalItem,
    SocialPlatform, SocialProfile, UserProfile,
};
use crate::validate::{
    at_most_one_association, end_not_before_start, non_blank, FieldErrors, Validator,
};

/// Base URL for generated affiliate short links.
pub const SHORT_LINK_BASE: &str = "https://pdsk.link";

const DESCRIPTION_MAX: usize = 500;

fn percent_bounds() -> (Decimal, Decimal) {
    (Decimal::ZERO, Decimal::ONE_HUNDRED)
}

// ---------------------------------------------------------------------------
// Brand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandDraft {
    pub name: String,
    pub description: String,
    pub category: BrandCategory,
    pub logo_url: String,
    pub website_url: String,
}

impl Default for BrandDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: BrandCategory::Other,
            logo_url: String::new(),
            website_url: String::new(),
        }
    }
}

impl Draft for BrandDraft {
    type Record = Brand;

    fn from_record(record: &Brand) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            category: record.category,
            logo_url: record.logo_url.clone().unwrap_or_default(),
            website_url: record.website_url.clone().unwrap_or_default(),
        }
    }

    fn into_record(&self, id: String) -> Result<Brand, FieldErrors> {
        let mut v = Validator::new();
        v.min_len("name", &self.name, 2)
            .max_len("description", &self.description, DESCRIPTION_MAX)
            .optional_url("logo_url", Some(&self.logo_url))
            .optional_url("website_url", Some(&self.website_url));
        v.finish_with(|| Brand {
            id,
            name: self.name.trim().to_owned(),
            description: non_blank(Some(&self.description)),
            category: self.category,
            logo_url: non_blank(Some(&self.logo_url)),
            website_url: non_blank(Some(&self.website_url)),
        })
    }
}

// ---------------------------------------------------------------------------
// Promotional item
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionalItemDraft {
    pub name: String,
    pub description: String,
    pub brand_id: String,
    pub category_id: String,
    pub item_type: ItemType,
    pub affiliate_url: String,
    pub image_url: String,
    pub commission_rate: Decimal,
    /// JSON object as editable text; blank means no metadata.
    pub metadata: String,
}

impl Default for PromotionalItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            brand_id: String::new(),
            category_id: String::new(),
            item_type: ItemType::Product,
            affiliate_url: String::new(),
            image_url: String::new(),
            commission_rate: Decimal::new(10, 0),
            metadata: String::new(),
        }
    }
}

/// Parse metadata text; blank text is `Ok(None)`.
fn parse_metadata(
    text: &str,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, &'static str> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err("must be a JSON object"),
        Err(_) => Err("must be valid JSON"),
    }
}

impl Draft for PromotionalItemDraft {
    type Record = PromotionalItem;

    fn from_record(record: &PromotionalItem) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            brand_id: record.brand_id.clone(),
            category_id: record.category_id.clone().unwrap_or_default(),
            item_type: record.item_type,
            affiliate_url: record.affiliate_url.clone(),
            image_url: record.image_url.clone().unwrap_or_default(),
            commission_rate: record.commission_rate,
            metadata: record
                .metadata
                .as_ref()
                .and_then(|m| serde_json::to_string_pretty(m).ok())
                .unwrap_or_default(),
        }
    }

    fn into_record(&self, id: String) -> Result<PromotionalItem, FieldErrors> {
        let (min, max) = percent_bounds();
        let mut v = Validator::new();
        v.min_len("name", &self.name, 3)
            .min_len("description", &self.description, 10)
            .required("brand_id", &self.brand_id)
            .url("affiliate_url", &self.affiliate_url)
            .optional_url("image_url", Some(&self.image_url))
            .range("commission_rate", self.commission_rate, min, max);
        let metadata = match parse_metadata(&self.metadata) {
            Ok(m) => m,
            Err(msg) => {
                v.error("metadata", msg);
                None
            }
        };
        v.finish_with(|| PromotionalItem {
            id,
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            brand_id: self.brand_id.trim().to_owned(),
            category_id: non_blank(Some(&self.category_id)),
            item_type: self.item_type,
            affiliate_url: self.affiliate_url.trim().to_owned(),
            image_url: non_blank(Some(&self.image_url)),
            commission_rate: self.commission_rate,
            metadata,
        })
    }
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub promoter_id: String,
    pub promotional_item_id: String,
    pub brand_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub commission_rate: Option<Decimal>,
    /// Tracking counters; unset keeps the stored values (zero for a new campaign).
    pub clicks: Option<u64>,
    pub conversions: Option<u64>,
}

impl Draft for CampaignDraft {
    type Record = Campaign;

    fn from_record(record: &Campaign) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            promoter_id: record.promoter_id.clone(),
            promotional_item_id: record.promotional_item_id.clone().unwrap_or_default(),
            brand_id: record.brand_id.clone().unwrap_or_default(),
            start_date: Some(record.start_date),
            end_date: Some(record.end_date),
            commission_rate: record.commission_rate,
            clicks: Some(record.clicks),
            conversions: Some(record.conversions),
        }
    }

    fn keep_unset_from(&mut self, existing: &Campaign) {
        self.clicks.get_or_insert(existing.clicks);
        self.conversions.get_or_insert(existing.conversions);
    }

    fn into_record(&self, id: String) -> Result<Campaign, FieldErrors> {
        let (min, max) = percent_bounds();
        let mut v = Validator::new();
        v.min_len("title", &self.title, 3)
            .min_len("description", &self.description, 10)
            .required("promoter_id", &self.promoter_id)
            .check(
                "brand_id",
                at_most_one_association(Some(&self.promotional_item_id), Some(&self.brand_id)),
                "choose either a promotional item or a brand, not both",
            );
        if self.start_date.is_none() {
            v.error("start_date", "is required");
        }
        if self.end_date.is_none() {
            v.error("end_date", "is required");
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            v.check(
                "end_date",
                end_not_before_start(start, end),
                "must be on or after the start date",
            );
        }
        if let Some(rate) = self.commission_rate {
            v.range("commission_rate", rate, min, max);
        }
        v.finish_with(|| Campaign {
            id,
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            promoter_id: self.promoter_id.trim().to_owned(),
            promotional_item_id: non_blank(Some(&self.promotional_item_id)),
            brand_id: non_blank(Some(&self.brand_id)),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            commission_rate: self.commission_rate,
            clicks: self.clicks.unwrap_or(0),
            conversions: self.conversions.unwrap_or(0),
        })
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDraft {
    pub title: String,
    pub body: String,
    pub creator_id: String,
    pub content_type: ContentType,
    pub promotional_item_id: String,
    pub campaign_id: String,
    pub is_monetized: bool,
    pub ad_revenue: Decimal,
}

impl Default for ContentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            creator_id: String::new(),
            content_type: ContentType::Blog,
            promotional_item_id: String::new(),
            campaign_id: String::new(),
            is_monetized: false,
            ad_revenue: Decimal::ZERO,
        }
    }
}

impl Draft for ContentDraft {
    type Record = ContentPiece;

    fn from_record(record: &ContentPiece) -> Self {
        Self {
            title: record.title.clone(),
            body: record.body.clone(),
            creator_id: record.creator_id.clone(),
            content_type: record.content_type,
            promotional_item_id: record.promotional_item_id.clone().unwrap_or_default(),
            campaign_id: record.campaign_id.clone().unwrap_or_default(),
            is_monetized: record.is_monetized,
            ad_revenue: record.ad_revenue,
        }
    }

    fn into_record(&self, id: String) -> Result<ContentPiece, FieldErrors> {
        let mut v = Validator::new();
        v.min_len("title", &self.title, 3)
            .min_len("body", &self.body, 20)
            .required("creator_id", &self.creator_id)
            .check(
                "campaign_id",
                at_most_one_association(Some(&self.promotional_item_id), Some(&self.campaign_id)),
                "associate with either a promotional item or a campaign, not both",
            );
        if self.is_monetized {
            v.check(
                "ad_revenue",
                self.ad_revenue >= Decimal::ZERO,
                "must not be negative",
            );
        }
        v.finish_with(|| ContentPiece {
            id,
            title: self.title.trim().to_owned(),
            body: self.body.trim().to_owned(),
            creator_id: self.creator_id.trim().to_owned(),
            content_type: self.content_type,
            promotional_item_id: non_blank(Some(&self.promotional_item_id)),
            campaign_id: non_blank(Some(&self.campaign_id)),
            is_monetized: self.is_monetized,
            ad_revenue: if self.is_monetized {
                self.ad_revenue
            } else {
                Decimal::ZERO
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Affiliate link
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffiliateLinkDraft {
    pub promotional_item_name: String,
    pub original_url: String,
    /// Blank means "keep the stored code", or "generate one from the
    /// record id" for a new link.
    pub unique_code: String,
    /// Tracking counters; unset keeps the stored values (zero for a new link).
    pub clicks: Option<u64>,
    pub conversions: Option<u64>,
    pub created_date: Option<NaiveDate>,
}

fn is_valid_code(code: &str) -> bool {
    (4..=32).contains(&code.len())
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Derive a link code from the record id, e.g. `link1718000000000` → `PD000000`.
fn code_from_id(id: &str) -> String {
    let suffix = id.trim_start_matches(AffiliateLink::ID_PREFIX);
    let chars: Vec<char> = suffix.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
    format!("PD{}", tail.to_uppercase())
}

impl Draft for AffiliateLinkDraft {
    type Record = AffiliateLink;

    fn from_record(record: &AffiliateLink) -> Self {
        Self {
            promotional_item_name: record.promotional_item_name.clone(),
            original_url: record.original_url.clone(),
            unique_code: record.unique_code.clone(),
            clicks: Some(record.clicks),
            conversions: Some(record.conversions),
            created_date: Some(record.created_date),
        }
    }

    fn keep_unset_from(&mut self, existing: &AffiliateLink) {
        if self.unique_code.trim().is_empty() {
            self.unique_code.clone_from(&existing.unique_code);
        }
        self.clicks.get_or_insert(existing.clicks);
        self.conversions.get_or_insert(existing.conversions);
        self.created_date.get_or_insert(existing.created_date);
    }

    fn into_record(&self, id: String) -> Result<AffiliateLink, FieldErrors> {
        let code = self.unique_code.trim();
        let clicks = self.clicks.unwrap_or(0);
        let conversions = self.conversions.unwrap_or(0);
        let mut v = Validator::new();
        v.min_len("promotional_item_name", &self.promotional_item_name, 2)
            .url("original_url", &self.original_url)
            .check(
                "unique_code",
                code.is_empty() || is_valid_code(code),
                "must be 4-32 letters, digits, '-' or '_'",
            )
            .check(
                "conversions",
                conversions <= clicks,
                "cannot exceed clicks",
            );
        v.finish_with(|| {
            let unique_code = if code.is_empty() {
                code_from_id(&id)
            } else {
                code.to_owned()
            };
            AffiliateLink {
                short_link: format!("{SHORT_LINK_BASE}/{unique_code}"),
                id,
                promotional_item_name: self.promotional_item_name.trim().to_owned(),
                unique_code,
                original_url: self.original_url.trim().to_owned(),
                clicks,
                conversions,
                created_date: self
                    .created_date
                    .unwrap_or_else(|| Utc::now().date_naive()),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Earning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningDraft {
    pub source: EarningSource,
    pub amount: Decimal,
    pub related_item_name: String,
    pub created_date: Option<NaiveDate>,
    pub status: EarningStatus,
}

impl Default for EarningDraft {
    fn default() -> Self {
        Self {
            source: EarningSource::Affiliate,
            amount: Decimal::ZERO,
            related_item_name: String::new(),
            created_date: None,
            status: EarningStatus::PendingPayout,
        }
    }
}

impl Draft for EarningDraft {
    type Record = Earning;

    fn from_record(record: &Earning) -> Self {
        Self {
            source: record.source,
            amount: record.amount,
            related_item_name: record.related_item_name.clone(),
            created_date: Some(record.created_date),
            status: record.status,
        }
    }

    fn keep_unset_from(&mut self, existing: &Earning) {
        self.created_date.get_or_insert(existing.created_date);
    }

    fn into_record(&self, id: String) -> Result<Earning, FieldErrors> {
        let mut v = Validator::new();
        v.min_len("related_item_name", &self.related_item_name, 2)
            .check("amount", self.amount >= Decimal::ZERO, "must not be negative");
        v.finish_with(|| Earning {
            id,
            source: self.source,
            amount: self.amount,
            related_item_name: self.related_item_name.trim().to_owned(),
            created_date: self
                .created_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            status: self.status,
        })
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProfileDraft {
    pub platform: SocialPlatform,
    pub profile_url: String,
    pub followers_count: u64,
}

impl Default for SocialProfileDraft {
    fn default() -> Self {
        Self {
            platform: SocialPlatform::Instagram,
            profile_url: String::new(),
            followers_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfileDraft {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub website_url: String,
    pub avatar_url: String,
    pub social_profiles: Vec<SocialProfileDraft>,
}

fn is_valid_username(name: &str) -> bool {
    (3..=30).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Draft for UserProfileDraft {
    type Record = UserProfile;

    fn from_record(record: &UserProfile) -> Self {
        Self {
            full_name: record.full_name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            bio: record.bio.clone().unwrap_or_default(),
            website_url: record.website_url.clone().unwrap_or_default(),
            avatar_url: record.avatar_url.clone().unwrap_or_default(),
            social_profiles: record
                .social_profiles
                .iter()
                .map(|p| SocialProfileDraft {
                    platform: p.platform,
                    profile_url: p.profile_url.clone(),
                    followers_count: p.followers_count,
                })
                .collect(),
        }
    }

    fn into_record(&self, id: String) -> Result<UserProfile, FieldErrors> {
        let mut v = Validator::new();
        v.min_len("full_name", &self.full_name, 2)
            .check(
                "username",
                is_valid_username(self.username.trim()),
                "must be 3-30 letters, digits or '_'",
            )
            .email("email", &self.email)
            .max_len("bio", &self.bio, DESCRIPTION_MAX)
            .optional_url("website_url", Some(&self.website_url))
            .optional_url("avatar_url", Some(&self.avatar_url));
        for (i, profile) in self.social_profiles.iter().enumerate() {
            v.url(&format!("social_profiles[{i}].profile_url"), &profile.profile_url);
        }
        v.finish_with(|| UserProfile {
            id,
            full_name: self.full_name.trim().to_owned(),
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            bio: non_blank(Some(&self.bio)),
            website_url: non_blank(Some(&self.website_url)),
            avatar_url: non_blank(Some(&self.avatar_url)),
            social_profiles: self
                .social_profiles
                .iter()
                .map(|p| SocialProfile {
                    platform: p.platform,
                    profile_url: p.profile_url.trim().to_owned(),
                    followers_count: p.followers_count,
                })
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Validate a settings document before it is written.
///
/// # Errors
///
/// Returns [`FieldErrors`] for a short site name, a malformed support email,
/// or a default commission outside `0..=100`.
pub fn validate_settings(settings: &PlatformSettings) -> Result<(), FieldErrors> {
    let (min, max) = percent_bounds();
    let mut v = Validator::new();
    v.min_len("site_name", &settings.site_name, 2)
        .email("support_email", &settings.support_email)
        .range(
            "default_commission_rate",
            settings.default_commission_rate,
            min,
            max,
        );
    v.finish(())
}

#[cfg(test)]
#[path = "drafts_test.rs"]
mod tests;
