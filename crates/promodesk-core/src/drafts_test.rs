use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::*;
use crate::editor::{EntityEditor, SubmitError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn brand(id: &str, name: &str) -> Brand {
    Brand {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        category: BrandCategory::Gaming,
        logo_url: None,
        website_url: None,
    }
}

fn valid_campaign() -> CampaignDraft {
    CampaignDraft {
        title: "Summer Push".to_string(),
        description: "Two weeks of summer promotion".to_string(),
        promoter_id: "user001".to_string(),
        start_date: Some(date(2024, 6, 1)),
        end_date: Some(date(2024, 6, 14)),
        ..CampaignDraft::default()
    }
}

// ---------------------------------------------------------------------------
// Brand
// ---------------------------------------------------------------------------

#[test]
fn brand_name_under_two_chars_is_rejected_without_mutation() {
    let mut brands = vec![brand("brand001", "GamerFuel Inc.")];
    let mut editor = EntityEditor::<BrandDraft>::new();
    editor.open(None);
    editor.draft_mut().name = "X".to_string();

    let err = editor.submit(&mut brands).unwrap_err();

    match err {
        SubmitError::Invalid(errors) => assert!(errors.has("name")),
        SubmitError::NotFound(_) => panic!("expected validation error"),
    }
    assert_eq!(brands.len(), 1);
    assert_eq!(editor.draft().name, "X", "draft is kept for inline errors");
}

#[test]
fn brand_blank_optional_urls_become_none() {
    let draft = BrandDraft {
        name: "  Chic Trends Boutique ".to_string(),
        logo_url: "   ".to_string(),
        ..BrandDraft::default()
    };
    let record = draft.into_record("brand9".to_string()).unwrap();
    assert_eq!(record.name, "Chic Trends Boutique");
    assert!(record.logo_url.is_none());
    assert!(record.description.is_none());
}

#[test]
fn brand_invalid_website_reports_field() {
    let draft = BrandDraft {
        name: "GamerFuel Inc.".to_string(),
        website_url: "gamerfuel".to_string(),
        ..BrandDraft::default()
    };
    let err = draft.validate().unwrap_err();
    assert_eq!(err.message_for("website_url"), Some("must be a valid URL"));
}

#[test]
fn editor_create_appends_with_generated_id_and_resets() {
    let mut brands = vec![brand("brand001", "GamerFuel Inc.")];
    let mut editor = EntityEditor::<BrandDraft>::new();
    editor.open(None);
    editor.draft_mut().name = "New Brand".to_string();

    let created = editor.submit(&mut brands).expect("valid draft");

    assert_eq!(brands.len(), 2);
    assert_eq!(brands[1], created);
    assert!(created.id.starts_with("brand"));
    assert_ne!(created.id, "brand001");
    assert_eq!(editor.draft(), &BrandDraft::blank());
    assert!(editor.editing_id().is_none());
}

#[test]
fn editor_edit_replaces_matching_record_in_place() {
    let mut brands = vec![
        brand("brand001", "GamerFuel Inc."),
        brand("brand002", "TechNova Gadgets"),
    ];
    let mut editor = EntityEditor::<BrandDraft>::new();
    let target = brands[1].clone();
    editor.open(Some(&target));
    assert_eq!(editor.editing_id(), Some("brand002"));
    assert_eq!(editor.draft().name, "TechNova Gadgets");

    editor.draft_mut().name = "TechNova Labs".to_string();
    editor.submit(&mut brands).expect("valid edit");

    assert_eq!(brands.len(), 2);
    assert_eq!(brands[1].id, "brand002");
    assert_eq!(brands[1].name, "TechNova Labs");
}

#[test]
fn editor_edit_of_removed_record_reports_not_found() {
    let mut brands = vec![brand("brand001", "GamerFuel Inc.")];
    let mut editor = EntityEditor::<BrandDraft>::new();
    editor.open(Some(&brand("brand404", "Gone Brand")));
    let err = editor.submit(&mut brands).unwrap_err();
    assert_eq!(err, SubmitError::NotFound("brand404".to_string()));
}

#[test]
fn editor_close_clears_target() {
    let mut editor = EntityEditor::<BrandDraft>::new();
    editor.open(Some(&brand("brand001", "GamerFuel Inc.")));
    editor.close();
    assert!(editor.editing_id().is_none());
    assert!(editor.draft().name.is_empty());
}

// ---------------------------------------------------------------------------
// Promotional item
// ---------------------------------------------------------------------------

fn valid_item() -> PromotionalItemDraft {
    PromotionalItemDraft {
        name: "Energy Drink".to_string(),
        description: "Zero sugar energy drink for gamers".to_string(),
        brand_id: "brand001".to_string(),
        affiliate_url: "https://gamerfuel.example/drink".to_string(),
        ..PromotionalItemDraft::default()
    }
}

#[test]
fn item_metadata_round_trips_through_text() {
    let mut draft = valid_item();
    draft.metadata = r#"{"flavor": "citrus", "size_ml": 355}"#.to_string();
    let record = draft.into_record("item9".to_string()).unwrap();
    let metadata = record.metadata.as_ref().expect("metadata set");
    assert_eq!(metadata["flavor"], "citrus");

    let reopened = PromotionalItemDraft::from_record(&record);
    assert!(reopened.metadata.contains("\"size_ml\": 355"));
}

#[test]
fn item_metadata_must_be_object() {
    let mut draft = valid_item();
    draft.metadata = "[1, 2]".to_string();
    let err = draft.validate().unwrap_err();
    assert_eq!(err.message_for("metadata"), Some("must be a JSON object"));

    draft.metadata = "{not json".to_string();
    let err = draft.validate().unwrap_err();
    assert_eq!(err.message_for("metadata"), Some("must be valid JSON"));
}

#[test]
fn item_commission_outside_range_is_rejected() {
    let mut draft = valid_item();
    draft.commission_rate = Decimal::new(101, 0);
    assert!(draft.validate().unwrap_err().has("commission_rate"));
}

#[test]
fn item_requires_brand() {
    let mut draft = valid_item();
    draft.brand_id = " ".to_string();
    assert!(draft.validate().unwrap_err().has("brand_id"));
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

#[test]
fn campaign_with_item_and_brand_fails() {
    let mut draft = valid_campaign();
    draft.promotional_item_id = "item001".to_string();
    draft.brand_id = "brand001".to_string();
    let err = draft.validate().unwrap_err();
    assert!(err.has("brand_id"));
}

#[test]
fn campaign_end_before_start_fails() {
    let mut draft = valid_campaign();
    draft.end_date = Some(date(2024, 5, 31));
    let err = draft.validate().unwrap_err();
    assert_eq!(
        err.message_for("end_date"),
        Some("must be on or after the start date")
    );
}

#[test]
fn campaign_with_single_association_passes() {
    let mut draft = valid_campaign();
    draft.brand_id = "brand003".to_string();
    let record = draft.into_record("camp9".to_string()).unwrap();
    assert_eq!(record.brand_id.as_deref(), Some("brand003"));
    assert!(record.promotional_item_id.is_none());
}

#[test]
fn campaign_missing_dates_are_required() {
    let draft = CampaignDraft {
        start_date: None,
        end_date: None,
        ..valid_campaign()
    };
    let err = draft.validate().unwrap_err();
    assert!(err.has("start_date"));
    assert!(err.has("end_date"));
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[test]
fn content_ad_revenue_is_zeroed_when_not_monetized() {
    let draft = ContentDraft {
        title: "Unboxing".to_string(),
        body: "A long enough body for the unboxing video.".to_string(),
        creator_id: "user001".to_string(),
        is_monetized: false,
        ad_revenue: Decimal::new(4200, 2),
        ..ContentDraft::default()
    };
    let record = draft.into_record("content9".to_string()).unwrap();
    assert_eq!(record.ad_revenue, Decimal::ZERO);
}

#[test]
fn content_cannot_reference_item_and_campaign() {
    let draft = ContentDraft {
        title: "Unboxing".to_string(),
        body: "A long enough body for the unboxing video.".to_string(),
        creator_id: "user001".to_string(),
        promotional_item_id: "item001".to_string(),
        campaign_id: "camp001".to_string(),
        ..ContentDraft::default()
    };
    assert!(draft.validate().unwrap_err().has("campaign_id"));
}

// ---------------------------------------------------------------------------
// Affiliate link
// ---------------------------------------------------------------------------

#[test]
fn link_blank_code_is_generated_from_id() {
    let draft = AffiliateLinkDraft {
        promotional_item_name: "Energy Drink".to_string(),
        original_url: "https://gamerfuel.example/drink".to_string(),
        created_date: Some(date(2024, 7, 1)),
        ..AffiliateLinkDraft::default()
    };
    let record = draft.into_record("link1718000123456".to_string()).unwrap();
    assert_eq!(record.unique_code, "PD123456");
    assert_eq!(record.short_link, "https://pdsk.link/PD123456");
}

#[test]
fn link_invalid_custom_code_is_rejected() {
    let draft = AffiliateLinkDraft {
        promotional_item_name: "Energy Drink".to_string(),
        original_url: "https://gamerfuel.example/drink".to_string(),
        unique_code: "a b".to_string(),
        ..AffiliateLinkDraft::default()
    };
    assert!(draft.validate().unwrap_err().has("unique_code"));
}

fn tracked_link() -> AffiliateLink {
    AffiliateLink {
        id: "link001".to_string(),
        promotional_item_name: "GamerFuel Energy Drink".to_string(),
        unique_code: "GFUEL24".to_string(),
        short_link: "https://pdsk.link/GFUEL24".to_string(),
        original_url: "https://gamerfuel.example/p/energy-drink".to_string(),
        clicks: 1250,
        conversions: 75,
        created_date: date(2024, 5, 28),
    }
}

#[test]
fn editor_fill_keeps_link_code_and_tracking_unset_by_draft() {
    let original = tracked_link();
    let mut editor = EntityEditor::<AffiliateLinkDraft>::new();
    editor.open(Some(&original));
    editor.fill(AffiliateLinkDraft {
        promotional_item_name: "GamerFuel Energy Drink v2".to_string(),
        original_url: original.original_url.clone(),
        ..AffiliateLinkDraft::default()
    });

    let record = editor.build().unwrap();
    assert_eq!(record.id, "link001");
    assert_eq!(record.promotional_item_name, "GamerFuel Energy Drink v2");
    assert_eq!(record.unique_code, "GFUEL24");
    assert_eq!(record.short_link, "https://pdsk.link/GFUEL24");
    assert_eq!((record.clicks, record.conversions), (1250, 75));
    assert_eq!(record.created_date, date(2024, 5, 28));
}

#[test]
fn editor_fill_keeps_values_the_draft_sets() {
    let mut editor = EntityEditor::<AffiliateLinkDraft>::new();
    editor.open(Some(&tracked_link()));
    editor.fill(AffiliateLinkDraft {
        promotional_item_name: "GamerFuel Energy Drink".to_string(),
        original_url: "https://gamerfuel.example/p/energy-drink".to_string(),
        unique_code: "GFUEL25".to_string(),
        clicks: Some(10),
        conversions: Some(2),
        created_date: Some(date(2025, 1, 1)),
    });

    let record = editor.build().unwrap();
    assert_eq!(record.unique_code, "GFUEL25");
    assert_eq!((record.clicks, record.conversions), (10, 2));
    assert_eq!(record.created_date, date(2025, 1, 1));
}

#[test]
fn editor_fill_on_create_starts_counters_at_zero() {
    let mut editor = EntityEditor::<CampaignDraft>::new();
    editor.open(None);
    editor.fill(valid_campaign());

    let record = editor.build().unwrap();
    assert!(record.id.starts_with(Campaign::ID_PREFIX));
    assert_eq!((record.clicks, record.conversions), (0, 0));
}

#[test]
fn earning_edit_keeps_creation_date() {
    let original = Earning {
        id: "earn001".to_string(),
        source: EarningSource::Affiliate,
        amount: Decimal::new(125_000, 2),
        related_item_name: "GamerFuel Energy Drink".to_string(),
        created_date: date(2024, 6, 30),
        status: EarningStatus::PaidOut,
    };
    let mut draft = EarningDraft {
        amount: Decimal::new(130_000, 2),
        related_item_name: "GamerFuel Energy Drink".to_string(),
        ..EarningDraft::default()
    };
    draft.keep_unset_from(&original);

    let record = draft.into_record(original.id.clone()).unwrap();
    assert_eq!(record.created_date, date(2024, 6, 30));
    assert_eq!(record.amount, Decimal::new(130_000, 2));
}

// ---------------------------------------------------------------------------
// Profile and settings
// ---------------------------------------------------------------------------

#[test]
fn profile_reports_indexed_social_profile_errors() {
    let draft = UserProfileDraft {
        full_name: "Alex Rivera".to_string(),
        username: "alex_r".to_string(),
        email: "alex@example.com".to_string(),
        social_profiles: vec![
            SocialProfileDraft {
                profile_url: "https://instagram.com/alex".to_string(),
                ..SocialProfileDraft::default()
            },
            SocialProfileDraft {
                profile_url: "instagram".to_string(),
                ..SocialProfileDraft::default()
            },
        ],
        ..UserProfileDraft::default()
    };
    let err = draft.validate().unwrap_err();
    assert!(!err.has("social_profiles[0].profile_url"));
    assert!(err.has("social_profiles[1].profile_url"));
}

#[test]
fn settings_defaults_are_valid() {
    assert!(validate_settings(&PlatformSettings::default()).is_ok());
}

#[test]
fn settings_reject_bad_email() {
    let settings = PlatformSettings {
        support_email: "nobody".to_string(),
        ..PlatformSettings::default()
    };
    assert!(validate_settings(&settings).unwrap_err().has("support_email"));
}
