//! Column formatting for the collection tables.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::{Brand, Campaign, EarningSource, EarningStatus, PromotionalItem};

/// US-dollar amount with thousands separators, e.g. `$1,234.56`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Medium date, e.g. `Jul 15, 2024`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Percentage with trailing zeros trimmed, e.g. `12.5%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(2).normalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

#[must_use]
pub fn earning_status_badge(status: EarningStatus) -> Badge {
    match status {
        EarningStatus::PaidOut => Badge {
            label: "Paid Out",
            tone: Tone::Success,
        },
        EarningStatus::Credited => Badge {
            label: "Credited",
            tone: Tone::Info,
        },
        EarningStatus::PendingPayout => Badge {
            label: "Pending Payout",
            tone: Tone::Warning,
        },
    }
}

#[must_use]
pub fn earning_source_label(source: EarningSource) -> &'static str {
    match source {
        EarningSource::Affiliate => "Affiliate",
        EarningSource::AdRevenue => "Ad Revenue",
        EarningSource::Campaign => "Campaign",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignPhase {
    Upcoming,
    Active,
    Ended,
}

impl CampaignPhase {
    /// Phase on `today`; both boundary dates count as active.
    #[must_use]
    pub fn on(campaign: &Campaign, today: NaiveDate) -> Self {
        if today < campaign.start_date {
            Self::Upcoming
        } else if today > campaign.end_date {
            Self::Ended
        } else {
            Self::Active
        }
    }
}

/// "Associated with" column: the linked item or brand by name.
///
/// Dangling references fall back to the raw id.
#[must_use]
pub fn associated_with(campaign: &Campaign, brands: &[Brand], items: &[PromotionalItem]) -> String {
    if let Some(item_id) = campaign.promotional_item_id.as_deref() {
        let name = items
            .iter()
            .find(|i| i.id == item_id)
            .map_or(item_id, |i| i.name.as_str());
        return format!("Item: {name}");
    }
    if let Some(brand_id) = campaign.brand_id.as_deref() {
        let name = brands
            .iter()
            .find(|b| b.id == brand_id)
            .map_or(brand_id, |b| b.name.as_str());
        return format!("Brand: {name}");
    }
    "General".to_string()
}

/// One row of the campaign table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub id: String,
    pub title: String,
    pub associated_with: String,
    pub phase: CampaignPhase,
    pub start_date: String,
    pub end_date: String,
    pub commission: Option<String>,
}

#[must_use]
pub fn campaign_rows(
    campaigns: &[Campaign],
    brands: &[Brand],
    items: &[PromotionalItem],
    today: NaiveDate,
) -> Vec<CampaignRow> {
    campaigns
        .iter()
        .map(|c| CampaignRow {
            id: c.id.clone(),
            title: c.title.clone(),
            associated_with: associated_with(c, brands, items),
            phase: CampaignPhase::on(c, today),
            start_date: format_date(c.start_date),
            end_date: format_date(c.end_date),
            commission: c.commission_rate.map(format_percent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BrandCategory;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn campaign(item: Option<&str>, brand: Option<&str>) -> Campaign {
        Campaign {
            id: "camp001".to_string(),
            title: "Summer Push".to_string(),
            description: "Two weeks of summer promotion".to_string(),
            promoter_id: "user001".to_string(),
            promotional_item_id: item.map(ToOwned::to_owned),
            brand_id: brand.map(ToOwned::to_owned),
            start_date: date(7, 1),
            end_date: date(7, 15),
            commission_rate: Some(Decimal::new(125, 1)),
            clicks: 0,
            conversions: 0,
        }
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::new(123_456, 2)), "$1,234.56");
        assert_eq!(format_currency(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_currency(Decimal::new(100_000_000, 2)), "$1,000,000.00");
        assert_eq!(format_currency(Decimal::new(-1250, 2)), "-$12.50");
        assert_eq!(format_currency(Decimal::new(1_005, 3)), "$1.01");
    }

    #[test]
    fn dates_use_medium_format() {
        assert_eq!(format_date(date(7, 15)), "Jul 15, 2024");
        assert_eq!(format_date(date(3, 1)), "Mar 1, 2024");
    }

    #[test]
    fn percent_trims_trailing_zeros() {
        assert_eq!(format_percent(Decimal::new(1250, 2)), "12.5%");
        assert_eq!(format_percent(Decimal::new(10, 0)), "10%");
    }

    #[test]
    fn campaign_phase_includes_boundaries() {
        let c = campaign(None, None);
        assert_eq!(CampaignPhase::on(&c, date(6, 30)), CampaignPhase::Upcoming);
        assert_eq!(CampaignPhase::on(&c, date(7, 1)), CampaignPhase::Active);
        assert_eq!(CampaignPhase::on(&c, date(7, 15)), CampaignPhase::Active);
        assert_eq!(CampaignPhase::on(&c, date(7, 16)), CampaignPhase::Ended);
    }

    #[test]
    fn associated_with_prefers_names_and_falls_back() {
        let brands = vec![Brand {
            id: "brand001".to_string(),
            name: "GamerFuel Inc.".to_string(),
            description: None,
            category: BrandCategory::Gaming,
            logo_url: None,
            website_url: None,
        }];
        assert_eq!(
            associated_with(&campaign(None, Some("brand001")), &brands, &[]),
            "Brand: GamerFuel Inc."
        );
        assert_eq!(
            associated_with(&campaign(Some("item404"), None), &brands, &[]),
            "Item: item404"
        );
        assert_eq!(associated_with(&campaign(None, None), &brands, &[]), "General");
    }

    #[test]
    fn earning_badges_have_distinct_tones() {
        assert_eq!(earning_status_badge(EarningStatus::PaidOut).tone, Tone::Success);
        assert_eq!(
            earning_status_badge(EarningStatus::PendingPayout).label,
            "Pending Payout"
        );
        assert_eq!(earning_source_label(EarningSource::AdRevenue), "Ad Revenue");
    }
}
