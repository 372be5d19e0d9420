//! KPI aggregations over the current collections.
//!
//! Everything here is recomputed on demand; collections are small and held
//! in memory, so there is no caching layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{AffiliateLink, Campaign, Earning, EarningSource, EarningStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusTotals {
    pub paid_out: Decimal,
    pub credited: Decimal,
    pub pending_payout: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceTotals {
    pub affiliate: Decimal,
    pub ad_revenue: Decimal,
    pub campaign: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EarningsSummary {
    pub total: Decimal,
    pub count: usize,
    pub by_status: StatusTotals,
    pub by_source: SourceTotals,
}

#[must_use]
pub fn earnings_summary(earnings: &[Earning]) -> EarningsSummary {
    let mut summary = EarningsSummary {
        count: earnings.len(),
        ..EarningsSummary::default()
    };
    for e in earnings {
        summary.total += e.amount;
        match e.status {
            EarningStatus::PaidOut => summary.by_status.paid_out += e.amount,
            EarningStatus::Credited => summary.by_status.credited += e.amount,
            EarningStatus::PendingPayout => summary.by_status.pending_payout += e.amount,
        }
        match e.source {
            EarningSource::Affiliate => summary.by_source.affiliate += e.amount,
            EarningSource::AdRevenue => summary.by_source.ad_revenue += e.amount,
            EarningSource::Campaign => summary.by_source.campaign += e.amount,
        }
    }
    summary
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkPerformance {
    pub link_count: usize,
    pub total_clicks: u64,
    pub total_conversions: u64,
    /// Conversions per click as a percentage, rounded to two places.
    pub conversion_rate_pct: Decimal,
}

/// Conversions over clicks as a percentage; zero when there are no clicks.
#[must_use]
pub fn conversion_rate_pct(clicks: u64, conversions: u64) -> Decimal {
    if clicks == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(conversions) * Decimal::ONE_HUNDRED / Decimal::from(clicks)).round_dp(2)
}

#[must_use]
pub fn link_performance(links: &[AffiliateLink]) -> LinkPerformance {
    let total_clicks: u64 = links.iter().map(|l| l.clicks).sum();
    let total_conversions: u64 = links.iter().map(|l| l.conversions).sum();
    LinkPerformance {
        link_count: links.len(),
        total_clicks,
        total_conversions,
        conversion_rate_pct: conversion_rate_pct(total_clicks, total_conversions),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignTotals {
    pub count: usize,
    pub active: usize,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub conversion_rate_pct: Decimal,
}

/// Totals across campaigns; `active` counts campaigns running on `today`.
#[must_use]
pub fn campaign_totals(campaigns: &[Campaign], today: NaiveDate) -> CampaignTotals {
    let total_clicks: u64 = campaigns.iter().map(|c| c.clicks).sum();
    let total_conversions: u64 = campaigns.iter().map(|c| c.conversions).sum();
    CampaignTotals {
        count: campaigns.len(),
        active: campaigns
            .iter()
            .filter(|c| c.start_date <= today && today <= c.end_date)
            .count(),
        total_clicks,
        total_conversions,
        conversion_rate_pct: conversion_rate_pct(total_clicks, total_conversions),
    }
}

/// A KPI card: a value plus a fixed change figure shown beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: usize,
    /// Display-only; not derived from history.
    pub change_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub cards: Vec<KpiCard>,
}

/// Entity counts for the admin dashboard cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCounts {
    pub brands: usize,
    pub items: usize,
    pub campaigns: usize,
    pub content: usize,
}

#[must_use]
pub fn dashboard_overview(counts: EntityCounts) -> DashboardOverview {
    DashboardOverview {
        cards: vec![
            KpiCard {
                label: "Total Brands",
                value: counts.brands,
                change_pct: Decimal::new(52, 1),
            },
            KpiCard {
                label: "Promotional Items",
                value: counts.items,
                change_pct: Decimal::new(120, 1),
            },
            KpiCard {
                label: "Active Campaigns",
                value: counts.campaigns,
                change_pct: Decimal::new(-18, 1),
            },
            KpiCard {
                label: "Content Pieces",
                value: counts.content,
                change_pct: Decimal::new(87, 1),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earning(amount: i64, source: EarningSource, status: EarningStatus) -> Earning {
        Earning {
            id: format!("earn{amount}"),
            source,
            amount: Decimal::new(amount, 2),
            related_item_name: "Energy Drink".to_string(),
            created_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            status,
        }
    }

    #[test]
    fn earnings_are_grouped_by_status_and_source() {
        let earnings = vec![
            earning(1000, EarningSource::Affiliate, EarningStatus::PaidOut),
            earning(2550, EarningSource::AdRevenue, EarningStatus::Credited),
            earning(450, EarningSource::Affiliate, EarningStatus::PendingPayout),
            earning(500, EarningSource::Campaign, EarningStatus::PendingPayout),
        ];
        let summary = earnings_summary(&earnings);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, Decimal::new(4500, 2));
        assert_eq!(summary.by_status.paid_out, Decimal::new(1000, 2));
        assert_eq!(summary.by_status.credited, Decimal::new(2550, 2));
        assert_eq!(summary.by_status.pending_payout, Decimal::new(950, 2));
        assert_eq!(summary.by_source.affiliate, Decimal::new(1450, 2));
        assert_eq!(summary.by_source.campaign, Decimal::new(500, 2));
    }

    #[test]
    fn empty_earnings_sum_to_zero() {
        let summary = earnings_summary(&[]);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn conversion_rate_handles_zero_clicks() {
        assert_eq!(conversion_rate_pct(0, 0), Decimal::ZERO);
        assert_eq!(conversion_rate_pct(3, 1), Decimal::new(3333, 2));
    }

    #[test]
    fn active_campaigns_are_counted_inclusively() {
        let mk = |start: (u32, u32), end: (u32, u32)| Campaign {
            id: "camp".to_string(),
            title: "Camp".to_string(),
            description: "Campaign for tests".to_string(),
            promoter_id: "user001".to_string(),
            promotional_item_id: None,
            brand_id: None,
            start_date: NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
            commission_rate: None,
            clicks: 10,
            conversions: 1,
        };
        let campaigns = vec![mk((6, 1), (6, 30)), mk((6, 30), (7, 15)), mk((7, 1), (7, 31))];
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let totals = campaign_totals(&campaigns, today);
        assert_eq!(totals.active, 2);
        assert_eq!(totals.total_clicks, 30);
        assert_eq!(totals.conversion_rate_pct, Decimal::new(1000, 2));
    }
}
