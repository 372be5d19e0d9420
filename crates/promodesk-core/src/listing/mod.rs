//! Filtering and pagination over in-memory collections.
//!
//! Filters never reorder: the output of [`filter_items`] is a subsequence of
//! its input, and applying the same filter twice yields the same result.

mod controller;
mod page;

pub use controller::{ListController, LoadGate, LoadTicket, DEFAULT_LOADING_DELAY};
pub use page::{clamp_page, normalize_page_size, paginate, total_pages, Page, MAX_PAGE_SIZE};

use serde::Deserialize;

use crate::model::{
    AffiliateLink, Brand, BrandCategory, Campaign, ContentPiece, ContentType, Earning,
    EarningSource, EarningStatus, ItemType, PromotionalItem,
};

/// A predicate over one entity type.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Keep the items matching `filter`, in their original order.
#[must_use]
pub fn filter_items<T: Clone, F: ListFilter<T>>(items: &[T], filter: &F) -> Vec<T> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Case-insensitive substring match; a blank needle matches everything.
fn text_matches(needle: Option<&str>, haystack: &str) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}

fn eq_or_all<V: PartialEq>(selected: Option<&V>, actual: &V) -> bool {
    selected.is_none_or(|s| s == actual)
}

fn str_eq_or_all(selected: Option<&str>, actual: Option<&str>) -> bool {
    match selected.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => actual == Some(s),
        None => true,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrandFilter {
    pub search: Option<String>,
    pub category: Option<BrandCategory>,
}

impl ListFilter<Brand> for BrandFilter {
    fn matches(&self, item: &Brand) -> bool {
        text_matches(self.search.as_deref(), &item.name)
            && eq_or_all(self.category.as_ref(), &item.category)
    }
}

/// Filters for the promotional item catalogue.
///
/// The category selection depends on the brand selection: changing the
/// brand through [`ItemFilter::set_brand`] resets the category to "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub brand_id: Option<String>,
    pub category_id: Option<String>,
    pub item_type: Option<ItemType>,
}

impl ItemFilter {
    pub fn set_brand(&mut self, brand_id: Option<String>) {
        if self.brand_id != brand_id {
            self.brand_id = brand_id;
            self.category_id = None;
        }
    }
}

impl ListFilter<PromotionalItem> for ItemFilter {
    fn matches(&self, item: &PromotionalItem) -> bool {
        text_matches(self.search.as_deref(), &item.name)
            && str_eq_or_all(self.brand_id.as_deref(), Some(&item.brand_id))
            && str_eq_or_all(self.category_id.as_deref(), item.category_id.as_deref())
            && eq_or_all(self.item_type.as_ref(), &item.item_type)
    }
}

/// Distinct category ids available under `brand_id` (all brands when `None`),
/// in first-seen order.
#[must_use]
pub fn category_options(items: &[PromotionalItem], brand_id: Option<&str>) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for item in items {
        if !str_eq_or_all(brand_id, Some(&item.brand_id)) {
            continue;
        }
        if let Some(category) = &item.category_id {
            if !options.contains(category) {
                options.push(category.clone());
            }
        }
    }
    options
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CampaignFilter {
    pub search: Option<String>,
    pub brand_id: Option<String>,
}

impl ListFilter<Campaign> for CampaignFilter {
    fn matches(&self, item: &Campaign) -> bool {
        text_matches(self.search.as_deref(), &item.title)
            && str_eq_or_all(self.brand_id.as_deref(), item.brand_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentFilter {
    pub search: Option<String>,
    pub content_type: Option<ContentType>,
}

impl ListFilter<ContentPiece> for ContentFilter {
    fn matches(&self, item: &ContentPiece) -> bool {
        text_matches(self.search.as_deref(), &item.title)
            && eq_or_all(self.content_type.as_ref(), &item.content_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkFilter {
    pub search: Option<String>,
}

impl ListFilter<AffiliateLink> for LinkFilter {
    fn matches(&self, item: &AffiliateLink) -> bool {
        text_matches(self.search.as_deref(), &item.promotional_item_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EarningFilter {
    pub search: Option<String>,
    pub source: Option<EarningSource>,
    pub status: Option<EarningStatus>,
}

impl ListFilter<Earning> for EarningFilter {
    fn matches(&self, item: &Earning) -> bool {
        text_matches(self.search.as_deref(), &item.related_item_name)
            && eq_or_all(self.source.as_ref(), &item.source)
            && eq_or_all(self.status.as_ref(), &item.status)
    }
}
