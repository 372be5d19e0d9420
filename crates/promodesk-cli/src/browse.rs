//! Page through a fixture collection the way the list screens do: filter,
//! paginate, then reveal after the configured loading delay.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};
use promodesk_core::display::{
    earning_source_label, earning_status_badge, format_currency, format_date, format_percent,
};
use promodesk_core::listing::{
    BrandFilter, CampaignFilter, ContentFilter, EarningFilter, ItemFilter, LinkFilter,
    ListController, ListFilter, Page,
};
use promodesk_core::{
    AffiliateLink, AppConfig, Brand, Campaign, ContentPiece, Earning, PromotionalItem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Brands,
    Items,
    Campaigns,
    Content,
    Links,
    Earnings,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    #[arg(value_enum)]
    pub collection: Collection,
    /// Case-insensitive name/title filter
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Fixtures file; defaults to `PROMODESK_FIXTURES_PATH`, then the built-in set
    #[arg(long)]
    pub fixtures: Option<PathBuf>,
}

/// Filter, page size, and loading delay for one browse run.
pub(crate) struct ListView {
    pub search: Option<String>,
    pub page: usize,
    pub page_size: usize,
    pub delay: Duration,
}

pub(crate) async fn run_browse(config: &AppConfig, args: BrowseArgs) -> anyhow::Result<()> {
    let path = args.fixtures.as_deref().or(config.fixtures_path.as_deref());
    let fixtures = promodesk_core::load_fixtures_or_builtin(path)?;
    let view = ListView {
        search: args.search,
        page: args.page,
        page_size: config.page_size,
        delay: Duration::from_millis(config.list_loading_delay_ms),
    };

    let out = match args.collection {
        Collection::Brands => {
            browse(fixtures.brands, view, |f: &mut BrandFilter, s| f.search = s, render_brand).await
        }
        Collection::Items => {
            browse(
                fixtures.promotional_items,
                view,
                |f: &mut ItemFilter, s| f.search = s,
                render_item,
            )
            .await
        }
        Collection::Campaigns => {
            browse(
                fixtures.campaigns,
                view,
                |f: &mut CampaignFilter, s| f.search = s,
                render_campaign,
            )
            .await
        }
        Collection::Content => {
            browse(
                fixtures.content,
                view,
                |f: &mut ContentFilter, s| f.search = s,
                render_content,
            )
            .await
        }
        Collection::Links => {
            browse(
                fixtures.affiliate_links,
                view,
                |f: &mut LinkFilter, s| f.search = s,
                render_link,
            )
            .await
        }
        Collection::Earnings => {
            browse(
                fixtures.earnings,
                view,
                |f: &mut EarningFilter, s| f.search = s,
                render_earning,
            )
            .await
        }
    };
    print!("{out}");
    Ok(())
}

/// Run one filter change (and page jump) through a [`ListController`] and
/// render the page it settles on.
pub(crate) async fn browse<T, F>(
    items: Vec<T>,
    view: ListView,
    set_search: impl FnOnce(&mut F, Option<String>),
    render: impl Fn(&T) -> String,
) -> String
where
    T: Clone,
    F: ListFilter<T> + Default,
{
    let mut controller =
        ListController::new(items, F::default(), view.page_size).with_delay(view.delay);

    let mut pending = controller.update_filter(|f| set_search(f, view.search));
    if view.page > 1 {
        pending = controller.set_page(view.page);
    }
    if let Some(page) = pending.resolve().await {
        controller.show(page);
    }

    controller
        .view()
        .map_or_else(String::new, |page| render_page(page, &render))
}

fn render_page<T>(page: &Page<T>, render: &impl Fn(&T) -> String) -> String {
    if page.is_empty() {
        return "no matching records\n".to_string();
    }
    let mut out = String::new();
    for item in &page.items {
        out.push_str(&render(item));
        out.push('\n');
    }
    out.push_str(&format!(
        "page {} of {} ({} total)\n",
        page.page, page.total_pages, page.total_items
    ));
    out
}

fn render_brand(brand: &Brand) -> String {
    format!("{:<10} {} [{}]", brand.id, brand.name, brand.category)
}

fn render_item(item: &PromotionalItem) -> String {
    format!(
        "{:<10} {} [{}] {} commission",
        item.id,
        item.name,
        item.item_type,
        format_percent(item.commission_rate)
    )
}

fn render_campaign(campaign: &Campaign) -> String {
    format!(
        "{:<10} {} ({} to {})",
        campaign.id,
        campaign.title,
        format_date(campaign.start_date),
        format_date(campaign.end_date)
    )
}

fn render_content(content: &ContentPiece) -> String {
    format!(
        "{:<10} {} [{}] {}",
        content.id,
        content.title,
        content.content_type,
        format_currency(content.ad_revenue)
    )
}

fn render_link(link: &AffiliateLink) -> String {
    format!(
        "{:<10} {} {} clicks, {} conversions",
        link.id, link.short_link, link.clicks, link.conversions
    )
}

fn render_earning(earning: &Earning) -> String {
    format!(
        "{:<10} {} {} {} {}",
        earning.id,
        format_date(earning.created_date),
        earning_source_label(earning.source),
        format_currency(earning.amount),
        earning_status_badge(earning.status).label
    )
}
