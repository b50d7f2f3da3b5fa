use crate::config::SiteConfig;
use crate::core::fetcher::Fetcher;
use crate::core::html::stripped_text;
use crate::domain::model::BankRecord;
use crate::domain::ports::{ContentStore, PageSource};
use crate::utils::error::Result;
use crate::utils::validation::parse_selector;
use scraper::Html;
use url::Url;

/// All institutions listed under one category code.
pub async fn list_for<S: ContentStore, P: PageSource>(
    fetcher: &Fetcher<S, P>,
    category_code: &str,
) -> Result<Vec<BankRecord>> {
    let site = fetcher.site();
    let url = site.listing_url(category_code);
    let html = fetcher.fetch(&url).await?;

    let records = parse_list_page(&html, &url, category_code, site)?;
    tracing::info!("{}: {} institutions", site.category_label(category_code), records.len());
    Ok(records)
}

/// Rows of the institutions table that have exactly two cells and a linked
/// name. Anything else is skipped.
pub fn parse_list_page(
    html: &str,
    listing_url: &str,
    category_code: &str,
    site: &SiteConfig,
) -> Result<Vec<BankRecord>> {
    let base = Url::parse(listing_url)?;
    let doc = Html::parse_document(html);

    let table_selector = parse_selector(&site.markers.list_table)?;
    let body_selector = parse_selector("tbody")?;
    let row_selector = parse_selector("tr")?;
    let cell_selector = parse_selector("td")?;
    let link_selector = parse_selector("a")?;

    let Some(table) = doc.select(&table_selector).next() else {
        tracing::warn!("No table found on: {}", listing_url);
        return Ok(Vec::new());
    };
    let Some(body) = table.select(&body_selector).next() else {
        tracing::warn!("Table without rows on: {}", listing_url);
        return Ok(Vec::new());
    };

    let category = site.category_label(category_code);
    let mut records = Vec::new();

    for row in body.select(&row_selector) {
        let cells: Vec<_> = row.select(&cell_selector).collect();
        let [name_cell, orgnr_cell] = cells.as_slice() else {
            continue;
        };

        let Some(link) = name_cell.select(&link_selector).next() else {
            tracing::debug!("Skipping row without link on {}", listing_url);
            continue;
        };
        let Some(href) = link.value().attr("href").filter(|h| !h.is_empty()) else {
            tracing::debug!("Skipping row with empty link on {}", listing_url);
            continue;
        };
        let Ok(details_url) = base.join(href) else {
            tracing::debug!("Skipping row with unusable link '{}'", href);
            continue;
        };

        records.push(BankRecord::new(
            stripped_text(link),
            stripped_text(*orgnr_cell),
            category.clone(),
            details_url.to_string(),
        ));
    }

    Ok(records)
}
