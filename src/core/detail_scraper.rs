use crate::config::SiteConfig;
use crate::core::fetcher::Fetcher;
use crate::core::html::{collapsed_text, stripped_text};
use crate::domain::model::BankDetails;
use crate::domain::ports::{ContentStore, PageSource};
use crate::utils::error::Result;
use crate::utils::validation::parse_selector;
use scraper::Html;

pub async fn details_for<S: ContentStore, P: PageSource>(
    fetcher: &Fetcher<S, P>,
    url: &str,
) -> Result<BankDetails> {
    let html = fetcher.fetch(url).await?;
    parse_detail_page(&html, url, fetcher.site())
}

/// Institution number and authorizations. Each is independently optional.
pub fn parse_detail_page(html: &str, url: &str, site: &SiteConfig) -> Result<BankDetails> {
    let doc = Html::parse_document(html);

    Ok(BankDetails {
        details_url: url.to_string(),
        fi_institutnummer: find_institutnummer(&doc, site)?,
        authorizations: find_authorizations(&doc, site)?,
    })
}

fn find_institutnummer(doc: &Html, site: &SiteConfig) -> Result<Option<String>> {
    let list_selector = parse_selector(&site.markers.definitions)?;
    let entry_selector = parse_selector("dt, dd")?;

    let Some(list) = doc.select(&list_selector).next() else {
        tracing::debug!("No '{}' on page", site.markers.definitions);
        return Ok(None);
    };

    let term = site.markers.institutnummer_term.to_lowercase();
    let mut entries = list.select(&entry_selector);

    // first matching dt, then the next dd after it. Only entries inside the
    // definitions list are searched, not the rest of the page.
    let found = entries.any(|el| {
        el.value().name() == "dt" && stripped_text(el).to_lowercase().contains(&term)
    });
    if !found {
        return Ok(None);
    }

    Ok(entries
        .find(|el| el.value().name() == "dd")
        .map(stripped_text))
}

fn find_authorizations(doc: &Html, site: &SiteConfig) -> Result<Option<Vec<String>>> {
    let list_selector = parse_selector(&site.markers.authorizations)?;
    let item_selector = parse_selector("li")?;

    let Some(list) = doc.select(&list_selector).next() else {
        tracing::debug!("No '{}' on page", site.markers.authorizations);
        return Ok(None);
    };

    let items = list
        .select(&item_selector)
        .map(collapsed_text)
        .filter(|text| !text.is_empty())
        .collect();

    Ok(Some(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.fi.se/sv/vara-register/foretagsregistret/details?id=1";

    #[test]
    fn test_full_detail_page() {
        let html = r#"<div class="page">
<dl class="funky">
  <dt>Organisationsnummer</dt><dd>556000-0001</dd>
  <dt>FI Institutnummer</dt><dd> 10001 </dd>
</dl>
<ul class="tillstand">
  <li>Bankrörelse <span>(2004:297)</span></li>
  <li>   </li>
  <li>Försäkringsförmedling,
      livförsäkring</li>
</ul></div>"#;

        let details = parse_detail_page(html, URL, &SiteConfig::default()).unwrap();

        assert_eq!(details.details_url, URL);
        assert_eq!(details.fi_institutnummer.as_deref(), Some("10001"));
        assert_eq!(
            details.authorizations,
            Some(vec![
                "Bankrörelse (2004:297)".to_string(),
                "Försäkringsförmedling, livförsäkring".to_string(),
            ])
        );
    }

    #[test]
    fn test_term_match_is_case_insensitive() {
        let html = r#"<dl class="funky"><dt>INSTITUTNUMMER</dt><dd>42</dd></dl>"#;
        let details = parse_detail_page(html, URL, &SiteConfig::default()).unwrap();
        assert_eq!(details.fi_institutnummer.as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_markers_yield_absent_fields() {
        let html = r#"<div class="page"><dl><dt>Institutnummer</dt><dd>1</dd></dl>
<ul><li>Bankrörelse</li></ul></div>"#;

        let details = parse_detail_page(html, URL, &SiteConfig::default()).unwrap();

        assert_eq!(details.fi_institutnummer, None);
        assert_eq!(details.authorizations, None);
    }

    #[test]
    fn test_term_without_value() {
        let html = r#"<dl class="funky"><dd>före</dd><dt>Institutnummer</dt></dl>
<ul class="tillstand"></ul>"#;

        let details = parse_detail_page(html, URL, &SiteConfig::default()).unwrap();

        assert_eq!(details.fi_institutnummer, None);
        assert_eq!(details.authorizations, Some(vec![]));
    }
}
