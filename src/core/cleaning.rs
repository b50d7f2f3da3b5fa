use crate::config::SiteConfig;
use crate::core::html::stripped_text;
use crate::utils::error::Result;
use crate::utils::validation::{parse_rewrite_selector, parse_selector};
use lol_html::{element, HtmlRewriter, Settings};
use scraper::{ElementRef, Html};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Carries a scheme, e.g. `https://...` or `mailto:...`.
    Absolute,
    /// Starts with `/`.
    RootRelative,
    /// Anything else, e.g. `details?id=22856`.
    Relative,
}

pub fn classify_link(value: &str) -> LinkKind {
    if value.starts_with('/') {
        LinkKind::RootRelative
    } else if Url::parse(value).is_ok() {
        LinkKind::Absolute
    } else {
        LinkKind::Relative
    }
}

/// Point a link found on a register page back at the live site.
pub fn rewrite_link(value: &str, site: &SiteConfig) -> String {
    match classify_link(value) {
        LinkKind::Absolute => value.to_string(),
        LinkKind::RootRelative => format!("{}{}", site.base_url, value),
        LinkKind::Relative => format!("{}{}{}", site.base_url, site.listing_dir, value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkScope {
    Untouched,
    Anchors,
    All,
}

/// Re-emit `markup` without script and style elements, rebasing the links
/// in `scope`. The n-th breadcrumb match is pointed at the local report when
/// `breadcrumbs[n]` is set, whether or not it had an `href`.
fn rewrite_markup(
    markup: &str,
    site: &SiteConfig,
    scope: LinkScope,
    breadcrumbs: &[bool],
) -> Result<String> {
    // element! unwraps the parsed selector
    parse_rewrite_selector(&site.markers.breadcrumb)?;

    let mut output = Vec::with_capacity(markup.len());
    let mut breadcrumb_index = 0usize;

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("[href]", |el| {
                    let rebase = match scope {
                        LinkScope::Untouched => false,
                        LinkScope::Anchors => el.tag_name() == "a",
                        LinkScope::All => true,
                    };
                    if rebase {
                        if let Some(href) = el.get_attribute("href") {
                            el.set_attribute("href", &rewrite_link(&href, site))?;
                        }
                    }
                    Ok(())
                }),
                element!("[src]", |el| {
                    if scope == LinkScope::All {
                        if let Some(src) = el.get_attribute("src") {
                            el.set_attribute("src", &rewrite_link(&src, site))?;
                        }
                    }
                    Ok(())
                }),
                // after the rebase handler, so the report link wins
                element!(site.markers.breadcrumb.as_str(), |el| {
                    if breadcrumbs.get(breadcrumb_index).copied().unwrap_or(false) {
                        el.set_attribute("href", &site.report_link)?;
                    }
                    breadcrumb_index += 1;
                    Ok(())
                }),
            ],
            ..Settings::new()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter.write(markup.as_bytes())?;
    rewriter.end()?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Keep only the institutions table, with its anchors pointing at the live
/// site. Without the table the whole page is kept and nothing is rewritten.
pub fn clean_list_page(doc: &Html, site: &SiteConfig) -> Result<String> {
    let table_selector = parse_selector(&site.markers.list_table)?;

    let Some(table) = doc.select(&table_selector).next() else {
        tracing::warn!(
            "No '{}' on listing page, caching the whole page",
            site.markers.list_table
        );
        return rewrite_markup(&doc.html(), site, LinkScope::Untouched, &[]);
    };

    rewrite_markup(&table.html(), site, LinkScope::Anchors, &[])
}

/// Keep only the page content container. Every `href`/`src` is rebased on
/// the live site, except the breadcrumb back to the register which is
/// pointed at the local report instead.
pub fn clean_detail_page(doc: &Html, site: &SiteConfig) -> Result<String> {
    let content_selector = parse_selector(&site.markers.page_content)?;
    let breadcrumb_selector = parse_selector(&site.markers.breadcrumb)?;
    let links_register = |el: ElementRef<'_>| stripped_text(el) == site.breadcrumb_label;

    match doc.select(&content_selector).next() {
        Some(content) => {
            let breadcrumbs: Vec<bool> =
                content.select(&breadcrumb_selector).map(links_register).collect();
            rewrite_markup(&content.html(), site, LinkScope::All, &breadcrumbs)
        }
        None => {
            tracing::warn!(
                "No '{}' on detail page, caching the whole page",
                site.markers.page_content
            );
            let breadcrumbs: Vec<bool> =
                doc.select(&breadcrumb_selector).map(links_register).collect();
            rewrite_markup(&doc.html(), site, LinkScope::All, &breadcrumbs)
        }
    }
}
