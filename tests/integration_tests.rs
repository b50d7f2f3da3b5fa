use anyhow::Result;
use fi_banks::core::{ContentStore, Pipeline};
use fi_banks::{
    BankPipeline, CliConfig, FileStore, Fetcher, HttpPageSource, ScrapeEngine, ScrapeError,
    SiteConfig,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

const LIST_PATH: &str = "/sv/vara-register/foretagsregistret/index";
const DETAIL_PATH: &str = "/sv/vara-register/foretagsregistret/details";

fn listing_html(rows: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><script>window.tracker = 1;</script></head><body>
<header><a href="/">Finansinspektionen</a></header>
<table id="institut"><thead><tr><th>Namn</th><th>Organisationsnummer</th></tr></thead>
<tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

fn detail_html(institutnummer: &str, authorizations: Option<&[&str]>) -> String {
    let list = authorizations
        .map(|items| {
            let items: String = items.iter().map(|i| format!("<li>{}</li>", i)).collect();
            format!(r#"<ul class="tillstand">{}</ul>"#, items)
        })
        .unwrap_or_default();
    format!(
        r#"<html><body><div class="page">
<a class="breadcrumb-item" href="/sv/vara-register/foretagsregistret/">Företagsregistret</a>
<dl class="funky"><dt>FI Institutnummer</dt><dd>{}</dd></dl>
{}</div></body></html>"#,
        institutnummer, list
    )
}

struct Upstream {
    server: MockServer,
}

impl Upstream {
    fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    fn site(&self) -> SiteConfig {
        SiteConfig {
            base_url: self.server.base_url(),
            ..SiteConfig::default()
        }
    }

    fn listing(&self, code: &str, rows: &str) -> httpmock::Mock<'_> {
        let body = listing_html(rows);
        self.server.mock(|when, then| {
            when.method(GET)
                .path(LIST_PATH)
                .query_param("huvudkategori", "Bank")
                .query_param("cat", code);
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body);
        })
    }

    fn detail(&self, id: &str, body: String) -> httpmock::Mock<'_> {
        self.server.mock(|when, then| {
            when.method(GET).path(DETAIL_PATH).query_param("id", id);
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body);
        })
    }
}

fn cli_config(temp_dir: &TempDir, html: bool) -> CliConfig {
    CliConfig {
        html,
        output: temp_dir.path().join("banks.html").display().to_string(),
        cache_dir: temp_dir.path().join("cache").display().to_string(),
        delay_secs: 0,
        site_config: None,
        verbose: false,
    }
}

fn engine(
    site: SiteConfig,
    config: CliConfig,
) -> Result<ScrapeEngine<BankPipeline<FileStore, HttpPageSource, CliConfig>>> {
    let fetcher = Fetcher::new(
        FileStore::new(config.cache_dir.clone()),
        HttpPageSource::new()?,
        site,
    )
    .with_delay(Duration::ZERO);
    Ok(ScrapeEngine::new(BankPipeline::new(fetcher, config)))
}

#[tokio::test]
async fn test_end_to_end_three_categories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let upstream = Upstream::start();

    let bank = upstream.listing(
        "BANK",
        r#"<tr><td><a href="details?id=1">Alfa Bank AB</a></td><td>556000-0001</td></tr>
<tr><td><a href="details?id=99">Trasig rad</a></td></tr>"#,
    );
    let mbank = upstream.listing(
        "MBANK",
        r#"<tr><td><a href="details?id=2">Beta Medlemsbank</a></td><td>716000-0002</td></tr>"#,
    );
    let spar = upstream.listing(
        "SPAR",
        r#"<tr><td><a href="details?id=3">Gamma Sparbank</a></td><td>826000-0003</td></tr>"#,
    );
    let d1 = upstream.detail("1", detail_html("10001", Some(&["Bankrörelse", "Inlåning"])));
    let d2 = upstream.detail("2", detail_html("20002", Some(&["Bankrörelse"])));
    let d3 = upstream.detail("3", detail_html("30003", None));

    let config = cli_config(&temp_dir, true);
    let report_path = config.output.clone();
    let engine = engine(upstream.site(), config)?;

    let records = engine.scrape_all().await?;

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alfa Bank AB", "Beta Medlemsbank", "Gamma Sparbank"]);

    let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Bankaktiebolag", "Medlemsbank", "Sparbank"]);

    assert_eq!(records[0].orgnr, "556000-0001");
    assert_eq!(
        records[0].details_url,
        format!("{}{}?id=1", upstream.server.base_url(), DETAIL_PATH)
    );
    assert_eq!(records[0].fi_institutnummer.as_deref(), Some("10001"));
    assert_eq!(records[0].authorizations, vec!["Bankrörelse", "Inlåning"]);
    assert_eq!(records[2].fi_institutnummer.as_deref(), Some("30003"));
    assert!(records[2].authorizations.is_empty());

    for mock in [&bank, &mbank, &spar, &d1, &d2, &d3] {
        mock.assert_hits(1);
    }

    let output = engine.pipeline().load(records).await?;
    assert_eq!(output, report_path);

    let report = std::fs::read_to_string(&report_path)?;
    assert!(report.contains("<p>Total banks: 3</p>"));
    assert!(!report.contains("Trasig rad"));

    let rows: Vec<&str> = report.split("</tr>").collect();
    let alfa = rows.iter().find(|r| r.contains("Alfa Bank AB")).unwrap();
    let gamma = rows.iter().find(|r| r.contains("Gamma Sparbank")).unwrap();
    assert!(alfa.contains(r#"<tr class="bank-row">"#));
    assert!(alfa.contains("<details><summary>Show</summary><ul><li>Bankrörelse</li><li>Inlåning</li></ul></details>"));
    assert!(gamma.contains(r#"<tr class="spar-row">"#));
    assert!(!gamma.contains("<details>"));

    // rendering found everything cached already
    d3.assert_hits(1);

    Ok(())
}

#[tokio::test]
async fn test_cached_pages_are_ground_truth() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let upstream = Upstream::start();

    let bank = upstream.listing(
        "BANK",
        r#"<tr><td><a href="details?id=1">Alfa Bank AB</a></td><td>556000-0001</td></tr>"#,
    );
    let mbank = upstream.listing("MBANK", "");
    let spar = upstream.listing("SPAR", "");
    let d1 = upstream.detail("1", detail_html("10001", Some(&["Bankrörelse"])));

    let first = engine(upstream.site(), cli_config(&temp_dir, false))?
        .scrape_all()
        .await?;
    let second = engine(upstream.site(), cli_config(&temp_dir, false))?
        .scrape_all()
        .await?;

    assert_eq!(first, second);
    for mock in [&bank, &mbank, &spar, &d1] {
        mock.assert_hits(1);
    }

    // four distinct URLs, four files
    let cached = std::fs::read_dir(temp_dir.path().join("cache"))?.count();
    assert_eq!(cached, 4);

    Ok(())
}

#[tokio::test]
async fn test_cached_detail_page_is_cleaned() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let upstream = Upstream::start();
    upstream.listing(
        "BANK",
        r#"<tr><td><a href="details?id=1">Alfa Bank AB</a></td><td>556000-0001</td></tr>"#,
    );
    upstream.listing("MBANK", "");
    upstream.listing("SPAR", "");
    upstream.detail("1", detail_html("10001", None));

    let config = cli_config(&temp_dir, false);
    let engine = engine(upstream.site(), config)?;
    let records = engine.scrape_all().await?;

    let store = engine.pipeline().fetcher().store();
    let listing = store
        .read(&upstream.site().listing_url("BANK"))
        .await?
        .expect("listing cached");
    assert!(listing.starts_with(r#"<table id="institut">"#));
    assert!(!listing.contains("window.tracker"));
    assert!(!listing.contains("Finansinspektionen"));

    let detail = store
        .read(&records[0].details_url)
        .await?
        .expect("detail cached");
    assert!(detail.starts_with(r#"<div class="page">"#));
    assert!(detail.contains(r#"href="../banks.html""#));

    Ok(())
}

#[tokio::test]
async fn test_http_failure_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let upstream = Upstream::start();

    let bank = upstream.server.mock(|when, then| {
        when.method(GET).path(LIST_PATH).query_param("cat", "BANK");
        then.status(503);
    });
    let mbank = upstream.listing("MBANK", "");

    let result = engine(upstream.site(), cli_config(&temp_dir, true))?
        .run()
        .await;

    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatusError { status: 503, .. })
    ));
    bank.assert_hits(1);
    mbank.assert_hits(0);
    assert!(!temp_dir.path().join("banks.html").exists());

    Ok(())
}
