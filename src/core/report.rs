//! Static HTML report.
//!
//! The report is one self-contained document with inline CSS and an inline
//! column sorter. Institution names link to the cached detail pages, so the
//! report stays browsable offline as long as the cache directory sits next
//! to it.

use crate::config::SiteConfig;
use crate::core::fetcher::Fetcher;
use crate::domain::model::BankRecord;
use crate::domain::ports::{ContentStore, PageSource};
use crate::utils::error::Result;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_FILE: &str = "banks.html";

/// Columns as `(header, numeric sort)`.
const COLUMNS: &[(&str, bool)] = &[
    ("Name", false),
    ("Organisationsnummer", true),
    ("Category", false),
    ("FI Institutnummer", true),
    ("Authorizations", false),
];

/// Render the report for `records` in their given order.
///
/// Every linked detail page must exist in the store, so a record whose page
/// is not cached yet is fetched here, live delay included.
pub async fn render_report<S: ContentStore, P: PageSource>(
    fetcher: &Fetcher<S, P>,
    records: &[BankRecord],
    generated_at: &str,
) -> Result<String> {
    let mut rows = String::new();

    for record in records {
        if !fetcher.store().contains(&record.details_url).await? {
            tracing::info!("Detail page for {} not cached, fetching", record.name);
            fetcher.fetch(&record.details_url).await?;
        }

        let href = local_href(&fetcher.store().locate(&record.details_url));
        rows.push_str(&render_row(record, &href, fetcher.site()));
    }

    Ok(render_document(&rows, records.len(), generated_at))
}

pub fn write_report(path: &Path, html: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    tracing::info!("HTML written to {}", path.display());
    Ok(path.to_path_buf())
}

/// Store location as a link target; forward slashes on every platform.
fn local_href(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub fn render_row(record: &BankRecord, href: &str, site: &SiteConfig) -> String {
    let authorizations = if record.authorizations.is_empty() {
        String::new()
    } else {
        let items: String = record
            .authorizations
            .iter()
            .map(|item| format!("<li>{}</li>", html_escape(item)))
            .collect();
        format!("<details><summary>Show</summary><ul>{}</ul></details>", items)
    };

    format!(
        r#"<tr class="{class}"><td><a href="{href}" target="_blank">{name}</a></td><td>{orgnr}</td><td>{category}</td><td>{institutnummer}</td><td>{authorizations}</td></tr>"#,
        class = site.row_class(&record.category),
        href = html_escape(href),
        name = html_escape(&record.name),
        orgnr = html_escape(&record.orgnr),
        category = html_escape(&record.category),
        institutnummer = html_escape(record.fi_institutnummer.as_deref().unwrap_or("")),
        authorizations = authorizations,
    )
}

pub fn render_document(rows: &str, total: usize, generated_at: &str) -> String {
    let mut sort_attrs = String::new();
    let mut headers = String::new();
    for (n, (title, numeric)) in COLUMNS.iter().enumerate() {
        let _ = write!(sort_attrs, r#" data-sort-dir-{}="asc""#, n);
        let _ = write!(
            headers,
            "\n  <th onclick=\"sortTable({}, {})\">{}</th>",
            n, numeric, title
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="sv">
<head>
<meta charset="utf-8">
<title>FI Banks</title>
<style>{css}</style>
<script>{js}</script>
</head>
<body>
<h1>Swedish Banks (FI Företagsregistret)</h1>
<p>Total banks: {total}</p>
<p class="generated">Generated {generated_at}</p>
<table id="banksTable"{sort_attrs}>
<thead>
<tr>{headers}
</tr>
</thead>
<tbody>
{rows}
</tbody>
</table>
</body>
</html>
"#,
        css = inline_css(),
        js = inline_javascript(),
        total = total,
        generated_at = html_escape(generated_at),
        sort_attrs = sort_attrs,
        headers = headers,
        rows = rows,
    )
}

fn inline_css() -> &'static str {
    r#"
table {
  border-collapse: collapse;
  width: 100%;
  font-family: sans-serif;
  font-size: 14px;
}
th, td {
  border: 1px solid #ccc;
  padding: 4px 8px;
}
th {
  background: #f0f0f0;
  cursor: pointer;
}
details summary {
  cursor: pointer;
  color: #0074d9;
}
.generated {
  color: #777;
  font-size: 12px;
}
.bank-row {
  background-color: #d9f2d9;
}
.mbank-row {
  background-color: #fff7cc;
}
.spar-row {
  background-color: #ffe0cc;
}
tr:has(details[open]) {
  background: #fafafa !important;
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
function sortTable(n, numeric) {
  var table = document.getElementById("banksTable");
  var rows = Array.from(table.tBodies[0].rows);
  var dir = table.getAttribute("data-sort-dir-" + n) === "asc" ? "desc" : "asc";
  rows.sort(function(a, b) {
    var x = a.cells[n].innerText.trim();
    var y = b.cells[n].innerText.trim();
    if (numeric) {
      x = parseInt(x.replace(/\D/g, "") || "0", 10);
      y = parseInt(y.replace(/\D/g, "") || "0", 10);
    }
    if (x < y) return dir === "asc" ? -1 : 1;
    if (x > y) return dir === "asc" ? 1 : -1;
    return 0;
  });
  var tbody = table.tBodies[0];
  rows.forEach(function(r) { tbody.appendChild(r); });
  table.setAttribute("data-sort-dir-" + n, dir);
}
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
