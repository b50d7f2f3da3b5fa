use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    parse_rewrite_selector, parse_selector, validate_non_empty_string, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upstream site profile: where the register lives and which markup it
/// is expected to carry. `Default` is Finansinspektionen's register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host, no trailing slash.
    pub base_url: String,
    /// Directory that bare relative links on register pages resolve into.
    pub listing_dir: String,
    pub list_path: String,
    /// Value of the `huvudkategori` query parameter.
    pub main_category: String,
    pub categories: Vec<CategoryConfig>,
    pub markers: MarkupMarkers,
    /// Visible text of the breadcrumb that points back at the listing.
    pub breadcrumb_label: String,
    /// Replacement target for that breadcrumb, relative to a cached page.
    pub report_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub row_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupMarkers {
    pub list_table: String,
    pub page_content: String,
    pub definitions: String,
    pub authorizations: String,
    pub breadcrumb: String,
    /// Matched case-insensitively inside a `dt`.
    pub institutnummer_term: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.fi.se".to_string(),
            listing_dir: "/sv/vara-register/foretagsregistret/".to_string(),
            list_path: "/sv/vara-register/foretagsregistret/index".to_string(),
            main_category: "Bank".to_string(),
            categories: vec![
                CategoryConfig::new("BANK", "Bankaktiebolag", "bank-row"),
                CategoryConfig::new("MBANK", "Medlemsbank", "mbank-row"),
                CategoryConfig::new("SPAR", "Sparbank", "spar-row"),
            ],
            markers: MarkupMarkers::default(),
            breadcrumb_label: "Företagsregistret".to_string(),
            report_link: "../banks.html".to_string(),
        }
    }
}

impl Default for MarkupMarkers {
    fn default() -> Self {
        Self {
            list_table: "table#institut".to_string(),
            page_content: "div.page".to_string(),
            definitions: "dl.funky".to_string(),
            authorizations: "ul.tillstand".to_string(),
            breadcrumb: "a.breadcrumb-item".to_string(),
            institutnummer_term: "institutnummer".to_string(),
        }
    }
}

impl CategoryConfig {
    pub fn new(code: &str, label: &str, row_class: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            row_class: row_class.to_string(),
        }
    }
}

impl SiteConfig {
    /// Load a site profile from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The listing page for one category code. The exact text matters: it
    /// is the cache key.
    pub fn listing_url(&self, code: &str) -> String {
        format!(
            "{}{}?huvudkategori={}&cat={}&area=#results",
            self.base_url, self.list_path, self.main_category, code
        )
    }

    pub fn is_listing_url(&self, url: &str) -> bool {
        url.contains(&self.list_path)
    }

    pub fn category_codes(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.code.as_str())
    }

    /// Unknown codes pass through unchanged.
    pub fn category_label(&self, code: &str) -> String {
        self.categories
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// Row style for a category label; empty for unknown labels.
    pub fn row_class(&self, label: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.row_class.as_str())
            .unwrap_or("")
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;

        for (field, path) in [("list_path", &self.list_path), ("listing_dir", &self.listing_dir)] {
            if !path.starts_with('/') {
                return Err(ScrapeError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: path.clone(),
                    reason: "Path must start with '/'".to_string(),
                });
            }
        }

        if self.categories.is_empty() {
            return Err(ScrapeError::ConfigValidationError {
                field: "categories".to_string(),
                message: "At least one category is required".to_string(),
            });
        }
        for category in &self.categories {
            validate_non_empty_string("categories.code", &category.code)?;
            validate_non_empty_string("categories.label", &category.label)?;
        }

        for css in [
            &self.markers.list_table,
            &self.markers.page_content,
            &self.markers.definitions,
            &self.markers.authorizations,
            &self.markers.breadcrumb,
        ] {
            parse_selector(css)?;
        }
        parse_rewrite_selector(&self.markers.breadcrumb)?;
        validate_non_empty_string("markers.institutnummer_term", &self.markers.institutnummer_term)?;
        validate_non_empty_string("breadcrumb_label", &self.breadcrumb_label)?;

        Ok(())
    }
}
