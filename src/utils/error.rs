use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid CSS selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("HTML rewrite failed: {0}")]
    RewriteError(#[from] lol_html::errors::RewritingError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ScrapeError {
    /// Short hint printed next to a fatal error.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::RequestError(_) | ScrapeError::HttpStatusError { .. } => {
                "Check network access to the register and re-run; cached pages are kept"
            }
            ScrapeError::IoError(_) => "Check that the cache directory and report path are writable",
            ScrapeError::UrlError(_) => "Check base_url and list_path in the site profile",
            ScrapeError::SelectorError { .. } => "Fix the selector in the site profile",
            ScrapeError::RewriteError(_) => "Remove the cached page and re-run to fetch it again",
            ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. } => {
                "Fix the command line arguments or the site profile"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
