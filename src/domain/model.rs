use serde::{Deserialize, Serialize};

/// One institution from the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    pub name: String,
    pub orgnr: String,
    pub category: String,
    pub details_url: String,
    pub fi_institutnummer: Option<String>,
    pub authorizations: Vec<String>,
}

/// Fields scraped from a detail page. `None` means the page did not carry
/// the corresponding marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDetails {
    pub details_url: String,
    pub fi_institutnummer: Option<String>,
    pub authorizations: Option<Vec<String>>,
}

impl BankRecord {
    pub fn new(name: String, orgnr: String, category: String, details_url: String) -> Self {
        Self {
            name,
            orgnr,
            category,
            details_url,
            fi_institutnummer: None,
            authorizations: Vec::new(),
        }
    }

    /// Overwrite only the fields the detail page actually published.
    pub fn merge(&mut self, details: BankDetails) {
        if let Some(nr) = details.fi_institutnummer {
            self.fi_institutnummer = Some(nr);
        }
        if let Some(items) = details.authorizations {
            self.authorizations = items;
        }
    }
}
