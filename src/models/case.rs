use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three identifiers a lookup is keyed on, taken verbatim from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseQuery {
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
}

impl CaseQuery {
    pub fn new(
        case_type: impl Into<String>,
        case_number: impl Into<String>,
        filing_year: impl Into<String>,
    ) -> Self {
        Self {
            case_type: case_type.into(),
            case_number: case_number.into(),
            filing_year: filing_year.into(),
        }
    }

    /// `type/number/year`, as shown to users.
    #[must_use]
    pub fn full_number(&self) -> String {
        format!("{}/{}/{}", self.case_type, self.case_number, self.filing_year)
    }

    /// Document id for one order of this case: `type-number-year-slug`.
    #[must_use]
    pub fn document_id(&self, order_slug: &str) -> String {
        format!(
            "{}-{}-{}-{}",
            self.case_type, self.case_number, self.filing_year, order_slug
        )
    }

    #[must_use]
    pub fn document_link(&self, order_slug: &str) -> String {
        format!("/download_pdf?case_id={}", self.document_id(order_slug))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub date: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub description: String,
    pub pdf_link: String,
    pub pdf_size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub case_title: String,
    pub court: String,
    pub judge: String,
    pub filing_date: String,
    pub next_hearing_date: String,
    pub status: String,
    pub orders: Vec<OrderEntry>,
    pub raw_html_snippet: Option<String>,
}

impl CaseDetails {
    #[must_use]
    pub fn latest_order(&self) -> Option<&OrderEntry> {
        self.orders.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOutcome {
    Success,
    Error,
}

/// Result of asking a provider about one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "overall_status")]
pub enum CaseRecord {
    #[serde(rename = "success")]
    Found(CaseDetails),
    #[serde(rename = "error")]
    NotFound { message: String },
}

impl CaseRecord {
    #[must_use]
    pub const fn outcome(&self) -> CaseOutcome {
        match self {
            Self::Found(_) => CaseOutcome::Success,
            Self::NotFound { .. } => CaseOutcome::Error,
        }
    }

    /// Raw upstream payload, if the provider kept one.
    #[must_use]
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            Self::Found(details) => details.raw_html_snippet.as_deref(),
            Self::NotFound { .. } => None,
        }
    }
}

/// Free-form case summary a client may attach to an assistant question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseContext(pub Map<String, Value>);

impl CaseContext {
    /// Renders one field for a prompt; absent or null fields become `N/A`.
    #[must_use]
    pub fn field(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => "N/A".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Case: {}, Number: {}, Status: {}",
            self.field("case_title"),
            self.field("case_number_full"),
            self.field("case_status")
        )
    }
}
