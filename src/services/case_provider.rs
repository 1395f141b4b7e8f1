//! Case data providers.
//!
//! The only implementation today is [`MockCaseProvider`], which resolves
//! lookups from a fixed table of canned cases keyed on case number and
//! synthesizes a generic record for anything else. A real registry adapter
//! would implement the same [`CaseProvider`] trait.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::{CaseDetails, CaseQuery, CaseRecord, OrderEntry};

/// Failures a provider cannot express as a "not found" record.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Case source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CaseProvider: Send + Sync {
    /// Resolves one lookup. "Not found" is a [`CaseRecord::NotFound`], not an error.
    async fn lookup(&self, query: &CaseQuery) -> Result<CaseRecord, ProviderError>;
}

const COURT: &str = "Delhi High Court";
const RAW_SNIPPET: &str = "<html><body>Simulated HTML content</body></html>";

#[derive(Debug, Clone, Copy)]
struct OrderTemplate {
    date: &'static str,
    order_type: &'static str,
    description: &'static str,
    slug: &'static str,
    size: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct CaseTemplate {
    title: &'static str,
    judge: &'static str,
    filing_date: &'static str,
    next_hearing_date: &'static str,
    status: &'static str,
    orders: &'static [OrderTemplate],
}

#[derive(Debug, Clone, Copy)]
enum CannedResponse {
    Case(CaseTemplate),
    NotFound(&'static str),
}

const CANNED_CASES: &[(&str, CannedResponse)] = &[
    (
        "1234",
        CannedResponse::Case(CaseTemplate {
            title: "Sharma Enterprises vs Delhi Municipal Corporation",
            judge: "Hon'ble Justice A. Kumar",
            filing_date: "15-03-2023",
            next_hearing_date: "10-12-2023",
            status: "Pending",
            orders: &[OrderTemplate {
                date: "05-11-2023",
                order_type: "Interim Order",
                description: "Respondent directed to file reply within 4 weeks",
                slug: "order1",
                size: "45KB",
            }],
        }),
    ),
    (
        "5678",
        CannedResponse::Case(CaseTemplate {
            title: "Verma & Sons vs State of NCT Delhi",
            judge: "Hon'ble Justice P. Singh",
            filing_date: "01-06-2022",
            next_hearing_date: "N/A",
            status: "Disposed",
            orders: &[OrderTemplate {
                date: "25-01-2024",
                order_type: "Final Judgment",
                description: "Petition dismissed.",
                slug: "judgment1",
                size: "120KB",
            }],
        }),
    ),
    (
        "999",
        CannedResponse::NotFound("Case not found or invalid input."),
    ),
];

const GENERIC_ORDERS: &[OrderTemplate] = &[OrderTemplate {
    date: "01-07-2024",
    order_type: "Status Report",
    description: "Status report filed by parties.",
    slug: "order1",
    size: "20KB",
}];

fn build_orders(query: &CaseQuery, orders: &[OrderTemplate]) -> Vec<OrderEntry> {
    orders
        .iter()
        .map(|order| OrderEntry {
            date: order.date.to_string(),
            order_type: order.order_type.to_string(),
            description: order.description.to_string(),
            pdf_link: query.document_link(order.slug),
            pdf_size: order.size.to_string(),
        })
        .collect()
}

fn render_template(query: &CaseQuery, template: &CaseTemplate) -> CaseDetails {
    CaseDetails {
        case_title: template.title.to_string(),
        court: COURT.to_string(),
        judge: template.judge.to_string(),
        filing_date: template.filing_date.to_string(),
        next_hearing_date: template.next_hearing_date.to_string(),
        status: template.status.to_string(),
        orders: build_orders(query, template.orders),
        raw_html_snippet: Some(RAW_SNIPPET.to_string()),
    }
}

/// Default for case numbers missing from the canned table.
fn generic_case(query: &CaseQuery) -> CaseDetails {
    CaseDetails {
        case_title: format!("Generic Case {} vs Others", query.case_number),
        court: COURT.to_string(),
        judge: "Hon'ble Justice J. Doe".to_string(),
        filing_date: "01-01-2023".to_string(),
        next_hearing_date: "N/A".to_string(),
        status: "Active".to_string(),
        orders: build_orders(query, GENERIC_ORDERS),
        raw_html_snippet: Some(RAW_SNIPPET.to_string()),
    }
}

/// Deterministic stand-in for a court registry.
#[derive(Debug, Clone, Default)]
pub struct MockCaseProvider {
    latency: Duration,
}

impl MockCaseProvider {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Pure resolution step, without the simulated delay.
    #[must_use]
    pub fn resolve(query: &CaseQuery) -> CaseRecord {
        let canned = CANNED_CASES
            .iter()
            .find(|(number, _)| *number == query.case_number)
            .map(|(_, response)| response);

        match canned {
            Some(CannedResponse::Case(template)) => {
                CaseRecord::Found(render_template(query, template))
            }
            Some(CannedResponse::NotFound(message)) => CaseRecord::NotFound {
                message: (*message).to_string(),
            },
            None => CaseRecord::Found(generic_case(query)),
        }
    }
}

#[async_trait]
impl CaseProvider for MockCaseProvider {
    async fn lookup(&self, query: &CaseQuery) -> Result<CaseRecord, ProviderError> {
        debug!(
            case_type = %query.case_type,
            case_number = %query.case_number,
            filing_year = %query.filing_year,
            "Simulating case fetch"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(Self::resolve(query))
    }
}
