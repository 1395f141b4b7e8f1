use serde::Serialize;

use crate::db::QueryLogEntry;
use crate::models::{CaseDetails, CaseQuery, OrderEntry};

const SUCCESS: &str = "success";
const ERROR: &str = "error";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseSummaryResponse {
    pub status: &'static str,
    pub case_title: String,
    pub court: String,
    pub judge: String,
    pub case_number_full: String,
    pub filing_date: String,
    pub next_hearing_date: String,
    pub case_status: String,
    pub latest_order: Option<OrderEntry>,
    pub fetched_on: String,
}

impl CaseSummaryResponse {
    /// Keeps only the most recent order.
    #[must_use]
    pub fn new(query: &CaseQuery, details: CaseDetails, fetched_on: String) -> Self {
        Self {
            status: SUCCESS,
            case_number_full: query.full_number(),
            latest_order: details.orders.into_iter().next(),
            case_title: details.case_title,
            court: details.court,
            judge: details.judge,
            filing_date: details.filing_date,
            next_hearing_date: details.next_hearing_date,
            case_status: details.status,
            fetched_on,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub status: &'static str,
    pub response: String,
}

impl AssistantResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            response: response.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryLogDto {
    pub id: i64,
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
    pub query_time: String,
    pub raw_response: Option<String>,
    pub status: String,
}

impl From<QueryLogEntry> for QueryLogDto {
    fn from(model: QueryLogEntry) -> Self {
        Self {
            id: model.id,
            case_type: model.case_type,
            case_number: model.case_number,
            filing_year: model.filing_year,
            query_time: model.query_time,
            raw_response: model.raw_response,
            status: model.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryHistoryResponse {
    pub status: &'static str,
    pub total: u64,
    pub queries: Vec<QueryLogDto>,
}

impl QueryHistoryResponse {
    #[must_use]
    pub const fn new(total: u64, queries: Vec<QueryLogDto>) -> Self {
        Self {
            status: SUCCESS,
            total,
            queries,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
    pub assistant_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}
