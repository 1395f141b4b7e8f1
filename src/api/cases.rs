use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
};
use std::sync::Arc;

use super::{ApiError, AppState, CaseSummaryResponse};
use crate::constants::messages;
use crate::models::CaseQuery;
use crate::services::LookupOutcome;

const CASE_TYPE: &str = "caseType";
const CASE_NUMBER: &str = "caseNumber";
const FILING_YEAR: &str = "filingYear";

#[derive(Debug, Default)]
pub struct FetchCaseForm {
    pub case_type: Option<String>,
    pub case_number: Option<String>,
    pub filing_year: Option<String>,
}

impl FetchCaseForm {
    /// Records a form field. Repeated keys keep their first value.
    fn insert(&mut self, key: &str, value: impl Into<String>) {
        let slot = match key {
            CASE_TYPE => &mut self.case_type,
            CASE_NUMBER => &mut self.case_number,
            FILING_YEAR => &mut self.filing_year,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.into());
        }
    }

    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            form.insert(&key, value);
        }
        form
    }

    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation(format!("Multipart read error: {e}")))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation(format!("Multipart read error: {e}")))?;
            form.insert(&name, value);
        }
        Ok(form)
    }

    /// Presence check only; values are passed on untouched.
    pub fn into_query(self) -> Result<CaseQuery, ApiError> {
        match (self.case_type, self.case_number, self.filing_year) {
            (Some(case_type), Some(case_number), Some(filing_year)) => {
                Ok(CaseQuery::new(case_type, case_number, filing_year))
            }
            _ => Err(ApiError::validation(messages::FIELDS_REQUIRED)),
        }
    }
}

enum FormEncoding {
    UrlEncoded,
    Multipart,
    Unsupported,
}

fn form_encoding(request: &Request) -> FormEncoding {
    let Some(content_type) = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return FormEncoding::UrlEncoded;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/x-www-form-urlencoded" | "" => FormEncoding::UrlEncoded,
        "multipart/form-data" => FormEncoding::Multipart,
        _ => FormEncoding::Unsupported,
    }
}

async fn read_form(state: &Arc<AppState>, request: Request) -> Result<FetchCaseForm, ApiError> {
    match form_encoding(&request) {
        FormEncoding::UrlEncoded => {
            let body = Bytes::from_request(request, state)
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;
            Ok(FetchCaseForm::from_urlencoded(&body))
        }
        FormEncoding::Multipart => {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;
            FetchCaseForm::from_multipart(multipart).await
        }
        FormEncoding::Unsupported => Err(ApiError::validation(messages::UNSUPPORTED_FORM)),
    }
}

/// `POST /fetch_case`
///
/// Missing fields are rejected before the provider is called and are not
/// logged. Every other request produces exactly one query log record.
pub async fn fetch_case(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<CaseSummaryResponse>, ApiError> {
    let query = read_form(&state, request).await?.into_query()?;

    match state.lookup_service().lookup(query).await {
        LookupOutcome::Found {
            query,
            details,
            fetched_on,
        } => Ok(Json(CaseSummaryResponse::new(&query, details, fetched_on))),
        LookupOutcome::NotFound { message } | LookupOutcome::Failed { message } => {
            if message.is_empty() {
                Err(ApiError::CaseLookup(messages::CASE_LOOKUP_FAILED.to_string()))
            } else {
                Err(ApiError::CaseLookup(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_requires_all_three_fields() {
        let form = FetchCaseForm::from_urlencoded(b"caseType=CS&filingYear=2024");
        assert!(form.into_query().is_err());
    }

    #[test]
    fn empty_values_are_present() {
        let form = FetchCaseForm::from_urlencoded(b"caseType=&caseNumber=1234&filingYear=2023");
        let query = form.into_query().unwrap();
        assert_eq!(query.full_number(), "/1234/2023");
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let form = FetchCaseForm::from_urlencoded(
            b"caseType=CS&caseType=CRL.A&caseNumber=1234&filingYear=2023&extra=1",
        );
        let query = form.into_query().unwrap();
        assert_eq!(query.full_number(), "CS/1234/2023");
    }

    #[test]
    fn values_are_percent_decoded() {
        let form =
            FetchCaseForm::from_urlencoded(b"caseType=W.P.%28C%29&caseNumber=12+34&filingYear=2023");
        let query = form.into_query().unwrap();
        assert_eq!(query.full_number(), "W.P.(C)/12 34/2023");
    }
}
