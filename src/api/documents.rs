use axum::{
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::constants::messages;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub case_id: Option<String>,
}

/// Quotes and control characters cannot appear in a quoted filename.
fn attachment_name(case_id: &str) -> String {
    let stem: String = case_id
        .chars()
        .map(|c| if c.is_control() || c == '"' || c == '\\' { '_' } else { c })
        .collect();
    format!("{stem}.pdf")
}

/// `GET /download_pdf?case_id=...`
///
/// Placeholder content only; nothing is generated or stored.
pub async fn download_pdf(Query(query): Query<DownloadQuery>) -> Response {
    let Some(case_id) = query.case_id.filter(|id| !id.is_empty()) else {
        return (StatusCode::NOT_FOUND, messages::PDF_NOT_FOUND).into_response();
    };

    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&case_id));

    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        format!("Simulated PDF for case {case_id}"),
    )
        .into_response()
}
