use super::ApiError;
use crate::constants::limits::MAX_HISTORY_LIMIT;
use crate::models::QueryStatus;

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_HISTORY_LIMIT}"
        )));
    }
    Ok(limit)
}

pub fn validate_status_filter(status: &str) -> Result<QueryStatus, ApiError> {
    QueryStatus::parse(status).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid status: {status}. Expected success, error or failed"
        ))
    })
}
