use axum::{Json, body::Bytes, extract::State};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{ApiError, AppState, AssistantResponse};
use crate::constants::messages;
use crate::models::CaseContext;

#[derive(Debug, PartialEq)]
pub struct AskRequest {
    pub question: String,
    pub context: Option<CaseContext>,
}

/// Parses the JSON body by hand so every malformed shape maps to a 400.
pub fn parse_ask_request(body: &[u8]) -> Result<AskRequest, ApiError> {
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) if !fields.is_empty() => fields,
        _ => return Err(ApiError::validation(messages::INVALID_REQUEST)),
    };

    let question = match fields.get("question") {
        Some(Value::String(question)) if !question.is_empty() => question.clone(),
        _ => return Err(ApiError::validation(messages::NO_QUESTION)),
    };

    Ok(AskRequest {
        question,
        context: parse_context(&fields)?,
    })
}

/// Empty values of any JSON type mean "no context".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn parse_context(fields: &Map<String, Value>) -> Result<Option<CaseContext>, ApiError> {
    match fields.get("case_context") {
        None => Ok(None),
        Some(value) if is_blank(value) => Ok(None),
        Some(Value::Object(context)) => Ok(Some(CaseContext(context.clone()))),
        Some(_) => Err(ApiError::validation(messages::INVALID_REQUEST)),
    }
}

/// `POST /ask_ai`
///
/// Assistant outages come back as a 200 with fallback text; only a fault in
/// the bridge task itself yields a 500.
pub async fn ask_ai(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AssistantResponse>, ApiError> {
    let AskRequest { question, context } = parse_ask_request(&body)?;

    let assistant = Arc::clone(state.assistant());
    let answer = tokio::spawn(async move { assistant.ask(&question, context.as_ref()).await })
        .await
        .map_err(|e| ApiError::AssistantError(e.to_string()))?;

    Ok(Json(AssistantResponse::new(answer)))
}
