//! Case lookup pipeline: provider call, outcome classification and the
//! query log write that follows every attempt.

use std::any::Any;
use std::sync::Arc;

use chrono::{FixedOffset, Local, SecondsFormat, Utc};
use tracing::{debug, error, warn};

use super::case_provider::CaseProvider;
use crate::config::ProviderConfig;
use crate::constants::NO_RAW_PAYLOAD;
use crate::db::Store;
use crate::models::{CaseDetails, CaseQuery, CaseRecord, NewQueryRecord, QueryStatus};

/// What the handler gets back from one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found {
        query: CaseQuery,
        details: CaseDetails,
        fetched_on: String,
    },
    NotFound {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl LookupOutcome {
    #[must_use]
    pub const fn status(&self) -> QueryStatus {
        match self {
            Self::Found { .. } => QueryStatus::Success,
            Self::NotFound { .. } => QueryStatus::Error,
            Self::Failed { .. } => QueryStatus::Failed,
        }
    }
}

/// Writes exactly one query record for the attempt it was armed for.
///
/// `commit` writes the final status. If the guard is dropped uncommitted
/// (the request future was cancelled mid-lookup) a `failed` record is written
/// from a detached task instead.
struct QueryLogGuard {
    store: Store,
    pending: Option<NewQueryRecord>,
}

impl QueryLogGuard {
    fn arm(store: Store, query: CaseQuery, query_time: String) -> Self {
        Self {
            store,
            pending: Some(NewQueryRecord {
                query,
                query_time,
                raw_response: "{}".to_string(),
                status: QueryStatus::Failed,
            }),
        }
    }

    async fn commit(mut self, status: QueryStatus, raw_response: String) {
        if let Some(mut record) = self.pending.take() {
            record.status = status;
            record.raw_response = raw_response;
            write_record(&self.store, record).await;
        }
    }
}

impl Drop for QueryLogGuard {
    fn drop(&mut self) {
        let Some(record) = self.pending.take() else {
            return;
        };

        warn!(
            case_number = %record.query.case_number,
            "Lookup abandoned before completion, logging as failed"
        );

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.store.clone();
                handle.spawn(async move { write_record(&store, record).await });
            }
            Err(_) => error!("No runtime available to record abandoned lookup"),
        }
    }
}

/// Store failures end here; they never reach the caller.
async fn write_record(store: &Store, record: NewQueryRecord) {
    let status = record.status;
    match store.append_query(record).await {
        Ok(id) => debug!(id, %status, "Query logged"),
        Err(e) => {
            error!(error = %e, %status, "Failed to write query log");
            metrics::counter!("query_log_failures_total").increment(1);
        }
    }
}

/// JSON text snapshot of the provider's raw payload.
fn raw_snapshot(payload: Option<&str>) -> String {
    serde_json::Value::String(payload.unwrap_or(NO_RAW_PAYLOAD).to_string()).to_string()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Case lookup panicked".to_string())
}

pub struct LookupService {
    store: Store,
    provider: Arc<dyn CaseProvider>,
    display_offset: FixedOffset,
    zone_label: String,
}

impl LookupService {
    pub fn new(
        store: Store,
        provider: Arc<dyn CaseProvider>,
        config: &ProviderConfig,
    ) -> anyhow::Result<Self> {
        let display_offset = config.display_offset().ok_or_else(|| {
            anyhow::anyhow!(
                "Display offset out of range: {} minutes",
                config.display_utc_offset_minutes
            )
        })?;

        Ok(Self {
            store,
            provider,
            display_offset,
            zone_label: config.display_zone_label.clone(),
        })
    }

    /// Runs one lookup and logs it. The record is written before this returns.
    pub async fn lookup(&self, query: CaseQuery) -> LookupOutcome {
        let query_time = Local::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        let guard = QueryLogGuard::arm(self.store.clone(), query.clone(), query_time);

        // Own task so a panicking provider surfaces as a JoinError.
        let provider = Arc::clone(&self.provider);
        let task_query = query.clone();
        let result = tokio::spawn(async move { provider.lookup(&task_query).await }).await;

        let (outcome, raw_response) = match result {
            Ok(Ok(record)) => {
                let raw = raw_snapshot(record.raw_payload());
                (self.classify(query, record), raw)
            }
            Ok(Err(e)) => {
                error!(error = %e, case_number = %query.case_number, "Case provider failed");
                (
                    LookupOutcome::Failed {
                        message: e.to_string(),
                    },
                    "{}".to_string(),
                )
            }
            Err(e) => {
                let message = if e.is_panic() {
                    panic_message(e.into_panic().as_ref())
                } else {
                    "Case lookup was cancelled".to_string()
                };
                error!(error = %message, case_number = %query.case_number, "Case provider aborted");
                (LookupOutcome::Failed { message }, "{}".to_string())
            }
        };

        let status = outcome.status();
        guard.commit(status, raw_response).await;
        metrics::counter!("case_lookups_total", "status" => status.as_str()).increment(1);

        outcome
    }

    fn classify(&self, query: CaseQuery, record: CaseRecord) -> LookupOutcome {
        match record {
            CaseRecord::Found(details) => LookupOutcome::Found {
                query,
                details,
                fetched_on: self.fetched_on(),
            },
            CaseRecord::NotFound { message } => LookupOutcome::NotFound { message },
        }
    }

    fn fetched_on(&self) -> String {
        format!(
            "{} {}",
            Utc::now()
                .with_timezone(&self.display_offset)
                .format("%d-%m-%Y %H:%M"),
            self.zone_label
        )
    }
}
