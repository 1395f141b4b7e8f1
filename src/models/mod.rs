pub mod case;
pub mod query;

pub use case::{CaseContext, CaseDetails, CaseOutcome, CaseQuery, CaseRecord, OrderEntry};
pub use query::{NewQueryRecord, QueryStatus};
