pub mod assistant;
pub use assistant::{Assistant, OpenAiAssistant};

pub mod case_provider;
pub use case_provider::{CaseProvider, MockCaseProvider, ProviderError};

pub mod lookup;
pub use lookup::{LookupOutcome, LookupService};
