use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::Store;
use crate::services::{Assistant, CaseProvider, LookupService, MockCaseProvider, OpenAiAssistant};

/// Components built once at startup from the loaded [`Config`].
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub lookup_service: Arc<LookupService>,

    pub assistant: Arc<dyn Assistant>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let provider = Arc::new(MockCaseProvider::new(Duration::from_millis(
            config.provider.simulated_latency_ms,
        ))) as Arc<dyn CaseProvider>;

        let assistant = Arc::new(OpenAiAssistant::new(&config.assistant)?) as Arc<dyn Assistant>;

        Self::with_components(config, provider, assistant).await
    }

    /// Like [`SharedState::new`] with caller-supplied provider and assistant.
    pub async fn with_components(
        config: Config,
        provider: Arc<dyn CaseProvider>,
        assistant: Arc<dyn Assistant>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let lookup_service = Arc::new(LookupService::new(
            store.clone(),
            provider,
            &config.provider,
        )?);

        Ok(Self {
            config: Arc::new(config),
            store,
            lookup_service,
            assistant,
        })
    }
}
