use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use mailer::{ContactNotifier, LogMailer, Mailer, WebhookMailer};
use matcher::IngredientMatcher;
use std::sync::Arc;
use std::time::Duration;
use store::InstructionStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Instruction matcher over the configured store
    pub matcher: IngredientMatcher,

    /// Contact-form notifier
    pub notifier: ContactNotifier,
}

impl ServerState {
    /// Build the store, mailer and matcher described by `config`, importing
    /// the seed file when one is configured.
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = config.store.build()?;

        if let Some(seed_file) = &config.seed_file {
            store::seed_from_file(store.as_ref(), seed_file).await?;
        }

        let mailer: Arc<dyn Mailer> = match &config.contact.relay_url {
            Some(url) => Arc::new(
                WebhookMailer::new(
                    url.clone(),
                    Duration::from_secs(config.contact.relay_timeout_secs),
                )
                .map_err(|e| ServerError::Config(e.to_string()))?,
            ),
            None => {
                tracing::warn!("No mail relay configured, contact emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        Ok(Self::with_components(config, store, mailer))
    }

    /// Assemble state from already-built components.
    pub fn with_components(
        config: ServerConfig,
        store: Arc<dyn InstructionStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let notifier = ContactNotifier::new(mailer, config.contact.settings.clone());
        Self {
            config: Arc::new(config),
            matcher: IngredientMatcher::new(store),
            notifier,
        }
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
