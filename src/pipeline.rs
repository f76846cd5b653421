use std::sync::Arc;

use tracing::debug;

use crate::{
    config::{SettingsConfig, TransformerConfig},
    dispatcher::{DispatchResult, MailDispatcher},
    settings::{MemorySettingsStore, SettingsStore, SqliteSettingsStore},
    transformer::{apply_transformers, MessageTransformer},
    transformers::HtmlLayoutTransformer,
    OutgoingEmail,
};

/// Applies registered transformers to outgoing emails and hands the result
/// to a dispatcher.
///
/// Transformers run synchronously in registration order; the dispatcher is
/// invoked exactly once per email, after the full chain has been applied.
pub struct MailPipeline {
    transformers: Vec<Box<dyn MessageTransformer>>,
    dispatcher: Arc<dyn MailDispatcher>,
}

impl std::fmt::Debug for MailPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailPipeline")
            .field("transformers", &self.transformers.len())
            .field("dispatcher", &self.dispatcher.name())
            .finish()
    }
}

impl MailPipeline {
    /// Creates a new [`MailPipeline`] with no transformers registered.
    pub fn new(dispatcher: Arc<dyn MailDispatcher>) -> Self {
        Self {
            transformers: Vec::new(),
            dispatcher,
        }
    }

    /// Registers a transformer at the end of the chain.
    pub fn register(&mut self, transformer: Box<dyn MessageTransformer>) {
        self.transformers.push(transformer);
    }

    /// Applies the registered transformer chain to an email in place.
    ///
    /// This is the hook the host mail pipeline invokes synchronously before
    /// delivery; the transformed record is what actually gets sent.
    pub fn apply(&self, mail: &mut OutgoingEmail) {
        apply_transformers(&self.transformers, mail);
    }

    /// Applies the transformer chain and dispatches the email.
    ///
    /// Returns the message id on success.
    pub async fn send(&self, mut mail: OutgoingEmail) -> DispatchResult<String> {
        self.apply(&mut mail);
        debug!(
            message_id = %mail.message_id,
            dispatcher = self.dispatcher.name(),
            "Dispatching email"
        );
        self.dispatcher.dispatch(&mail).await
    }

    /// Returns a reference to the dispatcher.
    pub fn dispatcher(&self) -> &Arc<dyn MailDispatcher> {
        &self.dispatcher
    }
}

/// Builds a settings store from its configuration.
pub fn build_settings_store(config: &SettingsConfig) -> Arc<dyn SettingsStore> {
    match config {
        SettingsConfig::Memory => Arc::new(MemorySettingsStore::new()),
        SettingsConfig::Sqlite { path } => Arc::new(SqliteSettingsStore::new(path)),
    }
}

/// Builds the transformer chain described by the configuration.
pub fn build_transformers(
    configs: &[TransformerConfig],
    settings: Arc<dyn SettingsStore>,
) -> Vec<Box<dyn MessageTransformer>> {
    configs
        .iter()
        .map(|config| match config {
            TransformerConfig::HtmlLayout { logo_key } => Box::new(
                HtmlLayoutTransformer::with_logo_key(settings.clone(), logo_key.clone()),
            ) as Box<dyn MessageTransformer>,
        })
        .collect()
}
