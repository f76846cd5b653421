use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    html::{render_layout, HTML_CONTENT_TYPE},
    settings::{SettingsStore, LOGO_URL_KEY},
    MailHeaders, MessageTransformer, OutgoingEmail,
};

/// Transformer that wraps the email body in the branded HTML layout.
///
/// The body is embedded in a fixed centered container, optionally prefixed
/// with a logo image whose URL is read from the settings store on every
/// transform. The header set is then replaced with a single
/// `Content-Type: text/html; charset=UTF-8` header so the message renders
/// as HTML; whatever headers the caller had set are discarded.
///
/// An absent or empty logo value omits the image block; a failed settings
/// read is logged and treated the same way. The transform itself has no
/// error path.
pub struct HtmlLayoutTransformer {
    settings: Arc<dyn SettingsStore>,
    logo_key: String,
}

impl HtmlLayoutTransformer {
    /// Creates a new [`HtmlLayoutTransformer`] reading the logo URL from
    /// [`LOGO_URL_KEY`].
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_logo_key(settings, LOGO_URL_KEY)
    }

    /// Creates a transformer reading the logo URL from a custom settings key.
    pub fn with_logo_key(settings: Arc<dyn SettingsStore>, logo_key: impl Into<String>) -> Self {
        let logo_key = logo_key.into();
        info!(logo_key = %logo_key, "HTML layout transformer initialized");
        Self { settings, logo_key }
    }

    /// Reads the configured logo URL, treating store failures and empty
    /// values as "no logo".
    fn logo_url(&self) -> Option<String> {
        match self.settings.get(&self.logo_key) {
            Ok(value) => value.filter(|url| !url.is_empty()),
            Err(e) => {
                error!(
                    key = %self.logo_key,
                    error = %e,
                    "Failed to read logo URL, omitting logo"
                );
                None
            }
        }
    }
}

impl MessageTransformer for HtmlLayoutTransformer {
    fn transform(&self, mail: &mut OutgoingEmail) {
        let logo_url = self.logo_url();
        debug!(
            message_id = %mail.message_id,
            logo = logo_url.is_some(),
            "Wrapping email body in HTML layout"
        );
        mail.message = render_layout(&mail.message, logo_url.as_deref());
        mail.headers = MailHeaders::Single(HTML_CONTENT_TYPE.to_string());
    }

    fn name(&self) -> &str {
        "html_layout"
    }
}
